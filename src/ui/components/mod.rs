pub mod keyboard_diagram;
pub mod tally_panel;
