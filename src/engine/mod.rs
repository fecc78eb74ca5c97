pub mod flash;
pub mod random;
pub mod trainer;

pub use trainer::{KeyboardTrainer, KeydownOutcome};
