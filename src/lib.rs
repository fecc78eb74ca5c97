// Library target for integration tests and criterion benchmarks.
// The binary entry point is main.rs; this file re-declares the module tree so
// that tests can drive the trainer via `keyhunt::engine::*` without a terminal.
// Parts of the UI are only exercised through the binary.
#![allow(dead_code)]

pub mod app;
pub mod config;
pub mod engine;
pub mod keyboard;
pub mod session;
pub mod ui;

// Private: terminal plumbing only the binary drives
mod event;
mod logging;
