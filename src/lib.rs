//! Typing speed test engine and its terminal front end.
//!
//! The engine (`engine`, `generator`, `session`) is free of terminal I/O; the binary
//! wires it to crossterm and ratatui through `app`, `event` and `ui`.

pub mod app;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod engine;
pub mod event;
pub mod generator;
pub mod language;
pub mod session;
pub mod ui;
