//! Mailform: a four-field email form for the terminal.
//!
//! The interesting part lives in [`form`]; everything else wires it to a
//! terminal, a config file and a log file.

pub mod action;
pub mod app;
pub mod cli;
pub mod config;
pub mod errors;
pub mod form;
pub mod keymap;
pub mod logging;
pub mod sender;
pub mod theme;
pub mod tui;
