//! Fontwire CLI library.

pub mod cli;
pub mod commands;
pub mod preview;
