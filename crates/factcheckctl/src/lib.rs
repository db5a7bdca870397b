//! factcheckctl library - exposes modules for testing

pub mod cli;
pub mod commands;
pub mod exit_codes;
pub mod logging;
pub mod render;
pub mod spinner;
