//! Worker side of the GUI: owns the tokio runtime and the form controller.

pub mod commands;
pub mod runtime;
