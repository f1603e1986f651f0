//! Backend-to-UI events and error modeling for the desktop console.

use client_core::ConsoleState;

#[derive(Debug)]
pub enum UiEvent {
    /// Snapshot published by the form controller after every state change.
    StateChanged(Box<ConsoleState>),
    Info(String),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Configuration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn new(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            context,
            message: message.into(),
        }
    }

    /// Startup and configuration problems leave the console unable to reach the server.
    pub fn blocks_backend(&self) -> bool {
        matches!(
            self.context,
            UiErrorContext::BackendStartup | UiErrorContext::Configuration
        )
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
