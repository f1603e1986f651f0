//! Client side of the user console: the users collection transport, the form/list
//! controller and startup settings.

pub mod config;
pub mod controller;
pub mod directory;
pub mod error;

pub use config::{load_settings, Settings};
pub use controller::{
    ConsoleFailure, ConsoleState, StateObserver, SubmitOutcome, UserFormController,
};
pub use directory::{HttpUserDirectory, MissingUserDirectory, UserDirectory};
pub use error::TransportError;
