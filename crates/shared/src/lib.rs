//! Types and validation rules shared by the user console front ends.

pub mod domain;
pub mod error;
pub mod validation;
