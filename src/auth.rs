//! Credential and token domain types shared by the relay flows.

pub mod credentials;
pub mod token;

pub use credentials::*;
pub use token::*;
