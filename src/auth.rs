//! Credential material, auth header values, and token lifecycle models.

pub mod credential;
pub mod token;

pub use credential::*;
pub use token::*;
