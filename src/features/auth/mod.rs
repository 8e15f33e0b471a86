//! Session tokens.
//!
//! Login hands out a signed token; the session middleware turns a bearer
//! token back into an `AuthenticatedUser` carried on the request.

pub mod model;
mod token_service;

pub use token_service::TokenService;
