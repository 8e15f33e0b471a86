mod account_service;
mod credential_hasher;

pub use account_service::{AccountService, RegisterUser};
pub use credential_hasher::CredentialHasher;
