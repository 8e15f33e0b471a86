//! Citizen and admin accounts.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/users/register` | Create an account |
//! | POST | `/api/users/login` | Verify credentials and issue a session token |
//! | GET | `/api/users/me` | Account behind the session token |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod stores;

pub use routes::UsersState;
pub use services::{AccountService, CredentialHasher};
pub use stores::PgUserStore;
