pub mod auth;
pub mod health;
pub mod reports;
pub mod users;
