#![doc = "The `taskvault` library crate."]
#![doc = ""]
#![doc = "This crate contains the core business logic, domain models, authentication"]
#![doc = "mechanisms, persistence wrappers, routing configuration, and error handling"]
#![doc = "for the TaskVault service. It is used by the main binary (`main.rs`) to"]
#![doc = "construct and run the application."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;

pub use crate::auth::{AuthenticatedUser, PasswordHasher, TokenService};
pub use crate::config::Config;
pub use crate::error::AppError;
