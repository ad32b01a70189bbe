//! Thin persistence wrappers over the connection pool.
//!
//! Each function is a single atomic statement; there are no transactions
//! spanning multiple calls. Task operations all require the owner's id — see
//! the module docs in `tasks`.

pub mod tasks;
pub mod users;
