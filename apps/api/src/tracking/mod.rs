//! Application tracking: bounded, file-backed history of sent applications.

pub mod handlers;
pub mod models;
pub mod store;

pub use store::ApplicationStore;
