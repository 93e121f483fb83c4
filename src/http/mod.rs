//! HTTP surface: the creation-event trigger and the health check.

pub mod handlers;
pub mod server;

pub use server::{AppState, MinterServer};
