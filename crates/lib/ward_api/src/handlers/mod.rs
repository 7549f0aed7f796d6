//! HTTP request handlers.

pub mod auth;
pub mod docs;
