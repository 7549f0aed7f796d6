//! # ward_core
//!
//! Core domain logic for Ward.

pub mod auth;
pub mod migrate;
pub mod models;
pub mod notify;
pub mod uuid;
