//! Library exports for the ToraBasa marketplace service
//!
//! Exposes the router, state, models and the pure client-side helpers so
//! integration tests can drive the full stack in-process.

pub mod chat;
pub mod database;
pub mod error;
pub mod filter;
pub mod handler;
pub mod model;
pub mod route;
pub mod session;
