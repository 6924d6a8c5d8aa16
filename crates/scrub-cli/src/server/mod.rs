//! HTTP API over a single cleaning session.

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;
