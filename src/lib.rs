//! Real-time collaborative document sync.
//!
//! A [`services::DocumentStore`] holds the content of every document and a
//! [`ws::Hub`] fans edits out to the other clients editing the same document
//! over WebSocket. The HTTP layer in [`routes`] exposes both.

pub mod config;
pub mod docs;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
pub mod websocket;
pub mod ws;
