//! # Quotebook HTTP Server Module
//!
//! Axum server exposing the quote store.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/quotes`, `/api/quotes/:id`, `/api/quote` - Quote CRUD and random pick
//! - `/` - Browser UI

pub mod config;
pub mod health_routes;
pub mod quote_routes;
pub mod server;
pub mod ui_routes;

pub use config::HttpServerConfig;
pub use server::HttpServer;
