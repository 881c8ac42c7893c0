//! Core types for the crm workspace.
//!
//! This crate provides the pieces shared by the CLI and the HTTP server:
//! - `event` and `date_range` for calendar events and the windows they are queried by
//! - `filter`, `view` and `gesture` for the calendar screen's interaction model
//! - `editor` for building and editing event records
//! - `store` for the Event Store contract and its implementations
//! - `product` for WooCommerce product reshaping and client-side search

pub mod config;
pub mod constants;
pub mod date_range;
pub mod editor;
pub mod error;
pub mod event;
pub mod filter;
pub mod gesture;
pub mod product;
pub mod screen;
pub mod store;
pub mod view;

// Re-export the event model at crate root for convenience
pub use event::*;
