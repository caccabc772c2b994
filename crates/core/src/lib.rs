//! Lowell Core - Shared types library.
//!
//! This crate provides the value types shared by the Lowell components:
//! - `storefront` - Public-facing storefront server
//! - `cli` - Command-line tools for checking partials and browsing the catalog
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps it
//! lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
