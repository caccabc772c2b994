//! Lowell storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod age_gate;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod dom;
pub mod error;
pub mod growth;
pub mod middleware;
pub mod models;
pub mod partials;
pub mod routes;
pub mod site;
pub mod startup;
pub mod state;
pub mod stores;
