//! # pulse-api
//!
//! Authenticated REST client for the InventoryPulse API.
//!
//! Every request attaches the session's bearer token when one is present.
//! A 401 response clears the persisted session and surfaces as
//! [`ApiError::SessionExpired`] so the application can fall back to the
//! login flow — the CLI analog of the web client's clear-and-redirect.

#![deny(unsafe_code)]

mod auth;
mod categories;
mod client;
mod errors;
mod products;

pub use client::ApiClient;
pub use errors::ApiError;
