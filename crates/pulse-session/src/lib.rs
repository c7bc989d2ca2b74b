//! # pulse-session
//!
//! Local persisted state for the InventoryPulse client:
//!
//! - **[`SessionStore`]**: the auth session (token pair + signed-in user),
//!   stored as `<data_dir>/session.json` with `0600` permissions. Loading
//!   never fails — a missing, unreadable or wrong-version file just yields
//!   an empty session.
//! - **[`Theme`]**: the light/dark display preference, stored in
//!   `<data_dir>/preferences.json`.

#![deny(unsafe_code)]

mod errors;
mod store;
mod theme;

pub use errors::SessionError;
pub use store::{SessionStore, StoredSession, load_session, save_session, session_file_path};
pub use theme::{Theme, load_theme, save_theme, toggle_theme};
