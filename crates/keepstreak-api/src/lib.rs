//! Shared types for keepstreak
//!
//! This crate defines the stable shapes exchanged between the engine, the
//! store, and whatever presents them:
//! - Persisted documents (streak record, focus settings, motivation settings)
//! - Presentation views
//! - Events

mod events;
mod types;

pub use events::*;
pub use types::*;
