//! Webtoon Core - Shared types library.
//!
//! This crate provides common types used across all webtoon reader components:
//! - `server` - The reading site, admin upload form and mock login
//! - `cli` - Command-line tools for migrations and catalog seeding
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP handling. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and chapter image sequences

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
