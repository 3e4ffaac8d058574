//! Core types for the webtoon reader.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod images;

pub use email::Email;
pub use id::*;
pub use images::{IMAGE_DELIMITER, ImageSequence, ImageSequenceError};
