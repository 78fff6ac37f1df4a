//! Foundation types for the ktlight toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileId`] - Identifiers for files registered with an analysis host
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`Position`], [`Span`], [`LineIndex`] - Line/column positions for navigation
//! - [`Name`], [`FqName`] - Cheap-to-clone names and dotted qualified names
//! - [`ConstValue`] - Compile-time constants shared by source and compiled models
//!
//! This module has NO dependencies on other ktlight modules.

mod constant;
mod file_id;
mod name;
mod position;

pub use constant::{ConstValue, unescape};
pub use file_id::FileId;
pub use name::{FqName, Name};
pub use position::{LineIndex, Position, Span};

// Re-export text-size types for convenience
pub use text_size;
pub use text_size::{TextRange, TextSize};
