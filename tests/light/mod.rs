//! Light annotation facade tests.
//!
//! Tests for attribute lookup, nested annotations, facade identity and
//! delegate handling over analyzed source.

pub mod tests_attributes;
pub mod tests_delegates;
pub mod tests_identity;
pub mod tests_nested;
