//! Shared test helpers.

#![allow(dead_code)]

pub mod light_helpers;
pub mod source_fixtures;
