//! Semantic model tests: name resolution and argument binding across files.

pub mod tests_binding;
pub mod tests_resolution;
