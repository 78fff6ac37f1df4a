//! Parser tests over realistic annotation-heavy files.

pub mod tests_parse;
