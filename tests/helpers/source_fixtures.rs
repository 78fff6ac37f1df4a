//! Common source code fixtures for tests.

/// Annotation classes used across the light tests.
pub const ANNOTATION_CLASSES: &str = r#"
package anno

annotation class Single(val value: String)
annotation class Named(val x: Int, val label: String = "none")
annotation class Tags(val value: Array<String>)
annotation class Numbers(val value: IntArray = [7, 8])
annotation class Many(vararg val value: Int)
annotation class Inner(val v: Int, val w: Int = 5)
annotation class Outer(val inner: Inner, val others: Array<Inner> = [])
annotation class Flag
class Plain(val x: Int)
"#;

/// A user file importing every annotation class.
pub fn usage(body: &str) -> String {
    format!("package app\nimport anno.*\n{body}\n")
}
