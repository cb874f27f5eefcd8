/// Built-in functions that compute a value: `size` and `assert`.
pub mod builtin;
/// Call dispatch for user-defined and built-in functions.
pub mod core;
/// `input`.
///
/// Reads one line from the input stream, or a whole file.
pub mod input;
/// `print` and `println`.
pub mod print;
