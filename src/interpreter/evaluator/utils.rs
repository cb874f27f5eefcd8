use crate::{ast::Position, error::RuntimeError, interpreter::value::core::Value};

/// Turns the raw text of a string literal into its value.
///
/// The surrounding quote characters are dropped, and every backslash
/// followed by a character is replaced by that character alone. There are
/// no escape sequences: `\n` is the letter `n` and `\"` is a quote.
///
/// ## Example
/// ```
/// use mava::interpreter::evaluator::utils::unescape_string;
///
/// assert_eq!(unescape_string(r#""a\"b""#), "a\"b");
/// assert_eq!(unescape_string(r#"'x\ny'"#), "xny");
/// assert_eq!(unescape_string(r#""\\""#), "\\");
/// ```
#[must_use]
pub fn unescape_string(raw: &str) -> String {
    let mut chars = raw.chars();
    chars.next();
    chars.next_back();

    let mut out = String::with_capacity(raw.len());
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.clone().next() {
            Some(next) if next != '\n' => {
                out.push(next);
                chars.next();
            },
            _ => out.push(c),
        }
    }
    out
}

/// Describes a value for an error message, e.g. ``number `3` ``.
#[must_use]
pub fn describe(value: &Value) -> String {
    format!("{} `{value}`", value.type_name())
}

/// Builds the `TypeMismatch` raised when no rule of a binary operator
/// accepts its operands.
#[must_use]
pub fn operand_mismatch(op: impl std::fmt::Display,
                        left: &Value,
                        right: &Value,
                        pos: Position)
                        -> RuntimeError {
    RuntimeError::type_mismatch(format!("cannot apply `{op}` to {} and {}",
                                        describe(left),
                                        describe(right)),
                                pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unescape_keeps_unpaired_trailing_backslash() {
        assert_eq!(unescape_string("\"ab\\\""), "ab\\");
        assert_eq!(unescape_string("\"\""), "");
    }

    #[test]
    fn escaped_newline_is_left_alone() {
        assert_eq!(unescape_string("\"a\\\nb\""), "a\\\nb");
    }

    #[test]
    fn mismatch_message_names_both_operands() {
        let err = operand_mismatch("+", &Value::Bool(true), &Value::Number(1.0), Position::new(1, 6));
        assert_eq!(err.to_string(),
                   "Error on line 1, column 6: Type mismatch: cannot apply `+` to boolean `true` and number `1`.");
    }
}
