//! # mava
//!
//! mava is a tree-walking interpreter for a small dynamically typed scripting
//! language whose lists double as vectors and matrices.
//! It lexes, parses, and evaluates programs with user-defined functions
//! overloaded by arity, block scoping, and built-in linear algebra.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    ast::Block,
    error::Error,
    interpreter::{
        evaluator::core::Interpreter,
        io::IoHandler,
        lexer::tokenize,
        registry::collect_functions,
        value::core::Value,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` enums and related types
/// that represent the syntactic structure of a program as a tree. The AST is
/// built by the parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source positions to AST nodes for error reporting.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing, parsing,
/// function registration or evaluation. Every error carries the line and
/// column of the construct that caused it.
///
/// # Responsibilities
/// - Defines error enums for all failure modes.
/// - Separates failed assertions from ordinary errors for exit codes.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, the function pre-pass,
/// evaluation, value representations and I/O routing.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, registry, evaluator.
/// - Provides the runtime value model and linear algebra support.
pub mod interpreter;
/// General utilities for safe numeric conversion and stack growth.
///
/// # Responsibilities
/// - Convert between `f64`, `i64` and `usize` without silent data loss.
/// - Grow the native stack for deeply recursive parsing and evaluation.
pub mod util;

/// Lexes and parses a whole program.
///
/// # Errors
/// Returns [`Error::Parse`] for unrecognised characters and syntax errors.
///
/// # Examples
/// ```
/// use mava::parse_program;
///
/// let program = parse_program("x = 1; return x + 1").unwrap();
/// assert_eq!(program.statements.len(), 1);
/// assert!(program.result.is_some());
///
/// assert!(parse_program("x = ").is_err());
/// ```
pub fn parse_program(source: &str) -> Result<Block, Error> {
    let lexemes = tokenize(source)?;
    Ok(interpreter::parser::core::parse_program(&lexemes)?)
}

/// Parses, registers and runs a program against `io`.
///
/// Every function declared anywhere in the program is registered before the
/// first statement runs, so calls may precede declarations.
///
/// # Returns
/// The value of a top-level `return`, or `Void` if the program has none.
///
/// # Errors
/// Any parse error, duplicate function declaration or runtime error.
///
/// # Examples
/// ```
/// use mava::{interpreter::io::IoHandler, run_source};
///
/// let mut io = IoHandler::buffer();
/// let result = run_source("println(square(4)) def square(x) { return x ^ 2 }", &mut io);
///
/// assert!(result.is_ok());
/// assert_eq!(io.output(), "16\n");
/// ```
pub fn run_source(source: &str, io: &mut IoHandler) -> Result<Value, Error> {
    let program = parse_program(source)?;
    let functions = collect_functions(&program)?;

    tracing::debug!(functions = functions.len(), "program parsed");

    Ok(Interpreter::new(functions, io).run(&program)?)
}

/// Runs a program on the process's standard streams.
///
/// With `auto_print` set, the value of a top-level `return` is printed after
/// the run unless it is `VOID`.
///
/// # Errors
/// Returns an error if parsing or evaluation fails.
///
/// # Examples
/// ```
/// use mava::get_result;
///
/// let res = get_result("result = 2 + 2", false);
/// assert!(res.is_ok());
///
/// // 'x' is not defined
/// let res = get_result("y = x + 1", false);
/// assert!(res.is_err());
/// ```
pub fn get_result(source: &str, auto_print: bool) -> Result<Value, Error> {
    let mut io = IoHandler::stdio();
    let value = run_source(source, &mut io)?;

    if auto_print && !value.is_void() {
        println!("{value}");
    }

    Ok(value)
}
