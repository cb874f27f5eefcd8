/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the AST, evaluates expressions and statements,
/// dispatches operators on the runtime types of their operands, manages
/// scopes and function calls, and produces the program's output.
///
/// # Responsibilities
/// - Evaluates every expression and statement form of the language.
/// - Propagates `return` signals out of nested blocks to the enclosing call.
/// - Reports runtime errors with the position of the failing node.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of lexemes, each
/// carrying its token, its source text and its line and column.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with source location.
/// - Skips whitespace and comments.
/// - Reports lexical errors for invalid input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// # Responsibilities
/// - Converts lexemes into statements, blocks and expressions.
/// - Encodes operator precedence and associativity.
/// - Reports syntax errors with location info.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
pub mod value;
/// Lexically chained variable scopes.
pub mod environment;
/// The function registry and the declaration pre-pass that fills it.
pub mod registry;
/// Linear algebra over lists: the numeric matrix kernel and the adapter that
/// converts between lists and matrices.
pub mod linalg;
/// Output and input routing for `print`, `println` and `input`.
pub mod io;
