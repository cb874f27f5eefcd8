use std::rc::Rc;

/// A location in the source text.
///
/// Lines and columns are both 1-based. Every AST node carries the position of
/// the token that introduced it so runtime errors can point back at the
/// failing construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Line number in the source code.
    pub line:   usize,
    /// Column number (in bytes) within the line.
    pub column: usize,
}

impl Position {
    /// Creates a new position.
    ///
    /// ## Example
    /// ```
    /// use mava::ast::Position;
    ///
    /// let pos = Position::new(3, 7);
    /// assert_eq!(pos.to_string(), "line 3, column 7");
    /// ```
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Represents a literal value in the language.
///
/// String literals keep their raw source text, quotes and escapes included.
/// Unquoting happens during evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A numeric literal such as `42` or `3.5`.
    Number(f64),
    /// A boolean literal value: `true` or `false`.
    Bool(bool),
    /// The `null` literal.
    Null,
    /// A quoted string literal, exactly as written in the source.
    String(String),
}

/// Built-in functions known to the evaluator.
///
/// `assert` is not listed here because it needs the source text of its
/// argument; it has its own [`Expr::Assert`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    /// `print(x)`
    Print,
    /// `println(x)` or `println()`
    Println,
    /// `input()` or `input(path)`
    Input,
    /// `size(x)`
    Size,
    /// `transpose(m)`
    Transpose,
    /// `rows(m)`
    Rows,
    /// `columns(m)`
    Columns,
    /// `determinant(m)`
    Determinant,
    /// `matrixSum(m)`
    MatrixSum,
}

impl Builtin {
    /// Every built-in name, including `assert`.
    pub const NAMES: &'static [&'static str] = &["print",
                                                 "println",
                                                 "input",
                                                 "assert",
                                                 "size",
                                                 "transpose",
                                                 "rows",
                                                 "columns",
                                                 "determinant",
                                                 "matrixSum"];

    /// Looks up a built-in by its source name.
    ///
    /// Returns `None` for user-defined names and for `assert`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "print" => Self::Print,
            "println" => Self::Println,
            "input" => Self::Input,
            "size" => Self::Size,
            "transpose" => Self::Transpose,
            "rows" => Self::Rows,
            "columns" => Self::Columns,
            "determinant" => Self::Determinant,
            "matrixSum" => Self::MatrixSum,
            _ => return None,
        })
    }

    /// Returns `true` if `name` is reserved for a built-in function.
    #[must_use]
    pub fn is_reserved(name: &str) -> bool {
        Self::NAMES.contains(&name)
    }

    /// The name under which the built-in is called.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Print => "print",
            Self::Println => "println",
            Self::Input => "input",
            Self::Size => "size",
            Self::Transpose => "transpose",
            Self::Rows => "rows",
            Self::Columns => "columns",
            Self::Determinant => "determinant",
            Self::MatrixSum => "matrixSum",
        }
    }
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// Every expression evaluates to exactly one value.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value.
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Position in the source code.
        pos:   Position,
    },
    /// A list literal such as `[1, 2, 3]`.
    ListLiteral {
        /// Elements of the list.
        elements: Vec<Self>,
        /// Position in the source code.
        pos:      Position,
    },
    /// Reference to a variable by name.
    Identifier {
        /// Name of the variable.
        name: String,
        /// Position in the source code.
        pos:  Position,
    },
    /// A unary operation.
    UnaryOp {
        /// The unary operator to apply.
        op:   UnaryOperator,
        /// The operand expression.
        expr: Box<Self>,
        /// Position in the source code.
        pos:  Position,
    },
    /// A binary operation. Both operands are always evaluated.
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Position in the source code.
        pos:   Position,
    },
    /// Conditional expression `cond ? a : b`.
    Ternary {
        /// The condition, which must evaluate to a boolean.
        condition:   Box<Self>,
        /// Expression evaluated if the condition is true.
        then_branch: Box<Self>,
        /// Expression evaluated if the condition is false.
        else_branch: Box<Self>,
        /// Position in the source code.
        pos:         Position,
    },
    /// Call of a user-defined function, resolved by name and arity.
    FunctionCall {
        /// Name of the function being called.
        name:      String,
        /// Arguments to the function.
        arguments: Vec<Self>,
        /// Position in the source code.
        pos:       Position,
    },
    /// Call of a built-in function.
    BuiltinCall {
        /// Which built-in is called.
        builtin:   Builtin,
        /// Arguments to the built-in.
        arguments: Vec<Self>,
        /// Position in the source code.
        pos:       Position,
    },
    /// `assert(condition)`.
    Assert {
        /// The asserted expression.
        condition: Box<Self>,
        /// Source text of the asserted expression, used in the failure report.
        source:    String,
        /// Position in the source code.
        pos:       Position,
    },
    /// One or more trailing indexes applied to an expression, e.g. `m[1][0]`.
    Index {
        /// The indexed expression.
        target:  Box<Self>,
        /// Index expressions, applied left to right.
        indexes: Vec<Self>,
        /// Position in the source code.
        pos:     Position,
    },
}

impl Expr {
    /// Gets the source position of `self`.
    /// ## Example
    /// ```
    /// use mava::ast::{Expr, Position};
    ///
    /// let expr = Expr::Identifier { name: "x".to_string(),
    ///                               pos:  Position::new(5, 1), };
    ///
    /// assert_eq!(expr.position().line, 5);
    /// ```
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Literal { pos, .. }
            | Self::ListLiteral { pos, .. }
            | Self::Identifier { pos, .. }
            | Self::UnaryOp { pos, .. }
            | Self::BinaryOp { pos, .. }
            | Self::Ternary { pos, .. }
            | Self::FunctionCall { pos, .. }
            | Self::BuiltinCall { pos, .. }
            | Self::Assert { pos, .. }
            | Self::Index { pos, .. } => *pos,
        }
    }
}

/// A sequence of statements with an optional trailing `return` expression.
///
/// Evaluating a block opens a new scope frame. When `result` is present the
/// block raises a return signal carrying its value.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Statements inside the block, in source order.
    pub statements: Vec<Statement>,
    /// The `return` expression, if the block has one.
    pub result:     Option<Expr>,
    /// Position in the source code.
    pub pos:        Position,
}

/// A user-defined function declaration (`def name(a, b) { ... }`).
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    /// The name of the function.
    pub name:   String,
    /// The parameter names, in order.
    pub params: Vec<String>,
    /// The body evaluated when the function is called.
    pub body:   Block,
    /// Position in the source code.
    pub pos:    Position,
}

impl FunctionDecl {
    /// Number of parameters the function takes.
    #[must_use]
    pub const fn arity(&self) -> usize {
        self.params.len()
    }
}

/// One `if` or `else if` arm of an [`Statement::If`].
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalBranch {
    /// The branch condition.
    pub condition: Expr,
    /// The block evaluated when the condition holds.
    pub body:      Block,
}

/// Represents a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A function declaration. Registered by the pre-pass; a no-op when
    /// reached during evaluation.
    FunctionDecl(Rc<FunctionDecl>),
    /// `name = value` or `name[i]...[k] = value`.
    Assignment {
        /// The name of the variable.
        name:    String,
        /// Indexes for element assignment. Empty for plain assignment.
        indexes: Vec<Expr>,
        /// The value which is being assigned.
        value:   Expr,
        /// Position in the source code.
        pos:     Position,
    },
    /// A standalone expression evaluated for its side effects.
    Expression {
        /// The expression to evaluate.
        expr: Expr,
        /// Position in the source code.
        pos:  Position,
    },
    /// `if ... else if ... else ...`
    If {
        /// The `if` branch followed by any `else if` branches.
        branches:   Vec<ConditionalBranch>,
        /// The `else` block, if present.
        else_block: Option<Block>,
        /// Position in the source code.
        pos:        Position,
    },
    /// `for var = start to stop { ... }`, inclusive of `stop`.
    For {
        /// The loop variable name.
        var:   String,
        /// Lower bound.
        start: Expr,
        /// Upper bound (inclusive).
        stop:  Expr,
        /// Loop body.
        body:  Block,
        /// Position in the source code.
        pos:   Position,
    },
    /// `while condition { ... }`
    While {
        /// Loop condition, checked before every iteration.
        condition: Expr,
        /// Loop body.
        body:      Block,
        /// Position in the source code.
        pos:       Position,
    },
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition, list append, string concatenation (`+`)
    Add,
    /// Subtraction, list removal (`-`)
    Sub,
    /// Multiplication, repetition, matrix product (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Remainder (`%`)
    Mod,
    /// Exponentiation (`^`)
    Pow,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Logical and (`&&`), not short-circuiting
    And,
    /// Logical or (`||`), not short-circuiting
    Or,
    /// List membership (`in`)
    In,
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Logical NOT (e.g. `!x`).
    Not,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, In, Less, LessEqual, Mod, Mul, NotEqual,
            Or, Pow, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            Pow => "^",
            Less => "<",
            LessEqual => "<=",
            Greater => ">",
            GreaterEqual => ">=",
            Equal => "==",
            NotEqual => "!=",
            And => "&&",
            Or => "||",
            In => "in",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negate => write!(f, "-"),
            Self::Not => write!(f, "!"),
        }
    }
}
