use logos::Logos;

use crate::{ast::Position, error::ParseError};

/// Represents a lexical token in the source input.
///
/// Whitespace, newlines and comments are recognised but skipped, so they
/// never reach the parser.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Numeric literal tokens, such as `42` or `3.14`.
    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),
    /// String literal tokens in double or single quotes, kept verbatim
    /// (quotes and backslashes included).
    #[regex(r#""([^"\\\n]|\\[^\n])*""#, |lex| lex.slice().to_string())]
    #[regex(r"'([^'\\\n]|\\[^\n])*'", |lex| lex.slice().to_string())]
    String(String),
    /// Boolean literal tokens, such as `true`.
    #[token("true", |_| true)]
    #[token("false", |_| false)]
    Bool(bool),
    /// `null`
    #[token("null")]
    Null,
    /// `def`
    #[token("def")]
    Def,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `return`
    #[token("return")]
    Return,
    /// `for`
    #[token("for")]
    For,
    /// `while`
    #[token("while")]
    While,
    /// `to`
    #[token("to")]
    To,
    /// `in`
    #[token("in")]
    In,
    /// Identifier tokens; variable or function names such as `x` or `square`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `^`
    #[token("^")]
    Caret,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `&&`
    #[token("&&")]
    AndAnd,
    /// `||`
    #[token("||")]
    OrOr,
    /// `!`
    #[token("!")]
    Bang,
    /// `?`
    #[token("?")]
    Question,
    /// `:`
    #[token(":")]
    Colon,
    /// `=`
    #[token("=")]
    Equals,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,

    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    /// `/* Block comments. */`
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/", |lex| {
        let start = lex.span().start;
        if let Some(last) = lex.slice().rfind('\n') {
            lex.extras.line += lex.slice().matches('\n').count();
            lex.extras.line_start = start + last + 1;
        }
        logos::Skip
    })]
    BlockComment,
    /// Line breaks.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        lex.extras.line_start = lex.span().end;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs, carriage returns and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line and the byte offset where it starts, from which
/// every token's column is derived.
#[derive(Debug)]
pub struct LexerExtras {
    /// The current line number (1-based).
    pub line:       usize,
    /// Byte offset of the first character of the current line.
    pub line_start: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line:       1,
               line_start: 0, }
    }
}

/// A token together with its source text and position.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    /// The token.
    pub token: Token,
    /// Where the token starts.
    pub pos:   Position,
    /// The exact source text of the token.
    pub text:  String,
}

/// Splits source text into lexemes.
///
/// # Errors
/// `InvalidToken` at the first character sequence that starts no token.
///
/// # Example
/// ```
/// use mava::interpreter::lexer::{tokenize, Token};
///
/// let lexemes = tokenize("x = 1\ny = 'a'").unwrap();
///
/// assert_eq!(lexemes.len(), 6);
/// assert_eq!(lexemes[3].token, Token::Identifier("y".to_string()));
/// assert_eq!((lexemes[3].pos.line, lexemes[3].pos.column), (2, 1));
/// assert_eq!(lexemes[5].text, "'a'");
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Lexeme>, ParseError> {
    let mut lexer = Token::lexer(source);
    let mut lexemes = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let pos = Position::new(lexer.extras.line, span.start - lexer.extras.line_start + 1);

        match result {
            Ok(token) => lexemes.push(Lexeme { token,
                                               pos,
                                               text: lexer.slice().to_string() }),
            Err(()) => {
                return Err(ParseError::InvalidToken { text: lexer.slice().to_string(),
                                                      pos });
            },
        }
    }

    Ok(lexemes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<Token> {
        tokenize(source).unwrap().into_iter().map(|l| l.token).collect()
    }

    #[test]
    fn keywords_win_over_identifiers_only_on_exact_match() {
        assert_eq!(tokens("in int to tox"),
                   vec![Token::In,
                        Token::Identifier("int".into()),
                        Token::To,
                        Token::Identifier("tox".into())]);
    }

    #[test]
    fn comments_are_skipped_and_lines_counted() {
        let lexemes = tokenize("a // one\n/* two\nthree */ b").unwrap();
        assert_eq!(lexemes.len(), 2);
        assert_eq!(lexemes[1].pos, Position::new(3, 10));
    }

    #[test]
    fn strings_keep_raw_text() {
        assert_eq!(tokens(r#""a\"b""#), vec![Token::String(r#""a\"b""#.into())]);
        assert_eq!(tokens(r"'it\'s'"), vec![Token::String(r"'it\'s'".into())]);
    }

    #[test]
    fn operators_prefer_longest_match() {
        assert_eq!(tokens("<= < == = != ! && ||"),
                   vec![Token::LessEqual,
                        Token::Less,
                        Token::EqualEqual,
                        Token::Equals,
                        Token::BangEqual,
                        Token::Bang,
                        Token::AndAnd,
                        Token::OrOr]);
    }

    #[test]
    fn invalid_character_is_reported_with_position() {
        let err = tokenize("x = 1\n  @").unwrap_err();
        assert_eq!(err,
                   ParseError::InvalidToken { text: "@".into(),
                                              pos:  Position::new(2, 3), });
    }

    #[test]
    fn numbers_parse_as_floats() {
        assert_eq!(tokens("3 2.5"), vec![Token::Number(3.0), Token::Number(2.5)]);
    }
}
