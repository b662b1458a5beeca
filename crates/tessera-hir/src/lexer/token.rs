//! Token types for the Tessera lexer

use logos::Logos;

/// The kind of token produced by the lexer
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip r"%([^!\n][^\n]*)?")]
pub enum TokenKind {
    // ========== Keywords ==========
    #[token("element")]
    Element,
    #[token("extern")]
    Extern,
    #[token("func")]
    Func,
    #[token("proc")]
    Proc,
    #[token("var")]
    Var,
    #[token("const")]
    Const,
    #[token("inout")]
    Inout,
    #[token("if")]
    If,
    #[token("elif")]
    Elif,
    #[token("else")]
    Else,
    #[token("end")]
    End,
    #[token("while")]
    While,
    #[token("do")]
    Do,
    #[token("for")]
    For,
    #[token("in")]
    In,
    #[token("print")]
    Print,
    #[token("map")]
    Map,
    #[token("to")]
    To,
    #[token("reduce")]
    Reduce,
    #[token("and")]
    And,
    #[token("or")]
    Or,
    #[token("xor")]
    Xor,
    #[token("not")]
    Not,
    #[token("int")]
    IntType,
    #[token("float")]
    FloatType,
    #[token("bool")]
    BoolType,
    #[token("set")]
    Set,
    #[token("tensor")]
    Tensor,

    // ========== Literals ==========
    #[regex(r"[0-9]+")]
    Int,

    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?")]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+")]
    Float,

    #[token("true")]
    True,

    #[token("false")]
    False,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    // ========== Operators ==========
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token(".*")]
    DotStar,
    #[token("./")]
    DotSlash,
    #[token("^")]
    Caret,
    #[token("'")]
    Quote,
    #[token("=")]
    Assign,
    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("->")]
    Arrow,
    #[token("..")]
    DotDot,

    // ========== Delimiters ==========
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token("|")]
    Pipe,

    /// Embedded test marker (`%!`)
    #[token("%!")]
    TestMarker,

    // ========== Special ==========
    /// End of file
    Eof,

    /// Lexer error
    Error,
}

impl TokenKind {
    /// Returns true if this token is a keyword
    #[must_use]
    pub const fn is_keyword(self) -> bool {
        matches!(
            self,
            Self::Element
                | Self::Extern
                | Self::Func
                | Self::Proc
                | Self::Var
                | Self::Const
                | Self::Inout
                | Self::If
                | Self::Elif
                | Self::Else
                | Self::End
                | Self::While
                | Self::Do
                | Self::For
                | Self::In
                | Self::Print
                | Self::Map
                | Self::To
                | Self::Reduce
                | Self::And
                | Self::Or
                | Self::Xor
                | Self::Not
                | Self::IntType
                | Self::FloatType
                | Self::BoolType
                | Self::Set
                | Self::Tensor
                | Self::True
                | Self::False
        )
    }

    /// Returns true if this token is a literal
    #[must_use]
    pub const fn is_literal(self) -> bool {
        matches!(self, Self::Int | Self::Float | Self::True | Self::False)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Element => "element",
            Self::Extern => "extern",
            Self::Func => "func",
            Self::Proc => "proc",
            Self::Var => "var",
            Self::Const => "const",
            Self::Inout => "inout",
            Self::If => "if",
            Self::Elif => "elif",
            Self::Else => "else",
            Self::End => "end",
            Self::While => "while",
            Self::Do => "do",
            Self::For => "for",
            Self::In => "in",
            Self::Print => "print",
            Self::Map => "map",
            Self::To => "to",
            Self::Reduce => "reduce",
            Self::And => "and",
            Self::Or => "or",
            Self::Xor => "xor",
            Self::Not => "not",
            Self::IntType => "int",
            Self::FloatType => "float",
            Self::BoolType => "bool",
            Self::Set => "set",
            Self::Tensor => "tensor",
            Self::Int => "integer",
            Self::Float => "float literal",
            Self::True => "true",
            Self::False => "false",
            Self::Ident => "identifier",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::DotStar => ".*",
            Self::DotSlash => "./",
            Self::Caret => "^",
            Self::Quote => "'",
            Self::Assign => "=",
            Self::EqEq => "==",
            Self::BangEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Arrow => "->",
            Self::DotDot => "..",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::Colon => ":",
            Self::Dot => ".",
            Self::Pipe => "|",
            Self::TestMarker => "%!",
            Self::Eof => "end of file",
            Self::Error => "error",
        };
        f.write_str(text)
    }
}
