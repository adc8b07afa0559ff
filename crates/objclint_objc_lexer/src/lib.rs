//! Tokenizer for Objective-C source text.
//!
//! The lexer is lossless: every byte of the input belongs to exactly one
//! token, including whitespace, line breaks and comments. It is context-free,
//! so `-` and `+` are always plain punctuation; deciding whether one starts a
//! method declaration is left to the recognizer.

mod lexer;
mod token;
mod tokens;

pub use lexer::Lexer;
pub use token::{LexicalError, LexicalErrorKind, Token, TokenKind};
pub use tokens::Tokens;
