//! Lexer module.
//!
//! This module organizes the lexer implementation into smaller, focused components:
//! - `core` - Main Lexer struct, dispatch and the pull interface
//! - `state` - Session context shared by the scanners
//! - `identifier` - Identifier and keyword lexing
//! - `number` - Numeric literal lexing
//! - `string` - String literal lexing
//! - `operator` - Operator and punctuation lexing, bracket depth
//! - `boundary` - Newlines, indentation, whitespace and line continuation
//! - `comment` - Comment lexing

mod boundary;
mod comment;
mod core;
mod identifier;
mod number;
mod operator;
mod state;
mod string;

pub use core::Lexer;
pub use state::LexerState;
