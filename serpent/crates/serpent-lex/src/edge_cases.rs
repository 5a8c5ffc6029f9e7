//! Edge case tests for serpent-lex
