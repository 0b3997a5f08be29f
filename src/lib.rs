//! A configurable lexical tokenizer: register literal, ranged-literal, regex
//! and custom matchers on a [`TokenSet`], then sweep a [`Resource`] through it
//! to get back an ordered, located token stream.
//!
//! ```
//! use tokenize::{Resource, TokenSet, TokenType};
//!
//! let mut tokens = TokenSet::new();
//! tokens.add_string_token("let", TokenType::Keyword, -1);
//! tokens.add_regex_token("[a-zA-Z_][a-zA-Z0-9_]*", TokenType::Identifier, -1);
//!
//! let src = Resource::new(b"let x", 0);
//! let scanned = src.tokenize(&tokens).expect("no invalid tokens");
//! assert_eq!(scanned.tokens().len(), 3); // `let`, `x`, EndOfInput
//! ```

#![deny(missing_docs, missing_debug_implementations)]

pub mod error;
pub mod location;
pub mod resource;
pub mod token;
pub mod token_set;
pub mod tokenized_source;

pub use error::SourceException;
pub use location::{Offset, SourceLocation};
pub use resource::Resource;
pub use token::{MatchResult, MatchedToken, Token, TokenType};
pub use token_set::{CustomMatcherFn, TokenSet};
pub use tokenized_source::TokenizedSource;
