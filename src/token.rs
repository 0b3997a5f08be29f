//! Token values and the classification set they carry.

#![deny(missing_docs, missing_debug_implementations)]

use crate::location::SourceLocation;
use crate::resource::Resource;

/// The closed set of lexical classifications a matcher can assign to a token.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum TokenType {
    /// A reserved word recognized by a literal matcher.
    Keyword,
    /// Punctuation or an operator recognized by a literal or regex matcher.
    Symbol,
    /// A name, typically recognized by a regex matcher.
    Identifier,
    /// A quoted or otherwise delimited string, typically a ranged token.
    StringLiteral,
    /// A numeric constant.
    NumberLiteral,
    /// A comment, typically a ranged token whose content is discarded by callers.
    Comment,
    /// A macro invocation or directive.
    Macro,
    /// Marks the end of a logical statement (e.g. `;`).
    EndOfStatement,
    /// Sentinel classification for the single token that ends every
    /// successful tokenization.
    EndOfInput,
}

/// A classified, source-located span produced by [`TokenizedSource`](crate::tokenized_source::TokenizedSource).
///
/// Borrows its [`Resource`] rather than pointing at it, so a `Token` cannot
/// outlive the resource it was produced from.
#[derive(Clone, Copy, Debug)]
pub struct Token<'r> {
    /// The token's classification.
    pub token_type: TokenType,
    /// Caller-defined refinement of `token_type`; `-1` when unused.
    pub sub_type: i32,
    /// The token's full span, delimiters included.
    pub location: SourceLocation,
    /// Absolute offset of a ranged token's content (the bytes strictly
    /// between its begin/end delimiters), or `-1` for non-ranged tokens.
    pub content_begin_offset: i32,
    /// Length of a ranged token's content, or `-1` for non-ranged tokens.
    pub content_length: i32,
    /// The resource this token was recognized in.
    pub source: &'r Resource,
}

impl<'r> Token<'r> {
    /// The full matched text, equivalent to
    /// `source.str_at_location(&self.location)`.
    pub fn as_str(&self) -> &'r str {
        self.source.str_at_location(&self.location)
    }

    /// The token's content: the full matched text for non-ranged tokens, or
    /// the bytes strictly between the begin/end delimiters for ranged ones.
    /// Empty if `self.location.resource_id` does not match `self.source`.
    pub fn content_str(&self) -> &'r str {
        if self.location.resource_id != self.source.resource_id() {
            return "";
        }

        if self.content_begin_offset == -1 {
            return self.as_str();
        }

        let loc = SourceLocation {
            resource_id: self.source.resource_id(),
            start_buffer_position: self.content_begin_offset as u32,
            end_buffer_position: (self.content_begin_offset + self.content_length) as u32,
            ..self.location
        };
        self.source.str_at_location(&loc)
    }
}

/// Transient result of a single [`TokenSet::match_at`](crate::token_set::TokenSet::match_at) call.
///
/// `offset` is the leading whitespace skipped before the match began;
/// `length` is the number of bytes consumed after that whitespace.
/// Content offsets are relative to the start of the *untrimmed* input that
/// was passed to `match_at`, or `-1` if the match was not a ranged one; the
/// caller is responsible for biasing them by `offset` (which `match_at`
/// itself does before returning).
#[derive(Clone, Copy, Debug, Default)]
pub struct MatchedToken {
    /// The matched token's classification, or `None` until a matcher sets it.
    pub token_type: Option<TokenType>,
    /// Caller-defined refinement of `token_type`; `-1` when unused.
    pub sub_type: i32,
    /// Leading whitespace skipped before the match began.
    pub offset: u32,
    /// Number of bytes consumed after the skipped whitespace.
    pub length: u32,
    /// Start of a ranged match's content, or `-1` for a non-ranged match.
    pub content_begin_offset: i32,
    /// End of a ranged match's content, or `-1` for a non-ranged match.
    pub content_end_offset: i32,
}

/// Outcome of an attempted match.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MatchResult {
    /// Nothing recognized the input at the current position.
    NoMatch,
    /// A matcher recognized a complete token.
    Matched,
    /// A ranged literal or ranged regex found its begin delimiter but
    /// reached end of input before its end delimiter.
    EndNotMatched,
}

impl Default for MatchResult {
    fn default() -> Self {
        MatchResult::NoMatch
    }
}
