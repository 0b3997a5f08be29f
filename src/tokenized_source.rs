//! The driver that sweeps a [`Resource`] through a [`TokenSet`], producing
//! an ordered, located token stream.

#![deny(missing_docs, missing_debug_implementations)]

use crate::error::SourceException;
use crate::location::Offset;
use crate::resource::Resource;
use crate::token::{MatchResult, MatchedToken, Token, TokenType};
use crate::token_set::TokenSet;

/// Initial capacity for the token vector, matching the fixed pool block size
/// (`TOKEN_POOL_SIZE`) the original implementation grows by.
const INITIAL_TOKEN_CAPACITY: usize = 512;

/// The result of sweeping a [`Resource`] through a [`TokenSet`]: an ordered
/// list of [`Token`]s ending in exactly one `EndOfInput` sentinel.
///
/// Produced by [`Resource::tokenize`](crate::resource::Resource::tokenize).
/// Since the driver never suspends, there is no externally observable
/// partially-scanned state. A `TokenizedSource` is always either absent
/// (construction failed with a [`SourceException`]) or complete.
#[derive(Debug)]
pub struct TokenizedSource<'r> {
    source: &'r Resource,
    tokens: Vec<Token<'r>>,
}

impl<'r> TokenizedSource<'r> {
    pub(crate) fn new(source: &'r Resource, token_set: &TokenSet) -> Result<Self, SourceException<'r>> {
        let mut tokens = Vec::with_capacity(INITIAL_TOKEN_CAPACITY);
        let contents = source.contents();
        let mut cursor: usize = 0;

        loop {
            while cursor < contents.len() && is_ascii_space(contents[cursor]) {
                cursor += 1;
            }

            let begin_offset = cursor as Offset;

            if cursor >= contents.len() {
                tokens.push(end_of_input_token(source));
                break;
            }

            let mut matched = MatchedToken::default();
            match token_set.match_at(&contents[cursor..], &mut matched) {
                MatchResult::NoMatch => {
                    let loc = source.calculate_source_location_from_range(begin_offset, begin_offset);
                    return Err(SourceException::new(source, loc, "Invalid Token"));
                }
                MatchResult::EndNotMatched => {
                    let start = begin_offset + matched.offset;
                    let loc = source.calculate_source_location_from_range(start, start + matched.length);
                    return Err(SourceException::new(source, loc, "Ranged token not terminated"));
                }
                MatchResult::Matched => {
                    let end_offset = begin_offset + matched.offset + matched.length;
                    let location = source.calculate_source_location_from_range(begin_offset, end_offset);

                    let (content_begin_offset, content_length) = if matched.content_begin_offset == -1 {
                        (-1, -1)
                    } else {
                        (
                            begin_offset as i32 + matched.content_begin_offset,
                            matched.content_end_offset - matched.content_begin_offset,
                        )
                    };

                    tokens.push(Token {
                        token_type: matched
                            .token_type
                            .expect("Matched result must carry a token type"),
                        sub_type: matched.sub_type,
                        location,
                        content_begin_offset,
                        content_length,
                        source,
                    });

                    cursor += (matched.offset + matched.length) as usize;
                }
            }
        }

        Ok(Self { source, tokens })
    }

    /// The resource this token stream was produced from.
    pub fn source(&self) -> &'r Resource {
        self.source
    }

    /// The ordered token stream, ending in exactly one `EndOfInput` token.
    pub fn tokens(&self) -> &[Token<'r>] {
        &self.tokens
    }

    /// Drops all tokens, releasing the storage backing them. The source
    /// binding is unaffected; call [`Resource::tokenize`] again to rescan.
    pub fn reset(&mut self) {
        self.tokens.clear();
        self.tokens.shrink_to_fit();
    }
}

fn end_of_input_token(source: &Resource) -> Token<'_> {
    Token {
        token_type: TokenType::EndOfInput,
        sub_type: -1,
        location: crate::location::SourceLocation {
            resource_id: source.resource_id(),
            ..Default::default()
        },
        content_begin_offset: -1,
        content_length: -1,
        source,
    }
}

fn is_ascii_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token_set::TokenSet;

    #[test]
    fn empty_input_yields_only_end_of_input() {
        let src = Resource::new(b"", 0);
        let ts = TokenSet::new();
        let result = src.tokenize(&ts).expect("tokenize should not fail");
        assert_eq!(result.tokens().len(), 1);
        assert_eq!(result.tokens()[0].token_type, TokenType::EndOfInput);
    }

    #[test]
    fn whitespace_only_input_yields_only_end_of_input() {
        let src = Resource::new(b"   \n\t  ", 0);
        let ts = TokenSet::new();
        let result = src.tokenize(&ts).expect("tokenize should not fail");
        assert_eq!(result.tokens().len(), 1);
        assert_eq!(result.tokens()[0].token_type, TokenType::EndOfInput);
    }

    #[test]
    fn unterminated_ranged_token_reports_its_full_span() {
        let src = Resource::new(b"'abc", 0);
        let mut ts = TokenSet::new();
        ts.add_ranged_string_token("'", "'", "\\", TokenType::StringLiteral, -1);

        let err = src.tokenize(&ts).expect_err("should report unterminated token");
        assert_eq!(err.source() as *const _, &src as *const _);
        let loc = err.location();
        assert_eq!(loc.resource_id, 0);
        assert_eq!(loc.start_buffer_position, 0);
        assert_eq!(loc.end_buffer_position, 4);
        assert_eq!((loc.start_line, loc.end_line), (0, 0));
        assert_eq!((loc.start_column, loc.end_column), (0, 4));
    }

    #[test]
    fn unrecognized_token_is_reported_at_the_cursor() {
        let src = Resource::new(b"'abc' test", 0);
        let mut ts = TokenSet::new();
        ts.add_ranged_string_token("'", "'", "\\", TokenType::StringLiteral, -1);

        let err = src.tokenize(&ts).expect_err("should report the unmatched token");
        let loc = err.location();
        assert_eq!(loc.start_buffer_position, 6);
        assert_eq!(loc.end_buffer_position, 6);
        assert_eq!(loc.start_column, 6);
    }

    #[test]
    fn reset_clears_the_token_stream() {
        let src = Resource::new(b"a", 0);
        let mut ts = TokenSet::new();
        ts.add_regex_token("a", TokenType::Identifier, -1);

        let mut result = src.tokenize(&ts).expect("tokenize should not fail");
        assert_eq!(result.tokens().len(), 2);
        result.reset();
        assert!(result.tokens().is_empty());
    }
}
