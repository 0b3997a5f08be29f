//! Registry of matchers and the single `match_at` decision that drives a scan.

#![deny(missing_docs, missing_debug_implementations)]

mod trie;

use crate::token::{MatchResult, MatchedToken, TokenType};
use std::cell::RefCell;
use trie::Trie;

fn is_ascii_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

#[derive(Debug)]
struct StringTokenMatcher {
    token_type: TokenType,
    sub_type: i32,
    begin: Vec<u8>,
    end: Option<Vec<u8>>,
    escape_chars: Vec<u8>,
}

#[derive(Debug)]
struct RegexTokenMatcher {
    token_type: TokenType,
    sub_type: i32,
    begin: regex::bytes::Regex,
    end: Option<regex::bytes::Regex>,
}

/// A custom matcher registered through [`TokenSet::add_custom_token`].
pub type CustomMatcherFn = fn(&[u8]) -> (MatchResult, MatchedToken);

/// Collects literal, ranged-literal, regex and custom matchers and decides,
/// position by position, which one (if any) recognizes a token.
///
/// Registration methods (`add_*`) take `&mut self` and invalidate the cached
/// literal trie; [`TokenSet::match_at`] takes `&self` and rebuilds the trie
/// lazily on first use after a registration. Once built, concurrent calls to
/// `match_at` on the same `TokenSet` are safe as long as no further
/// registration happens.
#[derive(Debug, Default)]
pub struct TokenSet {
    string_tokens: Vec<StringTokenMatcher>,
    regex_tokens: Vec<RegexTokenMatcher>,
    custom_tokens: Vec<CustomMatcherFn>,
    trie: RefCell<Option<Trie>>,
}

impl TokenSet {
    /// Creates an empty token set with no registered matchers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a plain literal matcher.
    pub fn add_string_token(&mut self, matcher: &str, token_type: TokenType, sub_type: i32) {
        self.trie.get_mut().take();
        self.string_tokens.push(StringTokenMatcher {
            token_type,
            sub_type,
            begin: matcher.as_bytes().to_vec(),
            end: None,
            escape_chars: Vec::new(),
        });
    }

    /// Registers a ranged literal matcher: `begin` and `end` delimit the
    /// token, and any byte in `escape_chars` causes the byte immediately
    /// following it to be consumed unconditionally, so an end delimiter
    /// right after an escape does not terminate the range.
    pub fn add_ranged_string_token(
        &mut self,
        begin: &str,
        end: &str,
        escape_chars: &str,
        token_type: TokenType,
        sub_type: i32,
    ) {
        self.trie.get_mut().take();
        self.string_tokens.push(StringTokenMatcher {
            token_type,
            sub_type,
            begin: begin.as_bytes().to_vec(),
            end: Some(end.as_bytes().to_vec()),
            escape_chars: escape_chars.as_bytes().to_vec(),
        });
    }

    /// Registers a regex matcher. The pattern is anchored to the start of
    /// the searched position (prefixed with `^` if it isn't already).
    pub fn add_regex_token(&mut self, pattern: &str, token_type: TokenType, sub_type: i32) {
        self.trie.get_mut().take();
        self.regex_tokens.push(RegexTokenMatcher {
            token_type,
            sub_type,
            begin: compile_anchored(pattern),
            end: None,
        });
    }

    /// Registers a ranged regex matcher: `begin_pattern` is anchored as
    /// above; `end_pattern` is searched, unanchored, starting right after the
    /// begin match.
    pub fn add_ranged_regex_token(
        &mut self,
        begin_pattern: &str,
        end_pattern: &str,
        token_type: TokenType,
        sub_type: i32,
    ) {
        self.trie.get_mut().take();
        self.regex_tokens.push(RegexTokenMatcher {
            token_type,
            sub_type,
            begin: compile_anchored(begin_pattern),
            end: Some(regex::bytes::Regex::new(end_pattern).expect("invalid end pattern")),
        });
    }

    /// Registers a custom matcher, tried after every literal and regex
    /// matcher has failed to match the current position.
    pub fn add_custom_token(&mut self, matcher: CustomMatcherFn) {
        self.custom_tokens.push(matcher);
    }

    /// Attempts to recognize a token at the start of `input`.
    ///
    /// Skips leading ASCII whitespace first; if nothing but whitespace
    /// remains, or if no matcher is registered at all, returns
    /// [`MatchResult::NoMatch`]. Otherwise tries the literal trie, then the
    /// regex matchers in registration order, then custom matchers, and
    /// biases any reported content offsets by the whitespace skipped.
    pub fn match_at(&self, input: &[u8], out: &mut MatchedToken) -> MatchResult {
        if input.is_empty() || (self.string_tokens.is_empty() && self.regex_tokens.is_empty() && self.custom_tokens.is_empty()) {
            return MatchResult::NoMatch;
        }

        let mut offset: u32 = 0;
        while offset < input.len() as u32 && is_ascii_space(input[offset as usize]) {
            offset += 1;
        }

        let rest = &input[offset as usize..];
        if rest.is_empty() {
            return MatchResult::NoMatch;
        }

        let mut result = self.match_literal(rest, out);
        if result == MatchResult::NoMatch {
            result = self.match_regex(rest, out);
        }
        if result == MatchResult::NoMatch {
            result = self.match_custom(rest, out);
        }

        if result != MatchResult::NoMatch {
            out.offset = offset;
            if out.content_begin_offset != -1 {
                out.content_begin_offset += offset as i32;
            }
            if out.content_end_offset != -1 {
                out.content_end_offset += offset as i32;
            }
        }

        result
    }

    fn ensure_trie(&self) {
        if self.trie.borrow().is_none() {
            let mut trie = Trie::new();
            for (index, tok) in self.string_tokens.iter().enumerate() {
                trie.insert(&tok.begin, index);
            }
            *self.trie.borrow_mut() = Some(trie);
        }
    }

    fn match_literal(&self, input: &[u8], out: &mut MatchedToken) -> MatchResult {
        self.ensure_trie();
        let trie_ref = self.trie.borrow();
        let trie = trie_ref.as_ref().unwrap();

        let Some(index) = trie.find_match(input) else {
            return MatchResult::NoMatch;
        };

        let tok = &self.string_tokens[index];
        out.token_type = Some(tok.token_type);
        out.sub_type = tok.sub_type;

        let Some(end) = &tok.end else {
            out.length = tok.begin.len() as u32;
            out.content_begin_offset = -1;
            out.content_end_offset = -1;
            return MatchResult::Matched;
        };

        scan_ranged_literal(input, tok.begin.len(), end, &tok.escape_chars, out)
    }

    fn match_regex(&self, input: &[u8], out: &mut MatchedToken) -> MatchResult {
        for tok in &self.regex_tokens {
            let Some(begin_match) = tok.begin.find(input) else {
                continue;
            };

            let begin_pos = begin_match.start() as u32;
            let begin_len = (begin_match.end() - begin_match.start()) as u32;

            out.token_type = Some(tok.token_type);
            out.sub_type = tok.sub_type;
            out.length = begin_len;
            out.content_begin_offset = -1;
            out.content_end_offset = -1;

            let Some(end_regex) = &tok.end else {
                return MatchResult::Matched;
            };

            // The end search starts `begin_len` bytes into `input`, not
            // `begin_pos + begin_len`: an anchored begin pattern always
            // matches at position 0.
            let search_origin = begin_len as usize;
            let rest = &input[search_origin..];

            match end_regex.find(rest) {
                None => {
                    out.length = input.len() as u32;
                    out.content_begin_offset = (begin_pos + begin_len) as i32;
                    out.content_end_offset = out.length as i32;
                    return MatchResult::EndNotMatched;
                }
                Some(end_match) => {
                    let end_len = (end_match.end() - end_match.start()) as u32;
                    out.length = search_origin as u32 + end_match.end() as u32;
                    out.content_begin_offset = (begin_pos + begin_len) as i32;
                    out.content_end_offset = out.length as i32 - end_len as i32;
                    return MatchResult::Matched;
                }
            }
        }

        MatchResult::NoMatch
    }

    fn match_custom(&self, input: &[u8], out: &mut MatchedToken) -> MatchResult {
        for matcher in &self.custom_tokens {
            let (result, matched) = matcher(input);
            if result != MatchResult::NoMatch {
                *out = matched;
                return result;
            }
        }
        MatchResult::NoMatch
    }
}

fn compile_anchored(pattern: &str) -> regex::bytes::Regex {
    let anchored = if pattern.starts_with('^') {
        pattern.to_string()
    } else {
        format!("^{pattern}")
    };
    regex::bytes::Regex::new(&anchored).expect("invalid regex pattern")
}

/// Scans a ranged literal after its begin delimiter matched at the start of
/// `input`, consuming bytes until `end` is found (not immediately preceded
/// by an escape byte this iteration) or input is exhausted.
fn scan_ranged_literal(
    input: &[u8],
    begin_len: usize,
    end: &[u8],
    escape_chars: &[u8],
    out: &mut MatchedToken,
) -> MatchResult {
    let mut cursor = begin_len;

    while cursor < input.len() {
        let mut did_escape = false;

        if !escape_chars.is_empty() && escape_chars.contains(&input[cursor]) {
            did_escape = true;
            cursor += 1;
        }

        if input[cursor..].starts_with(end) {
            if did_escape {
                cursor += end.len();
                continue;
            }

            out.length = (cursor + end.len()) as u32;
            out.content_begin_offset = begin_len as i32;
            out.content_end_offset = out.length as i32 - end.len() as i32;
            return MatchResult::Matched;
        }

        if did_escape {
            continue;
        }

        cursor += 1;
    }

    out.length = cursor as u32;
    out.content_begin_offset = begin_len as i32;
    out.content_end_offset = out.length as i32;
    MatchResult::EndNotMatched
}
