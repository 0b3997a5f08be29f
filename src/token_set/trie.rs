//! Character-indexed trie over literal matcher patterns.
//!
//! Supports a longest-match query with token-boundary disambiguation: the
//! trie prefers the longest registered key that is a prefix of the input
//! *and* whose last byte sits at a token boundary (end of input, whitespace,
//! or a word/non-word or digit/non-digit class change).

#![deny(missing_debug_implementations)]

use std::collections::HashMap;

fn is_ascii_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_digit_byte(b: u8) -> bool {
    b.is_ascii_digit()
}

#[derive(Debug, Default)]
struct Node {
    children: HashMap<u8, Node>,
    /// Index into the owning `TokenSet`'s literal matcher vector, set at the
    /// node where a registered key terminates.
    token_index: Option<usize>,
}

/// A trie over the byte keys of registered literal matchers.
#[derive(Debug, Default)]
pub struct Trie {
    root: Node,
}

impl Trie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `key` so that a later [`Trie::find_match`] can recognize it as
    /// matcher `token_index`. A key is considered to terminate at the byte
    /// before end-of-key or before the first whitespace byte, so patterns may
    /// be registered with trailing whitespace without changing what matches.
    /// Re-registering a key that already terminates at a node is a silent
    /// no-op, keeping the first registration's matcher in effect.
    pub fn insert(&mut self, key: &[u8], token_index: usize) {
        let mut node = &mut self.root;
        let mut i = 0;

        while i < key.len() {
            let byte = key[i];
            let is_final = i + 1 >= key.len() || is_ascii_space(key[i + 1]);

            node = node.children.entry(byte).or_default();

            if is_final {
                if node.token_index.is_none() {
                    node.token_index = Some(token_index);
                }
                return;
            }

            i += 1;
        }
    }

    /// Finds the longest matcher whose key is a prefix of `input` and whose
    /// end sits at a valid token boundary, returning its matcher index.
    /// Returns `None` if nothing matches.
    pub fn find_match(&self, input: &[u8]) -> Option<usize> {
        find_match_from(&self.root, input)
    }
}

fn find_match_from(node: &Node, input: &[u8]) -> Option<usize> {
    if input.is_empty() {
        return None;
    }

    let cur = input[0];
    let next = input.get(1).copied();
    let is_final = next.is_none() || next.is_some_and(is_ascii_space);

    let child = node.children.get(&cur)?;

    if is_final {
        return child.token_index;
    }

    let next = next.unwrap();

    if let Some(token_index) = child.token_index {
        let cur_word = is_word_byte(cur);
        let next_word = is_word_byte(next);
        if cur_word != next_word {
            return Some(token_index);
        }

        let cur_num = is_digit_byte(cur);
        let next_num = is_digit_byte(next);
        if cur_num != next_num {
            return Some(token_index);
        }

        if !cur_word && !next_word && !cur_num && !next_num {
            if child.children.is_empty() {
                return Some(token_index);
            }

            return match find_match_from(child, &input[1..]) {
                Some(deeper) => Some(deeper),
                None => Some(token_index),
            };
        }
    }

    find_match_from(child, &input[1..])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(keys: &[&[u8]]) -> Trie {
        let mut trie = Trie::new();
        for (i, key) in keys.iter().enumerate() {
            trie.insert(key, i);
        }
        trie
    }

    #[test]
    fn matches_a_registered_key_exactly() {
        let trie = build(&[b"test"]);
        assert_eq!(trie.find_match(b"test"), Some(0));
    }

    #[test]
    fn word_boundary_prevents_matching_inside_a_longer_identifier() {
        let trie = build(&[b"test"]);
        assert_eq!(trie.find_match(b"test_str"), None);
    }

    #[test]
    fn digit_boundary_prevents_matching_a_leading_digit_prefix() {
        let trie = build(&[b"test"]);
        assert_eq!(trie.find_match(b"3test"), None);
    }

    #[test]
    fn punctuation_chains_prefer_the_longer_match() {
        let trie = build(&[b"=", b"=="]);
        assert_eq!(trie.find_match(b"=="), Some(1));
        assert_eq!(trie.find_match(b"= "), Some(0));
    }

    #[test]
    fn shorter_key_does_not_shadow_a_longer_one_when_input_is_longer() {
        let trie = build(&[b"test", b"test_str", b"another_test_str"]);
        assert_eq!(trie.find_match(b"test_str"), None);
    }

    #[test]
    fn longer_key_does_not_shadow_a_shorter_one_when_input_is_shorter() {
        let trie = build(&[b"test", b"test_str", b"another_test_str"]);
        assert_eq!(trie.find_match(b"test"), Some(0));
    }

    #[test]
    fn duplicate_registration_keeps_the_first_matcher() {
        let mut trie = Trie::new();
        trie.insert(b"test", 0);
        trie.insert(b"test", 99);
        assert_eq!(trie.find_match(b"test"), Some(0));
    }

    #[test]
    fn trailing_whitespace_in_the_key_does_not_affect_matching() {
        let mut trie = Trie::new();
        trie.insert(b"if ", 0);
        assert_eq!(trie.find_match(b"if"), Some(0));
        assert_eq!(trie.find_match(b"if("), Some(0));
    }
}
