//! Owns a copy of source bytes and the line table derived from them.

#![deny(missing_docs, missing_debug_implementations)]

use crate::error::SourceException;
use crate::location::{Offset, SourceLocation};
use crate::token_set::TokenSet;
use crate::tokenized_source::TokenizedSource;

/// A single line's byte range, terminator included. The final line of a
/// resource that does not end in a newline has no terminator.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct LineOffset {
    begin: Offset,
    end: Offset,
}

/// An immutable, owned copy of source bytes tagged with a caller-assigned id.
///
/// Precomputes a line table on construction so that byte offsets can be
/// translated to line/column pairs without rescanning the buffer. A
/// `Resource` never changes after construction, so any number of readers may
/// share a `&Resource` concurrently.
#[derive(Debug)]
pub struct Resource {
    resource_id: u32,
    contents: Box<[u8]>,
    line_offsets: Vec<LineOffset>,
}

impl Resource {
    /// Copies `contents` and builds the line table. A line terminator is
    /// `\n` or `\r\n`; a bare `\r` does not end a line.
    pub fn new(contents: &[u8], resource_id: u32) -> Self {
        let mut line_offsets = Vec::new();
        let mut last_line_begin: Offset = 0;
        let len = contents.len();
        let mut i: usize = 0;

        while i < len {
            let terminator_len = if contents[i] == b'\n' {
                Some(1)
            } else if contents[i] == b'\r' && contents.get(i + 1) == Some(&b'\n') {
                Some(2)
            } else {
                None
            };

            if let Some(term_len) = terminator_len {
                let end = (i + term_len) as Offset;
                line_offsets.push(LineOffset {
                    begin: last_line_begin,
                    end,
                });
                last_line_begin = end;
                i += term_len;
            } else {
                i += 1;
            }
        }

        if last_line_begin != len as Offset {
            line_offsets.push(LineOffset {
                begin: last_line_begin,
                end: len as Offset,
            });
        }

        Self {
            resource_id,
            contents: contents.into(),
            line_offsets,
        }
    }

    /// The caller-assigned id this resource was constructed with.
    pub fn resource_id(&self) -> u32 {
        self.resource_id
    }

    /// The resource's bytes.
    pub fn contents(&self) -> &[u8] {
        &self.contents
    }

    /// Number of bytes in [`Resource::contents`].
    pub fn len(&self) -> u32 {
        self.contents.len() as u32
    }

    /// Whether the resource holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Number of lines in the precomputed line table.
    pub fn line_count(&self) -> u32 {
        self.line_offsets.len() as u32
    }

    /// The byte slice starting at `loc.start_buffer_position`, or `None` if
    /// `loc` names a different resource or starts past the end of this one.
    pub fn slice_from_location(&self, loc: &SourceLocation) -> Option<&[u8]> {
        if loc.resource_id != self.resource_id {
            return None;
        }
        if loc.start_buffer_position >= self.len() {
            return None;
        }
        Some(&self.contents[loc.start_buffer_position as usize..])
    }

    /// The bytes in `[loc.start_buffer_position, loc.end_buffer_position)`,
    /// or an empty slice if `loc` names a different resource, either bound
    /// exceeds the resource's length, or the range is inverted.
    pub fn bytes_at_location(&self, loc: &SourceLocation) -> &[u8] {
        if loc.resource_id != self.resource_id
            || loc.start_buffer_position > self.len()
            || loc.end_buffer_position > self.len()
            || loc.end_buffer_position < loc.start_buffer_position
        {
            return &[];
        }

        &self.contents[loc.start_buffer_position as usize..loc.end_buffer_position as usize]
    }

    /// [`Resource::bytes_at_location`], interpreted as UTF-8. Falls back to
    /// an empty string rather than panicking if the range does not land on
    /// character boundaries.
    pub fn str_at_location(&self, loc: &SourceLocation) -> &str {
        std::str::from_utf8(self.bytes_at_location(loc)).unwrap_or_default()
    }

    /// The bytes of line `index`, terminator included, or an empty slice if
    /// `index` is out of range.
    pub fn line_bytes(&self, index: u32) -> &[u8] {
        match self.line_offsets.get(index as usize) {
            Some(line) => &self.contents[line.begin as usize..line.end as usize],
            None => &[],
        }
    }

    /// [`Resource::line_bytes`], interpreted as UTF-8 (empty on invalid UTF-8).
    pub fn line(&self, index: u32) -> &str {
        std::str::from_utf8(self.line_bytes(index)).unwrap_or_default()
    }

    /// Builds a [`SourceLocation`] spanning `[begin_offset, end_offset)`,
    /// resolving line/column numbers from the precomputed line table.
    ///
    /// Returns [`SourceLocation::INVALID`] if `begin_offset > len`,
    /// `end_offset > len`, or `end_offset < begin_offset`.
    pub fn calculate_source_location_from_range(
        &self,
        begin_offset: Offset,
        end_offset: Offset,
    ) -> SourceLocation {
        let len = self.len();
        if begin_offset > len || end_offset > len || end_offset < begin_offset {
            return SourceLocation::INVALID;
        }

        let mut loc = SourceLocation {
            resource_id: self.resource_id,
            start_buffer_position: begin_offset,
            end_buffer_position: end_offset,
            start_line: 0,
            end_line: 0,
            start_column: 0,
            end_column: 0,
        };

        for (index, line) in self.line_offsets.iter().enumerate() {
            if begin_offset >= line.begin && begin_offset < line.end {
                loc.start_line = index as u32;
                loc.start_column = begin_offset - line.begin;
                break;
            }
            loc.start_line = index as u32 + 1;
        }

        loc.end_line = loc.start_line;

        if begin_offset == end_offset {
            loc.end_column = loc.start_column;
            return loc;
        }

        for (index, line) in self.line_offsets.iter().enumerate() {
            if end_offset >= line.begin && end_offset <= line.end {
                loc.end_line = index as u32;
                loc.end_column = end_offset - line.begin;
                break;
            }
            loc.end_line = index as u32 + 1;
        }

        loc
    }

    /// Tokenizes this resource's contents with `token_set`, returning the
    /// completed token stream or the [`SourceException`] raised by the first
    /// unrecognized or unterminated token.
    pub fn tokenize(&self, token_set: &TokenSet) -> Result<TokenizedSource<'_>, SourceException<'_>> {
        TokenizedSource::new(self, token_set)
    }
}
