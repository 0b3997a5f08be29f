//! The error type raised while tokenizing a [`Resource`](crate::resource::Resource).

#![deny(missing_docs, missing_debug_implementations)]

use crate::location::SourceLocation;
use crate::resource::Resource;
use std::fmt;

/// Upper bound on a [`SourceException`] message, matching the `vsnprintf`
/// buffer size the original implementation formats into.
const MESSAGE_LIMIT: usize = 1024;

/// Raised by [`Resource::tokenize`](crate::resource::Resource::tokenize) when
/// the cursor sits on a byte sequence no registered matcher recognizes, or on
/// a ranged literal/regex match that reached end of input before its closing
/// delimiter.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct SourceException<'r> {
    source: &'r Resource,
    location: SourceLocation,
    message: String,
}

impl<'r> SourceException<'r> {
    /// Builds an exception with an already-formatted message.
    pub fn new(source: &'r Resource, location: SourceLocation, message: impl Into<String>) -> Self {
        let mut message = message.into();
        truncate_to_byte_limit(&mut message, MESSAGE_LIMIT);
        Self {
            source,
            location,
            message,
        }
    }

    /// Builds an exception from a [`std::fmt::Arguments`] value, as produced
    /// by `format_args!`. Equivalent to the printf-style constructor in the
    /// original C++ `SourceException`, bounded at the same 1024 bytes.
    pub fn with_args(source: &'r Resource, location: SourceLocation, args: fmt::Arguments<'_>) -> Self {
        Self::new(source, location, fmt::format(args))
    }

    /// The resource the failing token was found in.
    pub fn source(&self) -> &'r Resource {
        self.source
    }

    /// The location of the failing token.
    pub fn location(&self) -> SourceLocation {
        self.location
    }

    /// The error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Truncates `s` to at most `limit` bytes without splitting a UTF-8 code point.
fn truncate_to_byte_limit(s: &mut String, limit: usize) {
    if s.len() <= limit {
        return;
    }

    let mut cut = limit;
    while cut > 0 && !s.is_char_boundary(cut) {
        cut -= 1;
    }
    s.truncate(cut);
}
