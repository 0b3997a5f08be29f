//! Source locations and the byte offsets they are built from.

#![deny(missing_docs, missing_debug_implementations)]

/// A UTF-8 byte offset into a [`Resource`](crate::resource::Resource)'s contents.
pub type Offset = u32;

/// Sentinel `resourceId` marking an invalid or out-of-range [`SourceLocation`].
pub const INVALID_RESOURCE_ID: u32 = u32::MAX;

/// A span of source text: a resource id, a half-open byte range `[start, end)`
/// into that resource's contents, and the 0-based line/column pair for each
/// end of the range.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct SourceLocation {
    /// Caller-assigned tag identifying the [`Resource`](crate::resource::Resource) this location refers to.
    pub resource_id: u32,
    /// Start of the half-open byte range, inclusive.
    pub start_buffer_position: Offset,
    /// End of the half-open byte range, exclusive.
    pub end_buffer_position: Offset,
    /// 0-based line number at `start_buffer_position`.
    pub start_line: u32,
    /// 0-based line number at `end_buffer_position`.
    pub end_line: u32,
    /// 0-based column number at `start_buffer_position`.
    pub start_column: u32,
    /// 0-based column number at `end_buffer_position`.
    pub end_column: u32,
}

impl SourceLocation {
    /// The sentinel location produced for out-of-range or malformed ranges.
    pub const INVALID: SourceLocation = SourceLocation {
        resource_id: INVALID_RESOURCE_ID,
        start_buffer_position: 0,
        end_buffer_position: 0,
        start_line: 0,
        end_line: 0,
        start_column: 0,
        end_column: 0,
    };

    /// Whether this location refers to a real resource, i.e. is not [`SourceLocation::INVALID`].
    pub fn is_valid(&self) -> bool {
        self.resource_id != INVALID_RESOURCE_ID
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::INVALID
    }
}
