// Copyright 2009-2021 Treeki, RoadrunnerWMC and contributors
// Rust port of NSMBLib, the asset codec used by the Reggie! level editor
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file.

use std::fmt;

/// Result type for NSMBLib operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the LZ codec and tileset decoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The compressed stream is truncated or self-inconsistent.
    /// `offset` is the source byte at which decoding had to give up.
    MalformedStream { offset: usize, reason: StreamFault },

    /// The declared decompressed size exceeds the sanity limit
    TooLarge { declared: usize },

    /// A texture buffer's length is not a whole number of tile rows
    MalformedBuffer { len: usize },
}

/// What exactly went wrong inside a compressed stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamFault {
    /// First byte is not the 0x11 format tag
    BadTag,

    /// The stream ends inside the length header
    TruncatedHeader,

    /// The stream ends where a control byte, token or literal was expected
    TruncatedToken,

    /// A back-reference reaches before the start of the output
    BadDistance { distance: usize, produced: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedStream { offset, reason } => {
                write!(f, "nsmblib: malformed stream at byte {}: {}", offset, reason)
            }
            Error::TooLarge { declared } => {
                write!(f, "nsmblib: declared size {} exceeds the 8 MiB limit", declared)
            }
            Error::MalformedBuffer { len } => {
                write!(
                    f,
                    "nsmblib: texture length {} is not a multiple of the {}-byte tile row",
                    len,
                    crate::constants::TILE_ROW_STRIDE
                )
            }
        }
    }
}

impl fmt::Display for StreamFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamFault::BadTag => write!(f, "not an LZSS 0x11 stream"),
            StreamFault::TruncatedHeader => write!(f, "truncated header"),
            StreamFault::TruncatedToken => write!(f, "input exhausted mid-token"),
            StreamFault::BadDistance { distance, produced } => write!(
                f,
                "back-reference distance {} with only {} bytes produced",
                distance, produced
            ),
        }
    }
}

impl std::error::Error for Error {}
