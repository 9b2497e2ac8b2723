// Copyright 2009-2021 Treeki, RoadrunnerWMC and contributors
// Rust port of NSMBLib, the asset codec used by the Reggie! level editor
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file.

use crate::constants::*;
use crate::error::{Error, Result, StreamFault};

/// Decompress an LZSS 0x11 stream.
///
/// The decompressed size is taken from the stream header. Trailing bytes
/// beyond the last needed token are ignored, matching the original decoder.
///
/// ```rust
/// use nsmblib::{compress, decompress};
///
/// let data = b"level data level data level data";
/// let packed = compress(data);
/// assert_eq!(decompress(&packed).unwrap(), data);
/// ```
pub fn decompress(src: &[u8]) -> Result<Vec<u8>> {
    let (total, header_len) = decompressed_len(src)?;

    let mut dst = Vec::with_capacity(total);
    lz11_decode(&mut dst, src, header_len, total)?;

    Ok(dst)
}

/// Returns the decompressed size declared by the stream header and the
/// number of bytes the header occupied.
pub fn decompressed_len(src: &[u8]) -> Result<(usize, usize)> {
    if src.is_empty() {
        return Err(truncated_header(0));
    }
    if src[0] != FORMAT_TAG {
        return Err(Error::MalformedStream {
            offset: 0,
            reason: StreamFault::BadTag,
        });
    }
    if src.len() < 4 {
        return Err(truncated_header(src.len()));
    }

    let mut len = u32::from_le_bytes([src[1], src[2], src[3], 0]) as usize;
    let mut header_len = 4;

    // A zero 24-bit field means an extended 32-bit length follows
    if len == 0 {
        if src.len() < 8 {
            return Err(truncated_header(src.len()));
        }
        len = u32::from_le_bytes([src[4], src[5], src[6], src[7]]) as usize;
        header_len = 8;
    }

    if len > MAX_DECOMPRESSED_LEN {
        return Err(Error::TooLarge { declared: len });
    }

    Ok((len, header_len))
}

/// Core token loop: one control byte, then up to 8 literals/back-references,
/// MSB first, until exactly `total` bytes exist. Unused flag bits after the
/// final byte are never dereferenced.
fn lz11_decode(dst: &mut Vec<u8>, src: &[u8], mut s: usize, total: usize) -> Result<()> {
    while dst.len() < total {
        let flags = *src.get(s).ok_or_else(|| truncated_token(s))?;
        s += 1;

        for bit in (0..8).rev() {
            if dst.len() >= total {
                break;
            }

            if flags & (1 << bit) != 0 {
                let token_at = s;
                let (len, dist, consumed) = read_backref(src, s)?;
                s += consumed;

                if dist > dst.len() {
                    return Err(Error::MalformedStream {
                        offset: token_at,
                        reason: StreamFault::BadDistance {
                            distance: dist,
                            produced: dst.len(),
                        },
                    });
                }

                // The original decoder clamps a copy that would run past the
                // declared size rather than rejecting it
                copy_backref(dst, dist, len.min(total - dst.len()));
            } else {
                let lit = *src.get(s).ok_or_else(|| truncated_token(s))?;
                s += 1;
                dst.push(lit);
            }
        }
    }

    Ok(())
}

/// Decode one back-reference token at `s`.
/// Returns (length, distance, bytes consumed).
fn read_backref(src: &[u8], s: usize) -> Result<(usize, usize, usize)> {
    let b1 = *src.get(s).ok_or_else(|| truncated_token(s))? as usize;

    match b1 >> 4 {
        0 => {
            // 3-byte token: lengths 17..=272
            if s + 3 > src.len() {
                return Err(truncated_token(src.len()));
            }
            let b2 = src[s + 1] as usize;
            let b3 = src[s + 2] as usize;
            let len = ((b1 << 4) | (b2 >> 4)) + 0x11;
            let disp = ((b2 & 0xF) << 8) | b3;
            Ok((len, disp + 1, 3))
        }
        1 => {
            // 4-byte token: lengths 273..=65808
            if s + 4 > src.len() {
                return Err(truncated_token(src.len()));
            }
            let b2 = src[s + 1] as usize;
            let b3 = src[s + 2] as usize;
            let b4 = src[s + 3] as usize;
            let len = (((b1 & 0xF) << 12) | (b2 << 4) | (b3 >> 4)) + 0x111;
            let disp = ((b3 & 0xF) << 8) | b4;
            Ok((len, disp + 1, 4))
        }
        t => {
            // 2-byte token: lengths 3..=16
            if s + 2 > src.len() {
                return Err(truncated_token(src.len()));
            }
            let disp = ((b1 & 0xF) << 8) | src[s + 1] as usize;
            Ok((t + 1, disp + 1, 2))
        }
    }
}

/// Append `len` bytes copied from `dist` bytes behind the write cursor.
/// When the source range overlaps the bytes being written the copy must be
/// sequential, so that short cycles replicate (a distance-1 reference
/// repeats one byte for the whole length).
fn copy_backref(dst: &mut Vec<u8>, dist: usize, len: usize) {
    let start = dst.len() - dist;
    if dist >= len {
        dst.extend_from_within(start..start + len);
    } else {
        for i in 0..len {
            let b = dst[start + i];
            dst.push(b);
        }
    }
}

fn truncated_header(offset: usize) -> Error {
    Error::MalformedStream {
        offset,
        reason: StreamFault::TruncatedHeader,
    }
}

fn truncated_token(offset: usize) -> Error {
    Error::MalformedStream {
        offset,
        reason: StreamFault::TruncatedToken,
    }
}
