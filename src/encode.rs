// Copyright 2009-2021 Treeki, RoadrunnerWMC and contributors
// Rust port of NSMBLib, the asset codec used by the Reggie! level editor
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file.

use crate::constants::*;
use crate::error::{Error, Result};
use crate::index::MatchIndex;

/// Compress `src` into an LZSS 0x11 stream.
///
/// The output always round-trips through [`crate::decompress`]. The scan is
/// greedy: at each position the longest match wins, with ties going to the
/// nearest candidate so displacements stay small.
///
/// ```rust
/// use nsmblib::{compress, decompress};
///
/// let data = vec![0x42u8; 4096];
/// let packed = compress(&data);
/// assert!(packed.len() < 32);
/// assert_eq!(decompress(&packed).unwrap(), data);
/// ```
pub fn compress(src: &[u8]) -> Vec<u8> {
    let max_len = max_compressed_len(src.len()).expect("source too large");
    let mut dst = Vec::with_capacity(max_len);
    write_header(&mut dst, src.len());

    let mut index = MatchIndex::new(src.len());
    let mut pos = 0;

    while pos < src.len() {
        let flag_at = dst.len();
        dst.push(0);
        let mut flags = 0u8;

        for bit in (0..8).rev() {
            if pos >= src.len() {
                break;
            }

            match longest_match(src, pos, &index) {
                Some((len, dist)) => {
                    flags |= 1 << bit;
                    emit_backref(&mut dst, len, dist);

                    // Index the covered positions too; later tokens may
                    // reference into this match
                    for covered in pos..pos + len {
                        index.insert(src, covered);
                    }
                    pos += len;
                }
                None => {
                    index.insert(src, pos);
                    dst.push(src[pos]);
                    pos += 1;
                }
            }
        }

        dst[flag_at] = flags;
    }

    dst
}

/// Returns the largest stream `compress` can produce for `src_len` input
/// bytes: the worst case is all literals plus one control byte per eight.
pub fn max_compressed_len(src_len: usize) -> Result<usize> {
    if src_len > 0xffffffff {
        return Err(Error::TooLarge { declared: src_len });
    }
    Ok(8 + src_len + src_len.div_ceil(8))
}

/// Write the format tag and decompressed length.
///
/// A zero length must use the extended form: the short form would leave a
/// zero 24-bit field, which the decoder reads as "extended length follows".
fn write_header(dst: &mut Vec<u8>, len: usize) {
    dst.push(FORMAT_TAG);
    if len == 0 || len > MAX_SHORT_HEADER_LEN {
        dst.extend_from_slice(&[0, 0, 0]);
        dst.extend_from_slice(&(len as u32).to_le_bytes());
    } else {
        dst.push(len as u8);
        dst.push((len >> 8) as u8);
        dst.push((len >> 16) as u8);
    }
}

/// Find the best match at `pos`: longest first, nearest on ties.
///
/// Candidates come back most-recent first, so requiring a strictly longer
/// run to displace the current best lands on the smallest displacement
/// among equals.
fn longest_match(src: &[u8], pos: usize, index: &MatchIndex) -> Option<(usize, usize)> {
    let limit = MAX_MATCH_LEN.min(src.len() - pos);
    if limit < MIN_MATCH_LEN {
        return None;
    }

    let mut best_len = 0;
    let mut best_dist = 0;

    for cand in index.candidates(src, pos) {
        let len = run_length(src, cand, pos, limit);
        if len > best_len {
            best_len = len;
            best_dist = pos - cand;
            if len == limit {
                break;
            }
        }
    }

    if best_len >= MIN_MATCH_LEN {
        Some((best_len, best_dist))
    } else {
        None
    }
}

/// Length of the equal run starting at `cand` and `pos`. The run is allowed
/// to extend past `pos` itself (distance shorter than length): the decoder
/// copies sequentially, so those bytes exist by the time it reads them.
#[inline]
fn run_length(src: &[u8], cand: usize, pos: usize, limit: usize) -> usize {
    let mut len = 0;
    while len < limit && src[cand + len] == src[pos + len] {
        len += 1;
    }
    len
}

/// Emit one back-reference token, picking the narrowest tier that can hold
/// the length. The displacement field always stores `distance - 1`.
fn emit_backref(dst: &mut Vec<u8>, len: usize, dist: usize) {
    let disp = dist - 1;

    if len <= MAX_SHORT_MATCH_LEN {
        dst.push((((len - 1) as u8) << 4) | (disp >> 8) as u8);
        dst.push(disp as u8);
    } else if len <= MAX_MEDIUM_MATCH_LEN {
        let stored = len - 17;
        dst.push((stored >> 4) as u8);
        dst.push((((stored & 0xF) as u8) << 4) | (disp >> 8) as u8);
        dst.push(disp as u8);
    } else {
        let stored = len - 273;
        dst.push(0x10 | (stored >> 12) as u8);
        dst.push((stored >> 4) as u8);
        dst.push((((stored & 0xF) as u8) << 4) | (disp >> 8) as u8);
        dst.push(disp as u8);
    }
}
