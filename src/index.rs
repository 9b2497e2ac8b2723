// Copyright 2009-2021 Treeki, RoadrunnerWMC and contributors
// Rust port of NSMBLib, the asset codec used by the Reggie! level editor
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file.

use crate::constants::{MIN_MATCH_LEN, WINDOW_SIZE};

const TABLE_BITS: u32 = 15;
const TABLE_SIZE: usize = 1 << TABLE_BITS;
const NO_POS: i32 = -1;

/// Hash of the 3-byte prefix at `pos`
#[inline]
fn prefix_hash(data: &[u8], pos: usize) -> usize {
    let v = u32::from_le_bytes([data[pos], data[pos + 1], data[pos + 2], 0]);
    (v.wrapping_mul(0x1e35a7bd) >> (32 - TABLE_BITS)) as usize
}

/// Chained-hash index over 3-byte prefixes, built once per compression call.
///
/// `head` maps a prefix hash to the most recently inserted position with that
/// hash; `prev` links each inserted position to the previous one in its
/// chain. Walking a chain therefore yields candidates most-recent first,
/// which keeps encoded distances as short as the format allows.
pub(crate) struct MatchIndex {
    head: Vec<i32>,
    prev: Vec<i32>,
}

impl MatchIndex {
    pub(crate) fn new(input_len: usize) -> Self {
        MatchIndex {
            head: vec![NO_POS; TABLE_SIZE],
            prev: vec![NO_POS; input_len],
        }
    }

    /// Record `pos` under its prefix. Positions without a full 3-byte prefix
    /// left in the input cannot start a match and are not recorded.
    pub(crate) fn insert(&mut self, data: &[u8], pos: usize) {
        if pos + MIN_MATCH_LEN > data.len() {
            return;
        }
        let h = prefix_hash(data, pos);
        self.prev[pos] = self.head[h];
        self.head[h] = pos as i32;
    }

    /// Earlier positions whose prefix hashes like the one at `pos`, most
    /// recent first, cut off at the edge of the reference window.
    pub(crate) fn candidates(&self, data: &[u8], pos: usize) -> Candidates<'_> {
        let next = if pos + MIN_MATCH_LEN <= data.len() {
            self.head[prefix_hash(data, pos)]
        } else {
            NO_POS
        };
        Candidates {
            prev: &self.prev,
            next,
            min_pos: pos.saturating_sub(WINDOW_SIZE),
        }
    }
}

pub(crate) struct Candidates<'a> {
    prev: &'a [i32],
    next: i32,
    min_pos: usize,
}

impl Iterator for Candidates<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.next < 0 {
            return None;
        }
        let pos = self.next as usize;
        // Chains are strictly decreasing, so the first position outside the
        // window ends the walk.
        if pos < self.min_pos {
            self.next = NO_POS;
            return None;
        }
        self.next = self.prev[pos];
        Some(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates_most_recent_first() {
        let data = b"abcXabcYabcZabc";
        let mut index = MatchIndex::new(data.len());
        for pos in 0..12 {
            index.insert(data, pos);
        }

        let found: Vec<usize> = index.candidates(data, 12).collect();
        assert_eq!(found, vec![8, 4, 0]);
    }

    #[test]
    fn test_window_cutoff() {
        let mut data = vec![0u8; WINDOW_SIZE + 8];
        data[0] = b'a';
        data[1] = b'b';
        data[2] = b'c';
        let tail = data.len() - 3;
        data[tail] = b'a';
        data[tail + 1] = b'b';
        data[tail + 2] = b'c';

        let mut index = MatchIndex::new(data.len());
        index.insert(&data, 0);
        // Position 0 is more than WINDOW_SIZE behind the query point
        assert_eq!(index.candidates(&data, tail).next(), None);
    }

    #[test]
    fn test_tail_positions_not_indexed() {
        let data = b"xy";
        let mut index = MatchIndex::new(data.len());
        index.insert(data, 0);
        index.insert(data, 1);
        assert_eq!(index.candidates(data, 0).next(), None);
    }
}
