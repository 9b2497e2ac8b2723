// Copyright 2009-2021 Treeki, RoadrunnerWMC and contributors
// Rust port of NSMBLib, the asset codec used by the Reggie! level editor
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file.

/// Format tag identifying the LZSS 0x11 variant
pub const FORMAT_TAG: u8 = 0x11;

/// Maximum backwards distance a token can reference (12-bit displacement)
pub const WINDOW_SIZE: usize = 0x1000;

/// Shortest match worth encoding
pub const MIN_MATCH_LEN: usize = 3;

/// Longest match a 2-byte token can hold
pub const MAX_SHORT_MATCH_LEN: usize = 0xF + 1;

/// Longest match a 3-byte token can hold
pub const MAX_MEDIUM_MATCH_LEN: usize = 0xFF + 17;

/// Longest match a 4-byte token can hold
pub const MAX_MATCH_LEN: usize = 0xFFFF + 273;

/// Largest decompressed size the short (4-byte) header can express
pub const MAX_SHORT_HEADER_LEN: usize = 0xFF_FFFF;

/// Sanity limit on the decompressed size (8 MiB, from the original module)
pub const MAX_DECOMPRESSED_LEN: usize = 0x80_0000;

/// Logical width of a tileset texture in pixels
pub const TEXTURE_WIDTH: usize = 1024;

/// Edge length of one texture tile in pixels
pub const TILE_DIM: usize = 4;

/// Bytes per source texel (RGB4A3/RGB555, big-endian)
pub const BYTES_PER_TEXEL: usize = 2;

/// Bytes per decoded pixel (BGRA)
pub const BYTES_PER_PIXEL: usize = 4;

/// Source bytes covering one full row of tiles
pub const TILE_ROW_STRIDE: usize = TEXTURE_WIDTH * TILE_DIM * BYTES_PER_TEXEL;

/// Version of the original NSMBLib module this crate reimplements
pub const VERSION: u32 = 5;

/// Build-date version of the updated fork, as YYYYMMDDNN
pub const UPDATED_VERSION: u32 = 2021092400;
