// Copyright 2009-2021 Treeki, RoadrunnerWMC and contributors
// Rust port of NSMBLib, the asset codec used by the Reggie! level editor
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file.

use crate::constants::*;
use crate::error::{Error, Result};

/// Decode a tiled RGB4A3/RGB555 tileset texture into a row-major,
/// alpha-premultiplied BGRA raster.
///
/// The source is 16-bit big-endian texels in 4x4 tiles across a 1024-pixel
/// width; its length must be a whole number of tile rows. The output holds
/// four bytes per texel.
pub fn decode_tileset(src: &[u8]) -> Result<Vec<u8>> {
    decode(src, true)
}

/// Like [`decode_tileset`], but alpha is forced to 255 and colors pass
/// through unpremultiplied.
pub fn decode_tileset_opaque(src: &[u8]) -> Result<Vec<u8>> {
    decode(src, false)
}

fn decode(src: &[u8], honor_alpha: bool) -> Result<Vec<u8>> {
    if src.len() % TILE_ROW_STRIDE != 0 {
        return Err(Error::MalformedBuffer { len: src.len() });
    }

    let texel_count = src.len() / BYTES_PER_TEXEL;
    let mut dst = vec![0u8; texel_count * BYTES_PER_PIXEL];

    // Tiles are stored left-to-right across the texture, wrapping to the
    // next tile row; texels inside a tile are row-major
    let mut tx = 0;
    let mut ty = 0;
    let mut s = 0;

    for _ in 0..texel_count / (TILE_DIM * TILE_DIM) {
        for y in ty..ty + TILE_DIM {
            let row = y * TEXTURE_WIDTH;
            for x in tx..tx + TILE_DIM {
                let texel = u16::from_be_bytes([src[s], src[s + 1]]);
                s += BYTES_PER_TEXEL;

                let out = (row + x) * BYTES_PER_PIXEL;
                dst[out..out + BYTES_PER_PIXEL]
                    .copy_from_slice(&decode_texel(texel, honor_alpha));
            }
        }

        tx += TILE_DIM;
        if tx >= TEXTURE_WIDTH {
            tx = 0;
            ty += TILE_DIM;
        }
    }

    Ok(dst)
}

/// Expand one texel to BGRA bytes.
fn decode_texel(texel: u16, honor_alpha: bool) -> [u8; 4] {
    let (r, g, b, a) = if texel & 0x8000 == 0 {
        // RGB4A3: 4-bit channels scaled by 17, 3-bit alpha widened by bit
        // replication
        let r = ((texel >> 8) & 0xF) as u8 * 17;
        let g = ((texel >> 4) & 0xF) as u8 * 17;
        let b = (texel & 0xF) as u8 * 17;
        let a3 = (texel >> 12) as u8;
        (r, g, b, (a3 << 5) | (a3 << 2) | (a3 >> 1))
    } else {
        // RGB555: 5-bit channels widened by bit replication, opaque
        let r5 = ((texel >> 10) & 0x1F) as u8;
        let g5 = ((texel >> 5) & 0x1F) as u8;
        let b5 = (texel & 0x1F) as u8;
        (
            (r5 << 3) | (r5 >> 2),
            (g5 << 3) | (g5 >> 2),
            (b5 << 3) | (b5 >> 2),
            0xFF,
        )
    };

    if !honor_alpha {
        return [b, g, r, 0xFF];
    }

    // Fully transparent pixels must not leak color
    if a == 0 {
        return [0, 0, 0, 0];
    }

    [premultiply(b, a), premultiply(g, a), premultiply(r, a), a]
}

/// Scale a channel by `alpha / 255` with round-half-up, in fixed point.
#[inline]
fn premultiply(channel: u8, alpha: u8) -> u8 {
    let t = channel as u32 * alpha as u32;
    ((t + (t >> 8) + 0x80) >> 8) as u8
}
