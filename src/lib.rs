// Copyright 2009-2021 Treeki, RoadrunnerWMC and contributors
// Rust port of NSMBLib, the asset codec used by the Reggie! level editor
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file.

//! # NSMBLib
//!
//! Codec library for New Super Mario Bros. Wii level-art assets, as used by
//! the Reggie! level editor:
//!
//! - A compressor/decompressor for the LZSS 0x11 variant that packs level
//!   and tileset data.
//! - A decoder expanding tiled RGB4A3/RGB555 texture data into row-major,
//!   alpha-premultiplied BGRA rasters.
//!
//! Both are pure, synchronous transformations over in-memory buffers and are
//! safe to call concurrently from multiple threads.
//!
//! ## Example
//!
//! ```rust
//! use nsmblib::{compress, decompress};
//!
//! let data = b"Mario jumps over the same pipe over and over and over again.";
//! let packed = compress(data);
//! let unpacked = decompress(&packed).expect("decompression failed");
//! assert_eq!(data, &unpacked[..]);
//! ```

mod constants;
mod decode;
mod encode;
mod error;
mod index;
mod texture;

pub use decode::{decompress, decompressed_len};
pub use encode::{compress, max_compressed_len};
pub use error::{Error, Result, StreamFault};
pub use texture::{decode_tileset, decode_tileset_opaque};

/// Version of the original NSMBLib module interface this crate matches.
pub fn version() -> u32 {
    constants::VERSION
}

/// Build-date version of the updated interface, as YYYYMMDDNN.
pub fn updated_version() -> u32 {
    constants::UPDATED_VERSION
}

#[cfg(test)]
mod tests;
