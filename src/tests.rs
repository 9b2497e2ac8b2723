// Copyright 2009-2021 Treeki, RoadrunnerWMC and contributors
// Rust port of NSMBLib, the asset codec used by the Reggie! level editor
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file.

use crate::{
    compress, decode_tileset, decompress, decompressed_len, max_compressed_len, Error, StreamFault,
};

fn roundtrip(data: &[u8]) -> Result<(), String> {
    let encoded = compress(data);
    let decoded = decompress(&encoded).map_err(|e| format!("decode error: {}", e))?;

    if decoded != data {
        return Err(format!(
            "roundtrip mismatch: original len={}, decoded len={}",
            data.len(),
            decoded.len()
        ));
    }

    let (dlen, _) = decompressed_len(&encoded).map_err(|e| format!("header error: {}", e))?;
    if dlen != data.len() {
        return Err(format!(
            "header length mismatch: declared={}, actual={}",
            dlen,
            data.len()
        ));
    }

    Ok(())
}

#[test]
fn test_empty() {
    roundtrip(&[]).unwrap();
}

#[test]
fn test_single_byte() {
    roundtrip(&[0x42]).unwrap();
}

#[test]
fn test_empty_uses_extended_header() {
    // The short form would leave a zero 24-bit field, which the decoder
    // reads as "extended length follows"
    let encoded = compress(&[]);
    assert_eq!(encoded, vec![0x11, 0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(decompress(&encoded).unwrap(), Vec::<u8>::new());
}

#[test]
fn test_small_rand() {
    // Simple LCG for reproducible random numbers
    let mut state: u64 = 0x9E3779B97F4A7C15;
    let mut lcg_next = move || -> u8 {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (state >> 32) as u8
    };

    let mut n = 1;
    while n < 20000 {
        let b: Vec<u8> = (0..n).map(|_| lcg_next()).collect();
        roundtrip(&b).unwrap();
        n += 23;
    }
}

#[test]
fn test_small_regular() {
    let mut n = 1;
    while n < 20000 {
        let b: Vec<u8> = (0..n).map(|i| (i % 10) as u8 + b'a').collect();
        roundtrip(&b).unwrap();
        n += 23;
    }
}

#[test]
fn test_small_repeat() {
    let mut n = 1;
    while n < 20000 {
        let b = vec![b'a'; n];
        roundtrip(&b).unwrap();
        n += 23;
    }
}

#[test]
fn test_overlap_self_reference() {
    // Runs of zero force back-references whose distance is shorter than
    // their length; the broken historical encoder mishandled these
    let mut v = vec![0u8; 32];
    v[1] = 1;
    v[9] = 1;
    roundtrip(&v).unwrap();
}

#[test]
fn test_repeat_compresses_to_one_token_per_tier() {
    // A run of one byte becomes a literal plus a single distance-1
    // back-reference, so the stream size pins down the token tier:
    // header 4 + control 1 + literal 1 + token bytes
    for (match_len, token_bytes) in [(3, 2), (16, 2), (17, 3), (272, 3), (273, 4), (65808, 4)] {
        let data = vec![b'a'; match_len + 1];
        let encoded = compress(&data);
        assert_eq!(
            encoded.len(),
            4 + 1 + 1 + token_bytes,
            "wrong token width for match length {}",
            match_len
        );
        assert_eq!(decompress(&encoded).unwrap(), data);
    }
}

#[test]
fn test_run_longer_than_max_match() {
    // Longer than one 4-byte token can hold, so the encoder must split
    roundtrip(&vec![0xAB; 70000]).unwrap();
}

#[test]
fn test_distant_matches_stay_in_window() {
    // The same block recurs beyond the 4 KiB window; matching it directly
    // would be unencodable
    let mut v = vec![0u8; 5000];
    for (i, byte) in v.iter_mut().enumerate() {
        *byte = (i % 251) as u8;
    }
    let mut data = v.clone();
    data.extend_from_slice(&v);
    roundtrip(&data).unwrap();
}

#[test]
fn test_incompressible_expands_little() {
    let data: Vec<u8> = (0..=255u8).collect();
    let encoded = compress(&data);
    assert!(encoded.len() <= max_compressed_len(data.len()).unwrap());
    assert_eq!(decompress(&encoded).unwrap(), data);
}

#[test]
fn test_decompress_rejects_bad_tag() {
    let err = decompress(&[0x10, 4, 0, 0, 0x00]).unwrap_err();
    assert_eq!(
        err,
        Error::MalformedStream {
            offset: 0,
            reason: StreamFault::BadTag
        }
    );
}

#[test]
fn test_decompress_rejects_truncated_header() {
    for src in [&[][..], &[0x11][..], &[0x11, 4, 0][..], &[0x11, 0, 0, 0, 1][..]] {
        match decompress(src) {
            Err(Error::MalformedStream {
                reason: StreamFault::TruncatedHeader,
                ..
            }) => {}
            other => panic!("expected truncated header for {:?}, got {:?}", src, other),
        }
    }
}

#[test]
fn test_decompress_rejects_truncated_tokens() {
    // Declares 4 bytes, provides one literal
    let err = decompress(&[0x11, 4, 0, 0, 0x00, b'a']).unwrap_err();
    assert_eq!(
        err,
        Error::MalformedStream {
            offset: 6,
            reason: StreamFault::TruncatedToken
        }
    );

    // Back-reference flag set, token bytes missing
    let err = decompress(&[0x11, 4, 0, 0, 0x80, 0x30]).unwrap_err();
    assert_eq!(
        err,
        Error::MalformedStream {
            offset: 6,
            reason: StreamFault::TruncatedToken
        }
    );
}

#[test]
fn test_decompress_rejects_bad_distance() {
    // First token is a back-reference with nothing produced yet
    let err = decompress(&[0x11, 4, 0, 0, 0x80, 0x20, 0x00]).unwrap_err();
    assert_eq!(
        err,
        Error::MalformedStream {
            offset: 5,
            reason: StreamFault::BadDistance {
                distance: 1,
                produced: 0
            }
        }
    );
}

#[test]
fn test_decompress_rejects_oversized_declaration() {
    let err = decompress(&[0x11, 0, 0, 0x90, 0x00]).unwrap_err();
    assert_eq!(
        err,
        Error::TooLarge {
            declared: 0x90_0000
        }
    );
}

#[test]
fn test_decompress_ignores_trailing_bytes() {
    let mut encoded = compress(b"abcabcabc");
    encoded.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
    assert_eq!(decompress(&encoded).unwrap(), b"abcabcabc");
}

#[test]
fn test_max_compressed_len() {
    assert_eq!(max_compressed_len(0).unwrap(), 8);
    assert_eq!(max_compressed_len(8).unwrap(), 17);
    assert!(max_compressed_len(usize::MAX).is_err());

    for n in [0usize, 1, 7, 8, 9, 100, 4096] {
        let data = vec![0xFFu8; n];
        assert!(compress(&data).len() <= max_compressed_len(n).unwrap());
    }
}

#[test]
fn test_tileset_rejects_partial_tile_rows() {
    for len in [1usize, 100, 8191, 8193, 16383] {
        let err = decode_tileset(&vec![0u8; len]).unwrap_err();
        assert_eq!(err, Error::MalformedBuffer { len });
    }
}

#[test]
fn test_tileset_output_size() {
    // One tile row: 1024x4 texels
    let out = decode_tileset(&vec![0u8; 8192]).unwrap();
    assert_eq!(out.len(), 8192 * 2);

    let out = decode_tileset(&[]).unwrap();
    assert!(out.is_empty());
}
