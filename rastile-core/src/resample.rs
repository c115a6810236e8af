//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Average downsampling of tile buffers

use crate::buffer::TileBuffer;

/// Reduce `src` to a `dst_size` square buffer by box-averaging each band,
/// including the alpha band.
///
/// The source edge length must be an integer multiple of `dst_size`;
/// anything else indicates a corrupted working buffer and is reported as a
/// fatal error by the caller.
pub fn average_downsample(src: &TileBuffer, dst_size: usize) -> Result<TileBuffer, String> {
    if dst_size == 0 || src.size() % dst_size != 0 {
        return Err(format!(
            "cannot average {}px buffer down to {}px",
            src.size(),
            dst_size
        ));
    }
    let factor = src.size() / dst_size;
    let samples = (factor * factor) as u32;
    let mut dst = TileBuffer::new(dst_size, src.num_bands());
    for band in 0..src.num_bands() {
        let src_band = src.band(band);
        let dst_band = dst.band_mut(band);
        for dy in 0..dst_size {
            for dx in 0..dst_size {
                let mut sum = 0u32;
                for sy in dy * factor..(dy + 1) * factor {
                    let row = sy * src.size();
                    for sx in dx * factor..(dx + 1) * factor {
                        sum += src_band[row + sx] as u32;
                    }
                }
                dst_band[dy * dst_size + dx] = ((sum + samples / 2) / samples) as u8;
            }
        }
    }
    Ok(dst)
}
