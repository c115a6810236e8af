//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! PNG encoding/decoding of RGBA tile buffers

use crate::buffer::TileBuffer;
use crate::errors::{Error, Result};
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;

/// Encode a 4-band tile buffer as PNG bytes
pub fn encode(tile: &TileBuffer) -> Result<Vec<u8>> {
    let size = tile.size() as u32;
    let image = RgbaImage::from_raw(size, size, tile.to_rgba())
        .ok_or_else(|| Error::Codec("RGBA buffer size mismatch".to_string()))?;
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(image).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Decode PNG bytes into a 4-band tile buffer
pub fn decode(data: &[u8]) -> Result<TileBuffer> {
    let image = image::load_from_memory_with_format(data, ImageFormat::Png)?.to_rgba8();
    let (width, height) = image.dimensions();
    if width != height {
        return Err(Error::Codec(format!(
            "tile image is not square: {}x{}",
            width, height
        )));
    }
    Ok(TileBuffer::from_rgba(width as usize, &image.into_raw()))
}
