//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! In-memory tile pixel buffers

/// Square pixel buffer with planar band layout, owned by a single tile
/// operation. Freshly allocated buffers are zero, i.e. fully transparent.
#[derive(Clone, Debug)]
pub struct TileBuffer {
    size: usize,
    bands: Vec<Vec<u8>>,
}

impl TileBuffer {
    pub fn new(size: usize, num_bands: usize) -> TileBuffer {
        TileBuffer {
            size,
            bands: vec![vec![0u8; size * size]; num_bands],
        }
    }
    /// Edge length in pixels
    pub fn size(&self) -> usize {
        self.size
    }
    pub fn num_bands(&self) -> usize {
        self.bands.len()
    }
    pub fn band(&self, band: usize) -> &[u8] {
        &self.bands[band]
    }
    pub fn band_mut(&mut self, band: usize) -> &mut [u8] {
        &mut self.bands[band]
    }
    /// Copy a `width`x`height` row-major region into a band at pixel
    /// offset (x, y). The region must fit inside the buffer.
    pub fn write_band_region(
        &mut self,
        band: usize,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        data: &[u8],
    ) {
        debug_assert_eq!(data.len(), width * height);
        debug_assert!(x + width <= self.size && y + height <= self.size);
        for row in 0..height {
            let src = &data[row * width..(row + 1) * width];
            let offset = (y + row) * self.size + x;
            self.bands[band][offset..offset + width].copy_from_slice(src);
        }
    }
    /// Copy the full content of `tile` to pixel offset (x, y), band by band
    pub fn blit(&mut self, tile: &TileBuffer, x: usize, y: usize) {
        debug_assert_eq!(tile.num_bands(), self.num_bands());
        for band in 0..tile.num_bands() {
            self.write_band_region(band, x, y, tile.size, tile.size, tile.band(band));
        }
    }
    /// Interleave a 4-band buffer into RGBA pixel order
    pub fn to_rgba(&self) -> Vec<u8> {
        debug_assert_eq!(self.num_bands(), 4);
        let npixels = self.size * self.size;
        let mut rgba = Vec::with_capacity(npixels * 4);
        for i in 0..npixels {
            for band in &self.bands {
                rgba.push(band[i]);
            }
        }
        rgba
    }
    /// De-interleave RGBA pixel data into a 4-band buffer
    pub fn from_rgba(size: usize, rgba: &[u8]) -> TileBuffer {
        debug_assert_eq!(rgba.len(), size * size * 4);
        let mut buffer = TileBuffer::new(size, 4);
        for (i, pixel) in rgba.chunks_exact(4).enumerate() {
            for (band, &value) in pixel.iter().enumerate() {
                buffer.bands[band][i] = value;
            }
        }
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_write() {
        let mut buffer = TileBuffer::new(4, 4);
        buffer.write_band_region(1, 1, 2, 2, 2, &[9, 8, 7, 6]);
        assert_eq!(
            buffer.band(1),
            &[
                0, 0, 0, 0, //
                0, 0, 0, 0, //
                0, 9, 8, 0, //
                0, 7, 6, 0,
            ]
        );
        assert_eq!(buffer.band(0), &[0u8; 16]);
    }

    #[test]
    fn test_blit_quadrant() {
        let mut child = TileBuffer::new(2, 4);
        child.band_mut(0).copy_from_slice(&[1, 2, 3, 4]);
        let mut parent = TileBuffer::new(4, 4);
        parent.blit(&child, 2, 0);
        assert_eq!(
            parent.band(0),
            &[
                0, 0, 1, 2, //
                0, 0, 3, 4, //
                0, 0, 0, 0, //
                0, 0, 0, 0,
            ]
        );
    }

    #[test]
    fn test_rgba_roundtrip() {
        let mut buffer = TileBuffer::new(2, 4);
        buffer.band_mut(0).copy_from_slice(&[10, 20, 30, 40]);
        buffer.band_mut(3).copy_from_slice(&[255, 0, 255, 0]);
        let rgba = buffer.to_rgba();
        assert_eq!(rgba[0..4], [10, 0, 0, 255]);
        assert_eq!(rgba[4..8], [20, 0, 0, 0]);
        let back = TileBuffer::from_rgba(2, &rgba);
        assert_eq!(back.band(0), buffer.band(0));
        assert_eq!(back.band(3), buffer.band(3));
    }
}
