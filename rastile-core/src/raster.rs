//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Raster source abstraction

use crate::errors::{Error, Result};
use mercator_grid::Extent;
use std::sync::Arc;

/// Affine transform mapping pixel (col, row) to projected coordinates.
/// Read once from the input raster, immutable afterwards.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct GeoTransform(pub [f64; 6]);

impl GeoTransform {
    pub fn origin_x(&self) -> f64 {
        self.0[0]
    }
    pub fn pixel_width(&self) -> f64 {
        self.0[1]
    }
    pub fn origin_y(&self) -> f64 {
        self.0[3]
    }
    pub fn pixel_height(&self) -> f64 {
        self.0[5]
    }
    /// Projected bounds of a raster with the given pixel dimensions.
    /// Assumes north-up square pixels, which warped rasters guarantee.
    pub fn raster_bounds(&self, width: usize, height: usize) -> Extent {
        let minx = self.origin_x();
        let maxy = self.origin_y();
        Extent {
            minx,
            miny: maxy - self.pixel_width() * height as f64,
            maxx: minx + self.pixel_width() * width as f64,
            maxy,
        }
    }
}

/// Pixel region to read from the source raster
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct RasterWindow {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// Placement of a read region inside an oversized working buffer
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct BufferWindow {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl RasterWindow {
    pub fn empty() -> RasterWindow {
        RasterWindow {
            x: 0,
            y: 0,
            width: 0,
            height: 0,
        }
    }
    /// Zero extent on any axis means "no raster coverage"
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl BufferWindow {
    pub fn empty() -> BufferWindow {
        BufferWindow {
            x: 0,
            y: 0,
            width: 0,
            height: 0,
        }
    }
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Read access to a raster in the grid projection with a validity mask.
///
/// Implementations resample the requested window to the destination size
/// while reading (GDAL `RasterIO` buffer semantics). Sources are opened per
/// worker; the handle only needs to be `Send`.
pub trait RasterSource: Send {
    fn geo_transform(&self) -> GeoTransform;
    /// Raster dimensions in pixels (width, height)
    fn dimensions(&self) -> (usize, usize);
    /// Data bands (RGB) of `window`, each scaled to `size` pixels,
    /// planar row-major
    fn read_window(&self, window: &RasterWindow, size: (usize, usize)) -> Result<Vec<Vec<u8>>>;
    /// Validity mask of `window` scaled to `size`; 255 marks valid pixels
    fn read_mask(&self, window: &RasterWindow, size: (usize, usize)) -> Result<Vec<u8>>;
}

/// In-memory RGB raster with validity mask.
///
/// Backs the engine tests and embedded use; cloning shares the pixel data.
#[derive(Clone)]
pub struct MemoryRaster {
    geo_transform: GeoTransform,
    width: usize,
    height: usize,
    bands: Arc<Vec<Vec<u8>>>,
    mask: Arc<Vec<u8>>,
}

impl MemoryRaster {
    pub fn new(
        geo_transform: GeoTransform,
        width: usize,
        height: usize,
        bands: Vec<Vec<u8>>,
        mask: Vec<u8>,
    ) -> MemoryRaster {
        debug_assert_eq!(bands.len(), 3);
        debug_assert!(bands.iter().all(|b| b.len() == width * height));
        debug_assert_eq!(mask.len(), width * height);
        MemoryRaster {
            geo_transform,
            width,
            height,
            bands: Arc::new(bands),
            mask: Arc::new(mask),
        }
    }
    /// Fully valid raster filled with a uniform color
    pub fn filled(
        geo_transform: GeoTransform,
        width: usize,
        height: usize,
        color: [u8; 3],
    ) -> MemoryRaster {
        let bands = color.iter().map(|&c| vec![c; width * height]).collect();
        MemoryRaster::new(geo_transform, width, height, bands, vec![255; width * height])
    }

    fn check_window(&self, window: &RasterWindow) -> Result<()> {
        if window.is_empty() {
            return Err(Error::RasterRead(
                "zero-size windows must be special-cased by the caller".to_string(),
            ));
        }
        if window.x + window.width > self.width || window.y + window.height > self.height {
            return Err(Error::RasterRead(format!(
                "window {:?} outside raster {}x{}",
                window, self.width, self.height
            )));
        }
        Ok(())
    }

    /// Nearest-neighbor scaled window read of one band
    fn sample(&self, data: &[u8], window: &RasterWindow, size: (usize, usize)) -> Vec<u8> {
        let (out_w, out_h) = size;
        let mut out = Vec::with_capacity(out_w * out_h);
        for j in 0..out_h {
            let sy = window.y
                + (((j as f64 + 0.5) * window.height as f64 / out_h as f64) as usize)
                    .min(window.height - 1);
            for i in 0..out_w {
                let sx = window.x
                    + (((i as f64 + 0.5) * window.width as f64 / out_w as f64) as usize)
                        .min(window.width - 1);
                out.push(data[sy * self.width + sx]);
            }
        }
        out
    }
}

impl RasterSource for MemoryRaster {
    fn geo_transform(&self) -> GeoTransform {
        self.geo_transform
    }
    fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }
    fn read_window(&self, window: &RasterWindow, size: (usize, usize)) -> Result<Vec<Vec<u8>>> {
        self.check_window(window)?;
        Ok(self
            .bands
            .iter()
            .map(|band| self.sample(band, window, size))
            .collect())
    }
    fn read_mask(&self, window: &RasterWindow, size: (usize, usize)) -> Result<Vec<u8>> {
        self.check_window(window)?;
        Ok(self.sample(&self.mask, window, size))
    }
}
