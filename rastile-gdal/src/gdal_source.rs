//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use gdal::raster::ResampleAlg;
use gdal::Dataset;
use rastile_core::errors::{Error, Result};
use rastile_core::raster::{GeoTransform, RasterSource, RasterWindow};
use std::path::Path;

/// Raster opened through GDAL.
///
/// Every worker thread opens its own `GdalRaster`; GDAL dataset handles
/// must not be shared between threads.
pub struct GdalRaster {
    dataset: Dataset,
    geo_transform: GeoTransform,
}

impl GdalRaster {
    pub fn open(path: &Path) -> Result<GdalRaster> {
        let dataset =
            Dataset::open(path).map_err(|e| Error::RasterOpen(format!("{}: {}", path.display(), e)))?;
        let gt = dataset.geo_transform().map_err(|_| Error::MissingGeoTransform)?;
        debug!(
            "Opened {} ({}x{} px, {} bands)",
            path.display(),
            dataset.raster_size().0,
            dataset.raster_size().1,
            dataset.raster_count()
        );
        Ok(GdalRaster {
            geo_transform: GeoTransform(gt),
            dataset,
        })
    }
}

impl RasterSource for GdalRaster {
    fn geo_transform(&self) -> GeoTransform {
        self.geo_transform
    }
    fn dimensions(&self) -> (usize, usize) {
        self.dataset.raster_size()
    }
    fn read_window(&self, window: &RasterWindow, size: (usize, usize)) -> Result<Vec<Vec<u8>>> {
        let win = (window.x as isize, window.y as isize);
        let win_size = (window.width, window.height);
        let nbands = self.dataset.raster_count();
        let mut bands = Vec::with_capacity(3);
        for band in 1..=3isize {
            // grayscale rasters replicate band 1 across RGB
            let index = if band <= nbands { band } else { 1 };
            let buffer = self
                .dataset
                .rasterband(index)
                .and_then(|b| b.read_as::<u8>(win, win_size, size, Some(ResampleAlg::NearestNeighbour)))
                .map_err(|e| Error::RasterRead(format!("band {}: {}", index, e)))?;
            bands.push(buffer.data);
        }
        Ok(bands)
    }
    fn read_mask(&self, window: &RasterWindow, size: (usize, usize)) -> Result<Vec<u8>> {
        let win = (window.x as isize, window.y as isize);
        let win_size = (window.width, window.height);
        let buffer = self
            .dataset
            .rasterband(1)
            .and_then(|b| b.open_mask_band())
            .and_then(|b| b.read_as::<u8>(win, win_size, size, Some(ResampleAlg::NearestNeighbour)))
            .map_err(|e| Error::RasterRead(format!("mask band: {}", e)))?;
        Ok(buffer.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_file() {
        match GdalRaster::open(Path::new("no_such_raster.tif")) {
            Err(Error::RasterOpen(msg)) => assert!(msg.contains("no_such_raster.tif")),
            _ => panic!("expected open error"),
        }
    }
}
