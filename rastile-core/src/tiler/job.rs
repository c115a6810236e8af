//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::raster::{BufferWindow, RasterWindow};
use mercator_grid::{pyramid_limits, Extent, Mercator, ZoomRange};
use std::fmt;

/// Tile address: zoom level and TMS column/row indices
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

impl TileCoord {
    pub fn new(x: u32, y: u32, z: u8) -> TileCoord {
        TileCoord { x, y, z }
    }
    /// Relative storage path `{z}/{x}/{y}.png`
    pub fn path(&self) -> String {
        format!("{}/{}/{}.png", self.z, self.x, self.y)
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

/// Full plan for one leaf tile: coordinate plus matched read/write windows.
/// Created during planning, consumed once by the base tile builder.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct TileDetail {
    pub tile: TileCoord,
    pub src: RasterWindow,
    pub dst: BufferWindow,
}

/// Parameters shared by all tile operations of one job.
/// Constructed once after raster inspection, read-only afterwards.
#[derive(Clone, Debug)]
pub struct PyramidJob {
    /// Output tile edge length in pixels
    pub tile_size: usize,
    /// Edge length of the oversampled query buffer (4x the tile size)
    pub query_size: usize,
    pub minzoom: u8,
    pub maxzoom: u8,
    /// Tile ranges intersecting the raster, indexed by zoom level
    pub limits: Vec<ZoomRange>,
}

impl PyramidJob {
    pub fn new(mercator: &Mercator, bounds: &Extent, minzoom: u8, maxzoom: u8) -> PyramidJob {
        PyramidJob {
            tile_size: mercator.tile_size() as usize,
            query_size: 4 * mercator.tile_size() as usize,
            minzoom,
            maxzoom,
            limits: pyramid_limits(mercator, bounds),
        }
    }
    /// Total tile count of all overview levels
    pub fn overview_tile_count(&self) -> u64 {
        (self.minzoom..self.maxzoom)
            .map(|tz| self.limits[tz as usize].count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_path() {
        let tile = TileCoord::new(8581, 10642, 14);
        assert_eq!(tile.path(), "14/8581/10642.png");
        assert_eq!(format!("{}", tile), "14/8581/10642");
    }

    #[test]
    fn test_overview_count() {
        let merc = Mercator::default();
        // world bounds: 1 + 4 + 16 tiles below zoom 3
        let bounds = merc.tile_bounds(0, 0, 0);
        let job = PyramidJob::new(&merc, &bounds, 0, 3);
        assert_eq!(job.overview_tile_count(), 21);

        // no overview levels when minzoom == maxzoom
        let job = PyramidJob::new(&merc, &bounds, 3, 3);
        assert_eq!(job.overview_tile_count(), 0);
    }
}
