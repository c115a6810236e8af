//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Spherical Mercator projection math

use std::f64::consts;

/// Projected extent
#[derive(PartialEq, Clone, Debug)]
pub struct Extent {
    pub minx: f64,
    pub miny: f64,
    pub maxx: f64,
    pub maxy: f64,
}

/// Spherical Mercator (EPSG:3857) tile grid math.
///
/// Maps between projected meters, pixel space at a zoom level and TMS tile
/// indices (row 0 at the southern edge).
#[derive(Clone, Debug)]
pub struct Mercator {
    /// The width and height of an individual tile, in pixels.
    tile_size: u32,
    /// Half of the projected world circumference, in meters.
    origin_shift: f64,
    /// Resolution at zoom level 0, in meters per pixel.
    initial_resolution: f64,
}

impl Mercator {
    pub fn new(tile_size: u32) -> Mercator {
        let circumference = 2.0 * consts::PI * 6378137.0;
        Mercator {
            tile_size,
            origin_shift: circumference / 2.0,
            initial_resolution: circumference / tile_size as f64,
        }
    }
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }
    /// Meters per pixel at the given zoom level
    pub fn resolution(&self, zoom: u8) -> f64 {
        self.initial_resolution / f64::powi(2.0, zoom as i32)
    }
    pub fn meters_to_pixels(&self, mx: f64, my: f64, zoom: u8) -> (f64, f64) {
        let res = self.resolution(zoom);
        let px = (mx + self.origin_shift) / res;
        let py = (my + self.origin_shift) / res;
        (px, py)
    }
    pub fn pixels_to_meters(&self, px: f64, py: f64, zoom: u8) -> (f64, f64) {
        let res = self.resolution(zoom);
        let mx = px * res - self.origin_shift;
        let my = py * res - self.origin_shift;
        (mx, my)
    }
    /// Tile containing a pixel coordinate.
    ///
    /// A pixel exactly on a tile boundary resolves to the tile whose closed
    /// lower edge it touches (ceil-minus-one rule). Indices can be negative
    /// or beyond the grid; callers clamp to the valid range of their level.
    pub fn pixels_to_tile(&self, px: f64, py: f64) -> (i64, i64) {
        let tx = (px / self.tile_size as f64).ceil() as i64 - 1;
        let ty = (py / self.tile_size as f64).ceil() as i64 - 1;
        (tx, ty)
    }
    /// Tile containing a projected coordinate at the given zoom level
    pub fn meters_to_tile(&self, mx: f64, my: f64, zoom: u8) -> (i64, i64) {
        let (px, py) = self.meters_to_pixels(mx, my, zoom);
        self.pixels_to_tile(px, py)
    }
    /// Projected bounds of a tile in the TMS addressing scheme
    pub fn tile_bounds(&self, tx: u32, ty: u32, zoom: u8) -> Extent {
        let size = self.tile_size as f64;
        let (minx, miny) = self.pixels_to_meters(tx as f64 * size, ty as f64 * size, zoom);
        let (maxx, maxy) =
            self.pixels_to_meters((tx + 1) as f64 * size, (ty + 1) as f64 * size, zoom);
        Extent {
            minx,
            miny,
            maxx,
            maxy,
        }
    }
}

impl Default for Mercator {
    /// Standard 256x256 pixel tile grid
    fn default() -> Mercator {
        Mercator::new(256)
    }
}
