//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Source/destination window mapping for one destination tile

use crate::raster::{BufferWindow, GeoTransform, RasterWindow};
use mercator_grid::Extent;

/// Matched read/write windows for a tile with the given projected bounds.
///
/// `query_size` is the edge length of the oversampled working buffer the
/// read lands in. Portions of the tile outside the raster are clipped from
/// the source window and, proportionally, from the destination window, so
/// the linear mapping between source and destination pixels is preserved.
/// A zero-size window on either axis means the tile has no raster coverage.
pub fn geo_query(
    gt: &GeoTransform,
    raster_width: usize,
    raster_height: usize,
    bounds: &Extent,
    query_size: usize,
) -> (RasterWindow, BufferWindow) {
    let (ulx, uly) = (bounds.minx, bounds.maxy);
    let (lrx, lry) = (bounds.maxx, bounds.miny);

    // 0.001/0.5 biases counter floating-point error at exact tile boundaries
    let mut rx = ((ulx - gt.origin_x()) / gt.pixel_width() + 0.001) as i64;
    let mut ry = ((uly - gt.origin_y()) / gt.pixel_height() + 0.001) as i64;
    let mut rxsize = ((lrx - ulx) / gt.pixel_width() + 0.5) as i64;
    let mut rysize = ((lry - uly) / gt.pixel_height() + 0.5) as i64;

    if rxsize <= 0 || rysize <= 0 {
        return (RasterWindow::empty(), BufferWindow::empty());
    }

    let mut wx = 0i64;
    let mut wxsize = query_size as i64;
    if rx < 0 {
        let rxshift = -rx;
        wx = (wxsize as f64 * rxshift as f64 / rxsize as f64) as i64;
        wxsize -= wx;
        rxsize -= (rxsize as f64 * rxshift as f64 / rxsize as f64) as i64;
        rx = 0;
    }
    if rx + rxsize > raster_width as i64 {
        wxsize = (wxsize as f64 * (raster_width as i64 - rx) as f64 / rxsize as f64) as i64;
        rxsize = raster_width as i64 - rx;
    }

    let mut wy = 0i64;
    let mut wysize = query_size as i64;
    if ry < 0 {
        let ryshift = -ry;
        wy = (wysize as f64 * ryshift as f64 / rysize as f64) as i64;
        wysize -= wy;
        rysize -= (rysize as f64 * ryshift as f64 / rysize as f64) as i64;
        ry = 0;
    }
    if ry + rysize > raster_height as i64 {
        wysize = (wysize as f64 * (raster_height as i64 - ry) as f64 / rysize as f64) as i64;
        rysize = raster_height as i64 - ry;
    }

    (
        RasterWindow {
            x: rx.max(0) as usize,
            y: ry.max(0) as usize,
            width: rxsize.max(0) as usize,
            height: rysize.max(0) as usize,
        },
        BufferWindow {
            x: wx.max(0) as usize,
            y: wy.max(0) as usize,
            width: wxsize.max(0) as usize,
            height: wysize.max(0) as usize,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUERY_SIZE: usize = 1024;

    // north-up raster: 1000x800 px, 10m pixels, origin (0, 8000)
    fn raster() -> (GeoTransform, usize, usize) {
        (GeoTransform([0.0, 10.0, 0.0, 8000.0, 0.0, -10.0]), 1000, 800)
    }

    #[test]
    fn test_interior_tile() {
        let (gt, w, h) = raster();
        let bounds = Extent {
            minx: 1000.0,
            miny: 3000.0,
            maxx: 3000.0,
            maxy: 5000.0,
        };
        let (rw, ww) = geo_query(&gt, w, h, &bounds, QUERY_SIZE);
        assert_eq!(
            rw,
            RasterWindow {
                x: 100,
                y: 300,
                width: 200,
                height: 200,
            }
        );
        assert_eq!(
            ww,
            BufferWindow {
                x: 0,
                y: 0,
                width: 1024,
                height: 1024,
            }
        );
    }

    #[test]
    fn test_left_clip() {
        let (gt, w, h) = raster();
        // left half of the tile hangs west of the raster
        let bounds = Extent {
            minx: -2000.0,
            miny: 3000.0,
            maxx: 2000.0,
            maxy: 7000.0,
        };
        let (rw, ww) = geo_query(&gt, w, h, &bounds, QUERY_SIZE);
        assert_eq!(rw.x, 0);
        // truncation toward zero keeps one extra source pixel (199px shift)
        assert_eq!(rw.width, 201);
        assert_eq!(ww.x, 509);
        assert_eq!(ww.width, 515);
        assert_eq!(ww.y, 0);
        assert_eq!(ww.height, 1024);
    }

    #[test]
    fn test_bottom_right_clip() {
        let (gt, w, h) = raster();
        // tile extends past the east and south raster edges
        let bounds = Extent {
            minx: 8000.0,
            miny: -2000.0,
            maxx: 12000.0,
            maxy: 2000.0,
        };
        let (rw, ww) = geo_query(&gt, w, h, &bounds, QUERY_SIZE);
        assert_eq!(rw.x, 800);
        assert_eq!(rw.width, 200);
        assert_eq!(rw.y, 600);
        assert_eq!(rw.height, 200);
        assert_eq!(ww.x, 0);
        assert_eq!(ww.y, 0);
        assert_eq!(ww.width, 512);
        assert_eq!(ww.height, 512);
    }

    #[test]
    fn test_no_coverage() {
        let (gt, w, h) = raster();
        let bounds = Extent {
            minx: 50000.0,
            miny: 3000.0,
            maxx: 54000.0,
            maxy: 7000.0,
        };
        let (rw, ww) = geo_query(&gt, w, h, &bounds, QUERY_SIZE);
        assert!(rw.is_empty());
        assert!(ww.is_empty());
    }

    #[test]
    fn test_window_inside_raster() {
        let (gt, w, h) = raster();
        // sweep tiles across and past the raster edges
        for tx in -3i32..6 {
            for ty in -3i32..6 {
                let bounds = Extent {
                    minx: tx as f64 * 2500.0,
                    miny: ty as f64 * 2500.0,
                    maxx: (tx + 1) as f64 * 2500.0,
                    maxy: (ty + 1) as f64 * 2500.0,
                };
                let (rw, ww) = geo_query(&gt, w, h, &bounds, QUERY_SIZE);
                assert_eq!(rw.is_empty(), ww.is_empty());
                if rw.is_empty() {
                    continue;
                }
                assert!(rw.x + rw.width <= w, "x overflow for {:?}", bounds);
                assert!(rw.y + rw.height <= h, "y overflow for {:?}", bounds);
                assert!(ww.x + ww.width <= QUERY_SIZE);
                assert!(ww.y + ww.height <= QUERY_SIZE);
            }
        }
    }

    #[test]
    fn test_clip_ratio_preserved() {
        let (gt, w, h) = raster();
        // unclipped tile: 4000m -> 400 source px -> 1024 dest px
        let full = Extent {
            minx: 2000.0,
            miny: 2000.0,
            maxx: 6000.0,
            maxy: 6000.0,
        };
        let (rw_full, ww_full) = geo_query(&gt, w, h, &full, QUERY_SIZE);
        let ratio_full = ww_full.width as f64 / rw_full.width as f64;

        // same tile size, clipped at the west edge
        let clipped = Extent {
            minx: -1000.0,
            miny: 2000.0,
            maxx: 3000.0,
            maxy: 6000.0,
        };
        let (rw, ww) = geo_query(&gt, w, h, &clipped, QUERY_SIZE);
        assert!(rw.width < rw_full.width);
        let ratio = ww.width as f64 / rw.width as f64;
        assert!((ratio - ratio_full).abs() / ratio_full < 0.02);
    }
}
