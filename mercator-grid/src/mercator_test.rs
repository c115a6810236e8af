//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::mercator::{Extent, Mercator};

const ORIGIN_SHIFT: f64 = 20037508.342789244;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn test_resolution() {
    let merc = Mercator::default();
    assert!(approx(merc.resolution(0), 156543.03392804097));
    for zoom in 0..32 {
        assert!(approx(
            merc.resolution(zoom),
            merc.resolution(0) / f64::powi(2.0, zoom as i32)
        ));
    }
    // strictly decreasing
    for zoom in 1..32 {
        assert!(merc.resolution(zoom) < merc.resolution(zoom - 1));
    }
}

#[test]
fn test_meters_pixels_roundtrip() {
    let merc = Mercator::default();
    for &(mx, my) in &[
        (0.0, 0.0),
        (-ORIGIN_SHIFT, -ORIGIN_SHIFT),
        (960000.0, 6002729.0),
        (-1017529.72, 7044436.53),
    ] {
        for zoom in &[0u8, 5, 14, 22] {
            let (px, py) = merc.meters_to_pixels(mx, my, *zoom);
            let (mx2, my2) = merc.pixels_to_meters(px, py, *zoom);
            assert!(approx(mx, mx2));
            assert!(approx(my, my2));
        }
    }
}

#[test]
fn test_pixels_to_tile_boundaries() {
    let merc = Mercator::default();
    // a pixel exactly on a tile boundary belongs to the tile below the edge
    assert_eq!(merc.pixels_to_tile(256.0, 256.0), (0, 0));
    assert_eq!(merc.pixels_to_tile(256.1, 256.1), (1, 1));
    assert_eq!(merc.pixels_to_tile(512.0, 768.0), (1, 2));
    assert_eq!(merc.pixels_to_tile(300.0, 100.0), (1, 0));
    // the grid origin resolves below the first tile; planners clamp to 0
    assert_eq!(merc.pixels_to_tile(0.0, 0.0), (-1, -1));
}

#[test]
fn test_tile_bounds() {
    let merc = Mercator::default();
    let world = merc.tile_bounds(0, 0, 0);
    assert!(approx(world.minx, -ORIGIN_SHIFT));
    assert!(approx(world.miny, -ORIGIN_SHIFT));
    assert!(approx(world.maxx, ORIGIN_SHIFT));
    assert!(approx(world.maxy, ORIGIN_SHIFT));

    let extent = merc.tile_bounds(32, 42, 6);
    assert!(approx(extent.minx, 0.0));
    assert!(approx(extent.miny, 6261721.357121639));
    assert!(approx(extent.maxx, 626172.1357121654));
    assert!(approx(extent.maxy, 6887893.492833804));
}

#[test]
fn test_tile_bounds_roundtrip() {
    let merc = Mercator::default();
    for &(tx, ty, tz) in &[(0u32, 0u32, 1u8), (32, 42, 6), (8581, 10642, 14), (486, 691, 10)] {
        let b: Extent = merc.tile_bounds(tx, ty, tz);
        // corners sit exactly on tile boundaries; rounding may move them
        // to either neighbor, but never further
        let (ux, uy) = merc.meters_to_tile(b.maxx, b.maxy, tz);
        assert!(tx as i64 <= ux && ux <= tx as i64 + 1);
        assert!(ty as i64 <= uy && uy <= ty as i64 + 1);
        let (lx, ly) = merc.meters_to_tile(b.minx, b.miny, tz);
        assert!(tx as i64 - 1 <= lx && lx <= tx as i64);
        assert!(ty as i64 - 1 <= ly && ly <= ty as i64);
        // a point strictly inside resolves to the tile itself
        let cx = (b.minx + b.maxx) / 2.0;
        let cy = (b.miny + b.maxy) / 2.0;
        assert_eq!(merc.meters_to_tile(cx, cy, tz), (tx as i64, ty as i64));
    }
}

#[test]
fn test_custom_tile_size() {
    let merc = Mercator::new(512);
    assert_eq!(merc.tile_size(), 512);
    assert!(approx(merc.resolution(0), 78271.51696402048));
    assert_eq!(merc.pixels_to_tile(512.0, 1024.0), (0, 1));
}
