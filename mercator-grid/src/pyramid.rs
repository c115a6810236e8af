//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Pyramid tile ranges and level iterators

use crate::mercator::{Extent, Mercator};

/// Number of precomputed zoom levels
pub const MAX_ZOOM_LEVELS: u8 = 32;

/// Inclusive tile index range of one zoom level
#[derive(PartialEq, Clone, Debug)]
pub struct ZoomRange {
    pub minx: u32,
    pub miny: u32,
    pub maxx: u32,
    pub maxy: u32,
}

impl ZoomRange {
    /// Number of tiles in the range
    pub fn count(&self) -> u64 {
        (self.maxx as u64 - self.minx as u64 + 1) * (self.maxy as u64 - self.miny as u64 + 1)
    }
    pub fn contains(&self, tx: u32, ty: u32) -> bool {
        self.minx <= tx && tx <= self.maxx && self.miny <= ty && ty <= self.maxy
    }
}

/// Tile index ranges covering `bounds` at every zoom level `0..32`.
///
/// Both corners of the bounds are converted with `meters_to_tile` and each
/// axis is clamped independently to `[0, 2^z - 1]`. Degenerate bounds give
/// a range with `min == max`, i.e. a single tile row/column, never an empty
/// range.
pub fn pyramid_limits(mercator: &Mercator, bounds: &Extent) -> Vec<ZoomRange> {
    (0..MAX_ZOOM_LEVELS)
        .map(|tz| {
            let (tminx, tminy) = mercator.meters_to_tile(bounds.minx, bounds.miny, tz);
            let (tmaxx, tmaxy) = mercator.meters_to_tile(bounds.maxx, bounds.maxy, tz);
            let limit = (1i64 << tz) - 1;
            let clamp = |t: i64| t.max(0).min(limit) as u32;
            ZoomRange {
                minx: clamp(tminx),
                miny: clamp(tminy),
                maxx: clamp(tmaxx),
                maxy: clamp(tmaxy),
            }
        })
        .collect()
}

/// Tile iterator over one zoom level range in generation order:
/// descending row, ascending column.
pub struct LevelIterator {
    range: ZoomRange,
    x: u32,
    y: u32,
    finished: bool,
}

impl LevelIterator {
    pub fn new(range: ZoomRange) -> LevelIterator {
        let x = range.minx;
        let y = range.maxy;
        LevelIterator {
            range,
            x,
            y,
            finished: false,
        }
    }
}

impl Iterator for LevelIterator {
    /// Current cell index `(x, y)`
    type Item = (u32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let current = (self.x, self.y);
        if self.x < self.range.maxx {
            self.x += 1;
        } else if self.y > self.range.miny {
            self.x = self.range.minx;
            self.y -= 1;
        } else {
            self.finished = true;
        }
        Some(current)
    }
}

#[test]
fn test_level_iter() {
    let range = ZoomRange {
        minx: 2,
        miny: 1,
        maxx: 3,
        maxy: 2,
    };
    let cells = LevelIterator::new(range).collect::<Vec<_>>();
    assert_eq!(cells, vec![(2, 2), (3, 2), (2, 1), (3, 1)]);
}

#[test]
fn test_single_cell_iter() {
    let range = ZoomRange {
        minx: 5,
        miny: 7,
        maxx: 5,
        maxy: 7,
    };
    let cells = LevelIterator::new(range).collect::<Vec<_>>();
    assert_eq!(cells, vec![(5, 7)]);
}

#[test]
fn test_world_limits() {
    let merc = Mercator::default();
    let world = Extent {
        minx: -20037508.342789244,
        miny: -20037508.342789244,
        maxx: 20037508.342789244,
        maxy: 20037508.342789244,
    };
    let limits = pyramid_limits(&merc, &world);
    assert_eq!(limits.len(), 32);
    assert_eq!(
        limits[0],
        ZoomRange {
            minx: 0,
            miny: 0,
            maxx: 0,
            maxy: 0,
        }
    );
    assert_eq!(
        limits[1],
        ZoomRange {
            minx: 0,
            miny: 0,
            maxx: 1,
            maxy: 1,
        }
    );
    for (tz, range) in limits.iter().enumerate() {
        let limit = (1u64 << tz) - 1;
        assert!(range.minx <= range.maxx);
        assert!(range.miny <= range.maxy);
        assert!((range.maxx as u64) <= limit);
        assert!((range.maxy as u64) <= limit);
    }
}

#[test]
fn test_oversized_bounds_clamped() {
    let merc = Mercator::default();
    let bounds = Extent {
        minx: -30000000.0,
        miny: -30000000.0,
        maxx: 30000000.0,
        maxy: 30000000.0,
    };
    for (tz, range) in pyramid_limits(&merc, &bounds).iter().enumerate() {
        let limit = (1u64 << tz) - 1;
        assert_eq!(range.minx, 0);
        assert_eq!(range.miny, 0);
        assert_eq!(range.maxx as u64, limit);
        assert_eq!(range.maxy as u64, limit);
    }
}

#[test]
fn test_degenerate_bounds() {
    let merc = Mercator::default();
    let point = Extent {
        minx: 1252344.2714243277,
        miny: 6105178.323193599,
        maxx: 1252344.2714243277,
        maxy: 6105178.323193599,
    };
    for range in pyramid_limits(&merc, &point) {
        assert_eq!(range.minx, range.maxx);
        assert_eq!(range.miny, range.maxy);
        assert_eq!(range.count(), 1);
    }
}
