//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Overview tiles composed from already generated child tiles

use crate::buffer::TileBuffer;
use crate::errors::{Error, Result};
use crate::png;
use crate::resample::average_downsample;
use crate::store::TileStore;
use crate::tiler::job::TileCoord;
use crate::tiler::TILE_BANDS;
use mercator_grid::ZoomRange;

/// Compose one overview tile from its children at zoom `tile.z + 1`.
///
/// Each existing child is decoded into its quadrant of a double-size
/// working buffer; quadrants outside `child_range` stay transparent. The
/// buffer is then box-averaged down to `tile_size`. A child inside
/// `child_range` that is missing from the store is a fatal error, since
/// the base/overview ordering guarantees it was written earlier.
pub fn build_overview_tile(
    store: &dyn TileStore,
    tile: &TileCoord,
    child_range: &ZoomRange,
    tile_size: usize,
) -> Result<TileBuffer> {
    let mut composed = TileBuffer::new(2 * tile_size, TILE_BANDS);
    for cy in 2 * tile.y..=2 * tile.y + 1 {
        for cx in 2 * tile.x..=2 * tile.x + 1 {
            if !child_range.contains(cx, cy) {
                continue;
            }
            let child = TileCoord::new(cx, cy, tile.z + 1);
            let data = store
                .get(&child)
                .ok_or_else(|| Error::MissingChildTile(child.to_string()))?;
            let buffer = png::decode(&data)?;
            if buffer.size() != tile_size {
                return Err(Error::Codec(format!(
                    "child tile {} is {}px, expected {}px",
                    child,
                    buffer.size(),
                    tile_size
                )));
            }
            // southern children (cy == 2*ty) sit in the bottom half
            let posx = (cx - 2 * tile.x) as usize * tile_size;
            let posy = if cy == 2 * tile.y { tile_size } else { 0 };
            composed.blit(&buffer, posx, posy);
        }
    }
    average_downsample(&composed, tile_size).map_err(|reason| Error::Downsample {
        tile: tile.to_string(),
        reason,
    })
}
