//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Leaf tile planning and rendering

use crate::buffer::TileBuffer;
use crate::errors::{Error, Result};
use crate::raster::{GeoTransform, RasterSource};
use crate::resample::average_downsample;
use crate::tiler::job::{PyramidJob, TileCoord, TileDetail};
use crate::tiler::window::geo_query;
use crate::tiler::TILE_BANDS;
use mercator_grid::{LevelIterator, Mercator};

/// Precompute the read/write windows for every tile of the base level.
///
/// Tiles with no raster coverage keep their empty windows and still appear
/// in the plan; the builder turns them into fully transparent tiles.
pub fn plan_base_tiles(
    job: &PyramidJob,
    mercator: &Mercator,
    gt: &GeoTransform,
    raster_size: (usize, usize),
) -> Vec<TileDetail> {
    let range = job.limits[job.maxzoom as usize].clone();
    LevelIterator::new(range)
        .map(|(tx, ty)| {
            let bounds = mercator.tile_bounds(tx, ty, job.maxzoom);
            let (src, dst) = geo_query(gt, raster_size.0, raster_size.1, &bounds, job.query_size);
            TileDetail {
                tile: TileCoord::new(tx, ty, job.maxzoom),
                src,
                dst,
            }
        })
        .collect()
}

/// Render one base tile from the source raster.
///
/// The source window is read at destination-window resolution into an
/// oversampled query buffer, the mask band becomes the alpha band, and the
/// buffer is box-averaged down to the final tile size.
pub fn build_base_tile(
    source: &dyn RasterSource,
    detail: &TileDetail,
    tile_size: usize,
    query_size: usize,
) -> Result<TileBuffer> {
    // either window can collapse to zero on its own: the source window when
    // the tile lies outside the raster, the destination window when the
    // raster spans less than a query pixel of the tile
    if detail.src.is_empty() || detail.dst.is_empty() {
        return Ok(TileBuffer::new(tile_size, TILE_BANDS));
    }
    let mut query = TileBuffer::new(query_size, TILE_BANDS);
    let size = (detail.dst.width, detail.dst.height);
    let bands = source.read_window(&detail.src, size)?;
    for (band, data) in bands.iter().enumerate() {
        query.write_band_region(band, detail.dst.x, detail.dst.y, size.0, size.1, data);
    }
    let mask = source.read_mask(&detail.src, size)?;
    query.write_band_region(TILE_BANDS - 1, detail.dst.x, detail.dst.y, size.0, size.1, &mask);

    average_downsample(&query, tile_size).map_err(|reason| Error::Downsample {
        tile: detail.tile.to_string(),
        reason,
    })
}
