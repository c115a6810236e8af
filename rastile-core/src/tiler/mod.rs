//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Tile pyramid generation engine

pub mod basetile;
pub mod job;
pub mod overview;
pub mod progress;
pub mod window;


pub use self::job::{PyramidJob, TileCoord, TileDetail};
pub use self::progress::{NoProgress, Phase, Progress};

use crate::errors::{Error, Result};
use crate::png;
use crate::raster::{GeoTransform, RasterSource};
use crate::store::TileStore;
use crate::tiler::basetile::{build_base_tile, plan_base_tiles};
use crate::tiler::overview::build_overview_tile;
use mercator_grid::{LevelIterator, Mercator, MAX_ZOOM_LEVELS};
use rayon::prelude::*;
use std::sync::Mutex;

/// RGB plus alpha
pub const TILE_BANDS: usize = 4;

/// Orchestrates a full pyramid run: base tiles at the leaf zoom first, then
/// one overview level at a time from `maxzoom - 1` down to `minzoom`.
///
/// Tiles within a level are built in parallel; levels are strict barriers,
/// since every overview level reads the tiles of the level above it back
/// from the store.
pub struct TilePyramid {
    mercator: Mercator,
    job: PyramidJob,
    geo_transform: GeoTransform,
    raster_size: (usize, usize),
}

impl TilePyramid {
    pub fn new(
        source: &dyn RasterSource,
        mercator: Mercator,
        minzoom: u8,
        maxzoom: u8,
    ) -> Result<TilePyramid> {
        if minzoom > maxzoom {
            return Err(Error::Config(format!(
                "minzoom {} exceeds maxzoom {}",
                minzoom, maxzoom
            )));
        }
        if maxzoom >= MAX_ZOOM_LEVELS {
            return Err(Error::Config(format!(
                "maxzoom {} exceeds supported maximum {}",
                maxzoom,
                MAX_ZOOM_LEVELS - 1
            )));
        }
        let geo_transform = source.geo_transform();
        let raster_size = source.dimensions();
        let bounds = geo_transform.raster_bounds(raster_size.0, raster_size.1);
        debug!(
            "Raster bounds: {:.2},{:.2} {:.2},{:.2}",
            bounds.minx, bounds.miny, bounds.maxx, bounds.maxy
        );
        let job = PyramidJob::new(&mercator, &bounds, minzoom, maxzoom);
        Ok(TilePyramid {
            mercator,
            job,
            geo_transform,
            raster_size,
        })
    }

    pub fn job(&self) -> &PyramidJob {
        &self.job
    }

    /// Number of tiles of the leaf zoom level
    pub fn base_tile_count(&self) -> u64 {
        self.job.limits[self.job.maxzoom as usize].count()
    }

    /// Run the full generation.
    ///
    /// `open_source` is called once per worker thread; GDAL datasets are not
    /// shareable between threads, so every worker reads through its own
    /// handle. The first error aborts the run, leaving whatever tiles were
    /// already stored.
    pub fn generate<S, F>(
        &self,
        open_source: F,
        store: &dyn TileStore,
        progress: &mut dyn Progress,
    ) -> Result<()>
    where
        S: RasterSource,
        F: Fn() -> Result<S> + Sync,
    {
        self.generate_base_tiles(&open_source, store, progress)?;
        self.generate_overviews(store, progress)?;
        progress.finish();
        Ok(())
    }

    fn generate_base_tiles<S, F>(
        &self,
        open_source: &F,
        store: &dyn TileStore,
        progress: &mut dyn Progress,
    ) -> Result<()>
    where
        S: RasterSource,
        F: Fn() -> Result<S> + Sync,
    {
        let plan = plan_base_tiles(&self.job, &self.mercator, &self.geo_transform, self.raster_size);
        info!(
            "Generating {} base tiles at zoom {}",
            plan.len(),
            self.job.maxzoom
        );
        progress.start_phase(Phase::BaseTiles, plan.len() as u64);
        let progress = Mutex::new(progress);
        plan.par_iter().try_for_each_init(
            || open_source(),
            |source, detail| -> Result<()> {
                let source = match source {
                    Ok(source) => source,
                    Err(err) => return Err(Error::RasterOpen(err.to_string())),
                };
                let tile = build_base_tile(source, detail, self.job.tile_size, self.job.query_size)?;
                store.put(&detail.tile, &png::encode(&tile)?)?;
                debug!("Base tile {} stored", detail.tile);
                progress.lock().unwrap().tile_done();
                Ok(())
            },
        )
    }

    fn generate_overviews(
        &self,
        store: &dyn TileStore,
        progress: &mut dyn Progress,
    ) -> Result<()> {
        info!(
            "Generating {} overview tiles for zooms {}..{}",
            self.job.overview_tile_count(),
            self.job.minzoom,
            self.job.maxzoom.saturating_sub(1)
        );
        progress.start_phase(Phase::Overviews, self.job.overview_tile_count());
        let progress = Mutex::new(progress);
        for tz in (self.job.minzoom..self.job.maxzoom).rev() {
            let range = self.job.limits[tz as usize].clone();
            let child_range = &self.job.limits[tz as usize + 1];
            let tiles = LevelIterator::new(range).collect::<Vec<_>>();
            debug!("Overview level {}: {} tiles", tz, tiles.len());
            tiles.par_iter().try_for_each(|&(tx, ty)| -> Result<()> {
                let tile = TileCoord::new(tx, ty, tz);
                let buffer = build_overview_tile(store, &tile, child_range, self.job.tile_size)?;
                store.put(&tile, &png::encode(&buffer)?)?;
                debug!("Overview tile {} stored", tile);
                progress.lock().unwrap().tile_done();
                Ok(())
            })?;
        }
        Ok(())
    }
}
