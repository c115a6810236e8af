//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Error type of the tile pyramid engine.
//!
//! All failures are fatal for the running job; there are no retries.
//! Tiles without raster coverage are not errors (they produce empty tiles).

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Could not open raster source: {0}")]
    RasterOpen(String),
    #[error("Raster has no affine geotransform")]
    MissingGeoTransform,
    #[error("Raster is georeferenced with ground control points")]
    GcpGeoreferencing,
    #[error("Raster read failed: {0}")]
    RasterRead(String),
    #[error("Average downsampling failed on {tile}: {reason}")]
    Downsample { tile: String, reason: String },
    #[error("Tile codec error: {0}")]
    Codec(String),
    #[error("{0}")]
    Image(#[from] image::ImageError),
    #[error("Tile store error: {0}")]
    Store(#[from] io::Error),
    #[error("Missing child tile {0} during overview composition")]
    MissingChildTile(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
