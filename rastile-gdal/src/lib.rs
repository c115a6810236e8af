//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

#[macro_use]
extern crate log;

mod gdal_source;
mod warp;

pub use crate::gdal_source::GdalRaster;
pub use crate::warp::WarpedVrt;

pub fn gdal_version() -> String {
    gdal::version::version_info("--version")
}
