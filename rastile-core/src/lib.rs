//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

pub mod buffer;
pub mod config;
pub mod errors;
pub mod png;
pub mod raster;
pub mod resample;
pub mod store;
pub mod tiler;

#[cfg(test)]
mod config_test;
