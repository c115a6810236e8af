//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::tiler::TileCoord;
use std::io;

/// Storage for generated tiles, keyed by tile coordinate.
///
/// The overview phase reads back tiles written by the phase before it, so a
/// `put` must be durable by the time it returns. Implementations are shared
/// between worker threads.
pub trait TileStore: Send + Sync {
    fn info(&self) -> String;
    fn get(&self, tile: &TileCoord) -> Option<Vec<u8>>;
    fn put(&self, tile: &TileCoord, data: &[u8]) -> Result<(), io::Error>;
    fn exists(&self, tile: &TileCoord) -> bool;
}
