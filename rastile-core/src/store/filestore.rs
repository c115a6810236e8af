//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::store::store::TileStore;
use crate::tiler::TileCoord;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

/// File-backed tile store with the `{basepath}/{z}/{x}/{y}.png` layout
#[derive(Clone)]
pub struct FileStore {
    pub basepath: String,
}

impl FileStore {
    fn fullpath(&self, tile: &TileCoord) -> String {
        format!("{}/{}", self.basepath, tile.path())
    }
}

impl TileStore for FileStore {
    fn info(&self) -> String {
        format!("Tile directory: {}", self.basepath)
    }
    fn get(&self, tile: &TileCoord) -> Option<Vec<u8>> {
        let fullpath = self.fullpath(tile);
        debug!("FileStore.get {}", fullpath);
        fs::read(&fullpath).ok()
    }
    fn put(&self, tile: &TileCoord, data: &[u8]) -> Result<(), io::Error> {
        let fullpath = self.fullpath(tile);
        debug!("FileStore.put {}", fullpath);
        let p = Path::new(&fullpath);
        if let Some(dir) = p.parent() {
            fs::create_dir_all(dir)?;
        }
        let mut f = File::create(&fullpath)?;
        f.write_all(data)
    }
    fn exists(&self, tile: &TileCoord) -> bool {
        Path::new(&self.fullpath(tile)).exists()
    }
}
