//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::store::store::TileStore;
use crate::tiler::TileCoord;
use std::collections::HashMap;
use std::io;
use std::sync::RwLock;

/// In-memory tile store for tests and transient pyramids
#[derive(Default)]
pub struct MemStore {
    tiles: RwLock<HashMap<TileCoord, Vec<u8>>>,
}

impl MemStore {
    pub fn new() -> MemStore {
        MemStore::default()
    }
    /// Number of stored tiles
    pub fn len(&self) -> usize {
        self.tiles.read().unwrap().len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Stored tile coordinates, in no particular order
    pub fn coords(&self) -> Vec<TileCoord> {
        self.tiles.read().unwrap().keys().cloned().collect()
    }
}

impl TileStore for MemStore {
    fn info(&self) -> String {
        "In-memory tile store".to_string()
    }
    fn get(&self, tile: &TileCoord) -> Option<Vec<u8>> {
        self.tiles.read().unwrap().get(tile).cloned()
    }
    fn put(&self, tile: &TileCoord, data: &[u8]) -> Result<(), io::Error> {
        self.tiles.write().unwrap().insert(*tile, data.to_vec());
        Ok(())
    }
    fn exists(&self, tile: &TileCoord) -> bool {
        self.tiles.read().unwrap().contains_key(tile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memstore() {
        let store = MemStore::new();
        let tile = TileCoord::new(1, 2, 3);
        assert!(!store.exists(&tile));
        assert_eq!(store.get(&tile), None);

        store.put(&tile, b"0123456789").unwrap();
        assert!(store.exists(&tile));
        assert_eq!(store.get(&tile), Some(b"0123456789".to_vec()));
        assert_eq!(store.len(), 1);
    }
}
