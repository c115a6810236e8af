//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::store::filestore::FileStore;
use crate::store::store::TileStore;
use crate::tiler::TileCoord;
use std::fs;
use std::path::Path;

#[test]
fn test_dirstore() {
    use std::env;

    let mut dir = env::temp_dir();
    dir.push("rastile_test");
    let basepath = format!("{}", &dir.display());
    let _ = fs::remove_dir_all(&basepath);

    let store = FileStore {
        basepath: basepath.clone(),
    };
    let tile = TileCoord::new(1, 2, 0);
    let fullpath = format!("{}/0/1/2.png", store.basepath);
    let obj = "0123456789";

    // Store miss
    assert_eq!(store.exists(&tile), false);
    assert_eq!(store.get(&tile), None);

    // Write into store
    let _ = store.put(&tile, obj.as_bytes());
    assert!(Path::new(&fullpath).exists());

    // Store hit
    assert!(store.exists(&tile));

    // Read from store
    assert_eq!(store.get(&tile), Some(obj.as_bytes().to_vec()));

    let _ = fs::remove_dir_all(&basepath);
}
