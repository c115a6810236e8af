//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

pub mod filestore;
pub mod memstore;
pub mod store;

#[cfg(test)]
mod filestore_test;

pub use self::filestore::FileStore;
pub use self::memstore::MemStore;
pub use self::store::TileStore;

use crate::config::{ApplicationCfg, Config};
use crate::errors::Error;

impl<'a> Config<'a, ApplicationCfg> for FileStore {
    fn from_config(config: &ApplicationCfg) -> Result<Self, Error> {
        config
            .cache
            .as_ref()
            .and_then(|cache| cache.file.as_ref())
            .map(|file_cfg| FileStore {
                basepath: file_cfg.base.clone(),
            })
            .ok_or_else(|| Error::Config("Missing configuration entry base in [cache.file]".to_string()))
    }
    fn gen_config() -> String {
        let toml = r#"
#[cache.file]
#base = "/tmp/tiles"
"#;
        toml.to_string()
    }
}
