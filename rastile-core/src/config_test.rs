//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::config::{parse_config, parse_zoom_spec, ApplicationCfg, Config, DEFAULT_CONFIG};
use crate::store::FileStore;

#[test]
fn test_default_config() {
    let config: ApplicationCfg = parse_config(DEFAULT_CONFIG.to_string(), "default").unwrap();
    assert_eq!(config.tiling.zoom, Some("0-15".to_string()));
    assert_eq!(config.tiling.tile_size, 256);
    assert!(config.cache.is_none());
}

#[test]
fn test_file_cache_config() {
    let toml = r#"
        [tiling]
        zoom = "14"

        [cache.file]
        base = "/tmp/tiles"
        "#;
    let config: ApplicationCfg = parse_config(toml.to_string(), "inline").unwrap();
    let store = FileStore::from_config(&config).unwrap();
    assert_eq!(store.basepath, "/tmp/tiles");
}

#[test]
fn test_missing_cache_entry() {
    let config: ApplicationCfg = parse_config(DEFAULT_CONFIG.to_string(), "default").unwrap();
    assert!(FileStore::from_config(&config).is_err());
}

#[test]
fn test_invalid_config() {
    let toml = r#"
        [tiling]
        zoom = 14  # must be a string
        "#;
    let config: Result<ApplicationCfg, _> = parse_config(toml.to_string(), "inline");
    assert!(config.is_err());
}

#[test]
fn test_zoom_spec() {
    assert_eq!(parse_zoom_spec("14").unwrap(), (14, 14));
    assert_eq!(parse_zoom_spec("12-16").unwrap(), (12, 16));
    assert_eq!(parse_zoom_spec("0-0").unwrap(), (0, 0));
    assert!(parse_zoom_spec("").is_err());
    assert!(parse_zoom_spec("16-12").is_err());
    assert!(parse_zoom_spec("12-40").is_err());
    assert!(parse_zoom_spec("abc").is_err());
}
