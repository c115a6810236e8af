//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Job configuration

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::prelude::*;
use toml::Value;

pub trait Config<'a, C: Deserialize<'a>>
where
    Self: std::marker::Sized,
{
    /// Read configuration
    fn from_config(config: &C) -> Result<Self>;
    /// Generate configuration template
    fn gen_config() -> String;
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationCfg {
    pub tiling: TilingCfg,
    pub cache: Option<CacheCfg>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct TilingCfg {
    /// Zoom range specification, e.g. "14" or "12-16"
    pub zoom: Option<String>,
    /// The width and height of an individual tile, in pixels.
    #[serde(default = "default_tile_size")]
    pub tile_size: u32,
}

pub fn default_tile_size() -> u32 {
    256
}

#[derive(Deserialize, Clone, Debug)]
pub struct CacheCfg {
    pub file: Option<CacheFileCfg>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct CacheFileCfg {
    pub base: String,
}

pub const DEFAULT_CONFIG: &str = r#"
[tiling]
zoom = "0-15"
tile_size = 256

#[cache.file]
#base = "/tmp/tiles"
"#;

/// Load and parse the config file into a config struct.
pub fn read_config<'a, T: Deserialize<'a>>(path: &str) -> Result<T> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(_) => {
            return Err(Error::Config("Could not find config file!".to_string()));
        }
    };
    let mut config_toml = String::new();
    if let Err(err) = file.read_to_string(&mut config_toml) {
        return Err(Error::Config(format!("Error while reading config: [{}]", err)));
    };

    parse_config(config_toml, path)
}

/// Parse the configuration into a config struct.
pub fn parse_config<'a, T: Deserialize<'a>>(config_toml: String, path: &str) -> Result<T> {
    config_toml
        .parse::<Value>()
        .and_then(|cfg| cfg.try_into::<T>())
        .map_err(|err| Error::Config(format!("{} - {}", path, err)))
}

/// Parse a zoom range specification like "14" or "12-16" into
/// inclusive (minzoom, maxzoom)
pub fn parse_zoom_spec(spec: &str) -> Result<(u8, u8)> {
    let invalid = || Error::Config(format!("Invalid zoom range '{}'", spec));
    let mut parts = spec.splitn(2, '-');
    let minzoom: u8 = parts
        .next()
        .unwrap_or("")
        .parse()
        .map_err(|_| invalid())?;
    let maxzoom = match parts.next() {
        Some(s) if !s.is_empty() => s.parse().map_err(|_| invalid())?,
        _ => minzoom,
    };
    if minzoom > maxzoom || maxzoom > 31 {
        return Err(invalid());
    }
    Ok((minzoom, maxzoom))
}
