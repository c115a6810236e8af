//! A library for spherical Mercator tile pyramid calculations
//!
//! ## Projection math
//!
//! ```rust
//! use mercator_grid::Mercator;
//!
//! let merc = Mercator::default();
//! assert_eq!(merc.resolution(1), merc.resolution(0) / 2.0);
//!
//! let (mx, my) = merc.pixels_to_meters(0.0, 0.0, 0);
//! let (px, py) = merc.meters_to_pixels(mx, my, 0);
//! assert_eq!((px, py), (0.0, 0.0));
//! ```
//!
//! ## Pyramid planning
//!
//! ```rust
//! use mercator_grid::{pyramid_limits, LevelIterator, Mercator};
//!
//! let merc = Mercator::default();
//! let bounds = merc.tile_bounds(8581, 10642, 14);
//! let limits = pyramid_limits(&merc, &bounds);
//! for (tx, ty) in LevelIterator::new(limits[14].clone()) {
//!     println!("Tile 14/{}/{}", tx, ty);
//! }
//! ```

mod mercator;
mod pyramid;
#[cfg(test)]
mod mercator_test;

pub use mercator::{Extent, Mercator};
pub use pyramid::{pyramid_limits, LevelIterator, ZoomRange, MAX_ZOOM_LEVELS};
