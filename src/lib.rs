#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot tile renderer
//!
//! Renders the square 256x256 tiles of a slippy map whose world is the
//! Mandelbrot set.  A tile is addressed as `zoom/x/y`: at zoom `z` the
//! world is cut into `2^z` by `2^z` tiles, and the root tile `0/0/0`
//! shows the complex plane from `-2-2i` to `2+2i`.
//!
//! Each pixel is mapped to a point `c` of the plane and iterated under
//! `z = z² + c`.  The number of iterations `z` takes to run off to
//! infinity, smoothed into a continuous "escape age", picks a hue on a
//! fixed HSL wheel.  Points that never escape are in the set and are
//! all drawn in the same red.
//!
//! Rendering is a pure function of the tile address: the same address
//! always produces the same bytes, whichever thread (or how many
//! threads) draw it.

pub mod color;
pub mod config;
pub mod escape;
pub mod planes;
pub mod renderer;
pub mod tile;

pub use crate::color::{color_for, hsl_to_rgb, Pixel};
pub use crate::config::{RenderConfig, MAX_ITERATIONS, PLANE_SCALE, TILE_SIZE};
pub use crate::escape::{escape_age, Formula};
pub use crate::planes::{extent_for, Extent, Vector2};
pub use crate::renderer::{RenderError, Tile, TileRenderer};
pub use crate::tile::{TileAddress, TileError, MAX_ZOOM};

/// Renders the Mandelbrot tile at `address` with the default
/// parameters.
pub fn render(address: &TileAddress) -> Tile {
    TileRenderer::new(RenderConfig::default()).render(address)
}
