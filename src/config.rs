// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Render parameters.  These are fixed for the life of a renderer.

use crate::escape::Formula;

/// Side length, in pixels, of every tile.
pub const TILE_SIZE: u32 = 256;

/// Iterations after which a Mandelbrot orbit is taken to be bounded.
pub const MAX_ITERATIONS: usize = 1000;

/// Stretch applied to the recentred unit square, so that the root tile
/// covers `(-2, -2)` to `(2, 2)`.
pub const PLANE_SCALE: f64 = 4.0;

/// The parameters a `TileRenderer` is built with.  Once set, this
/// object is never mutated.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Side length of the rendered tiles, in pixels.
    pub tile_size: u32,
    /// Iteration budget of the Mandelbrot formula.
    pub max_iterations: usize,
    /// The escape-time formula evaluated at each pixel.
    pub formula: Formula,
}

impl RenderConfig {
    /// The default parameters, drawing `formula` instead.
    pub fn with_formula(formula: Formula) -> RenderConfig {
        RenderConfig {
            formula,
            ..RenderConfig::default()
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            tile_size: TILE_SIZE,
            max_iterations: MAX_ITERATIONS,
            formula: Formula::Mandelbrot,
        }
    }
}
