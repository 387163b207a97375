// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Relates the integral plane of a tile's pixels to the rectangle of
//! the complex plane that the tile covers.
//!
//! At zoom level `z` the tile grid lays `2^z` by `2^z` tiles over the
//! unit square.  The unit square is recentred on the origin and then
//! stretched by a plane scale, so that the root tile shows the whole of
//! the interesting part of the fractal.
use num::Complex;

use crate::config::PLANE_SCALE;
use crate::tile::TileAddress;

/// A point, or an offset, on the complex plane.  Subtraction and
/// uniform scaling (`scale`) come with `Complex`, and so does the
/// arithmetic the escape-time iteration needs.
pub type Vector2 = Complex<f64>;

/// Describes the column, row of a pixel within a tile.  The origin is
/// the upper left corner.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cell(pub u32, pub u32);

/// The axis-aligned rectangle of the complex plane covered by one tile.
/// `min` is mapped to the tile's upper left pixel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Extent {
    /// The corner with the smallest real and imaginary parts.
    pub min: Vector2,
    /// The corner with the largest real and imaginary parts.
    pub max: Vector2,
}

impl Extent {
    /// Span of the extent along the real axis.
    pub fn width(&self) -> f64 {
        self.max.re - self.min.re
    }

    /// Span of the extent along the imaginary axis.
    pub fn height(&self) -> f64 {
        self.max.im - self.min.im
    }
}

const UNIT_CENTRE: Vector2 = Complex { re: 0.5, im: 0.5 };

/// The extent of a tile with the default plane scale.  The root tile
/// covers `(-2, -2)` to `(2, 2)`.
pub fn extent_for(address: &TileAddress) -> Extent {
    extent_for_scale(address, PLANE_SCALE)
}

/// The extent of a tile once the recentred unit square has been
/// stretched by `scale`.
pub fn extent_for_scale(address: &TileAddress, scale: f64) -> Extent {
    // Both are exact: tiles_per_axis is a power of two no larger than 2^32.
    let tiles = address.tiles_per_axis() as f64;
    let (x, y) = (f64::from(address.x()), f64::from(address.y()));

    let min_unit = Complex::new(x / tiles, y / tiles);
    let max_unit = Complex::new((x + 1.0) / tiles, (y + 1.0) / tiles);

    Extent {
        min: (min_unit - UNIT_CENTRE).scale(scale),
        max: (max_unit - UNIT_CENTRE).scale(scale),
    }
}

/// Contains the definitions of two planes: the square integral plane of
/// a tile's pixels, and the extent of the complex plane the tile
/// covers.  Maps pixels from one to the other.
#[derive(Debug)]
pub struct PlaneMapper {
    /// Side length of the integral plane.  Its upper left corner is at
    /// 0,0.
    pub size: u32,
    /// The rectangle of the complex plane under the tile.
    pub extent: Extent,
}

impl PlaneMapper {
    /// Constructor.  Takes the side length of the tile in pixels and
    /// the extent it covers.
    pub fn new(size: u32, extent: Extent) -> PlaneMapper {
        PlaneMapper { size, extent }
    }

    /// The total number of pixels in the integral grid.
    pub fn len(&self) -> usize {
        self.size as usize * self.size as usize
    }

    /// True when the integral plane has no pixels at all.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Given a pixel on the integral plane, return the point of the
    /// complex plane under its upper left corner, by linear
    /// interpolation across the extent.
    pub fn pixel_to_point(&self, pixel: &Cell) -> Vector2 {
        let size = f64::from(self.size);
        Complex::new(
            self.extent.min.re + self.extent.width() * f64::from(pixel.0) / size,
            self.extent.min.im + self.extent.height() * f64::from(pixel.1) / size,
        )
    }
}
