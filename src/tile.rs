// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Slippy-map tile addresses.  An address is only ever constructed
//! through validation, so every `TileAddress` the renderer sees lies
//! inside the grid of its zoom level.

use failure::Fail;
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

/// The deepest zoom level accepted.  `2^zoom` is computed in 64 bits
/// and the coordinates are 32 bits wide, so every tile of zoom 32 is
/// still addressable.
pub const MAX_ZOOM: u8 = 32;

/// Reasons a tile address is refused.
#[derive(Debug, Fail, PartialEq)]
pub enum TileError {
    /// The zoom level would overflow the tile grid arithmetic.
    #[fail(display = "zoom level {} exceeds the maximum of {}", zoom, max)]
    ZoomTooLarge {
        /// The zoom level requested.
        zoom: u64,
        /// The deepest zoom level supported.
        max: u8,
    },
    /// One of the coordinates lies outside the grid of its zoom level.
    #[fail(
        display = "tile {}/{}/{} lies outside the {}x{} grid of its zoom level",
        zoom, x, y, tiles, tiles
    )]
    OutOfRange {
        /// The zoom level requested.
        zoom: u8,
        /// The column requested.
        x: u64,
        /// The row requested.
        y: u64,
        /// Number of tiles along each axis at this zoom level.
        tiles: u64,
    },
    /// The text is not of the form `z/x/y`.
    #[fail(display = "could not parse tile address {:?}, expected z/x/y", _0)]
    Malformed(String),
}

/// A validated `zoom/x/y` tile address.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TileAddress {
    zoom: u8,
    x: u32,
    y: u32,
}

impl TileAddress {
    /// Validates a zoom level and a pair of tile coordinates.  Both
    /// coordinates must be below `2^zoom`.
    pub fn new(zoom: u64, x: u64, y: u64) -> Result<TileAddress, TileError> {
        let zoom = match u8::try_from(zoom) {
            Ok(z) if z <= MAX_ZOOM => z,
            _ => {
                return Err(TileError::ZoomTooLarge {
                    zoom,
                    max: MAX_ZOOM,
                })
            }
        };

        let tiles = 1u64 << zoom;
        let out_of_range = || TileError::OutOfRange {
            zoom,
            x,
            y,
            tiles,
        };
        if x >= tiles || y >= tiles {
            return Err(out_of_range());
        }

        Ok(TileAddress {
            zoom,
            x: u32::try_from(x).map_err(|_| out_of_range())?,
            y: u32::try_from(y).map_err(|_| out_of_range())?,
        })
    }

    /// The zoom level.
    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// The column, counted from the left.
    pub fn x(&self) -> u32 {
        self.x
    }

    /// The row, counted from the top.
    pub fn y(&self) -> u32 {
        self.y
    }

    /// `2^zoom`, the number of tiles along each axis of this zoom level.
    pub fn tiles_per_axis(&self) -> u64 {
        1u64 << self.zoom
    }
}

impl fmt::Display for TileAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.x, self.y)
    }
}

/// Given a string and a separator, returns the three values separated
/// by the separator, or None if there are not exactly three.
fn parse_triple<T: FromStr>(s: &str, separator: char) -> Option<(T, T, T)> {
    let mut parts = s.split(separator);
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(a), Some(b), Some(c), None) => {
            match (T::from_str(a), T::from_str(b), T::from_str(c)) {
                (Ok(a), Ok(b), Ok(c)) => Some((a, b, c)),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Accepts `z/x/y`, and also the request path form `/z/x/y.png`.
impl FromStr for TileAddress {
    type Err = TileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s.strip_prefix('/').unwrap_or(s);
        let path = path.strip_suffix(".png").unwrap_or(path);
        match parse_triple::<u64>(path, '/') {
            Some((zoom, x, y)) => TileAddress::new(zoom, x, y),
            None => Err(TileError::Malformed(s.to_string())),
        }
    }
}
