// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The tile renderer.  Every pixel of a tile is independent of every
//! other: map it to the plane, age it, color it.  That makes the
//! threaded renderer nothing more than the single-threaded one run over
//! disjoint bands of rows, and both produce the same bytes.

use failure::Fail;
use image::{ImageBuffer, Pixel as _, RgbaImage};
use itertools::iproduct;
use tracing::{debug, trace};

use crate::color::{color_for, Pixel};
use crate::config::RenderConfig;
use crate::planes::{extent_for_scale, Cell, PlaneMapper};
use crate::tile::TileAddress;

/// A rendered tile: a square grid of opaque RGBA pixels.
pub type Tile = RgbaImage;

const CHANNELS: usize = 4;

/// Failures of the threaded renderer.
#[derive(Debug, Fail)]
pub enum RenderError {
    /// A worker thread panicked, so the tile is incomplete.
    #[fail(display = "a render worker panicked before its rows were drawn")]
    WorkerPanicked,
}

/// Holds the parameters by which tiles are drawn.  Rendering borrows the
/// renderer immutably, so one renderer may serve any number of threads.
pub struct TileRenderer {
    config: RenderConfig,
}

impl TileRenderer {
    /// A renderer drawing with the given parameters.
    pub fn new(config: RenderConfig) -> TileRenderer {
        TileRenderer { config }
    }

    /// The parameters this renderer draws with.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    fn plane(&self, address: &TileAddress) -> PlaneMapper {
        let extent = extent_for_scale(address, self.config.formula.plane_scale());
        debug!(
            tile = %address,
            formula = %self.config.formula,
            min = %extent.min,
            max = %extent.max,
            "rendering"
        );
        PlaneMapper::new(self.config.tile_size, extent)
    }

    fn shade(&self, plane: &PlaneMapper, pixel: Cell) -> Pixel {
        let c = plane.pixel_to_point(&pixel);
        color_for(self.config.formula.escape_age(c, self.config.max_iterations))
    }

    /// Renders the tile at `address` on the calling thread.
    pub fn render(&self, address: &TileAddress) -> Tile {
        let plane = self.plane(address);
        let size = plane.size;
        let mut tile = ImageBuffer::new(size, size);
        for (row, column) in iproduct!(0..size, 0..size) {
            tile.put_pixel(column, row, self.shade(&plane, Cell(column, row)));
        }
        tile
    }

    /// Renders the tile at `address`, splitting its rows into one band
    /// per thread.  The result is identical to `render`.  A thread count
    /// of zero is taken as one.
    pub fn render_threaded(
        &self,
        address: &TileAddress,
        threads: usize,
    ) -> Result<Tile, RenderError> {
        let plane = self.plane(address);
        let size = plane.size;
        let mut tile: Tile = ImageBuffer::new(size, size);
        if plane.is_empty() {
            return Ok(tile);
        }

        let threads = threads.max(1);
        let rows_per_band = (size as usize + threads - 1) / threads;
        let band_len = rows_per_band * size as usize * CHANNELS;
        {
            let plane = &plane;
            crossbeam::scope(|spawner| {
                for (band, pixels) in tile.chunks_mut(band_len).enumerate() {
                    spawner.spawn(move |_| {
                        self.render_band(plane, (band * rows_per_band) as u32, pixels)
                    });
                }
            })
            .map_err(|_| RenderError::WorkerPanicked)?;
        }
        Ok(tile)
    }

    // Fills a band of whole rows, starting at `first_row`, in place.
    fn render_band(&self, plane: &PlaneMapper, first_row: u32, pixels: &mut [u8]) {
        let width = plane.size as usize;
        trace!(first_row, rows = pixels.len() / (width * CHANNELS), "band");
        for (offset, rgba) in pixels.chunks_mut(CHANNELS).enumerate() {
            let column = (offset % width) as u32;
            let row = first_row + (offset / width) as u32;
            rgba.copy_from_slice(self.shade(plane, Cell(column, row)).channels());
        }
    }
}
