// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Escape-time functions.
//!
//! The Mandelbrot iteration takes a point `c` on the complex plane and
//! repeatedly squares `z` and adds `c`, measuring how quickly `z` runs
//! off to infinity.  Rather than the raw count of iterations before `z`
//! leaves the circle of radius 2, we return a continuous "escape age"
//! that subtracts the fractional overshoot, so that neighbouring pixels
//! (and neighbouring tiles) shade smoothly into each other instead of
//! in bands.
//!
//! An escape age of exactly `0` means the point never escaped within
//! the iteration budget, i.e. it is in the set.

use failure::Fail;
use num::Complex;
use std::f64::consts::LN_2;
use std::fmt;
use std::str::FromStr;

use crate::config::{MAX_ITERATIONS, PLANE_SCALE};
use crate::planes::Vector2;

/// `|z|²` beyond which a Mandelbrot orbit is known to escape.
pub const ESCAPE_RADIUS_SQR: f64 = 4.0;

// The smoothing formula only settles once |z| is well past the escape
// radius; smoothing at the first crossing leaves seams at tile edges.
const SMOOTHING_ITERATIONS: usize = 2;

const MANDELBOX_ITERATIONS: usize = 10;
const MANDELBOX_SCALE: f64 = 2.0;
const MANDELBOX_BAILOUT_SQR: f64 = 100.0;
const MANDELBOX_PLANE_SCALE: f64 = 16.0;

/// The escape age of `c` under the Mandelbrot iteration with the
/// default budget of `MAX_ITERATIONS`.
pub fn escape_age(c: Vector2) -> f64 {
    mandelbrot(c, MAX_ITERATIONS)
}

/// Iterates `z = z² + c` from `z = 0` at most `limit` times.  Returns
/// `0` if the orbit stays bounded, otherwise the smoothed escape age
/// `i - log2(ln |z|)`, where `i` is the zero-based iteration at which
/// the orbit left the escape radius.
pub fn mandelbrot(c: Vector2, limit: usize) -> f64 {
    let mut z: Complex<f64> = Complex::new(0.0, 0.0);
    for i in 0..limit {
        z = z * z + c;
        if z.norm_sqr() > ESCAPE_RADIUS_SQR {
            for _ in 0..SMOOTHING_ITERATIONS {
                z = z * z + c;
            }
            return i as f64 - smoothing(z.norm_sqr().sqrt());
        }
    }
    0.0
}

/// `log2(ln(modulus))`.  An escaped orbit has a modulus above 2, but a
/// very distant `c` can overflow the two extra iterations to infinity
/// or NaN, so the modulus is clamped into `[2, f64::MAX]` first.
fn smoothing(modulus: f64) -> f64 {
    let modulus = modulus.min(f64::MAX).max(2.0);
    modulus.ln().ln() / LN_2
}

fn box_fold(v: f64) -> f64 {
    if v > 1.0 {
        2.0 - v
    } else if v < -1.0 {
        -2.0 - v
    } else {
        v
    }
}

/// The folding "mandelbox" iteration.  Each step folds `z` back into
/// the unit box, rescales it by its distance from the origin, then
/// doubles it and adds `c`.  Returns the one-based iteration at which
/// `|z|²` passed the bailout, or `0` if it never did.
pub fn mandelbox(c: Vector2) -> f64 {
    let mut z: Complex<f64> = Complex::new(0.0, 0.0);
    for i in 0..MANDELBOX_ITERATIONS {
        z = Complex::new(box_fold(z.re), box_fold(z.im));

        let magnitude = z.norm_sqr().sqrt();
        if magnitude < 0.5 {
            z = z.scale(4.0);
        } else if magnitude < 1.0 {
            z = z.scale(magnitude * magnitude);
        }

        z = z.scale(MANDELBOX_SCALE) + c;
        if z.norm_sqr() > MANDELBOX_BAILOUT_SQR {
            return (i + 1) as f64;
        }
    }
    0.0
}

/// The escape-time formula a renderer evaluates at every pixel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Formula {
    /// `z = z² + c`, with smoothed escape ages.
    Mandelbrot,
    /// The box-and-ball folding iteration, with whole-number ages.
    Mandelbox,
}

impl Formula {
    /// The escape age of `c`.  `limit` bounds the Mandelbrot iteration;
    /// the mandelbox always runs its own short, fixed budget.
    pub fn escape_age(self, c: Vector2, limit: usize) -> f64 {
        match self {
            Formula::Mandelbrot => mandelbrot(c, limit),
            Formula::Mandelbox => mandelbox(c),
        }
    }

    /// How far the recentred unit square is stretched so that the root
    /// tile frames the whole fractal.
    pub fn plane_scale(self) -> f64 {
        match self {
            Formula::Mandelbrot => PLANE_SCALE,
            Formula::Mandelbox => MANDELBOX_PLANE_SCALE,
        }
    }
}

impl Default for Formula {
    fn default() -> Self {
        Formula::Mandelbrot
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Formula::Mandelbrot => write!(f, "mandelbrot"),
            Formula::Mandelbox => write!(f, "mandelbox"),
        }
    }
}

/// A formula name that is neither `mandelbrot` nor `mandelbox`.
#[derive(Debug, Fail, PartialEq)]
#[fail(display = "unknown formula {:?}, expected mandelbrot or mandelbox", _0)]
pub struct UnknownFormula(pub String);

impl FromStr for Formula {
    type Err = UnknownFormula;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mandelbrot" => Ok(Formula::Mandelbrot),
            "mandelbox" => Ok(Formula::Mandelbox),
            _ => Err(UnknownFormula(s.to_string())),
        }
    }
}
