// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turns escape ages into colors.  The age picks a hue on a fixed
//! half-saturated, half-lit HSL wheel, which is then converted to 8-bit
//! RGB.  The conversion is done entirely in `f64` with explicit rounding
//! so the same age always yields the same bytes.

use image::Rgba;
use num::clamp;

/// An opaque 8-bit RGBA pixel.
pub type Pixel = Rgba<u8>;

/// Degrees of hue per unit of escape age.  Controls how densely the
/// color bands repeat.
pub const HUE_MULTIPLIER: f64 = 25.0;

/// Fixed HSL saturation of every rendered color.
pub const SATURATION: f64 = 0.5;

/// Fixed HSL lightness of every rendered color.
pub const LIGHTNESS: f64 = 0.5;

/// The six 60° sectors of the hue wheel, named for the hue at which
/// each one starts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sector {
    /// `hue'` in `[0, 1]`.
    Red,
    /// `hue'` in `(1, 2]`.
    Yellow,
    /// `hue'` in `(2, 3]`.
    Green,
    /// `hue'` in `(3, 4]`.
    Cyan,
    /// `hue'` in `(4, 5]`.
    Blue,
    /// `hue'` in `(5, 6]`.
    Magenta,
}

impl Sector {
    /// The sector holding `hue_prime`, the hue in units of 60°.
    pub fn of(hue_prime: f64) -> Sector {
        if hue_prime <= 1.0 {
            Sector::Red
        } else if hue_prime <= 2.0 {
            Sector::Yellow
        } else if hue_prime <= 3.0 {
            Sector::Green
        } else if hue_prime <= 4.0 {
            Sector::Cyan
        } else if hue_prime <= 5.0 {
            Sector::Blue
        } else {
            Sector::Magenta
        }
    }

    // Places the chroma and the second-largest component, before the
    // lightness offset.
    fn arrange(self, chroma: f64, x: f64) -> (f64, f64, f64) {
        match self {
            Sector::Red => (chroma, x, 0.0),
            Sector::Yellow => (x, chroma, 0.0),
            Sector::Green => (0.0, chroma, x),
            Sector::Cyan => (0.0, x, chroma),
            Sector::Blue => (x, 0.0, chroma),
            Sector::Magenta => (chroma, 0.0, x),
        }
    }
}

// Clamps into [0, 1], sending NaN to 0.
fn unit(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        clamp(v, 0.0, 1.0)
    }
}

fn quantize(channel: f64) -> u8 {
    (unit(channel) * 255.0).round() as u8
}

/// Converts a hue in degrees (`[0, 360]`), saturation and lightness
/// (`[0, 1]`) into an opaque pixel.  Out of range inputs are clamped,
/// and a hue that is not finite is read as 0.
pub fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> Pixel {
    let hue = if hue.is_finite() {
        clamp(hue, 0.0, 360.0)
    } else {
        0.0
    };
    let saturation = unit(saturation);
    let lightness = unit(lightness);

    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let hue_prime = hue / 60.0;
    let x = chroma * (1.0 - (hue_prime % 2.0 - 1.0).abs());
    let (r, g, b) = Sector::of(hue_prime).arrange(chroma, x);
    let m = lightness - chroma / 2.0;

    Rgba([quantize(r + m), quantize(g + m), quantize(b + m), u8::MAX])
}

/// The hue an escape age is drawn with, in `[0, 360)`.  Ages of any
/// sign wrap around the wheel.
pub fn hue_for(count: f64) -> f64 {
    (count * HUE_MULTIPLIER + 360.0).rem_euclid(360.0)
}

/// The color of a pixel with the given escape age.  Points in the set
/// (age 0) are all drawn at hue 0.
pub fn color_for(count: f64) -> Pixel {
    hsl_to_rgb(hue_for(count), SATURATION, LIGHTNESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Pixel as _;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    // With saturation and lightness both at one half every channel lies
    // between m = 0.25 and m + chroma = 0.75.
    const LOW: u8 = 64;
    const HIGH: u8 = 191;

    fn max_step(a: &Pixel, b: &Pixel) -> u8 {
        a.channels()
            .iter()
            .zip(b.channels())
            .map(|(x, y)| if x > y { x - y } else { y - x })
            .max()
            .unwrap_or(0)
    }

    #[test]
    fn members_of_the_set_are_red() {
        assert_eq!(color_for(0.0), Rgba([191, 64, 64, 255]));
    }

    #[test]
    fn primary_hues_convert_exactly() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), Rgba([255, 0, 0, 255]));
        assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), Rgba([0, 255, 0, 255]));
        assert_eq!(hsl_to_rgb(240.0, 1.0, 0.5), Rgba([0, 0, 255, 255]));
        assert_eq!(hsl_to_rgb(60.0, 1.0, 0.5), Rgba([255, 255, 0, 255]));
        assert_eq!(hsl_to_rgb(300.0, 1.0, 0.5), Rgba([255, 0, 255, 255]));
        assert_eq!(hsl_to_rgb(200.0, 0.0, 1.0), Rgba([255, 255, 255, 255]));
        assert_eq!(hsl_to_rgb(200.0, 0.0, 0.0), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn sectors_follow_the_closed_upper_bound() {
        assert_eq!(Sector::of(0.0), Sector::Red);
        assert_eq!(Sector::of(1.0), Sector::Red);
        assert_eq!(Sector::of(1.5), Sector::Yellow);
        assert_eq!(Sector::of(3.0), Sector::Green);
        assert_eq!(Sector::of(4.5), Sector::Blue);
        assert_eq!(Sector::of(6.0), Sector::Magenta);
    }

    #[test]
    fn hue_wraps_for_any_sign() {
        assert_eq!(hue_for(0.0), 0.0);
        assert_eq!(hue_for(1.0), 25.0);
        assert_eq!(hue_for(-1.0), 335.0);
        assert_eq!(hue_for(15.0), 15.0);
        assert_eq!(color_for(360.0 / HUE_MULTIPLIER), color_for(0.0));
    }

    #[test]
    fn continuous_across_every_sector_boundary() {
        let mut previous = hsl_to_rgb(0.0, SATURATION, LIGHTNESS);
        for step in 1..=36_000 {
            let here = hsl_to_rgb(f64::from(step) * 0.01, SATURATION, LIGHTNESS);
            assert!(max_step(&previous, &here) <= 1, "jump at {}", step);
            previous = here;
        }
        // ... and around the wheel back to the start.
        assert!(max_step(&previous, &hsl_to_rgb(0.0, SATURATION, LIGHTNESS)) <= 1);
    }

    #[test]
    fn boundaries_agree_from_both_sides() {
        for sector in 1..6 {
            let hue = f64::from(sector) * 60.0;
            let below = hsl_to_rgb(hue - 1e-9, SATURATION, LIGHTNESS);
            let at = hsl_to_rgb(hue, SATURATION, LIGHTNESS);
            let above = hsl_to_rgb(hue + 1e-9, SATURATION, LIGHTNESS);
            assert!(max_step(&below, &at) <= 1, "{}", hue);
            assert!(max_step(&at, &above) <= 1, "{}", hue);
        }
    }

    #[test]
    fn channels_stay_in_range_for_any_count() {
        let mut rng = StdRng::seed_from_u64(0x7113_b407);
        let mut counts: Vec<f64> = (0..20_000).map(|_| rng.gen_range(-1.0e6, 1.0e6)).collect();
        counts.extend((0..2_000).map(|_| rng.gen_range(-1.0e300, 1.0e300)));
        counts.extend(&[
            0.0,
            -0.0,
            f64::MIN_POSITIVE,
            -f64::MIN_POSITIVE,
            f64::MAX,
            f64::MIN,
            f64::EPSILON,
            -1.0e-20,
        ]);
        for count in counts {
            let pixel = color_for(count);
            let channels = pixel.channels();
            assert_eq!(channels[3], 255, "{}", count);
            for &channel in &channels[..3] {
                assert!(channel >= LOW && channel <= HIGH, "{} gave {:?}", count, pixel);
            }
        }
    }

    #[test]
    fn non_finite_counts_fall_back_to_hue_zero() {
        for &count in &[f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(color_for(count), color_for(0.0));
        }
    }
}
