//! Hexagonal RGB <-> HSV conversion.
//!
//! The forward conversion truncates hue to whole degrees and saturation/value
//! to whole percent. Existing exports were produced with truncation, so the
//! results must not be rounded.

use crate::probe_pipeline::color::types::{Hsv, Rgb};

const CHANNEL_MAX: f64 = 255.0;
const HUE_DEGREES: f64 = 360.0;
const PERCENT: f64 = 100.0;

/// Converts an 8-bit RGB triple to integer HSV.
///
/// Achromatic input (`r == g == b`) yields hue 0 and saturation 0.
///
/// # Examples
///
/// ```
/// use chroma_probe_rs::probe_pipeline::color::{rgb_to_hsv, Hsv, Rgb};
///
/// assert_eq!(rgb_to_hsv(Rgb::new(10, 20, 30)), Hsv::new(210, 66, 11));
/// ```
pub fn rgb_to_hsv(rgb: Rgb) -> Hsv {
    let r = rgb.r as f64 / CHANNEL_MAX;
    let g = rgb.g as f64 / CHANNEL_MAX;
    let b = rgb.b as f64 / CHANNEL_MAX;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let v = max;

    if max == min {
        return Hsv::new(0, 0, (v * PERCENT) as u8);
    }

    let delta = max - min;
    let s = delta / max;

    let rc = (max - r) / delta;
    let gc = (max - g) / delta;
    let bc = (max - b) / delta;

    let sector = if r == max {
        bc - gc
    } else if g == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    let h = (sector / 6.0).rem_euclid(1.0);

    // rem_euclid can land on exactly 1.0 for tiny negative inputs
    let hue = ((h * HUE_DEGREES) as u16).min(359);

    Hsv::new(hue, (s * PERCENT) as u8, (v * PERCENT) as u8)
}

/// Converts an integer HSV triple back to 8-bit RGB, rounding to the nearest
/// channel value.
pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    let h = (hsv.h as f64 % HUE_DEGREES) / HUE_DEGREES;
    let s = (hsv.s as f64 / PERCENT).clamp(0.0, 1.0);
    let v = (hsv.v as f64 / PERCENT).clamp(0.0, 1.0);

    if s == 0.0 {
        let c = to_channel(v);
        return Rgb::new(c, c, c);
    }

    let h6 = h * 6.0;
    let sector = h6 as u32;
    let f = h6 - sector as f64;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    Rgb::new(to_channel(r), to_channel(g), to_channel(b))
}

fn to_channel(unit: f64) -> u8 {
    (unit * CHANNEL_MAX).round().clamp(0.0, CHANNEL_MAX) as u8
}
