//! RGB ↔ HSI (hue, saturation, intensity).
//!
//! ```text
//! I = (R + G + B) / 3
//! S = 1 − min(R, G, B) / I                 (0 when I = 0)
//! θ = acos(((R−G) + (R−B)) / (2·sqrt((R−G)² + (R−B)(G−B))))
//! H = θ, or 2π − θ when G < B              (2π when R = G = B)
//! ```

use std::f64::consts::{PI, TAU};

const TWO_PI_3: f64 = 2.0 * PI / 3.0;
const FOUR_PI_3: f64 = 4.0 * PI / 3.0;
const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Convert normalized RGB to `[H, S, I]` with H in [0, 2π] and S, I in [0, 1].
pub fn rgb_to_hsi(rgb: [f32; 3]) -> [f32; 3] {
    let [r, g, b] = rgb.map(|c| c.clamp(0.0, 1.0));

    let i = (r + g + b) / 3.0;
    let drg = (r - g) as f64;
    let drb = (r - b) as f64;
    let denom = (drg * drg + drb * (drb - drg)).sqrt();

    // R = G = B leaves the angle undefined; pin it to 2π.
    let h = if denom != 0.0 {
        let theta = ((drg + drb) / denom / 2.0).clamp(-1.0, 1.0).acos();
        if g < b { TAU - theta } else { theta }
    } else {
        TAU
    };

    let min = r.min(g).min(b);
    let s = if i == 0.0 { 0.0 } else { 1.0 - min / i };

    [h as f32, s.clamp(0.0, 1.0), i]
}

/// Convert `[H, S, I]` back to normalized RGB.
///
/// The hue circle is split into three 120° regions. In each, the channel
/// opposite the region carries `(1 − S)·I` and the other two are solved
/// from the intensity and `tan(H − offset)`.
pub fn hsi_to_rgb(hsi: [f32; 3]) -> [f32; 3] {
    let h = hsi[0].clamp(0.0, TAU as f32) as f64;
    let s = hsi[1].clamp(0.0, 1.0) as f64;
    let i = hsi[2].clamp(0.0, 1.0) as f64;

    if s == 0.0 {
        let grey = i as f32;
        return [grey, grey, grey];
    }

    let rgb = if (TWO_PI_3..FOUR_PI_3).contains(&h) {
        let r = (1.0 - s) * i;
        let c1 = 3.0 * i - r;
        let c2 = SQRT_3 * (r - i) * (h - PI).tan();
        [r, (c1 + c2) / 2.0, (c1 - c2) / 2.0]
    } else if h >= FOUR_PI_3 {
        let g = (1.0 - s) * i;
        let c1 = 3.0 * i - g;
        let c2 = SQRT_3 * (g - i) * (h - TWO_PI_3).tan();
        [(c1 - c2) / 2.0, g, (c1 + c2) / 2.0]
    } else {
        let b = (1.0 - s) * i;
        let c1 = 3.0 * i - b;
        let c2 = SQRT_3 * (b - i) * (h - FOUR_PI_3).tan();
        [(c1 + c2) / 2.0, (c1 - c2) / 2.0, b]
    };

    rgb.map(|c| (c as f32).clamp(0.0, 1.0))
}
