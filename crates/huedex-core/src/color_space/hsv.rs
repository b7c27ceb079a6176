//! RGB ↔ HSV (hexcone model).
//!
//! # Reference
//! Manjunath et al., *Introduction to MPEG-7* (2002), §13.2.1
//!
//! ```text
//! V = max(R, G, B)
//! S = (V − min) / V            (0 when V = 0)
//! H = 60° × sector offset      (0 when max = min)
//! ```

/// Upper bound of the hue component, in degrees.
pub const HUE_MAX: f32 = 360.0;

/// Convert normalized RGB to `[H, S, V]` with H in [0, 360) and S, V in [0, 1].
pub fn rgb_to_hsv(rgb: [f32; 3]) -> [f32; 3] {
    let [r, g, b] = rgb.map(|c| c.clamp(0.0, 1.0));

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let diff = max - min;

    let s = if max == 0.0 { 0.0 } else { diff / max };

    let mut h = if diff == 0.0 {
        0.0
    } else if r == max {
        ((g - b) / diff) * 60.0
    } else if g == max {
        (2.0 + (b - r) / diff) * 60.0
    } else {
        (4.0 + (r - g) / diff) * 60.0
    };
    if h < 0.0 {
        h += HUE_MAX;
    }
    if h >= HUE_MAX {
        h -= HUE_MAX;
    }

    [h, s, max]
}

/// Convert `[H, S, V]` back to normalized RGB.
///
/// ```text
/// i = floor(H / 60) mod 6,  f = H / 60 − floor(H / 60)   (mirrored for even i)
/// m = V(1 − S),  n = V(1 − S·f)
/// ```
pub fn hsv_to_rgb(hsv: [f32; 3]) -> [f32; 3] {
    let h = hsv[0].clamp(0.0, HUE_MAX) / 60.0;
    let s = hsv[1].clamp(0.0, 1.0);
    let v = hsv[2].clamp(0.0, 1.0);

    let floor = h.floor();
    let sector = (floor as i32).rem_euclid(6);
    let mut f = h - floor;
    if sector % 2 == 0 {
        f = 1.0 - f;
    }
    let m = v * (1.0 - s);
    let n = v * (1.0 - s * f);

    let rgb = match sector {
        0 => [v, n, m],
        1 => [n, v, m],
        2 => [m, v, n],
        3 => [m, n, v],
        4 => [n, m, v],
        _ => [v, m, n],
    };
    rgb.map(|c| c.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn assert_close(a: [f32; 3], b: [f32; 3], tol: f32) {
        for i in 0..3 {
            assert!((a[i] - b[i]).abs() < tol, "component {i}: {a:?} vs {b:?}");
        }
    }

    #[test]
    fn test_rgb_to_hsv_primaries() {
        assert_close(rgb_to_hsv([1.0, 0.0, 0.0]), [0.0, 1.0, 1.0], EPSILON);
        assert_close(rgb_to_hsv([0.0, 1.0, 0.0]), [120.0, 1.0, 1.0], EPSILON);
        assert_close(rgb_to_hsv([0.0, 0.0, 1.0]), [240.0, 1.0, 1.0], EPSILON);
        assert_close(rgb_to_hsv([1.0, 0.0, 1.0]), [300.0, 1.0, 1.0], EPSILON);
    }

    #[test]
    fn test_rgb_to_hsv_achromatic_has_zero_hue() {
        assert_eq!(rgb_to_hsv([0.4, 0.4, 0.4]), [0.0, 0.0, 0.4]);
        assert_eq!(rgb_to_hsv([0.0, 0.0, 0.0]), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_rgb_to_hsv_hue_stays_below_360() {
        let hsv = rgb_to_hsv([1.0, 0.0, 1e-7]);
        assert!(hsv[0] < HUE_MAX && hsv[0] >= 0.0);
    }

    #[test]
    fn test_rgb_to_hsv_clamps_inputs() {
        assert_eq!(rgb_to_hsv([2.0, -1.0, -1.0]), [0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_hsv_roundtrip_preserves_values() {
        let steps = [0.0, 0.1, 0.25, 0.5, 0.75, 0.9, 1.0];
        for &r in &steps {
            for &g in &steps {
                for &b in &steps {
                    let rgb = [r, g, b];
                    assert_close(hsv_to_rgb(rgb_to_hsv(rgb)), rgb, 1e-4);
                }
            }
        }
    }

    #[test]
    fn test_hsv_to_rgb_hue_360_wraps_to_red() {
        assert_close(hsv_to_rgb([360.0, 1.0, 1.0]), [1.0, 0.0, 0.0], EPSILON);
    }
}
