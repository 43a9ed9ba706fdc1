//! Colour conversion helpers
//!
//! All colours are linear-ish `[r, g, b, a]` in 0..1, the same layout the
//! vertex buffer carries.

/// `0xRRGGBB` with an explicit alpha
pub const fn hex(rgb: u32, alpha: f32) -> [f32; 4] {
    [
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
        alpha,
    ]
}

/// 0-255 channels with an explicit alpha
pub fn rgba8(r: f32, g: f32, b: f32, alpha: f32) -> [f32; 4] {
    [
        (r / 255.0).clamp(0.0, 1.0),
        (g / 255.0).clamp(0.0, 1.0),
        (b / 255.0).clamp(0.0, 1.0),
        alpha.clamp(0.0, 1.0),
    ]
}

/// HSL to RGBA. `hue` in degrees, `saturation` and `lightness` in 0..1.
pub fn hsl(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> [f32; 4] {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = lightness - c / 2.0;

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    [r + m, g + m, b + m, alpha]
}

/// Same colour, different alpha
pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], alpha]
}

/// Component-wise blend, `t` = 0 gives `a`
pub fn mix(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    let t = t.clamp(0.0, 1.0);
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f32; 4], b: [f32; 4]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-3)
    }

    #[test]
    fn test_hex() {
        assert!(close(hex(0x40c9ff, 1.0), [64.0 / 255.0, 201.0 / 255.0, 1.0, 1.0]));
        assert!(close(hex(0x000000, 0.5), [0.0, 0.0, 0.0, 0.5]));
    }

    #[test]
    fn test_hsl_primaries() {
        assert!(close(hsl(0.0, 1.0, 0.5, 1.0), [1.0, 0.0, 0.0, 1.0]));
        assert!(close(hsl(120.0, 1.0, 0.5, 1.0), [0.0, 1.0, 0.0, 1.0]));
        assert!(close(hsl(240.0, 1.0, 0.5, 1.0), [0.0, 0.0, 1.0, 1.0]));
        assert!(close(hsl(360.0, 1.0, 0.5, 1.0), hsl(0.0, 1.0, 0.5, 1.0)));
    }

    #[test]
    fn test_star_lightness_stays_bright() {
        for hue in [0.0, 45.0, 190.0, 300.0] {
            let c = hsl(hue, 1.0, 0.65, 1.0);
            assert!(c[..3].iter().all(|v| (0.0..=1.0).contains(v)));
            assert!(c[..3].iter().cloned().fold(0.0, f32::max) > 0.99);
        }
    }

    #[test]
    fn test_mix_endpoints() {
        let a = hex(0x0a0e17, 1.0);
        let b = hex(0x1a1b3a, 1.0);
        assert!(close(mix(a, b, 0.0), a));
        assert!(close(mix(a, b, 1.0), b));
        assert!(close(mix(a, b, 2.0), b));
    }
}
