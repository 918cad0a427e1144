//! Float sRGB <-> CIE Lab conversion.
//!
//! Input RGB is in [0, 1]. L comes out in [0, 100], a and b roughly in
//! [-127, 127]. Gamma handling and the D65 white point follow the common
//! float convention used by image libraries for `RGB -> Lab`.

/// D65 reference white.
const WHITE_X: f32 = 0.950456;
const WHITE_Z: f32 = 1.088754;

/// CIE epsilon and kappa-derived constants.
const EPSILON: f32 = 0.008856;
const KAPPA: f32 = 903.3;
const F_SLOPE: f32 = 7.787;
const F_OFFSET: f32 = 16.0 / 116.0;

/// Linear sRGB -> XYZ (D65)
const RGB_TO_XYZ: [[f32; 3]; 3] = [
    [0.412453, 0.357580, 0.180423],
    [0.212671, 0.715160, 0.072169],
    [0.019334, 0.119193, 0.950227],
];

/// XYZ (D65) -> linear sRGB
const XYZ_TO_RGB: [[f32; 3]; 3] = [
    [ 3.240479, -1.537150, -0.498535],
    [-0.969256,  1.875992,  0.041556],
    [ 0.055648, -0.204043,  1.057311],
];

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.0031308 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

fn lab_f(t: f32) -> f32 {
    if t > EPSILON {
        t.cbrt()
    } else {
        F_SLOPE * t + F_OFFSET
    }
}

fn lab_f_inv(f: f32) -> f32 {
    let cube = f * f * f;
    if cube > EPSILON {
        cube
    } else {
        (f - F_OFFSET) / F_SLOPE
    }
}

fn mat_mul(m: &[[f32; 3]; 3], v: [f32; 3]) -> [f32; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

/// Converts one sRGB pixel (components in [0, 1]) to Lab.
pub fn srgb_to_lab(rgb: [f32; 3]) -> [f32; 3] {
    let linear = rgb.map(srgb_to_linear);
    let [x, y, z] = mat_mul(&RGB_TO_XYZ, linear);

    let fx = lab_f(x / WHITE_X);
    let fy = lab_f(y);
    let fz = lab_f(z / WHITE_Z);

    let l = if y > EPSILON { 116.0 * fy - 16.0 } else { KAPPA * y };
    [l, 500.0 * (fx - fy), 200.0 * (fy - fz)]
}

/// Converts one Lab pixel back to sRGB, clamped to [0, 1].
pub fn lab_to_srgb(lab: [f32; 3]) -> [f32; 3] {
    let [l, a, b] = lab;

    let y = if l > KAPPA * EPSILON {
        ((l + 16.0) / 116.0).powi(3)
    } else {
        l / KAPPA
    };
    let fy = lab_f(y);
    let x = lab_f_inv(fy + a / 500.0) * WHITE_X;
    let z = lab_f_inv(fy - b / 200.0) * WHITE_Z;

    mat_mul(&XYZ_TO_RGB, [x, y, z]).map(|c| linear_to_srgb(c.max(0.0)).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: [f32; 3], expected: [f32; 3], tol: f32) {
        for i in 0..3 {
            assert!(
                (actual[i] - expected[i]).abs() < tol,
                "component {}: {:?} vs {:?}",
                i, actual, expected
            );
        }
    }

    #[test]
    fn white_is_full_lightness_without_chroma() {
        assert_close(srgb_to_lab([1.0, 1.0, 1.0]), [100.0, 0.0, 0.0], 0.05);
    }

    #[test]
    fn black_is_zero() {
        assert_close(srgb_to_lab([0.0, 0.0, 0.0]), [0.0, 0.0, 0.0], 1e-4);
    }

    #[test]
    fn pure_red_matches_reference() {
        assert_close(srgb_to_lab([1.0, 0.0, 0.0]), [53.24, 80.09, 67.20], 0.1);
    }

    #[test]
    fn gray_has_no_chroma() {
        let lab = srgb_to_lab([0.5, 0.5, 0.5]);
        assert!(lab[1].abs() < 0.05 && lab[2].abs() < 0.05);
        assert!((lab[0] - 53.39).abs() < 0.1);
    }

    #[test]
    fn round_trip_recovers_rgb() {
        for rgb in [[0.2, 0.4, 0.6], [0.9, 0.1, 0.3], [0.01, 0.02, 0.03], [0.7, 0.7, 0.2]] {
            assert_close(lab_to_srgb(srgb_to_lab(rgb)), rgb, 2e-3);
        }
    }

    #[test]
    fn out_of_gamut_lab_is_clamped() {
        let rgb = lab_to_srgb([50.0, 127.0, -127.0]);
        assert!(rgb.iter().all(|&c| (0.0..=1.0).contains(&c)));
    }
}
