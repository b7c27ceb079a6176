use huedex_core::scalable::haar;
use huedex_core::{ColorImage, ColorSpaceTag, DescriptorError, ScalableColor, ScalableParams};

fn hsv_image(width: u32, height: u32, f: impl Fn(u32, u32) -> [f32; 3]) -> ColorImage {
    ColorImage::from_fn(width, height, f).convert(ColorSpaceTag::Hsv)
}

fn landscape() -> ColorImage {
    hsv_image(64, 48, |x, y| {
        if y < 20 {
            [0.3, 0.5, 0.9 - y as f32 * 0.01]
        } else {
            [0.2, 0.4 + (x % 8) as f32 * 0.05, 0.1]
        }
    })
}

fn compute(coefficients: u32, planes: u32, raster: &ColorImage) -> ScalableColor {
    let mut scd = ScalableColor::new(coefficients, planes).unwrap();
    scd.compute(raster).unwrap();
    scd
}

#[test]
fn test_uniform_saturated_hue_dc_is_largest() {
    for rgb in [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]] {
        let scd = compute(256, 0, &hsv_image(32, 32, |_, _| rgb));
        let coeffs = scd.coefficients().unwrap();
        let dc = coeffs[0].abs();
        assert!(dc > 0);
        assert!(coeffs[1..].iter().all(|c| c.abs() <= dc), "{rgb:?}");
    }
}

#[test]
fn test_serialize_deserialize_compare_is_zero() {
    for (n, planes) in [(256, 0), (128, 1), (64, 3), (32, 6), (16, 8)] {
        let scd = compute(n, planes, &landscape());
        let bytes = scd.serialize().unwrap();
        assert_eq!(bytes.len(), n as usize + n as usize / 8);
        let back = ScalableColor::deserialize(&bytes, scd.params()).unwrap();
        assert_eq!(back.compare(&scd).unwrap(), 0.0, "n={n} planes={planes}");
    }
}

#[test]
fn test_haar_forward_inverse_is_exact() {
    let hist: [i32; 256] = std::array::from_fn(|i| ((i * i + 3 * i) % 16) as i32);
    assert_eq!(haar::inverse(&haar::forward(&hist)), hist);
}

#[test]
fn test_different_images_have_positive_distance() {
    let a = compute(64, 0, &landscape());
    let b = compute(64, 0, &hsv_image(64, 48, |_, _| [0.9, 0.2, 0.7]));
    assert!(a.compare(&b).unwrap() > 0.0);
}

#[test]
fn test_bit_plane_mismatch_is_incompatible() {
    let a = compute(64, 0, &landscape());
    let b = compute(64, 2, &landscape());
    let err = a.compare(&b).unwrap_err();
    assert!(matches!(err, DescriptorError::IncompatibleOperands(_)));
    assert!(err.to_string().contains("bit-planes"));
}

#[test]
fn test_unpopulated_compare_is_rejected() {
    let a = ScalableColor::new(64, 0).unwrap();
    let b = compute(64, 0, &landscape());
    assert!(matches!(b.compare(&a), Err(DescriptorError::Unpopulated)));
    assert!(matches!(a.serialize(), Err(DescriptorError::Unpopulated)));
}

#[test]
fn test_invalid_parameters_are_configuration_errors() {
    assert!(ScalableColor::new(100, 0).unwrap_err().is_configuration());
    assert!(ScalableColor::new(64, 9).unwrap_err().is_configuration());
    let bad = ScalableParams {
        coefficients: 24,
        bit_planes_discarded: 0,
    };
    assert!(ScalableColor::deserialize(&[0; 27], bad).unwrap_err().is_configuration());
}

#[test]
fn test_blocks_larger_than_image_are_clamped() {
    let raster = landscape();
    let mut tiled = ScalableColor::new(64, 0).unwrap().with_blocks([1000, 1000]);
    tiled.compute(&raster).unwrap();
    let plain = compute(64, 0, &raster);
    assert_eq!(tiled.compare(&plain).unwrap(), 0.0);
}

#[test]
fn test_parallel_and_sequential_extraction_agree() {
    let raster = landscape();
    let mut seq = ScalableColor::new(256, 0).unwrap().with_parallel(false);
    seq.compute(&raster).unwrap();
    let par = compute(256, 0, &raster);
    assert_eq!(seq.coefficients(), par.coefficients());
}
