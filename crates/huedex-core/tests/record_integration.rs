use huedex_core::{
    AnyDescriptor, ColorImage, DescriptorError, DescriptorKind, DescriptorRecord, ExtractionConfig,
};

fn sunset(width: u32, height: u32) -> ColorImage {
    ColorImage::from_fn(width, height, |x, y| {
        let t = y as f32 / (height - 1) as f32;
        [1.0 - 0.3 * t, 0.4 + 0.2 * (x % 3) as f32 * 0.1, 0.2 + 0.6 * t]
    })
}

fn build_all(config: &ExtractionConfig, image: &ColorImage) -> Vec<AnyDescriptor> {
    DescriptorKind::all()
        .iter()
        .map(|&kind| {
            let mut d = AnyDescriptor::build(kind, config).unwrap();
            d.compute_image(image).unwrap();
            d
        })
        .collect()
}

#[test]
fn test_records_roundtrip_through_json() {
    let config = ExtractionConfig::from_json(
        r#"{"structure": {"quant_levels": 64}, "scalable": {"coefficients": 128, "bit_planes_discarded": 2}}"#,
    )
    .unwrap();
    for descriptor in build_all(&config, &sunset(48, 36)) {
        let record = DescriptorRecord::from_descriptor(&descriptor).unwrap();
        let json = record.to_json().unwrap();
        let restored = DescriptorRecord::from_json(&json).unwrap();
        assert_eq!(restored, record);
        assert_eq!(restored.feature_bytes().unwrap(), descriptor.serialize().unwrap());

        let decoded = restored.into_descriptor().unwrap();
        assert_eq!(decoded.params(), descriptor.params());
        assert_eq!(decoded.compare(&descriptor).unwrap(), 0.0);
    }
}

#[test]
fn test_sequential_config_matches_parallel() {
    let image = sunset(70, 50);
    let parallel = build_all(&ExtractionConfig::default(), &image);
    let sequential = build_all(&ExtractionConfig::from_json(r#"{"parallel": false}"#).unwrap(), &image);
    for (a, b) in parallel.iter().zip(&sequential) {
        assert_eq!(a.serialize().unwrap(), b.serialize().unwrap(), "{}", a.kind());
    }
}

#[test]
fn test_cross_kind_compare_is_incompatible() {
    let all = build_all(&ExtractionConfig::default(), &sunset(24, 24));
    let err = all[0].compare(&all[1]).unwrap_err();
    assert!(matches!(err, DescriptorError::IncompatibleOperands(_)));
}

#[test]
fn test_invalid_config_json_is_reported() {
    let err = ExtractionConfig::from_json(r#"{"parallel": "yes"}"#).unwrap_err();
    assert!(matches!(err, DescriptorError::ConfigParse(_)));
}

#[test]
fn test_decoded_image_adapter_feeds_descriptors() {
    let img = image::RgbImage::from_fn(20, 20, |x, y| image::Rgb([(x * 12) as u8, (y * 12) as u8, 128]));
    let raster = ColorImage::from_dynamic(&image::DynamicImage::ImageRgb8(img));
    for descriptor in build_all(&ExtractionConfig::default(), &raster) {
        assert!(descriptor.is_computed());
    }
}
