use super::*;

fn led(x: f64, y: f64, z: f64) -> LedPosition {
    LedPosition { x, y, z }
}

#[test]
fn angle_follows_atan2() {
    let a = |x, z| Pixel::from_position(0, 0, 0, &led(x, 0.0, z)).base_angle;
    assert!((a(1.0, 0.0) - 0.5).abs() < 1e-12);
    assert!((a(0.0, 1.0) - 0.75).abs() < 1e-12);
    assert!((a(0.0, -1.0) - 0.25).abs() < 1e-12);
    // atan2 = pi lands on 1.0 and wraps to 0
    assert_eq!(a(-1.0, 0.0), 0.0);
}

#[test]
fn global_index_uses_real_strand_sizes() {
    let layout = PixelLayout::new(vec![
        Strand {
            leds: vec![led(1.0, 0.0, 0.0); 3],
        },
        Strand {
            leds: vec![led(0.0, 0.5, 1.0); 2],
        },
    ])
    .unwrap();
    let pixels = layout.pixels();
    assert_eq!(layout.strand_sizes(), vec![3, 2]);
    assert_eq!(pixels.len(), 5);
    assert_eq!(
        pixels.iter().map(|p| p.global_index).collect::<Vec<_>>(),
        vec![0, 1, 2, 3, 4]
    );
    assert_eq!((pixels[3].strand, pixels[3].index), (1, 0));
    assert_eq!(pixels[4].base_height, 0.5);
}

#[test]
fn json_round_trip_and_rejections() {
    let layout = PixelLayout::from_json_str(
        r#"{"strands":[{"leds":[{"x":1.0,"y":-1.0,"z":0.0},{"x":0.0,"y":1.0,"z":1.0}]}]}"#,
    )
    .unwrap();
    assert_eq!(layout.len(), 2);

    assert!(matches!(
        PixelLayout::from_json_str(r#"{"strands":[]}"#),
        Err(TinselError::Layout(_))
    ));
    assert!(matches!(
        PixelLayout::from_json_str("{not json"),
        Err(TinselError::Serde(_))
    ));
    assert!(PixelLayout::from_json_path("/definitely/not/here.json").is_err());
}

#[test]
fn synthetic_cone_spans_the_height() {
    let layout = PixelLayout::synthetic_cone(2, 50).unwrap();
    assert_eq!(layout.strand_sizes(), vec![50, 50]);
    let pixels = layout.pixels();
    let (lo, hi) = pixels.iter().fold((f64::MAX, f64::MIN), |(lo, hi), p| {
        (lo.min(p.base_height), hi.max(p.base_height))
    });
    assert!((lo + 1.0).abs() < 1e-12);
    assert!((hi - 1.0).abs() < 1e-12);
    assert!(pixels.iter().all(|p| (0.0..1.0).contains(&p.base_angle)));
    assert!(PixelLayout::synthetic_cone(0, 10).is_err());
}
