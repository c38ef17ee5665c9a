use std::collections::HashSet;

use rand::{SeedableRng as _, rngs::StdRng};

use super::*;

#[test]
fn catalog_builds_with_unique_names() {
    let patterns = builtin_catalog().unwrap();
    assert_eq!(patterns.len(), 12);
    let names: HashSet<&str> = patterns.iter().map(Pattern::name).collect();
    assert_eq!(names.len(), patterns.len());
    assert!(names.contains("Basic Glow"));
    assert!(names.contains("Twisted Rainbows"));
}

#[test]
fn every_pattern_validates() {
    for p in builtin_catalog().unwrap() {
        p.validate().unwrap();
    }
}

#[test]
fn every_pattern_shades_finite_clamped_colours() {
    let mut rng = StdRng::seed_from_u64(42);
    for p in builtin_catalog().unwrap() {
        for t in [0.0, 1.3, 7.5, 29.9, 59.0, 123.4] {
            for (angle, height) in [(0.0, -1.0), (0.31, 0.0), (0.77, 0.5), (0.999, 1.0)] {
                let (c, _) = p.shade(t, 0.2, 0.1, angle, height, &mut rng);
                assert!((0.0..1.0).contains(&c.hue()), "{} hue {}", p.name(), c.hue());
                assert!((-1.0..=1.0).contains(&c.lightness()));
                assert!((0.0..=1.0).contains(&c.white()));
                assert!((0.0..=1.0).contains(&c.saturation()));
            }
        }
    }
}

#[test]
fn streaming_patterns_emit_specs() {
    let mut rng = StdRng::seed_from_u64(1);
    let patterns = builtin_catalog().unwrap();
    let galaxus = patterns.iter().find(|p| p.name() == "Galaxus").unwrap();
    // first arm fires on even seconds, the offset arm on odd ones
    assert_eq!(galaxus.streamers().specs_at(0.0, &mut rng).len(), 6);
    assert_eq!(galaxus.streamers().specs_at(1.0, &mut rng).len(), 6);

    let basic = patterns.iter().find(|p| p.name() == "Basic Glow").unwrap();
    assert!(basic.streamers().specs_at(0.0, &mut rng).is_empty());
}
