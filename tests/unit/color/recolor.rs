use rand::{SeedableRng as _, rngs::StdRng};

use super::*;

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

#[test]
fn noop_passes_colour_through() {
    let c = Color::new(0.2, 0.3, 0.4, 0.5);
    assert_eq!(Recolor::noop().apply(c, 1.0, &mut rng()), c);
}

#[test]
fn base_forces_lightness_zero_and_keeps_hue() {
    let c = Color::new(0.2, 0.3, 0.4, -0.9);
    let out = Recolor::base().apply(c, 0.0, &mut rng());
    assert_eq!(out, Color::new(0.2, 0.3, 0.4, 0.0));
}

#[test]
fn invert_shifts_hue_by_half() {
    let c = Color::hue_at(0.75, -0.5);
    let out = Recolor::invert().apply(c, 0.0, &mut rng());
    assert_eq!(out.hue(), 0.25);
    assert_eq!(out.lightness(), 0.0);
}

#[test]
fn make_white_only_affects_lit_pixels() {
    let lit = Color::hue_at(0.1, 0.0);
    assert_eq!(
        Recolor::invert_whiten().apply(lit, 0.0, &mut rng()),
        Color::whitened()
    );

    let off = Color::OFF;
    let out = Recolor::invert_whiten().apply(off, 0.0, &mut rng());
    assert_eq!(out.hue(), 0.5);
    assert_eq!(out.lightness(), 0.0);
}

#[test]
fn whiten_and_blank_presets() {
    let c = Color::hue_at(0.4, 0.0);
    assert_eq!(Recolor::whiten().apply(c, 0.0, &mut rng()), Color::whitened());
    assert!(Recolor::blank().apply(c, 0.0, &mut rng()).is_off());
}

#[test]
fn replace_mode_ignores_incoming_hue() {
    let c = Color::hue_at(0.9, 0.0);
    let r = Recolor::noop().with_hue(0.2).replacing_hue();
    assert_eq!(r.apply(c, 0.0, &mut rng()).hue(), 0.2);

    let random = Recolor::random_hue().apply(c, 0.0, &mut rng());
    assert_eq!(random.lightness(), 0.0);
    assert_eq!(random.white(), 0.0);
}

#[test]
fn sparkle_whiten_if_off() {
    let lit = Color::hue_at(0.3, 0.2);
    assert_eq!(SparkleFunc::WhitenIfOff.apply(lit, 0.0, &mut rng()), lit);
    assert_eq!(
        SparkleFunc::WhitenIfOff.apply(Color::OFF, 0.0, &mut rng()),
        Color::whitened()
    );
}

#[test]
fn sparkle_random_hue_stays_in_range() {
    let mut r = rng();
    let c = Color::hue_at(0.5, 0.0);
    for _ in 0..200 {
        let out = SparkleFunc::RandomHue { range: 0.2 }.apply(c, 0.0, &mut r);
        assert!((out.hue() - 0.5).abs() <= 0.1 + 1e-12);
        assert_eq!(out.lightness(), 0.0);
    }
}

#[test]
fn default_sparkle_is_whiten() {
    let c = Color::hue_at(0.5, 0.0);
    assert_eq!(SparkleFunc::default().apply(c, 0.0, &mut rng()), Color::whitened());
}

#[test]
fn validate_rejects_bad_nested_params() {
    let bad = Recolor::noop().with_hue(Param::Choice(vec![]));
    assert!(bad.validate().is_err());
    assert!(SparkleFunc::Recolor(bad).validate().is_err());
    assert!(SparkleFunc::RandomHue { range: f64::NAN }.validate().is_err());
}
