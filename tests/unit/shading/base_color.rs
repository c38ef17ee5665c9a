use rand::{SeedableRng as _, rngs::StdRng};

use super::*;

fn ctx(t: f64, angle: f64, height: f64) -> ShadeCtx {
    ShadeCtx {
        t,
        blend_hue: 0.1,
        spread: 0.2,
        anchor_hue: 0.0,
        angle,
        height,
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn plain_adds_blend_and_spread() {
    let mut rng = StdRng::seed_from_u64(1);
    let (c, fx) = BaseColor::lit(0.3).evaluate(&ctx(0.0, 0.5, 0.0), &mut rng);
    assert!(approx(c.hue(), 0.3 + 0.1 + 0.2 * 0.5));
    assert_eq!(c.lightness(), 0.0);
    assert!(fx.is_empty());

    let bare: BaseColor = PlainColor::default()
        .with_hue(0.3)
        .without_blend()
        .without_spread()
        .suppressing(Effects::FLASH | Effects::SPARKLES)
        .into();
    let (c, fx) = bare.evaluate(&ctx(0.0, 0.5, 0.0), &mut rng);
    assert!(approx(c.hue(), 0.3));
    assert!(c.is_off());
    assert_eq!(fx, Effects::FLASH | Effects::SPARKLES);
}

#[test]
fn split_of_four_at_point_three_picks_wedge_one() {
    let mut rng = StdRng::seed_from_u64(1);
    let slots = (0..4)
        .map(|i| Some(BaseColor::lit(f64::from(i) / 10.0)))
        .collect();
    let split = BaseColor::split(4.0, Some(StrategyList::Fixed(slots)));
    let mut c = ctx(0.0, 0.3, 0.0);
    c.spread = 0.0;
    c.blend_hue = 0.0;
    let (color, _) = split.evaluate(&c, &mut rng);
    assert!(approx(color.hue(), 0.1));
}

#[test]
fn split_without_slots_falls_back_per_wedge() {
    let mut rng = StdRng::seed_from_u64(1);
    let split = BaseColor::split(4.0, None);
    let (color, _) = split.evaluate(&ctx(0.0, 0.8, 0.0), &mut rng);
    assert!(approx(color.hue(), 0.1 + 3.0 * 0.2));
    assert_eq!(color.lightness(), 0.0);
}

#[test]
fn split_at_full_turn_falls_back_past_last_wedge() {
    let mut rng = StdRng::seed_from_u64(1);
    let slots = vec![Some(BaseColor::lit(0.5)), Some(BaseColor::lit(0.7))];
    let split = BaseColor::split(2.0, Some(StrategyList::Fixed(slots)));
    // a mirror fold can hand over exactly 1.0
    let (color, _) = split.evaluate(&ctx(0.0, 1.0, 0.0), &mut rng);
    assert!(approx(color.hue(), 0.1 + 2.0 * 0.2));
    assert_eq!(color.lightness(), 0.0);
}

#[test]
fn window_side_follows_ratio() {
    let mut rng = StdRng::seed_from_u64(1);
    let w = BaseColor::window(0.75, None);
    let (a, _) = w.evaluate(&ctx(0.0, 0.1, 0.0), &mut rng);
    let (b, _) = w.evaluate(&ctx(0.0, 0.5, 0.0), &mut rng);
    assert!(approx(a.hue(), 0.1));
    assert!(approx(b.hue(), 0.3));
}

#[test]
fn window_counts_ratio_iterations() {
    let mut rng = StdRng::seed_from_u64(1);
    let ratio = Curve::new(Ease::Linear, [(0.0, 0.0), (10.0, 0.0)]).unwrap();
    let w = BaseColor::window(ratio, None);
    let (c, _) = w.evaluate(&ctx(25.0, 0.2, 0.0), &mut rng);
    // side 0, two completed periods
    assert!(approx(c.hue(), 0.1 + 2.0 * 0.2));
}

#[test]
fn window_delegates_to_side_strategy() {
    let mut rng = StdRng::seed_from_u64(1);
    let sides = StrategyList::Fixed(vec![
        Some(PlainColor::default().with_white(0.75).into()),
        None,
    ]);
    let w = BaseColor::window(0.0, Some(sides));
    let (c, _) = w.evaluate(&ctx(0.0, 0.2, 0.0), &mut rng);
    assert_eq!(c.white(), 0.75);
}

#[test]
fn periodic_list_rotates_with_time() {
    let list = StrategyList::Periodic {
        interval: 1.5,
        choices: vec![vec![None], vec![Some(BaseColor::lit(0.0))]],
    };
    assert!(list.at(0.0)[0].is_none());
    assert!(list.at(1.6)[0].is_some());
    assert!(list.at(3.0)[0].is_none());
}

#[test]
fn falling_band_hues_step_by_skip() {
    let mut rng = StdRng::seed_from_u64(1);
    let f: BaseColor = FallingColor::new(8, 3).into();
    let mut c = ctx(0.0, 0.0, 0.5);
    c.anchor_hue = 0.25;
    let (a, _) = f.evaluate(&c, &mut rng);
    assert!(approx(a.hue(), 0.25));
    // fade peaks mid-band
    assert!(approx(a.lightness(), 0.0));

    c.height = 1.5;
    let (b, _) = f.evaluate(&c, &mut rng);
    assert!(approx(b.hue(), 0.25 + 3.0 / 8.0));
}

#[test]
fn falling_scrolls_one_band_per_period_slice() {
    let mut rng = StdRng::seed_from_u64(1);
    let f: BaseColor = FallingColor::new(8, 3).into();
    // 60s period / 8 bands: 7.5s moves the field one band
    let (a, _) = f.evaluate(&ctx(7.5, 0.0, 0.5), &mut rng);
    assert!(approx(a.hue(), 3.0 / 8.0));
    let (edge, _) = f.evaluate(&ctx(0.0, 0.0, 0.0), &mut rng);
    assert!(edge.is_off());
}

#[test]
fn validation_catches_out_of_range_indices() {
    let short = BaseColor::split(4.0, Some(StrategyList::Fixed(vec![None, None])));
    assert!(short.validate().is_err());

    let window = BaseColor::window(0.5, Some(StrategyList::Fixed(vec![None])));
    assert!(window.validate().is_err());

    let ok = BaseColor::split(
        Curve::new(Ease::Linear, [(0.0, 1.0), (5.0, 3.0)]).unwrap(),
        Some(StrategyList::Fixed(vec![None, None, None])),
    );
    assert!(ok.validate().is_ok());

    assert!(BaseColor::split(0.0, None).validate().is_err());
    assert!(BaseColor::from(FallingColor::new(0, 1)).validate().is_err());
}
