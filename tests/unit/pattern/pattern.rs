use rand::{SeedableRng as _, rngs::StdRng};

use super::*;
use crate::{
    animation::{curve::Curve, ease::Ease},
    color::recolor::Recolor,
    shading::base_color::PlainColor,
};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn builder_defaults_are_quiet() {
    let p = Pattern::builder("quiet").build().unwrap();
    assert_eq!(p.name(), "quiet");
    for key in ControlKey::ALL {
        assert_eq!(p.param(key).as_const(), Some(0.0));
    }
    assert!(p.topologies().is_empty());
    assert_eq!(p.streamers(), &StreamerSource::None);
    assert_eq!(p.sparkle_func(), &SparkleFunc::Recolor(Recolor::whiten()));
}

#[test]
fn empty_name_is_rejected() {
    assert!(Pattern::builder("  ").build().is_err());
}

#[test]
fn invalid_pieces_name_the_pattern() {
    let err = Pattern::builder("broken")
        .base_color(BaseColor::split(3.0, Some(crate::shading::base_color::StrategyList::Fixed(vec![None]))))
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("broken"));
}

#[test]
fn set_param_replaces_and_validates() {
    let mut p = Pattern::builder("p").build().unwrap();
    p.set_param(ControlKey::Flux, Param::Const(0.25)).unwrap();
    assert_eq!(p.param(ControlKey::Flux).as_const(), Some(0.25));
    assert!(p.set_param(ControlKey::Spin, Param::Choice(vec![])).is_err());
    assert_eq!(p.param(ControlKey::Spin).as_const(), Some(0.0));
}

#[test]
fn control_keys_parse_by_name() {
    for key in ControlKey::ALL {
        assert_eq!(key.name().parse::<ControlKey>().unwrap(), key);
    }
    assert!("wobble".parse::<ControlKey>().is_err());
}

#[test]
fn spin_and_spiral_rotate_before_topologies() {
    let mut rng = StdRng::seed_from_u64(0);
    let p = Pattern::builder("p")
        .base_color(BaseColor::lit(0.0))
        .spread(1.0)
        .spin(0.25)
        .spiral(0.5)
        .build()
        .unwrap();
    // angle = wrap(0.1 + 0.25 + 0.5 * 0.2) = 0.45; hue = spread * angle
    let (c, _) = p.shade(0.0, 0.0, 0.0, 0.1, 0.2, &mut rng);
    assert!(approx(c.hue(), 0.45));
}

#[test]
fn topologies_thread_in_order() {
    let mut rng = StdRng::seed_from_u64(0);
    let p = Pattern::builder("p")
        .base_color(BaseColor::lit(0.0))
        .spread(1.0)
        .topology(Topology::repeat(2.0))
        .topology(Topology::mirror(1.0))
        .build()
        .unwrap();
    // repeat: 0.8 -> 0.6, mirror: 1.2 -> 0.8
    let (c, _) = p.shade(0.0, 0.0, 0.0, 0.8, 0.0, &mut rng);
    assert!(approx(c.hue(), 0.8));
}

#[test]
fn modifiers_stay_within_their_ranges() {
    let mut rng = StdRng::seed_from_u64(9);
    let p = Pattern::builder("p")
        .base_color(BaseColor::lit(0.5))
        .flash(0.5)
        .flicker(0.25)
        .flitter(0.5)
        .flux(0.2)
        .build()
        .unwrap();
    for _ in 0..200 {
        let (c, _) = p.shade(0.0, 0.0, 0.0, 0.0, 0.0, &mut rng);
        assert!((-0.5..=0.0).contains(&c.lightness()));
        assert!((0.0..=0.25).contains(&c.white()));
        assert!((0.5..=1.0).contains(&c.saturation()));
        assert!((0.4..=0.6).contains(&c.hue()));
    }
}

#[test]
fn flash_skips_unlit_and_flitter_skips_grey() {
    let mut rng = StdRng::seed_from_u64(9);
    let p = Pattern::builder("p")
        .base_color(PlainColor::default().with_saturation(0.0))
        .flash(1.0)
        .flitter(1.0)
        .build()
        .unwrap();
    let (c, _) = p.shade(0.0, 0.0, 0.0, 0.0, 0.0, &mut rng);
    assert!(c.is_off());
    assert_eq!(c.saturation(), 0.0);
}

#[test]
fn suppressed_modifiers_are_skipped() {
    let mut rng = StdRng::seed_from_u64(9);
    let p = Pattern::builder("p")
        .base_color(
            PlainColor::default()
                .with_lightness(0.0)
                .suppressing(Effects::FLICKER | Effects::FLUX),
        )
        .flicker(1.0)
        .flux(1.0)
        .build()
        .unwrap();
    let (c, fx) = p.shade(0.0, 0.0, 0.0, 0.0, 0.0, &mut rng);
    assert_eq!(c.white(), 0.0);
    assert_eq!(c.hue(), 0.0);
    assert!(fx.contains(Effects::FLUX));
}

#[test]
fn sparkle_chance_is_clamped() {
    let mut rng = StdRng::seed_from_u64(0);
    let over = Pattern::builder("p").sparkles(3.0).build().unwrap();
    assert_eq!(over.sparkle_chance(0.0, &mut rng), 1.0);
    let curve = Curve::new(Ease::Linear, [(0.0, -1.0), (2.0, 1.0)]).unwrap();
    let under = Pattern::builder("p").sparkles(curve).build().unwrap();
    assert_eq!(under.sparkle_chance(0.0, &mut rng), 0.0);
    assert!(approx(under.sparkle_chance(1.5, &mut rng), 0.5));
}
