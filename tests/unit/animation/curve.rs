use super::*;

fn ramp() -> Curve {
    Curve::new(Ease::Linear, [(0.0, 0.0), (10.0, 1.0)]).unwrap()
}

#[test]
fn linear_ramp_matches_reference_samples() {
    let c = ramp();
    assert_eq!(c.length(), 10.0);
    assert_eq!(c.evaluate(5.0), 0.5);
    assert_eq!(c.evaluate(0.0), 0.0);
    assert_eq!(c.evaluate(10.0), 0.0);
    assert!((c.evaluate(18.0) - 0.8).abs() < 1e-12);
}

#[test]
fn negative_time_wraps_forward() {
    let c = ramp();
    assert!((c.evaluate(-2.0) - 0.8).abs() < 1e-12);
}

#[test]
fn control_points_are_hit_exactly() {
    let c = Curve::new(
        Ease::InOutSine,
        [(0.0, 0.25), (3.0, 0.75), (4.5, -0.5), (6.0, 0.25)],
    )
    .unwrap();
    for p in &c.points()[..c.points().len() - 1] {
        assert_eq!(c.evaluate(p.time), p.value);
    }
}

#[test]
fn hold_shape_makes_steps() {
    let c = Curve::new(Ease::Hold, [(0.0, 4.0), (6.0, 3.0), (12.0, 6.0), (18.0, 4.0)]).unwrap();
    assert_eq!(c.evaluate(0.0), 4.0);
    assert_eq!(c.evaluate(5.9), 4.0);
    assert_eq!(c.evaluate(6.0), 3.0);
    assert_eq!(c.evaluate(13.0), 6.0);
}

#[test]
fn construction_rejects_degenerate_inputs() {
    assert!(Curve::new(Ease::Linear, [(0.0, 1.0)]).is_err());
    assert!(Curve::new(Ease::Linear, Vec::<(f64, f64)>::new()).is_err());
    assert!(Curve::new(Ease::Linear, [(0.0, 0.0), (2.0, 1.0), (1.0, 0.0)]).is_err());
    assert!(Curve::new(Ease::Linear, [(1.0, 0.0), (2.0, 1.0)]).is_err());
    assert!(Curve::new(Ease::Linear, [(0.0, 0.0), (0.0, 1.0)]).is_err());
    assert!(Curve::new(Ease::Linear, [(0.0, f64::NAN), (1.0, 1.0)]).is_err());
}

#[test]
fn scalar_arithmetic_transforms_values_only() {
    let c = ramp();
    let scaled = &c * 4.0;
    assert_eq!(scaled.shape(), Ease::Linear);
    assert_eq!(scaled.length(), 10.0);
    assert_eq!(scaled.evaluate(5.0), 2.0);

    let shifted = (c.clone() + 1.0) - 0.5;
    assert_eq!(shifted.evaluate(5.0), 1.0);

    let negated = -c.clone();
    assert_eq!(negated.evaluate(5.0), -0.5);

    let halved = c.clone() / 2.0;
    assert_eq!(halved.evaluate(5.0), 0.25);

    let wrapped = (c * 3.0) % 1.0;
    assert_eq!(wrapped.points()[1].value, 0.0);
}

#[test]
fn iteration_counts_whole_periods() {
    let c = ramp();
    assert_eq!(c.iteration(0.0), 0);
    assert_eq!(c.iteration(9.99), 0);
    assert_eq!(c.iteration(10.0), 1);
    assert_eq!(c.iteration(35.0), 3);
}

#[test]
fn bump_and_bounce_helpers_lay_out_points() {
    let b = Curve::bump(Ease::Linear, 6.0, 0.0, 1.0).unwrap();
    assert_eq!(b.evaluate(3.0), 1.0);
    assert_eq!(b.evaluate(1.5), 0.5);

    let bb = Curve::bounce(Ease::Linear, 8.0, 0.0, 1.0).unwrap();
    assert_eq!(bb.evaluate(2.0), 1.0);
    assert_eq!(bb.evaluate(6.0), -1.0);
}

#[test]
fn chain_plays_curves_back_to_back() {
    let up = Curve::new(Ease::Linear, [(0.0, 0.0), (15.0, 1.0)]).unwrap();
    let down = Curve::new(Ease::Linear, [(0.0, 0.0), (15.0, -1.0)]).unwrap();
    let chain = CurveChain::new(vec![up, down]).unwrap();
    assert_eq!(chain.length(), 30.0);
    assert!((chain.evaluate(7.5) - 0.5).abs() < 1e-12);
    assert!((chain.evaluate(22.5) + 0.5).abs() < 1e-12);
    assert!((chain.evaluate(37.5) - 0.5).abs() < 1e-12);
    assert!(CurveChain::new(vec![]).is_err());
}
