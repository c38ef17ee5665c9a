use rand::{SeedableRng as _, rngs::StdRng};

use super::*;

fn group(n: usize, lifetime: f64) -> Vec<StreamerSpec> {
    (0..n)
        .map(|_| StreamerSpec::default().with_lifetime(lifetime))
        .collect()
}

#[test]
fn none_and_every() {
    let mut rng = StdRng::seed_from_u64(0);
    assert!(StreamerSource::None.specs_at(0.0, &mut rng).is_empty());
    let every = StreamerSource::Every(group(2, 6.0));
    assert_eq!(every.specs_at(0.0, &mut rng).len(), 2);
    assert_eq!(every.specs_at(17.3, &mut rng).len(), 2);
}

#[test]
fn choices_rotate_every_delay() {
    let mut rng = StdRng::seed_from_u64(0);
    let src = StreamerSource::choices(2.0, vec![group(1, 1.0), group(2, 2.0)]);
    let at = |t: f64, rng: &mut StdRng| src.specs_at(t, rng).len();
    assert_eq!(at(0.0, &mut rng), 1);
    assert_eq!(at(1.0, &mut rng), 0);
    assert_eq!(at(2.0, &mut rng), 2);
    assert_eq!(at(3.0, &mut rng), 0);
    assert_eq!(at(4.0, &mut rng), 1);
    assert_eq!(at(4.5, &mut rng), 1);
}

#[test]
fn delay_offset_shifts_the_rotation() {
    let mut rng = StdRng::seed_from_u64(0);
    let src = StreamerSource::choices(2.0, vec![group(1, 1.0)]).offset_by(1.0);
    assert!(src.specs_at(0.0, &mut rng).is_empty());
    assert_eq!(src.specs_at(1.0, &mut rng).len(), 1);
}

#[test]
fn fractional_delay_emits_on_whole_multiples() {
    let mut rng = StdRng::seed_from_u64(0);
    let src = StreamerSource::choices(1.5, vec![group(1, 1.0), group(1, 2.0)]);
    let hits: Vec<f64> = (0..6)
        .map(f64::from)
        .filter(|t| !src.specs_at(*t, &mut rng).is_empty())
        .collect();
    assert_eq!(hits, vec![0.0, 3.0]);
}

#[test]
fn choose_draws_within_range() {
    let mut rng = StdRng::seed_from_u64(5);
    let src = StreamerSource::choices(1.0, vec![group(3, 1.0)]).choosing(1, 4);
    for _ in 0..50 {
        let n = src.specs_at(0.0, &mut rng).len();
        assert!((1..=4).contains(&n));
    }
}

#[test]
fn combined_concatenates() {
    let mut rng = StdRng::seed_from_u64(0);
    let src = StreamerSource::Combined(vec![
        StreamerSource::Every(group(1, 1.0)),
        StreamerSource::choices(1.0, vec![group(2, 1.0)]),
    ]);
    assert_eq!(src.specs_at(0.0, &mut rng).len(), 3);
}

#[test]
fn validation() {
    assert!(StreamerSource::choices(0.0, vec![group(1, 1.0)]).validate().is_err());
    assert!(StreamerSource::choices(1.0, vec![]).validate().is_err());
    assert!(
        StreamerSource::choices(1.0, vec![group(1, 1.0)])
            .choosing(3, 1)
            .validate()
            .is_err()
    );
    let bad_spec = StreamerSpec::default().with_width(Param::Choice(vec![]));
    assert!(StreamerSource::Every(vec![bad_spec]).validate().is_err());
    assert!(StreamerSource::Every(group(2, 1.0)).validate().is_ok());
}
