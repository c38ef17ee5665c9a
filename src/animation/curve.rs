use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

use crate::{
    animation::ease::Ease,
    foundation::error::{TinselError, TinselResult},
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlPoint {
    pub time: f64,
    pub value: f64,
}

impl From<(f64, f64)> for ControlPoint {
    fn from((time, value): (f64, f64)) -> Self {
        Self { time, value }
    }
}

/// A periodic, keyframed scalar function of time.
///
/// Sample time is taken modulo [`Curve::length`] (the time of the last control
/// point), the bracketing pair of points is located, `shape` is applied to the
/// normalized position inside that segment, and the result is linearly
/// interpolated between the segment's endpoint values.
///
/// Curves are immutable. Arithmetic with a scalar (`curve * 0.5`, `-curve`,
/// `curve - 1.0`) builds a new curve whose values are transformed while the
/// shape and times stay untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct Curve {
    shape: Ease,
    points: Vec<ControlPoint>, // sorted by time, first at 0
}

impl Curve {
    pub fn new<P>(shape: Ease, points: impl IntoIterator<Item = P>) -> TinselResult<Self>
    where
        P: Into<ControlPoint>,
    {
        let points: Vec<ControlPoint> = points.into_iter().map(Into::into).collect();
        if points.len() < 2 {
            return Err(TinselError::validation(format!(
                "curve needs at least 2 control points, got {}",
                points.len()
            )));
        }
        if points
            .iter()
            .any(|p| !p.time.is_finite() || !p.value.is_finite())
        {
            return Err(TinselError::validation(
                "curve control points must be finite",
            ));
        }
        if points[0].time != 0.0 {
            return Err(TinselError::validation(format!(
                "curve must start at time 0, got {}",
                points[0].time
            )));
        }
        if !points.windows(2).all(|w| w[0].time <= w[1].time) {
            return Err(TinselError::validation(
                "curve control points must be sorted by time",
            ));
        }
        let curve = Self { shape, points };
        if curve.length() <= 0.0 {
            return Err(TinselError::validation("curve length must be > 0"));
        }
        Ok(curve)
    }

    /// Build from points the caller has already put in order (first at 0,
    /// non-decreasing, positive length).
    pub(crate) fn from_sorted(shape: Ease, points: Vec<ControlPoint>) -> Self {
        debug_assert!(points.len() >= 2);
        debug_assert!(points[0].time == 0.0);
        debug_assert!(points.windows(2).all(|w| w[0].time <= w[1].time));
        Self { shape, points }
    }

    /// `[(0, start), (period/2, end), (period, start)]`
    pub fn bump(shape: Ease, period: f64, start: f64, end: f64) -> TinselResult<Self> {
        Self::new(
            shape,
            [(0.0, start), (period * 0.5, end), (period, start)],
        )
    }

    /// `[(0, a), (p/4, b), (p/2, -a), (3p/4, -b), (p, a)]`
    pub fn bounce(shape: Ease, period: f64, a: f64, b: f64) -> TinselResult<Self> {
        Self::new(
            shape,
            [
                (0.0, a),
                (period * 0.25, b),
                (period * 0.5, -a),
                (period * 0.75, -b),
                (period, a),
            ],
        )
    }

    pub fn shape(&self) -> Ease {
        self.shape
    }

    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    pub fn length(&self) -> f64 {
        self.points[self.points.len() - 1].time
    }

    /// Number of whole periods completed by `t`.
    pub fn iteration(&self, t: f64) -> i64 {
        (t / self.length()).floor() as i64
    }

    pub fn evaluate(&self, t: f64) -> f64 {
        debug_assert!(t.is_finite(), "curve sampled at non-finite time {t}");
        let len = self.length();
        let mut s = t.rem_euclid(len);
        if s.is_nan() || s >= len {
            // rounding on tiny negatives
            s = 0.0;
        }

        let upper = self.points.partition_point(|p| p.time <= s);
        if upper == 0 || upper >= self.points.len() {
            unreachable!("no control point bracket for s={s} in {:?}", self.points);
        }
        let a = self.points[upper - 1];
        let b = self.points[upper];
        let u = (s - a.time) / (b.time - a.time);
        self.shape.apply(u) * (b.value - a.value) + a.value
    }

    /// New curve with every control-point value passed through `f`.
    pub fn map_values(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            shape: self.shape,
            points: self
                .points
                .iter()
                .map(|p| ControlPoint {
                    time: p.time,
                    value: f(p.value),
                })
                .collect(),
        }
    }
}

macro_rules! curve_scalar_op {
    ($trait:ident, $method:ident, |$v:ident, $k:ident| $body:expr) => {
        impl $trait<f64> for &Curve {
            type Output = Curve;

            fn $method(self, $k: f64) -> Curve {
                self.map_values(|$v| $body)
            }
        }

        impl $trait<f64> for Curve {
            type Output = Curve;

            fn $method(self, $k: f64) -> Curve {
                (&self).$method($k)
            }
        }
    };
}

curve_scalar_op!(Add, add, |v, k| v + k);
curve_scalar_op!(Sub, sub, |v, k| v - k);
curve_scalar_op!(Mul, mul, |v, k| v * k);
curve_scalar_op!(Div, div, |v, k| v / k);
curve_scalar_op!(Rem, rem, |v, k| v.rem_euclid(k));

impl Neg for &Curve {
    type Output = Curve;

    fn neg(self) -> Curve {
        self.map_values(|v| -v)
    }
}

impl Neg for Curve {
    type Output = Curve;

    fn neg(self) -> Curve {
        -&self
    }
}

/// Curves played back to back; the chain repeats once all of them have run.
#[derive(Clone, Debug, PartialEq)]
pub struct CurveChain {
    curves: Vec<Curve>,
}

impl CurveChain {
    pub fn new(curves: Vec<Curve>) -> TinselResult<Self> {
        if curves.is_empty() {
            return Err(TinselError::validation("curve chain must not be empty"));
        }
        Ok(Self { curves })
    }

    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    pub fn length(&self) -> f64 {
        self.curves.iter().map(Curve::length).sum()
    }

    pub fn evaluate(&self, t: f64) -> f64 {
        let mut s = t.rem_euclid(self.length());
        for curve in &self.curves {
            let len = curve.length();
            if s < len {
                return curve.evaluate(s);
            }
            s -= len;
        }
        // s landed on the total length through rounding
        self.curves[0].evaluate(0.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/curve.rs"]
mod tests;
