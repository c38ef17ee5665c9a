use rand::{Rng as _, RngCore, seq::IndexedRandom as _};

use crate::{
    animation::curve::{Curve, CurveChain},
    foundation::{
        error::{TinselError, TinselResult},
        math::uniform,
    },
};

/// A scalar that is either fixed or a function of time.
///
/// Everything downstream reads a param through [`Param::at`], so a constant,
/// a curve and a random source are interchangeable wherever a value is
/// expected.
#[derive(Clone, Debug, PartialEq)]
pub enum Param {
    Const(f64),
    Curve(Curve),
    Chain(CurveChain),
    /// Fresh uniform sample in `[min, max)` on every read.
    Random { min: Box<Param>, max: Box<Param> },
    /// Fresh uniform pick from the list on every read.
    Choice(Vec<f64>),
    /// `choices[floor(t / interval) % len]`
    Cycle { interval: f64, choices: Vec<Param> },
}

impl Param {
    pub fn random(min: impl Into<Param>, max: impl Into<Param>) -> Self {
        Self::Random {
            min: Box::new(min.into()),
            max: Box::new(max.into()),
        }
    }

    pub fn at(&self, t: f64, rng: &mut dyn RngCore) -> f64 {
        match self {
            Self::Const(v) => *v,
            Self::Curve(c) => c.evaluate(t),
            Self::Chain(c) => c.evaluate(t),
            Self::Random { min, max } => {
                let lo = min.at(t, rng);
                let hi = max.at(t, rng);
                uniform(rng, lo, hi)
            }
            Self::Choice(choices) => choices.choose(rng).copied().unwrap_or(0.0),
            Self::Cycle { interval, choices } => {
                let i = (t / interval).floor().rem_euclid(choices.len() as f64) as usize;
                choices[i.min(choices.len() - 1)].at(t, rng)
            }
        }
    }

    /// Period of the underlying curve, if this param is one.
    pub fn period(&self) -> Option<f64> {
        match self {
            Self::Curve(c) => Some(c.length()),
            Self::Chain(c) => Some(c.length()),
            _ => None,
        }
    }

    pub fn as_const(&self) -> Option<f64> {
        match self {
            Self::Const(v) => Some(*v),
            _ => None,
        }
    }

    pub fn validate(&self) -> TinselResult<()> {
        match self {
            Self::Const(v) => {
                if !v.is_finite() {
                    return Err(TinselError::validation("constant param must be finite"));
                }
                Ok(())
            }
            Self::Curve(c) => check_curve(c),
            Self::Chain(ch) => ch.curves().iter().try_for_each(check_curve),
            Self::Random { min, max } => {
                min.validate()?;
                max.validate()
            }
            Self::Choice(choices) => {
                if choices.is_empty() {
                    return Err(TinselError::validation("choice param needs at least one value"));
                }
                Ok(())
            }
            Self::Cycle { interval, choices } => {
                if !(*interval > 0.0) {
                    return Err(TinselError::validation("cycle interval must be > 0"));
                }
                if choices.is_empty() {
                    return Err(TinselError::validation("cycle param needs at least one choice"));
                }
                choices.iter().try_for_each(Param::validate)
            }
        }
    }
}

impl Default for Param {
    fn default() -> Self {
        Self::Const(0.0)
    }
}

impl From<f64> for Param {
    fn from(v: f64) -> Self {
        Self::Const(v)
    }
}

impl From<Curve> for Param {
    fn from(c: Curve) -> Self {
        Self::Curve(c)
    }
}

impl From<CurveChain> for Param {
    fn from(c: CurveChain) -> Self {
        Self::Chain(c)
    }
}

/// Scalar ops on a curve skip construction checks, so values can go non-finite.
fn check_curve(curve: &Curve) -> TinselResult<()> {
    if curve.points().iter().any(|p| !p.value.is_finite()) {
        return Err(TinselError::validation(
            "curve param has non-finite control values",
        ));
    }
    Ok(())
}

/// Uniform integer in `[lo, hi]`, or `lo` when the range is empty.
pub(crate) fn random_index(rng: &mut dyn RngCore, lo: usize, hi: usize) -> usize {
    if hi <= lo {
        return lo;
    }
    rng.random_range(lo..=hi)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/param.rs"]
mod tests;
