use rand::RngCore;

use crate::{
    animation::{
        curve::{ControlPoint, Curve},
        ease::Ease,
        param::Param,
    },
    foundation::{error::TinselResult, math::wrap01},
};

/// Remaps a pixel's angular coordinate before it is coloured.
///
/// A pattern lists its topologies in order; each one receives the angle
/// produced by the previous one.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Topology {
    #[default]
    Identity,
    /// Accordion fold: `count` back-and-forth sweeps around the circle.
    Mirror { count: Param },
    /// `count` plain repeats around the circle.
    Repeat { count: Param },
    /// Height is cut into `count` bands and band `k` is rotated by `k * turn`.
    Turnt { count: Param, turn: Param },
    /// Height-indexed S-warp: the angle is offset by `bottom_delta` around
    /// `mid / 2` and by `top_delta` around the middle of `[mid, 1]`.
    Distort {
        shape: Ease,
        top_delta: Param,
        bottom_delta: Param,
        mid: Param,
    },
}

impl Topology {
    pub fn mirror(count: impl Into<Param>) -> Self {
        Self::Mirror {
            count: count.into(),
        }
    }

    pub fn repeat(count: impl Into<Param>) -> Self {
        Self::Repeat {
            count: count.into(),
        }
    }

    pub fn turnt(count: impl Into<Param>, turn: impl Into<Param>) -> Self {
        Self::Turnt {
            count: count.into(),
            turn: turn.into(),
        }
    }

    pub fn distort(
        shape: Ease,
        top_delta: impl Into<Param>,
        bottom_delta: impl Into<Param>,
        mid: impl Into<Param>,
    ) -> Self {
        Self::Distort {
            shape,
            top_delta: top_delta.into(),
            bottom_delta: bottom_delta.into(),
            mid: mid.into(),
        }
    }

    pub fn apply(&self, t: f64, angle: f64, height: f64, rng: &mut dyn RngCore) -> f64 {
        match self {
            Self::Identity => angle,
            Self::Mirror { count } => {
                let r = (angle * count.at(t, rng)).rem_euclid(1.0) * 2.0;
                if r < 1.0 { r } else { 2.0 - r }
            }
            Self::Repeat { count } => wrap01(angle * count.at(t, rng)),
            Self::Turnt { count, turn } => {
                let band = (height * count.at(t, rng)).floor();
                wrap01(angle + band * turn.at(t, rng))
            }
            Self::Distort {
                shape,
                top_delta,
                bottom_delta,
                mid,
            } => {
                let top = top_delta.at(t, rng);
                let bottom = bottom_delta.at(t, rng);
                let mid = mid.at(t, rng).clamp(0.0, 1.0);
                let warp = Curve::from_sorted(
                    *shape,
                    vec![
                        ControlPoint::from((0.0, 0.0)),
                        ControlPoint::from((mid / 2.0, bottom)),
                        ControlPoint::from((mid, 0.0)),
                        ControlPoint::from((mid + (1.0 - mid) / 2.0, top)),
                        ControlPoint::from((1.0, 0.0)),
                    ],
                );
                wrap01(angle + warp.evaluate(height))
            }
        }
    }

    pub fn validate(&self) -> TinselResult<()> {
        match self {
            Self::Identity => Ok(()),
            Self::Mirror { count } | Self::Repeat { count } => count.validate(),
            Self::Turnt { count, turn } => {
                count.validate()?;
                turn.validate()
            }
            Self::Distort {
                top_delta,
                bottom_delta,
                mid,
                ..
            } => {
                top_delta.validate()?;
                bottom_delta.validate()?;
                mid.validate()
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shading/topology.rs"]
mod tests;
