use rand::{Rng as _, RngCore};

use crate::{
    animation::param::Param,
    color::{
        color::Color,
        recolor::{HueMode, Recolor},
    },
    foundation::{
        error::{TinselError, TinselResult},
        math::{uniform, wrap01},
    },
    streamers::source::StreamerSpec,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    #[default]
    FromBottom,
    FromTop,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Spin {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl Spin {
    pub fn sign(self) -> f64 {
        match self {
            Self::Clockwise => -1.0,
            Self::CounterClockwise => 1.0,
        }
    }
}

/// How a streamer recolours the pixels it covers.
#[derive(Clone, Debug, PartialEq)]
pub enum StreamerFunc {
    Recolor(Recolor),
    /// A hue drawn once from `[min, max)` when the streamer spawns and held
    /// for its whole life.
    RandomHue {
        min: Param,
        max: Param,
        white: Option<Param>,
        saturation: Option<Param>,
        lightness: Option<Param>,
    },
}

impl Default for StreamerFunc {
    fn default() -> Self {
        Self::Recolor(Recolor::whiten())
    }
}

impl From<Recolor> for StreamerFunc {
    fn from(r: Recolor) -> Self {
        Self::Recolor(r)
    }
}

impl StreamerFunc {
    pub fn random_hue(min: impl Into<Param>, max: impl Into<Param>) -> Self {
        Self::RandomHue {
            min: min.into(),
            max: max.into(),
            white: None,
            saturation: None,
            lightness: None,
        }
    }

    /// Fix everything that must stay constant for one streamer's lifetime.
    pub fn resolve(&self, t: f64, rng: &mut dyn RngCore) -> StreamerPaint {
        match self {
            Self::Recolor(r) => StreamerPaint(r.clone()),
            Self::RandomHue {
                min,
                max,
                white,
                saturation,
                lightness,
            } => {
                let lo = min.at(t, rng);
                let hi = max.at(t, rng);
                StreamerPaint(Recolor {
                    white: white.clone(),
                    hue: Some(Param::Const(uniform(rng, lo, hi))),
                    saturation: saturation.clone(),
                    lightness: lightness.clone(),
                    hue_mode: HueMode::Replace,
                    make_white: false,
                })
            }
        }
    }

    pub fn validate(&self) -> TinselResult<()> {
        match self {
            Self::Recolor(r) => r.validate(),
            Self::RandomHue {
                min,
                max,
                white,
                saturation,
                lightness,
            } => {
                min.validate()?;
                max.validate()?;
                [white, saturation, lightness]
                    .into_iter()
                    .flatten()
                    .try_for_each(Param::validate)
            }
        }
    }
}

/// A [`StreamerFunc`] with its per-streamer randomness already drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct StreamerPaint(Recolor);

impl StreamerPaint {
    pub fn apply(&self, color: Color, t: f64, rng: &mut dyn RngCore) -> Color {
        self.0.apply(color, t, rng)
    }

    pub fn recolor(&self) -> &Recolor {
        &self.0
    }
}

/// A band of recoloured pixels sweeping up or down the display.
///
/// Everything is fixed at spawn; only the evaluation time moves.
#[derive(Clone, Debug, PartialEq)]
pub struct Streamer {
    spawn_time: f64,
    direction: Direction,
    angle: f64,
    spin: f64,
    length: f64,
    width: f64,
    lifetime: f64,
    paint: StreamerPaint,
}

impl Streamer {
    /// Instantiate `spec` at absolute time `now`. Params are read at the
    /// pattern-local time `local_t`.
    pub fn spawn(spec: &StreamerSpec, local_t: f64, now: f64, rng: &mut dyn RngCore) -> Self {
        let angle = match &spec.angle {
            Some(a) => wrap01(a.at(local_t, rng)),
            None => rng.random::<f64>(),
        };
        Self {
            spawn_time: now,
            direction: spec.move_dir,
            angle,
            spin: spec.spin_dir.sign() * spec.spin.at(local_t, rng),
            length: spec.length.at(local_t, rng).max(0.0),
            width: spec.width.at(local_t, rng).max(0.0),
            lifetime: spec.lifetime.at(local_t, rng),
            paint: spec.func.resolve(local_t, rng),
        }
    }

    /// Build a streamer from already-sampled values.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        spawn_time: f64,
        direction: Direction,
        angle: f64,
        spin: f64,
        length: f64,
        width: f64,
        lifetime: f64,
        paint: StreamerPaint,
    ) -> TinselResult<Self> {
        if [spawn_time, angle, spin, length, width, lifetime]
            .iter()
            .any(|v| !v.is_finite())
        {
            return Err(TinselError::validation("streamer values must be finite"));
        }
        if length < 0.0 || width < 0.0 {
            return Err(TinselError::validation(
                "streamer length and width must be >= 0",
            ));
        }
        Ok(Self {
            spawn_time,
            direction,
            angle: wrap01(angle),
            spin,
            length,
            width,
            lifetime,
            paint,
        })
    }

    pub fn spawn_time(&self) -> f64 {
        self.spawn_time
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Signed angular rate per unit height.
    pub fn spin(&self) -> f64 {
        self.spin
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn lifetime(&self) -> f64 {
        self.lifetime
    }

    pub fn paint(&self) -> &StreamerPaint {
        &self.paint
    }

    pub fn alive(&self, t: f64) -> bool {
        t < self.spawn_time + self.lifetime
    }

    /// Bottom edge of the band. Travels from `-length` to `1` (from the
    /// bottom) or from `1` to `-length` (from the top) over the lifetime.
    pub fn y(&self, t: f64) -> f64 {
        let u = if self.lifetime > 0.0 {
            (t - self.spawn_time) / self.lifetime
        } else {
            1.0
        };
        let span = 1.0 + self.length;
        match self.direction {
            Direction::FromBottom => -self.length + span * u,
            Direction::FromTop => 1.0 - span * u,
        }
    }

    pub fn contains(&self, t: f64, angle: f64, height: f64) -> bool {
        if !self.alive(t) {
            return false;
        }
        let low = self.y(t);
        if height < low || height > low + self.length {
            return false;
        }
        if self.width >= 1.0 {
            return true;
        }
        let start = wrap01(height * self.spin + self.angle);
        let end = start + self.width;
        if end > 1.0 {
            angle >= start || angle < end - 1.0
        } else {
            angle >= start && angle < end
        }
    }

    pub fn apply(&self, color: Color, t: f64, rng: &mut dyn RngCore) -> Color {
        self.paint.apply(color, t, rng)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/streamers/streamer.rs"]
mod tests;
