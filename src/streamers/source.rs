use rand::{RngCore, seq::IndexedRandom as _};

use crate::{
    animation::param::{Param, random_index},
    foundation::error::{TinselError, TinselResult},
    streamers::streamer::{Direction, Spin, StreamerFunc},
};

/// Describes one streamer to spawn. Params are sampled once, at spawn.
#[derive(Clone, Debug, PartialEq)]
pub struct StreamerSpec {
    pub move_dir: Direction,
    pub spin_dir: Spin,
    /// Starting angle; `None` picks a uniform random one.
    pub angle: Option<Param>,
    pub spin: Param,
    pub length: Param,
    pub width: Param,
    pub lifetime: Param,
    pub func: StreamerFunc,
}

impl Default for StreamerSpec {
    fn default() -> Self {
        Self {
            move_dir: Direction::FromBottom,
            spin_dir: Spin::Clockwise,
            angle: None,
            spin: Param::Const(1.0),
            length: Param::Const(1.0),
            width: Param::Const(0.1),
            lifetime: Param::Const(6.0),
            func: StreamerFunc::default(),
        }
    }
}

impl StreamerSpec {
    pub fn new(move_dir: Direction, spin_dir: Spin) -> Self {
        Self {
            move_dir,
            spin_dir,
            ..Self::default()
        }
    }

    pub fn with_angle(mut self, p: impl Into<Param>) -> Self {
        self.angle = Some(p.into());
        self
    }

    pub fn with_spin(mut self, p: impl Into<Param>) -> Self {
        self.spin = p.into();
        self
    }

    pub fn with_length(mut self, p: impl Into<Param>) -> Self {
        self.length = p.into();
        self
    }

    pub fn with_width(mut self, p: impl Into<Param>) -> Self {
        self.width = p.into();
        self
    }

    pub fn with_lifetime(mut self, p: impl Into<Param>) -> Self {
        self.lifetime = p.into();
        self
    }

    pub fn with_func(mut self, func: impl Into<StreamerFunc>) -> Self {
        self.func = func.into();
        self
    }

    pub fn validate(&self) -> TinselResult<()> {
        if let Some(a) = &self.angle {
            a.validate()?;
        }
        self.spin.validate()?;
        self.length.validate()?;
        self.width.validate()?;
        self.lifetime.validate()?;
        self.func.validate()
    }
}

/// Produces the batch of streamers to spawn on each streamer tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum StreamerSource {
    #[default]
    None,
    /// The same batch on every tick.
    Every(Vec<StreamerSpec>),
    /// Rotates through `choices`, emitting one group every `delay` seconds.
    ///
    /// With `s = floor(t + delay_offset) mod (n * delay)`, a tick emits only
    /// when `s mod delay == 0`, and then emits `choices[floor(s / delay) mod n]`.
    /// With `choose = Some((lo, hi))` it instead emits between `lo` and `hi`
    /// specs drawn with replacement from that group.
    Choices {
        delay: f64,
        choices: Vec<Vec<StreamerSpec>>,
        choose: Option<(usize, usize)>,
        delay_offset: f64,
    },
    /// Concatenation of several sources.
    Combined(Vec<StreamerSource>),
}

impl StreamerSource {
    pub fn choices(delay: f64, choices: Vec<Vec<StreamerSpec>>) -> Self {
        Self::Choices {
            delay,
            choices,
            choose: None,
            delay_offset: 0.0,
        }
    }

    pub fn choosing(self, lo: usize, hi: usize) -> Self {
        match self {
            Self::Choices {
                delay,
                choices,
                delay_offset,
                ..
            } => Self::Choices {
                delay,
                choices,
                choose: Some((lo, hi)),
                delay_offset,
            },
            other => other,
        }
    }

    pub fn offset_by(self, offset: f64) -> Self {
        match self {
            Self::Choices {
                delay,
                choices,
                choose,
                ..
            } => Self::Choices {
                delay,
                choices,
                choose,
                delay_offset: offset,
            },
            other => other,
        }
    }

    /// Specs to spawn for a tick at pattern-local time `t`.
    pub fn specs_at(&self, t: f64, rng: &mut dyn RngCore) -> Vec<&StreamerSpec> {
        let mut out = Vec::new();
        self.collect_into(t, rng, &mut out);
        out
    }

    fn collect_into<'a>(&'a self, t: f64, rng: &mut dyn RngCore, out: &mut Vec<&'a StreamerSpec>) {
        match self {
            Self::None => {}
            Self::Every(specs) => out.extend(specs.iter()),
            Self::Choices {
                delay,
                choices,
                choose,
                delay_offset,
            } => {
                if choices.is_empty() {
                    return;
                }
                let n = choices.len() as f64;
                let s = (t + delay_offset).floor().rem_euclid(n * delay);
                if s.rem_euclid(*delay) != 0.0 {
                    return;
                }
                let i = ((s / delay).floor().rem_euclid(n) as usize).min(choices.len() - 1);
                let group = &choices[i];
                match choose {
                    None => out.extend(group.iter()),
                    Some((lo, hi)) => {
                        let k = random_index(rng, *lo, *hi);
                        for _ in 0..k {
                            if let Some(spec) = group.choose(rng) {
                                out.push(spec);
                            }
                        }
                    }
                }
            }
            Self::Combined(sources) => {
                for source in sources {
                    source.collect_into(t, rng, out);
                }
            }
        }
    }

    pub fn validate(&self) -> TinselResult<()> {
        match self {
            Self::None => Ok(()),
            Self::Every(specs) => specs.iter().try_for_each(StreamerSpec::validate),
            Self::Choices {
                delay,
                choices,
                choose,
                delay_offset,
            } => {
                if !(*delay > 0.0) || !delay.is_finite() {
                    return Err(TinselError::validation("streamer delay must be > 0"));
                }
                if !delay_offset.is_finite() {
                    return Err(TinselError::validation("streamer delay offset must be finite"));
                }
                if choices.is_empty() {
                    return Err(TinselError::validation(
                        "streamer choices need at least one group",
                    ));
                }
                if let Some((lo, hi)) = choose
                    && lo > hi
                {
                    return Err(TinselError::validation(format!(
                        "streamer choose range is inverted: ({lo}, {hi})"
                    )));
                }
                choices
                    .iter()
                    .flatten()
                    .try_for_each(StreamerSpec::validate)
            }
            Self::Combined(sources) => sources.iter().try_for_each(StreamerSource::validate),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/streamers/source.rs"]
mod tests;
