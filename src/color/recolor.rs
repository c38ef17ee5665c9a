use rand::RngCore;

use crate::{
    animation::param::Param,
    color::color::Color,
    foundation::{
        error::{TinselError, TinselResult},
        math::uniform,
    },
};

/// Whether a recolor's hue is added to the incoming hue or replaces it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum HueMode {
    #[default]
    Shift,
    Replace,
}

/// Rewrites an existing colour, channel by channel.
///
/// A channel left as `None` passes through unchanged. With `make_white`, any
/// lit input collapses to [`Color::whitened`] and the channel overrides are
/// ignored; unlit input still goes through the overrides.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Recolor {
    pub white: Option<Param>,
    pub hue: Option<Param>,
    pub saturation: Option<Param>,
    pub lightness: Option<Param>,
    pub hue_mode: HueMode,
    pub make_white: bool,
}

impl Recolor {
    /// Leaves every channel alone.
    pub fn noop() -> Self {
        Self::default()
    }

    /// Forces the pure hue (lightness 0).
    pub fn base() -> Self {
        Self::noop().with_lightness(0.0)
    }

    pub fn base_whiten() -> Self {
        Self::base().whitening()
    }

    /// Turns the pixel off.
    pub fn blank() -> Self {
        Self::noop().with_white(0.0).with_lightness(-1.0)
    }

    /// Opposite hue at full colour.
    pub fn invert() -> Self {
        Self::noop().with_hue(0.5).with_lightness(0.0)
    }

    pub fn invert_whiten() -> Self {
        Self::invert().whitening()
    }

    /// Unconditionally produces the sparkle white.
    pub fn whiten() -> Self {
        Self::noop()
            .with_white(0.75)
            .with_saturation(0.0)
            .with_lightness(-0.75)
    }

    /// A fresh random hue at full colour every time it is applied.
    pub fn random_hue() -> Self {
        Self {
            white: Some(Param::Const(0.0)),
            hue: Some(Param::random(0.0, 1.0)),
            saturation: Some(Param::Const(1.0)),
            lightness: Some(Param::Const(0.0)),
            hue_mode: HueMode::Replace,
            make_white: false,
        }
    }

    pub fn with_white(mut self, p: impl Into<Param>) -> Self {
        self.white = Some(p.into());
        self
    }

    pub fn with_hue(mut self, p: impl Into<Param>) -> Self {
        self.hue = Some(p.into());
        self
    }

    pub fn with_saturation(mut self, p: impl Into<Param>) -> Self {
        self.saturation = Some(p.into());
        self
    }

    pub fn with_lightness(mut self, p: impl Into<Param>) -> Self {
        self.lightness = Some(p.into());
        self
    }

    pub fn replacing_hue(mut self) -> Self {
        self.hue_mode = HueMode::Replace;
        self
    }

    pub fn whitening(mut self) -> Self {
        self.make_white = true;
        self
    }

    pub fn apply(&self, color: Color, t: f64, rng: &mut dyn RngCore) -> Color {
        if self.make_white && !color.is_off() {
            return Color::whitened();
        }
        let mut read = |p: &Option<Param>, fallback: f64| match p {
            Some(p) => p.at(t, rng),
            None => fallback,
        };
        let white = read(&self.white, color.white());
        let hue = match self.hue_mode {
            HueMode::Shift => color.hue() + read(&self.hue, 0.0),
            HueMode::Replace => read(&self.hue, 0.0),
        };
        let saturation = read(&self.saturation, color.saturation());
        let lightness = read(&self.lightness, color.lightness());
        Color::new(white, hue, saturation, lightness)
    }

    pub fn validate(&self) -> TinselResult<()> {
        [&self.white, &self.hue, &self.saturation, &self.lightness]
            .into_iter()
            .flatten()
            .try_for_each(Param::validate)
    }
}

/// What a sparkling pixel turns into.
#[derive(Clone, Debug, PartialEq)]
pub enum SparkleFunc {
    Recolor(Recolor),
    /// Whiten the pixel only if it is currently off; lit pixels keep their colour.
    WhitenIfOff,
    /// Shift the hue by a fresh uniform draw in `[-range/2, range/2)`.
    RandomHue { range: f64 },
}

impl Default for SparkleFunc {
    fn default() -> Self {
        Self::Recolor(Recolor::whiten())
    }
}

impl From<Recolor> for SparkleFunc {
    fn from(r: Recolor) -> Self {
        Self::Recolor(r)
    }
}

impl SparkleFunc {
    pub fn apply(&self, color: Color, t: f64, rng: &mut dyn RngCore) -> Color {
        match self {
            Self::Recolor(r) => r.apply(color, t, rng),
            Self::WhitenIfOff => {
                if color.is_off() {
                    Color::whitened()
                } else {
                    color
                }
            }
            Self::RandomHue { range } => {
                let mut c = color;
                c.set_hue(color.hue() + uniform(rng, -range / 2.0, range / 2.0));
                c
            }
        }
    }

    pub fn validate(&self) -> TinselResult<()> {
        match self {
            Self::Recolor(r) => r.validate(),
            Self::WhitenIfOff => Ok(()),
            Self::RandomHue { range } => {
                if !range.is_finite() {
                    return Err(TinselError::validation("sparkle hue range must be finite"));
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/recolor.rs"]
mod tests;
