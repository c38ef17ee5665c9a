use rand::RngCore;

use crate::{
    animation::param::Param,
    color::{color::Color, recolor::SparkleFunc},
    foundation::{
        error::{TinselError, TinselResult},
        math::{uniform, wrap01},
    },
    shading::{
        base_color::{BaseColor, Effects, ShadeCtx},
        topology::Topology,
    },
    streamers::source::StreamerSource,
};

/// Time-varying knobs a control surface may adjust on a live pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ControlKey {
    Spread,
    Flash,
    Flicker,
    Flitter,
    Flux,
    Spiral,
    Spin,
    Sparkles,
}

impl ControlKey {
    pub const ALL: [ControlKey; 8] = [
        Self::Spread,
        Self::Flash,
        Self::Flicker,
        Self::Flitter,
        Self::Flux,
        Self::Spiral,
        Self::Spin,
        Self::Sparkles,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Spread => "spread",
            Self::Flash => "flash",
            Self::Flicker => "flicker",
            Self::Flitter => "flitter",
            Self::Flux => "flux",
            Self::Spiral => "spiral",
            Self::Spin => "spin",
            Self::Sparkles => "sparkles",
        }
    }
}

impl std::str::FromStr for ControlKey {
    type Err = TinselError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| TinselError::validation(format!("unknown control '{s}'")))
    }
}

/// A complete look: base colour strategy, angular topologies, modifier
/// params, sparkle recolor and streamer source.
///
/// Patterns are only mutated between frames through [`Pattern::set_param`].
#[derive(Clone, Debug, PartialEq)]
pub struct Pattern {
    name: String,
    base_color: BaseColor,
    topologies: Vec<Topology>,
    spread: Param,
    flash: Param,
    flicker: Param,
    flitter: Param,
    flux: Param,
    spiral: Param,
    spin: Param,
    sparkles: Param,
    sparkle_func: SparkleFunc,
    streamers: StreamerSource,
}

impl Pattern {
    pub fn builder(name: impl Into<String>) -> PatternBuilder {
        PatternBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_color(&self) -> &BaseColor {
        &self.base_color
    }

    pub fn topologies(&self) -> &[Topology] {
        &self.topologies
    }

    pub fn sparkle_func(&self) -> &SparkleFunc {
        &self.sparkle_func
    }

    pub fn streamers(&self) -> &StreamerSource {
        &self.streamers
    }

    pub fn param(&self, key: ControlKey) -> &Param {
        match key {
            ControlKey::Spread => &self.spread,
            ControlKey::Flash => &self.flash,
            ControlKey::Flicker => &self.flicker,
            ControlKey::Flitter => &self.flitter,
            ControlKey::Flux => &self.flux,
            ControlKey::Spiral => &self.spiral,
            ControlKey::Spin => &self.spin,
            ControlKey::Sparkles => &self.sparkles,
        }
    }

    pub fn set_param(&mut self, key: ControlKey, value: Param) -> TinselResult<()> {
        value.validate()?;
        let slot = match key {
            ControlKey::Spread => &mut self.spread,
            ControlKey::Flash => &mut self.flash,
            ControlKey::Flicker => &mut self.flicker,
            ControlKey::Flitter => &mut self.flitter,
            ControlKey::Flux => &mut self.flux,
            ControlKey::Spiral => &mut self.spiral,
            ControlKey::Spin => &mut self.spin,
            ControlKey::Sparkles => &mut self.sparkles,
        };
        *slot = value;
        Ok(())
    }

    /// Sparkle chance at `t`, clamped to `[0, 1]`.
    pub fn sparkle_chance(&self, t: f64, rng: &mut dyn RngCore) -> f64 {
        let c = self.sparkles.at(t, rng);
        if c.is_nan() { 0.0 } else { c.clamp(0.0, 1.0) }
    }

    pub fn validate(&self) -> TinselResult<()> {
        if self.name.trim().is_empty() {
            return Err(TinselError::validation("pattern name must not be empty"));
        }
        let with_name = |e: TinselError| match e {
            TinselError::Validation(msg) => {
                TinselError::validation(format!("pattern '{}': {msg}", self.name))
            }
            other => other,
        };
        self.base_color.validate().map_err(with_name)?;
        self.topologies
            .iter()
            .try_for_each(Topology::validate)
            .map_err(with_name)?;
        ControlKey::ALL
            .into_iter()
            .try_for_each(|k| self.param(k).validate())
            .map_err(with_name)?;
        self.sparkle_func.validate().map_err(with_name)?;
        self.streamers.validate().map_err(with_name)
    }

    /// Base colour plus flash, flicker, flitter and flux for one pixel at
    /// pattern-local time `t`. Returns the effects the base colour opted out
    /// of so the caller can skip sparkles and streamers too.
    pub fn shade(
        &self,
        t: f64,
        blend_hue: f64,
        anchor_hue: f64,
        base_angle: f64,
        height: f64,
        rng: &mut dyn RngCore,
    ) -> (Color, Effects) {
        let mut angle =
            wrap01(base_angle + self.spin.at(t, rng) + self.spiral.at(t, rng) * height);
        for topology in &self.topologies {
            angle = topology.apply(t, angle, height, rng);
        }

        let ctx = ShadeCtx {
            t,
            blend_hue,
            spread: self.spread.at(t, rng),
            anchor_hue,
            angle,
            height,
        };
        let (mut color, suppress) = self.base_color.evaluate(&ctx, rng);

        if !suppress.contains(Effects::FLASH) && !color.is_off() {
            let v = self.flash.at(t, rng);
            color.set_lightness(color.lightness() - uniform(rng, 0.0, v));
        }
        if !suppress.contains(Effects::FLICKER) {
            let v = self.flicker.at(t, rng);
            color.set_white(color.white() + uniform(rng, 0.0, v));
        }
        if !suppress.contains(Effects::FLITTER) && color.saturation() != 0.0 {
            let v = self.flitter.at(t, rng);
            color.set_saturation(color.saturation() - uniform(rng, 0.0, v));
        }
        if !suppress.contains(Effects::FLUX) {
            let v = self.flux.at(t, rng);
            color.set_hue(color.hue() + uniform(rng, -v / 2.0, v / 2.0));
        }
        (color, suppress)
    }
}

/// Assembles a [`Pattern`]; every param defaults to `0`, the base colour to
/// an unlit plain colour, the sparkle recolor to whiten, and there are no
/// topologies or streamers.
#[derive(Clone, Debug)]
pub struct PatternBuilder {
    pattern: Pattern,
}

impl PatternBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            pattern: Pattern {
                name: name.into(),
                base_color: BaseColor::default(),
                topologies: Vec::new(),
                spread: Param::default(),
                flash: Param::default(),
                flicker: Param::default(),
                flitter: Param::default(),
                flux: Param::default(),
                spiral: Param::default(),
                spin: Param::default(),
                sparkles: Param::default(),
                sparkle_func: SparkleFunc::default(),
                streamers: StreamerSource::None,
            },
        }
    }

    pub fn base_color(mut self, base_color: impl Into<BaseColor>) -> Self {
        self.pattern.base_color = base_color.into();
        self
    }

    pub fn topology(mut self, topology: Topology) -> Self {
        self.pattern.topologies.push(topology);
        self
    }

    pub fn topologies(mut self, topologies: impl IntoIterator<Item = Topology>) -> Self {
        self.pattern.topologies.extend(topologies);
        self
    }

    /// Set any of the [`ControlKey`] params.
    pub fn param(mut self, key: ControlKey, value: impl Into<Param>) -> Self {
        let value = value.into();
        match key {
            ControlKey::Spread => self.pattern.spread = value,
            ControlKey::Flash => self.pattern.flash = value,
            ControlKey::Flicker => self.pattern.flicker = value,
            ControlKey::Flitter => self.pattern.flitter = value,
            ControlKey::Flux => self.pattern.flux = value,
            ControlKey::Spiral => self.pattern.spiral = value,
            ControlKey::Spin => self.pattern.spin = value,
            ControlKey::Sparkles => self.pattern.sparkles = value,
        }
        self
    }

    pub fn spread(self, value: impl Into<Param>) -> Self {
        self.param(ControlKey::Spread, value)
    }

    pub fn flash(self, value: impl Into<Param>) -> Self {
        self.param(ControlKey::Flash, value)
    }

    pub fn flicker(self, value: impl Into<Param>) -> Self {
        self.param(ControlKey::Flicker, value)
    }

    pub fn flitter(self, value: impl Into<Param>) -> Self {
        self.param(ControlKey::Flitter, value)
    }

    pub fn flux(self, value: impl Into<Param>) -> Self {
        self.param(ControlKey::Flux, value)
    }

    pub fn spiral(self, value: impl Into<Param>) -> Self {
        self.param(ControlKey::Spiral, value)
    }

    pub fn spin(self, value: impl Into<Param>) -> Self {
        self.param(ControlKey::Spin, value)
    }

    pub fn sparkles(self, value: impl Into<Param>) -> Self {
        self.param(ControlKey::Sparkles, value)
    }

    pub fn sparkle_func(mut self, func: impl Into<SparkleFunc>) -> Self {
        self.pattern.sparkle_func = func.into();
        self
    }

    pub fn streamers(mut self, source: StreamerSource) -> Self {
        self.pattern.streamers = source;
        self
    }

    pub fn build(self) -> TinselResult<Pattern> {
        self.pattern.validate()?;
        Ok(self.pattern)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pattern/pattern.rs"]
mod tests;
