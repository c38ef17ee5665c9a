use rand::RngCore;

use crate::{
    animation::{curve::Curve, ease::Ease, param::Param},
    color::color::Color,
    foundation::error::{TinselError, TinselResult},
};

bitflags::bitflags! {
    /// Post-processing stages a base colour can opt out of.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
    pub struct Effects: u8 {
        const FLASH = 1 << 0;
        const FLICKER = 1 << 1;
        const FLITTER = 1 << 2;
        const FLUX = 1 << 3;
        const SPARKLES = 1 << 4;
        const STREAMERS = 1 << 5;
    }
}

/// Per-pixel inputs to a base colour strategy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadeCtx {
    /// Pattern-local time.
    pub t: f64,
    /// Global slow hue rotation shared by every pattern.
    pub blend_hue: f64,
    /// The pattern's `spread` at `t`.
    pub spread: f64,
    /// Hue captured when the pattern was scheduled; anchors `Falling`.
    pub anchor_hue: f64,
    /// Pixel angle after spin, spiral and topologies.
    pub angle: f64,
    pub height: f64,
}

/// Computes a pixel's nominal colour before modifiers.
#[derive(Clone, Debug, PartialEq)]
pub enum BaseColor {
    Plain(PlainColor),
    /// Two-sided sliding door: `side = floor(angle + ratio) mod 2`.
    Window {
        ratio: Param,
        sides: Option<StrategyList>,
        suppress: Effects,
    },
    /// `count` angular wedges: `side = floor(angle * count)`.
    Split {
        count: Param,
        slots: Option<StrategyList>,
        suppress: Effects,
    },
    Falling(FallingColor),
}

impl Default for BaseColor {
    fn default() -> Self {
        Self::Plain(PlainColor::default())
    }
}

impl From<PlainColor> for BaseColor {
    fn from(p: PlainColor) -> Self {
        Self::Plain(p)
    }
}

impl From<FallingColor> for BaseColor {
    fn from(f: FallingColor) -> Self {
        Self::Falling(f)
    }
}

impl BaseColor {
    /// Fully lit hue; `blend_hue` and `spread` still apply.
    pub fn lit(hue: impl Into<Param>) -> Self {
        PlainColor::default().with_hue(hue).with_lightness(0.0).into()
    }

    pub fn window(ratio: impl Into<Param>, sides: Option<StrategyList>) -> Self {
        Self::Window {
            ratio: ratio.into(),
            sides,
            suppress: Effects::empty(),
        }
    }

    pub fn split(count: impl Into<Param>, slots: Option<StrategyList>) -> Self {
        Self::Split {
            count: count.into(),
            slots,
            suppress: Effects::empty(),
        }
    }

    pub fn evaluate(&self, ctx: &ShadeCtx, rng: &mut dyn RngCore) -> (Color, Effects) {
        match self {
            Self::Plain(p) => p.evaluate(ctx, rng),
            Self::Window {
                ratio,
                sides,
                suppress,
            } => {
                let r = ratio.at(ctx.t, rng);
                let side = (ctx.angle + r).floor().rem_euclid(2.0) as usize;
                let iteration = ratio
                    .period()
                    .map(|p| (ctx.t / p).floor())
                    .unwrap_or(0.0);
                match sides.as_ref().and_then(|s| s.pick(ctx.t, side)) {
                    Some(sub) => sub.evaluate(ctx, rng),
                    None => (
                        fallback(ctx, side as f64 + iteration),
                        *suppress,
                    ),
                }
            }
            Self::Split {
                count,
                slots,
                suppress,
            } => {
                let n = count.at(ctx.t, rng);
                // an angle of exactly 1 (a mirror fold) lands past the last wedge
                let side = (ctx.angle * n).floor().max(0.0) as usize;
                match slots.as_ref().and_then(|s| s.pick(ctx.t, side)) {
                    Some(sub) => sub.evaluate(ctx, rng),
                    None => (fallback(ctx, side as f64), *suppress),
                }
            }
            Self::Falling(f) => f.evaluate(ctx, rng),
        }
    }

    pub fn validate(&self) -> TinselResult<()> {
        match self {
            Self::Plain(p) => p.validate(),
            Self::Window { ratio, sides, .. } => {
                ratio.validate()?;
                if let Some(sides) = sides {
                    sides.validate_each(|list| {
                        if list.len() != 2 {
                            return Err(TinselError::validation(format!(
                                "window needs exactly 2 sides, got {}",
                                list.len()
                            )));
                        }
                        Ok(())
                    })?;
                }
                Ok(())
            }
            Self::Split { count, slots, .. } => {
                count.validate()?;
                if let Some(n) = count.as_const()
                    && !(n > 0.0)
                {
                    return Err(TinselError::validation(format!(
                        "split count must be > 0, got {n}"
                    )));
                }
                if let (Some(slots), Some(max)) = (slots, upper_bound(count)) {
                    let needed = max.ceil().max(0.0) as usize;
                    slots.validate_each(|list| {
                        if list.len() < needed {
                            return Err(TinselError::validation(format!(
                                "split over {max} wedges only defines {} of them",
                                list.len()
                            )));
                        }
                        Ok(())
                    })?;
                }
                Ok(())
            }
            Self::Falling(f) => f.validate(),
        }
    }
}

fn fallback(ctx: &ShadeCtx, steps: f64) -> Color {
    Color::new(0.0, ctx.blend_hue + steps * ctx.spread, 1.0, 0.0)
}

/// Largest value a param can take, when that can be known up front.
fn upper_bound(p: &Param) -> Option<f64> {
    let values: Vec<f64> = match p {
        Param::Const(v) => vec![*v],
        Param::Curve(c) => c.points().iter().map(|p| p.value).collect(),
        Param::Chain(ch) => ch
            .curves()
            .iter()
            .flat_map(|c| c.points())
            .map(|p| p.value)
            .collect(),
        Param::Choice(vs) => vs.clone(),
        Param::Random { .. } | Param::Cycle { .. } => return None,
    };
    values.into_iter().reduce(f64::max)
}

/// Sub-strategies for `Window` sides or `Split` wedges. `None` entries fall
/// back to the parent's default colour.
#[derive(Clone, Debug, PartialEq)]
pub enum StrategyList {
    Fixed(Vec<Option<BaseColor>>),
    /// `choices[floor(t / interval) mod n]`
    Periodic {
        interval: f64,
        choices: Vec<Vec<Option<BaseColor>>>,
    },
}

impl StrategyList {
    pub fn at(&self, t: f64) -> &[Option<BaseColor>] {
        match self {
            Self::Fixed(list) => list,
            Self::Periodic { interval, choices } => {
                if choices.is_empty() {
                    return &[];
                }
                let i = (t / interval).floor().rem_euclid(choices.len() as f64) as usize;
                &choices[i.min(choices.len() - 1)]
            }
        }
    }

    fn pick(&self, t: f64, index: usize) -> Option<&BaseColor> {
        self.at(t).get(index).and_then(Option::as_ref)
    }

    fn validate_each(
        &self,
        check: impl Fn(&[Option<BaseColor>]) -> TinselResult<()>,
    ) -> TinselResult<()> {
        let lists: Vec<&[Option<BaseColor>]> = match self {
            Self::Fixed(list) => vec![list.as_slice()],
            Self::Periodic { interval, choices } => {
                if !(*interval > 0.0) {
                    return Err(TinselError::validation(
                        "periodic strategy interval must be > 0",
                    ));
                }
                if choices.is_empty() {
                    return Err(TinselError::validation(
                        "periodic strategy list needs at least one choice",
                    ));
                }
                choices.iter().map(Vec::as_slice).collect()
            }
        };
        for list in lists {
            check(list)?;
            list.iter().flatten().try_for_each(BaseColor::validate)?;
        }
        Ok(())
    }
}

/// `Color(white, hue + blend_hue + spread * angle, saturation, lightness)`,
/// with the blend and spread terms individually switchable.
#[derive(Clone, Debug, PartialEq)]
pub struct PlainColor {
    pub white: Param,
    pub hue: Param,
    pub saturation: Param,
    pub lightness: Param,
    pub blend: bool,
    pub spread: bool,
    pub suppress: Effects,
}

impl Default for PlainColor {
    fn default() -> Self {
        Self {
            white: Param::Const(0.0),
            hue: Param::Const(0.0),
            saturation: Param::Const(1.0),
            lightness: Param::Const(-1.0),
            blend: true,
            spread: true,
            suppress: Effects::empty(),
        }
    }
}

impl PlainColor {
    pub fn with_white(mut self, p: impl Into<Param>) -> Self {
        self.white = p.into();
        self
    }

    pub fn with_hue(mut self, p: impl Into<Param>) -> Self {
        self.hue = p.into();
        self
    }

    pub fn with_saturation(mut self, p: impl Into<Param>) -> Self {
        self.saturation = p.into();
        self
    }

    pub fn with_lightness(mut self, p: impl Into<Param>) -> Self {
        self.lightness = p.into();
        self
    }

    pub fn without_blend(mut self) -> Self {
        self.blend = false;
        self
    }

    pub fn without_spread(mut self) -> Self {
        self.spread = false;
        self
    }

    pub fn suppressing(mut self, effects: Effects) -> Self {
        self.suppress |= effects;
        self
    }

    fn evaluate(&self, ctx: &ShadeCtx, rng: &mut dyn RngCore) -> (Color, Effects) {
        let mut hue = self.hue.at(ctx.t, rng);
        if self.blend {
            hue += ctx.blend_hue;
        }
        if self.spread {
            hue += ctx.spread * ctx.angle;
        }
        let color = Color::new(
            self.white.at(ctx.t, rng),
            hue,
            self.saturation.at(ctx.t, rng),
            self.lightness.at(ctx.t, rng),
        );
        (color, self.suppress)
    }

    fn validate(&self) -> TinselResult<()> {
        self.white.validate()?;
        self.hue.validate()?;
        self.saturation.validate()?;
        self.lightness.validate()
    }
}

/// Discrete hue bands scrolling down the display.
///
/// The scroll completes `num_colors` bands every `period` seconds. Band `k`
/// gets hue `anchor + ((k * skip_colors) mod num_colors) / num_colors`, plus
/// `hue(s)` where `s` is the phase within the period; `fade` maps the
/// position inside a band to lightness and is sharpened by `(l + 1)^2 - 1`.
#[derive(Clone, Debug, PartialEq)]
pub struct FallingColor {
    pub num_colors: u32,
    pub skip_colors: u32,
    pub offset: f64,
    pub period: f64,
    pub fade: Curve,
    pub hue: Param,
    pub suppress: Effects,
}

impl Default for FallingColor {
    fn default() -> Self {
        Self::new(8, 3)
    }
}

impl FallingColor {
    pub fn new(num_colors: u32, skip_colors: u32) -> Self {
        Self {
            num_colors,
            skip_colors,
            offset: 0.0,
            period: 60.0,
            fade: default_fade(),
            hue: Param::Const(0.0),
            suppress: Effects::empty(),
        }
    }

    pub fn with_fade(mut self, fade: Curve) -> Self {
        self.fade = fade;
        self
    }

    pub fn with_hue(mut self, hue: impl Into<Param>) -> Self {
        self.hue = hue.into();
        self
    }

    fn evaluate(&self, ctx: &ShadeCtx, rng: &mut dyn RngCore) -> (Color, Effects) {
        let num = f64::from(self.num_colors.max(1));
        let s = (ctx.t + self.offset).rem_euclid(self.period);
        let local = ctx.height + s / self.period * num;
        let band = (local.floor() * f64::from(self.skip_colors)).rem_euclid(num);
        let hue = ctx.anchor_hue + band / num + self.hue.at(s, rng);
        let fade = self.fade.evaluate(local);
        let lightness = (fade + 1.0).powi(2) - 1.0;
        (Color::new(0.0, hue, 1.0, lightness), self.suppress)
    }

    fn validate(&self) -> TinselResult<()> {
        if self.num_colors == 0 {
            return Err(TinselError::validation("falling colour needs at least one band"));
        }
        if !(self.period > 0.0) || !self.period.is_finite() {
            return Err(TinselError::validation("falling period must be > 0"));
        }
        if !self.offset.is_finite() {
            return Err(TinselError::validation("falling offset must be finite"));
        }
        self.hue.validate()
    }
}

/// Dark at band edges, bright in the middle.
fn default_fade() -> Curve {
    Curve::from_sorted(
        Ease::InOutCubic,
        vec![(0.0, -1.0).into(), (0.5, 0.0).into(), (1.0, -1.0).into()],
    )
}

#[cfg(test)]
#[path = "../../tests/unit/shading/base_color.rs"]
mod tests;
