use crate::{
    animation::ease::Ease,
    foundation::math::{lerp, wrap01},
};

/// How a hue maps onto the LED's RGB primaries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ColorStyle {
    /// Plain hue wheel: primaries at 0, 1/3, 2/3 with linear ramps between.
    Linear,
    /// Eight evenly spaced anchor colours, which reads better on LEDs where
    /// the plain wheel spends too much of the circle on green and blue.
    #[default]
    EightColor,
}

const EIGHT_COLORS: [[f64; 3]; 8] = [
    [1.0, 0.0, 0.0],
    [1.0, 0.45, 0.0],
    [1.0, 1.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 1.0, 1.0],
    [0.0, 0.0, 1.0],
    [0.5, 0.0, 1.0],
    [1.0, 0.0, 0.6],
];

impl ColorStyle {
    fn hue_rgb(self, hue: f64) -> [f64; 3] {
        match self {
            Self::Linear => {
                let h6 = hue * 6.0;
                [
                    ((h6 - 3.0).abs() - 1.0).clamp(0.0, 1.0),
                    (2.0 - (h6 - 2.0).abs()).clamp(0.0, 1.0),
                    (2.0 - (h6 - 4.0).abs()).clamp(0.0, 1.0),
                ]
            }
            Self::EightColor => {
                let pos = hue * EIGHT_COLORS.len() as f64;
                let i = (pos.floor() as usize) % EIGHT_COLORS.len();
                let j = (i + 1) % EIGHT_COLORS.len();
                let f = pos - pos.floor();
                let (a, b) = (EIGHT_COLORS[i], EIGHT_COLORS[j]);
                [lerp(a[0], b[0], f), lerp(a[1], b[1], f), lerp(a[2], b[2], f)]
            }
        }
    }
}

/// Four-channel LED colour: a dedicated white channel plus hue, saturation and
/// lightness.
///
/// Every write clamps: `white` and `saturation` to `[0, 1]`, `lightness` to
/// `[-1, 1]`, and `hue` wraps into `[0, 1)`. Lightness `-1` means the pixel is
/// off, `0` is the pure hue and `1` is fully washed to white.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Color {
    white: f64,
    hue: f64,
    saturation: f64,
    lightness: f64,
}

impl Default for Color {
    fn default() -> Self {
        Self::OFF
    }
}

impl Color {
    pub const OFF: Color = Color {
        white: 0.0,
        hue: 0.0,
        saturation: 1.0,
        lightness: -1.0,
    };

    pub fn new(white: f64, hue: f64, saturation: f64, lightness: f64) -> Self {
        let mut c = Self::OFF;
        c.set_white(white);
        c.set_hue(hue);
        c.set_saturation(saturation);
        c.set_lightness(lightness);
        c
    }

    /// Fully saturated hue at the given lightness with the white channel off.
    pub fn hue_at(hue: f64, lightness: f64) -> Self {
        Self::new(0.0, hue, 1.0, lightness)
    }

    /// The shared "sparkle white": white channel up, RGB dimmed and desaturated.
    pub fn whitened() -> Self {
        Self::new(0.75, 0.0, 0.0, -0.75)
    }

    pub fn white(&self) -> f64 {
        self.white
    }

    pub fn hue(&self) -> f64 {
        self.hue
    }

    pub fn saturation(&self) -> f64 {
        self.saturation
    }

    pub fn lightness(&self) -> f64 {
        self.lightness
    }

    pub fn set_white(&mut self, v: f64) {
        self.white = clamp_or(v, 0.0, 1.0, 0.0);
    }

    pub fn set_hue(&mut self, v: f64) {
        self.hue = if v.is_finite() { wrap01(v) } else { 0.0 };
    }

    pub fn set_saturation(&mut self, v: f64) {
        self.saturation = clamp_or(v, 0.0, 1.0, 1.0);
    }

    pub fn set_lightness(&mut self, v: f64) {
        self.lightness = clamp_or(v, -1.0, 1.0, -1.0);
    }

    pub fn reset(&mut self) {
        *self = Self::OFF;
    }

    pub fn is_off(&self) -> bool {
        self.lightness == -1.0
    }

    /// Channel-wise interpolation from `a` to `b`, with `x` shaped by `ease`.
    ///
    /// Hue is interpolated as a plain number, not around the circle.
    pub fn lerp_eased(a: &Color, b: &Color, x: f64, ease: Ease) -> Color {
        let e = ease.apply(x);
        Color::new(
            lerp(a.white, b.white, e),
            lerp(a.hue, b.hue, e),
            lerp(a.saturation, b.saturation, e),
            lerp(a.lightness, b.lightness, e),
        )
    }

    pub fn to_rgb(&self, style: ColorStyle) -> [u8; 3] {
        let base = style.hue_rgb(self.hue);
        let l = self.lightness;
        base.map(|c| {
            let c = c * self.saturation + (1.0 - self.saturation);
            let c = if l < 0.0 { c * (1.0 + l) } else { c + (1.0 - c) * l };
            to_u8(c)
        })
    }

    /// White byte followed by RGB, the order the strand controllers expect.
    pub fn to_wrgb(&self, style: ColorStyle) -> [u8; 4] {
        let [r, g, b] = self.to_rgb(style);
        [to_u8(self.white), r, g, b]
    }
}

fn clamp_or(v: f64, lo: f64, hi: f64, nan: f64) -> f64 {
    if v.is_nan() { nan } else { v.clamp(lo, hi) }
}

fn to_u8(c: f64) -> u8 {
    (c * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/color/color.rs"]
mod tests;
