use std::{f64::consts::PI, path::Path};

use anyhow::Context as _;

use crate::foundation::{
    error::{TinselError, TinselResult},
    math::wrap01,
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LedPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Strand {
    pub leds: Vec<LedPosition>,
}

/// Physical positions of every LED, grouped by strand in wire order.
///
/// `y` is the vertical axis (roughly `[-1, 1]`); the angle around the
/// display comes from `x` and `z`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PixelLayout {
    pub strands: Vec<Strand>,
}

impl PixelLayout {
    pub fn new(strands: Vec<Strand>) -> TinselResult<Self> {
        let layout = Self { strands };
        layout.validate()?;
        Ok(layout)
    }

    pub fn from_json_str(json: &str) -> TinselResult<Self> {
        let layout: Self = serde_json::from_str(json)?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn from_json_path(path: impl AsRef<Path>) -> TinselResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read layout from '{}'", path.display()))?;
        Self::from_json_str(&json)
    }

    /// A cone of `strands` interleaved spirals, wide at the bottom and
    /// narrowing to a point at the top, for running without hardware.
    pub fn synthetic_cone(strands: usize, per_strand: usize) -> TinselResult<Self> {
        const TURNS: f64 = 8.0;
        let strand_count = strands as f64;
        let steps = per_strand.saturating_sub(1).max(1) as f64;
        let strands = (0..strands)
            .map(|s| Strand {
                leds: (0..per_strand)
                    .map(|i| {
                        let u = i as f64 / steps;
                        let radius = 1.0 - 0.9 * u;
                        let theta = 2.0 * PI * (TURNS * u + s as f64 / strand_count);
                        LedPosition {
                            x: radius * theta.cos(),
                            y: 2.0 * u - 1.0,
                            z: radius * theta.sin(),
                        }
                    })
                    .collect(),
            })
            .collect();
        Self::new(strands)
    }

    pub fn validate(&self) -> TinselResult<()> {
        if self.len() == 0 {
            return Err(TinselError::layout("layout has no LEDs"));
        }
        for (s, strand) in self.strands.iter().enumerate() {
            for (i, p) in strand.leds.iter().enumerate() {
                if !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()) {
                    return Err(TinselError::layout(format!(
                        "LED {i} on strand {s} has a non-finite coordinate"
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.strands.iter().map(|s| s.leds.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn strand_sizes(&self) -> Vec<usize> {
        self.strands.iter().map(|s| s.leds.len()).collect()
    }

    /// Flatten to pixels in `(strand, index)` order.
    pub fn pixels(&self) -> Vec<Pixel> {
        let mut out = Vec::with_capacity(self.len());
        for (strand, s) in self.strands.iter().enumerate() {
            let offset = out.len();
            out.extend(
                s.leds
                    .iter()
                    .enumerate()
                    .map(|(index, p)| Pixel::from_position(strand, index, offset + index, p)),
            );
        }
        out
    }
}

/// One LED's fixed coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pixel {
    pub strand: usize,
    pub index: usize,
    /// Position in the flattened frame: strand offset plus `index`.
    pub global_index: usize,
    /// `(atan2(z, x) / pi + 1) / 2`, wrapped into `[0, 1)`.
    pub base_angle: f64,
    pub base_height: f64,
}

impl Pixel {
    pub fn from_position(strand: usize, index: usize, global_index: usize, p: &LedPosition) -> Self {
        Self {
            strand,
            index,
            global_index,
            base_angle: wrap01((p.z.atan2(p.x) / PI + 1.0) / 2.0),
            base_height: p.y,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/layout.rs"]
mod tests;
