#![forbid(unsafe_code)]
//! Procedural colour fields for LED strands placed in 3-D space.
//!
//! A [`Pattern`] turns `(time, angle, height)` into a [`Color`]; the
//! [`Blender`] schedules patterns, cross-fades between them, layers sparkles
//! and streamers on top and renders one frame per call. Frames are handed to
//! a [`FrameSink`] as WRGB bytes.

mod animation;
mod color;
mod engine;
mod foundation;
mod pattern;
mod shading;
mod streamers;

pub use animation::curve::{ControlPoint, Curve, CurveChain};
pub use animation::ease::Ease;
pub use animation::param::Param;
pub use color::color::{Color, ColorStyle};
pub use color::recolor::{HueMode, Recolor, SparkleFunc};
pub use engine::blender::{Blender, Phase, Slot};
pub use engine::config::EngineConfig;
pub use engine::layout::{LedPosition, Pixel, PixelLayout, Strand};
pub use engine::sink::{FrameSink, RawWrgbWriter, WrgbEncoder};
pub use foundation::error::{TinselError, TinselResult};
pub use pattern::catalog::builtin_catalog;
pub use pattern::pattern::{ControlKey, Pattern, PatternBuilder};
pub use shading::base_color::{BaseColor, Effects, FallingColor, PlainColor, ShadeCtx, StrategyList};
pub use shading::topology::Topology;
pub use streamers::source::{StreamerSource, StreamerSpec};
pub use streamers::streamer::{Direction, Spin, Streamer, StreamerFunc, StreamerPaint};
