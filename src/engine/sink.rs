use std::io::Write;

use anyhow::Context as _;

use crate::{
    color::color::{Color, ColorStyle},
    engine::layout::PixelLayout,
    foundation::error::{TinselError, TinselResult},
};

/// Consumer of rendered frames, typically a device or file writer.
pub trait FrameSink {
    fn write_frame(&mut self, frame: &[Color]) -> TinselResult<()>;
}

/// Splits a frame by strand and encodes each LED as four bytes, white first.
#[derive(Clone, Debug)]
pub struct WrgbEncoder {
    style: ColorStyle,
    strand_sizes: Vec<usize>,
    buffers: Vec<Vec<u8>>,
}

impl WrgbEncoder {
    pub fn new(layout: &PixelLayout, style: ColorStyle) -> Self {
        let strand_sizes = layout.strand_sizes();
        let buffers = strand_sizes
            .iter()
            .map(|n| Vec::with_capacity(n * 4))
            .collect();
        Self {
            style,
            strand_sizes,
            buffers,
        }
    }

    /// Per-strand byte buffers from the last encoded frame.
    pub fn buffers(&self) -> &[Vec<u8>] {
        &self.buffers
    }

    pub fn encode(&mut self, frame: &[Color]) -> TinselResult<&[Vec<u8>]> {
        let expected: usize = self.strand_sizes.iter().sum();
        if frame.len() != expected {
            return Err(TinselError::layout(format!(
                "frame has {} colours but the layout has {expected} LEDs",
                frame.len()
            )));
        }
        let mut rest = frame;
        for (buf, &n) in self.buffers.iter_mut().zip(&self.strand_sizes) {
            let (strand, tail) = rest.split_at(n);
            rest = tail;
            buf.clear();
            buf.extend(strand.iter().flat_map(|c| c.to_wrgb(self.style)));
        }
        Ok(&self.buffers)
    }
}

impl FrameSink for WrgbEncoder {
    fn write_frame(&mut self, frame: &[Color]) -> TinselResult<()> {
        self.encode(frame).map(|_| ())
    }
}

/// Appends every frame's strand buffers, back to back, to a writer.
pub struct RawWrgbWriter<W: Write> {
    encoder: WrgbEncoder,
    out: W,
    frames: u64,
}

impl<W: Write> RawWrgbWriter<W> {
    pub fn new(encoder: WrgbEncoder, out: W) -> Self {
        Self {
            encoder,
            out,
            frames: 0,
        }
    }

    pub fn frames_written(&self) -> u64 {
        self.frames
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FrameSink for RawWrgbWriter<W> {
    fn write_frame(&mut self, frame: &[Color]) -> TinselResult<()> {
        for buf in self.encoder.encode(frame)? {
            self.out
                .write_all(buf)
                .with_context(|| format!("write frame {}", self.frames))?;
        }
        self.frames += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/sink.rs"]
mod tests;
