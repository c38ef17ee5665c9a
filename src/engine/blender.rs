use rand::{SeedableRng as _, rngs::StdRng, seq::index};

use crate::{
    animation::{
        curve::Curve,
        ease::Ease,
        param::{Param, random_index},
    },
    color::color::Color,
    engine::{
        config::EngineConfig,
        layout::{Pixel, PixelLayout},
    },
    foundation::{
        error::{TinselError, TinselResult},
        math::lerp,
    },
    pattern::pattern::{ControlKey, Pattern},
    shading::base_color::Effects,
    streamers::streamer::Streamer,
};

/// Where the scheduler is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Steady,
    Transitioning,
}

/// Which of the two scheduled patterns to render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    Current,
    Next,
}

#[derive(Clone, Copy, Debug)]
struct Scheduled {
    index: usize,
    /// Absolute time at which this pattern's local clock reads 0.
    origin: f64,
    /// Blend hue captured when the pattern was scheduled in.
    anchor_hue: f64,
}

/// Owns the pattern schedule and the live sparkle and streamer populations,
/// and renders whole frames.
///
/// Each pattern keeps its own local clock from the moment it is scheduled in,
/// so the outgoing pattern carries on through a transition exactly where its
/// steady window left off and the incoming one keeps counting after the swap.
pub struct Blender {
    config: EngineConfig,
    patterns: Vec<Pattern>,
    pixels: Vec<Pixel>,
    rng: StdRng,
    blend: Curve,
    initialized: bool,
    now: f64,
    current: Scheduled,
    next: Scheduled,
    phase: Phase,
    paused: bool,
    pattern_start: f64,
    pattern_end: f64,
    next_sparkle_time: f64,
    sparkles: Vec<bool>,
    next_streamer_time: f64,
    streamers: Vec<Streamer>,
}

impl Blender {
    pub fn new(
        patterns: Vec<Pattern>,
        layout: &PixelLayout,
        config: EngineConfig,
    ) -> TinselResult<Self> {
        config.validate()?;
        layout.validate()?;
        if patterns.is_empty() {
            return Err(TinselError::config("at least one pattern is required"));
        }
        patterns.iter().try_for_each(Pattern::validate)?;
        if let Some(name) = &config.start_pattern
            && !patterns.iter().any(|p| p.name() == name)
        {
            return Err(TinselError::config(format!(
                "start pattern '{name}' is not in the catalog"
            )));
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let blend = Curve::new(Ease::Linear, [(0.0, 0.0), (config.blend_period, 1.0)])?;
        let pixels = layout.pixels();
        let slot = Scheduled {
            index: 0,
            origin: 0.0,
            anchor_hue: 0.0,
        };

        Ok(Self {
            paused: config.pause_change,
            sparkles: vec![false; pixels.len()],
            config,
            patterns,
            pixels,
            rng,
            blend,
            initialized: false,
            now: 0.0,
            current: slot,
            next: slot,
            phase: Phase::Steady,
            pattern_start: 0.0,
            pattern_end: 0.0,
            next_sparkle_time: 0.0,
            next_streamer_time: 0.0,
            streamers: Vec::new(),
        })
    }

    /// Seed the schedule at `t0`: pick the opening and following patterns and
    /// clear the sparkle and streamer populations.
    #[tracing::instrument(skip(self), fields(patterns = self.patterns.len(), pixels = self.pixels.len()))]
    pub fn init(&mut self, t0: f64) {
        let start = match &self.config.start_pattern {
            Some(name) => self.patterns.iter().position(|p| p.name() == name),
            None => None,
        };
        let start = start.unwrap_or_else(|| {
            random_index(&mut self.rng, 0, self.patterns.len() - 1)
        });

        self.now = t0;
        self.current = Scheduled {
            index: start,
            origin: t0,
            anchor_hue: self.blend.evaluate(t0),
        };
        self.next = Scheduled {
            index: self.pick_next(),
            origin: t0,
            anchor_hue: 0.0,
        };
        self.phase = Phase::Steady;
        self.pattern_start = t0;
        self.pattern_end = t0 + self.config.steady_secs;
        self.next_sparkle_time = t0;
        self.sparkles.fill(false);
        self.next_streamer_time = t0;
        self.streamers.clear();
        self.initialized = true;

        tracing::info!(
            pattern = self.patterns[self.current.index].name(),
            next = self.patterns[self.next.index].name(),
            "blender started"
        );
    }

    /// Advance to `t` and render one frame, ordered like the layout's pixels.
    pub fn render(&mut self, t: f64) -> Vec<Color> {
        if !self.initialized {
            self.init(t);
        }
        self.now = t;
        self.advance_schedule(t);
        self.refresh_sparkles(t);
        self.refresh_streamers(t);

        let cur_t = t - self.current.origin;
        match self.phase {
            Phase::Steady => (0..self.pixels.len())
                .map(|i| self.render_pixel(Slot::Current, cur_t, i))
                .collect(),
            Phase::Transitioning => {
                let next_t = t - self.next.origin;
                let x = ((t - self.pattern_start) / self.config.transition_secs).clamp(0.0, 1.0);
                let ease = self.config.transition_ease;
                (0..self.pixels.len())
                    .map(|i| {
                        let a = self.render_pixel(Slot::Current, cur_t, i);
                        let b = self.render_pixel(Slot::Next, next_t, i);
                        Color::lerp_eased(&a, &b, x, ease)
                    })
                    .collect()
            }
        }
    }

    /// Full pipeline for one pixel of one scheduled pattern at its local time
    /// `t_local`: shading, then sparkles, then every live streamer covering
    /// the pixel in spawn order.
    pub fn render_pixel(&mut self, slot: Slot, t_local: f64, pixel_index: usize) -> Color {
        let Some(pixel) = self.pixels.get(pixel_index).copied() else {
            return Color::OFF;
        };
        let sched = match slot {
            Slot::Current => self.current,
            Slot::Next => self.next,
        };
        let pattern = &self.patterns[sched.index];
        let rng = &mut self.rng;

        let (mut color, suppress) = pattern.shade(
            t_local,
            self.blend.evaluate(self.now),
            sched.anchor_hue,
            pixel.base_angle,
            pixel.base_height,
            rng,
        );

        if !suppress.contains(Effects::SPARKLES) && self.sparkles[pixel.global_index] {
            color = pattern.sparkle_func().apply(color, t_local, rng);
        }
        if !suppress.contains(Effects::STREAMERS) {
            for streamer in &self.streamers {
                if streamer.contains(self.now, pixel.base_angle, pixel.base_height) {
                    color = streamer.apply(color, t_local, rng);
                }
            }
        }
        color
    }

    fn advance_schedule(&mut self, t: f64) {
        while t >= self.pattern_end && !(self.paused && self.phase == Phase::Steady) {
            let at = self.pattern_end;
            match self.phase {
                Phase::Steady => self.begin_transition(at),
                Phase::Transitioning => self.finish_transition(at),
            }
        }
    }

    fn begin_transition(&mut self, at: f64) {
        self.next.origin = at;
        self.next.anchor_hue = self.blend.evaluate(at);
        self.phase = Phase::Transitioning;
        self.pattern_start = at;
        self.pattern_end = at + self.config.transition_secs;
        tracing::info!(
            from = self.patterns[self.current.index].name(),
            to = self.patterns[self.next.index].name(),
            at,
            "transition started"
        );
    }

    fn finish_transition(&mut self, at: f64) {
        self.current = self.next;
        self.next = Scheduled {
            index: self.pick_next(),
            origin: at,
            anchor_hue: 0.0,
        };
        self.phase = Phase::Steady;
        self.pattern_start = at;
        self.pattern_end = at + self.config.steady_secs;
        tracing::info!(
            pattern = self.patterns[self.current.index].name(),
            next = self.patterns[self.next.index].name(),
            at,
            "pattern steady"
        );
    }

    fn pick_next(&mut self) -> usize {
        let current = self.patterns[self.current.index].name();
        let candidates: Vec<usize> = (0..self.patterns.len())
            .filter(|&i| self.patterns[i].name() != current)
            .collect();
        if candidates.is_empty() {
            return self.current.index;
        }
        let i = random_index(&mut self.rng, 0, candidates.len() - 1);
        candidates[i]
    }

    fn refresh_sparkles(&mut self, t: f64) {
        if t < self.next_sparkle_time {
            return;
        }
        self.next_sparkle_time = next_tick(self.next_sparkle_time, self.config.sparkle_period, t);

        let chance = match self.phase {
            Phase::Steady => {
                self.patterns[self.current.index].sparkle_chance(t - self.current.origin, &mut self.rng)
            }
            Phase::Transitioning => {
                let from = self.patterns[self.current.index]
                    .sparkle_chance(self.pattern_start - self.current.origin, &mut self.rng);
                let to = self.patterns[self.next.index]
                    .sparkle_chance(self.config.transition_secs, &mut self.rng);
                let x = ((t - self.pattern_start) / self.config.transition_secs).clamp(0.0, 1.0);
                lerp(from, to, x)
            }
        };

        let count = self.pixels.len();
        let amount = ((count as f64) * chance).round() as usize;
        self.sparkles.fill(false);
        for i in index::sample(&mut self.rng, count, amount.min(count)) {
            self.sparkles[i] = true;
        }
        tracing::debug!(amount, chance, "sparkles refreshed");
    }

    fn refresh_streamers(&mut self, t: f64) {
        if t < self.next_streamer_time {
            return;
        }
        self.next_streamer_time =
            next_tick(self.next_streamer_time, self.config.streamer_period, t);

        // spawn specs run on the phase clock of the outgoing pattern
        let local = t - self.pattern_start;
        let pattern = &self.patterns[self.current.index];
        let specs = pattern.streamers().specs_at(local, &mut self.rng);
        let spawned = specs.len();
        for spec in specs {
            self.streamers
                .push(Streamer::spawn(spec, local, t, &mut self.rng));
        }
        self.streamers.retain(|s| s.alive(t));
        if spawned > 0 {
            tracing::debug!(
                pattern = pattern.name(),
                spawned,
                live = self.streamers.len(),
                "streamers spawned"
            );
        }
    }

    /// Force a transition now, optionally choosing the incoming pattern.
    /// Does nothing while a transition is already running.
    pub fn start_transition(&mut self, next_index: Option<usize>) -> TinselResult<()> {
        if let Some(i) = next_index
            && i >= self.patterns.len()
        {
            return Err(TinselError::validation(format!(
                "pattern index {i} out of range (have {})",
                self.patterns.len()
            )));
        }
        if !self.initialized {
            self.init(self.now);
        }
        if self.phase == Phase::Transitioning {
            tracing::debug!("transition already running");
            return Ok(());
        }
        if let Some(i) = next_index {
            self.next.index = i;
        }
        self.begin_transition(self.now);
        Ok(())
    }

    /// Replace one of the current pattern's params between frames.
    pub fn set_control(&mut self, key: ControlKey, value: Param) -> TinselResult<()> {
        let pattern = &mut self.patterns[self.current.index];
        pattern.set_param(key, value)?;
        tracing::info!(pattern = pattern.name(), control = key.name(), "control changed");
        Ok(())
    }

    /// While paused, the current pattern is held once its steady window ends.
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused && !paused && self.phase == Phase::Steady && self.now > self.pattern_end {
            // restart the overdue handover from the present
            self.pattern_end = self.now;
        }
        self.paused = paused;
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    /// `"Current"` while steady, `"Current -> Next"` while transitioning.
    pub fn pattern_name(&self) -> String {
        let current = self.patterns[self.current.index].name();
        match self.phase {
            Phase::Steady => current.to_string(),
            Phase::Transitioning => {
                format!("{current} -> {}", self.patterns[self.next.index].name())
            }
        }
    }

    /// Seconds until the current phase ends, as of the last rendered frame.
    pub fn time_remaining(&self) -> f64 {
        (self.pattern_end - self.now).max(0.0)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_pattern(&self) -> &Pattern {
        &self.patterns[self.current.index]
    }

    pub fn next_pattern(&self) -> &Pattern {
        &self.patterns[self.next.index]
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn streamers(&self) -> &[Streamer] {
        &self.streamers
    }

    pub fn sparkle_count(&self) -> usize {
        self.sparkles.iter().filter(|s| **s).count()
    }
}

/// First tick strictly after `t`, stepping from `scheduled` by `period`.
fn next_tick(scheduled: f64, period: f64, t: f64) -> f64 {
    let next = scheduled + period;
    if next > t {
        next
    } else {
        let missed = ((t - scheduled) / period).floor() + 1.0;
        scheduled + missed * period
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/blender.rs"]
mod tests;
