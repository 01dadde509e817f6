//! Intro animation sequencer.
//!
//! Wall-clock driven and independent of pointer input. Runs once per page:
//! the static sprite slides in from the left, the animated sprite takes over
//! after the hand-off delay with a short glitch, and the end of the glitch
//! reveals the panel stack. Nothing here ever moves backwards.

/// Source of uniform samples in `[0, 1)`. Injected so tests can script the glitch.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

/// Small 32-bit linear congruential generator (not crypto secure).
#[derive(Clone, Debug)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self { state: seed & 0xFFFF_FFFF }
    }

    /// Seeded from the browser. Only call this on wasm32.
    pub fn from_entropy() -> Self {
        Self::new(entropy_seed())
    }
}

impl RandomSource for Lcg {
    fn next_f64(&mut self) -> f64 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223) & 0xFFFF_FFFF;
        self.state as f64 / 4_294_967_296.0
    }
}

#[cfg(feature = "rng")]
fn entropy_seed() -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(err) => {
            log::warn!("getrandom failed ({err}), seeding glitch rng from the clock");
            clock_seed()
        }
    }
}

#[cfg(not(feature = "rng"))]
fn entropy_seed() -> u64 {
    clock_seed()
}

fn clock_seed() -> u64 {
    let now = web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0);
    (now * 1000.0) as u64
}

/// Phase durations in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct IntroTiming {
    pub slide_ms: f64,
    /// Measured from the intro start, not from the end of the slide.
    pub handoff_ms: f64,
    pub glitch_ms: f64,
    pub jitter_px: f64,
}

impl Default for IntroTiming {
    fn default() -> Self {
        Self { slide_ms: 1000.0, handoff_ms: 2000.0, glitch_ms: 300.0, jitter_px: 6.0 }
    }
}

/// Per-frame color distortion applied to the animated sprite while glitching.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlitchFilter {
    HueRotate(u32),
    Invert,
}

impl GlitchFilter {
    pub fn css(self) -> String {
        match self {
            GlitchFilter::HueRotate(deg) => format!("hue-rotate({deg}deg)"),
            GlitchFilter::Invert => "invert(1)".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntroPhase {
    /// No frame rendered yet.
    Pending,
    /// Static sprite sliding in (or resting until the hand-off).
    Sliding,
    Glitching,
    Settled,
}

/// What the renderer needs from the sequencer for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntroFrame {
    pub elapsed_ms: f64,
    pub animated: bool,
    pub jitter: (f64, f64),
    pub filter: Option<GlitchFilter>,
    /// Panels may be drawn. Stays true once set.
    pub reveal_panels: bool,
}

#[derive(Clone, Debug)]
pub struct IntroSequencer {
    timing: IntroTiming,
    start_ms: Option<f64>,
    glitch_start_ms: Option<f64>,
    animated: bool,
    glitching: bool,
    settled: bool,
}

impl IntroSequencer {
    pub fn new(timing: IntroTiming) -> Self {
        Self { timing, start_ms: None, glitch_start_ms: None, animated: false, glitching: false, settled: false }
    }

    pub fn phase(&self) -> IntroPhase {
        if self.start_ms.is_none() {
            IntroPhase::Pending
        } else if self.settled {
            IntroPhase::Settled
        } else if self.glitching {
            IntroPhase::Glitching
        } else {
            IntroPhase::Sliding
        }
    }

    pub fn is_animated(&self) -> bool {
        self.animated
    }

    /// Step the sequence to `now`. The first call fixes the time origin.
    pub fn advance(&mut self, now: f64, rng: &mut dyn RandomSource) -> IntroFrame {
        let start = *self.start_ms.get_or_insert(now);
        let elapsed = (now - start).max(0.0);

        if !self.animated && elapsed > self.timing.handoff_ms {
            self.animated = true;
            self.glitching = true;
            self.glitch_start_ms = Some(now);
            log::debug!("intro: animated sprite hand-off at {elapsed:.0}ms");
        }

        let mut jitter = (0.0, 0.0);
        let mut filter = None;
        if self.glitching {
            let glitch_elapsed = now - self.glitch_start_ms.unwrap_or(now);
            if glitch_elapsed < self.timing.glitch_ms {
                let span = self.timing.jitter_px * 2.0;
                let jx = ((rng.next_f64() - 0.5) * span).floor();
                let jy = ((rng.next_f64() - 0.5) * span).floor();
                jitter = (jx, jy);
                filter = Some(if rng.next_f64() < 0.5 {
                    GlitchFilter::HueRotate((rng.next_f64() * 360.0).floor() as u32)
                } else {
                    GlitchFilter::Invert
                });
            } else {
                self.glitching = false;
                self.settled = true;
                log::debug!("intro: glitch finished, revealing panels");
            }
        }

        IntroFrame { elapsed_ms: elapsed, animated: self.animated, jitter, filter, reveal_panels: self.settled }
    }

    /// Horizontal position of a character `width` wide sliding to `target_x`.
    pub fn character_x(&self, elapsed_ms: f64, width: f64, target_x: f64) -> f64 {
        slide_x(elapsed_ms, self.timing.slide_ms, width, target_x)
    }
}

/// Linear slide from `-width` to `target_x`, clamped at `target_x`.
pub fn slide_x(elapsed_ms: f64, duration_ms: f64, width: f64, target_x: f64) -> f64 {
    let progress = (elapsed_ms / duration_ms).max(0.0);
    (-width + progress * (target_x + width)).min(target_x)
}
