use crate::effects::catalog::EffectKind;
use crate::export::exporter::{ExportJob, ExportObserver, ExportReport, export_sequence};
use crate::export::sink::FrameSink;
use crate::foundation::core::StyleParams;
use crate::foundation::error::{KinetypeError, KinetypeResult};
use crate::foundation::math::Rng64;
use crate::render::frame::render_effect_frame;
use crate::surface::{RasterSurface, Surface};

/// Mutable animation state shared by the live loop and export.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackState {
    /// Global progress in `[0, 1)`.
    pub progress: f64,
    pub playing: bool,
    /// While set, ticks keep time but never advance or draw.
    pub exporting: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            progress: 0.0,
            playing: true,
            exporting: false,
        }
    }
}

/// Live playback controller, driven by a host's per-frame callback.
///
/// The host calls [`Playback::tick`] with a monotonic timestamp every display frame and, when it
/// returns `true`, calls [`Playback::draw`].
#[derive(Debug)]
pub struct Playback {
    state: PlaybackState,
    duration_secs: f64,
    last_tick: Option<f64>,
    rng: Rng64,
}

impl Playback {
    pub fn new(duration_secs: f64) -> KinetypeResult<Self> {
        validate_duration(duration_secs)?;
        Ok(Self {
            state: PlaybackState::default(),
            duration_secs,
            last_tick: None,
            rng: Rng64::from_entropy(),
        })
    }

    /// Use a fixed random stream for glitch/flicker effects.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Rng64::new(seed);
        self
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn progress(&self) -> f64 {
        self.state.progress
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// Elapsed animation time in seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.state.progress * self.duration_secs
    }

    /// Advance the clock to `now_secs`. Returns whether a redraw is due.
    ///
    /// The tick time is always recorded, even while paused or exporting, so resuming never jumps.
    /// Progress wraps to `0` once it reaches `1`.
    pub fn tick(&mut self, now_secs: f64) -> bool {
        let last = self.last_tick.replace(now_secs);
        if !self.state.playing || self.state.exporting {
            return false;
        }
        if let Some(last) = last {
            let dt = (now_secs - last).max(0.0);
            if dt.is_finite() {
                self.state.progress += dt / self.duration_secs;
            }
            if self.state.progress >= 1.0 {
                self.state.progress = 0.0;
            }
        }
        true
    }

    /// Flip play/pause and return the new `playing` flag.
    pub fn toggle(&mut self) -> bool {
        self.state.playing = !self.state.playing;
        self.state.playing
    }

    /// Rewind to the start and play.
    pub fn reset(&mut self) {
        self.state.progress = 0.0;
        self.state.playing = true;
    }

    /// Scrub to `progress` (clamped to `[0, 1]`) and pause.
    pub fn seek(&mut self, progress: f64) {
        self.state.progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        self.state.playing = false;
    }

    /// Change the loop length; the current progress fraction is kept.
    pub fn set_duration(&mut self, duration_secs: f64) -> KinetypeResult<()> {
        validate_duration(duration_secs)?;
        self.duration_secs = duration_secs;
        Ok(())
    }

    /// Render the current progress onto `surface`. Skipped (returns `false`) while exporting.
    pub fn draw(
        &mut self,
        surface: &mut dyn Surface,
        text: &str,
        effect: EffectKind,
        style: &StyleParams,
    ) -> bool {
        if self.state.exporting {
            return false;
        }
        render_effect_frame(surface, self.state.progress, text, effect, style, &mut self.rng);
        true
    }

    /// Run an export while playback is suspended.
    ///
    /// Playback is paused and flagged as exporting for the duration; the flag is cleared on every
    /// exit path, including errors and cancellation. `playing` stays off afterwards.
    pub fn export<S: RasterSurface>(
        &mut self,
        surface: &mut S,
        job: &ExportJob,
        sink: &mut dyn FrameSink,
        observer: &mut dyn ExportObserver,
    ) -> KinetypeResult<ExportReport> {
        if self.state.exporting {
            return Err(KinetypeError::export("an export is already running"));
        }
        let guard = ExportGuard::enter(&mut self.state);
        let res = export_sequence(surface, job, sink, observer);
        drop(guard);
        res
    }
}

/// Holds the `exporting` flag for its lifetime.
struct ExportGuard<'a> {
    state: &'a mut PlaybackState,
}

impl<'a> ExportGuard<'a> {
    fn enter(state: &'a mut PlaybackState) -> Self {
        state.exporting = true;
        state.playing = false;
        Self { state }
    }
}

impl Drop for ExportGuard<'_> {
    fn drop(&mut self) {
        self.state.exporting = false;
    }
}

fn validate_duration(duration_secs: f64) -> KinetypeResult<()> {
    if duration_secs.is_finite() && duration_secs > 0.0 {
        Ok(())
    } else {
        Err(KinetypeError::validation(format!(
            "duration must be > 0 seconds, got {duration_secs}"
        )))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/controller.rs"]
mod tests;
