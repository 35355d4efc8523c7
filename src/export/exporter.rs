use std::ops::ControlFlow;

use crate::effects::catalog::EffectKind;
use crate::export::naming::base_name_for;
use crate::export::sink::{FrameSink, SinkConfig};
use crate::foundation::core::StyleParams;
use crate::foundation::error::{KinetypeError, KinetypeResult};
use crate::foundation::math::Rng64;
use crate::render::frame::render_effect_frame;
use crate::surface::RasterSurface;

/// Largest exportable `floor(duration × fps)`.
pub const MAX_TOTAL_FRAMES: u64 = 1_000_000;

/// Timing of an exported sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportSettings {
    pub duration_secs: f64,
    pub fps: u32,
    /// Seed for random effects; frame `i` draws from `Rng64::for_frame(seed, i)`.
    /// Without a seed, random effects differ from run to run.
    pub seed: Option<u64>,
    /// Frames between observer checkpoints.
    pub checkpoint_every: u32,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            duration_secs: 2.0,
            fps: 30,
            seed: None,
            checkpoint_every: 5,
        }
    }
}

impl ExportSettings {
    pub fn validate(&self) -> KinetypeResult<()> {
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(KinetypeError::validation(format!(
                "export duration must be > 0 seconds, got {}",
                self.duration_secs
            )));
        }
        if self.fps == 0 {
            return Err(KinetypeError::validation("export fps must be > 0"));
        }
        if self.checkpoint_every == 0 {
            return Err(KinetypeError::validation("checkpoint_every must be >= 1"));
        }
        let total = (self.duration_secs * f64::from(self.fps)).floor();
        if total > MAX_TOTAL_FRAMES as f64 {
            return Err(KinetypeError::validation(format!(
                "export of {total} frames exceeds the {MAX_TOTAL_FRAMES} frame limit"
            )));
        }
        Ok(())
    }

    /// `floor(duration × fps)`: the index of the last exported frame.
    pub fn total_frames(&self) -> u64 {
        let total = (self.duration_secs * f64::from(self.fps)).floor();
        if total.is_finite() && total > 0.0 {
            total as u64
        } else {
            0
        }
    }

    /// Number of images an export produces (`total_frames + 1`).
    pub fn frame_count(&self) -> u64 {
        self.total_frames() + 1
    }

    /// Global progress of frame `idx`. A zero-length sequence is a single final frame.
    pub fn progress_at(&self, idx: u64) -> f64 {
        progress_at(idx, self.total_frames())
    }
}

fn progress_at(idx: u64, total: u64) -> f64 {
    if total == 0 {
        1.0
    } else {
        idx as f64 / total as f64
    }
}

/// Position of an export, reported at checkpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExportProgress {
    /// Index of the frame just handed to the sink.
    pub frame: u64,
    pub total_frames: u64,
}

impl ExportProgress {
    pub fn fraction(&self) -> f64 {
        progress_at(self.frame, self.total_frames)
    }

    /// Completion rounded to a whole percent.
    pub fn percent(&self) -> u32 {
        (self.fraction() * 100.0).round() as u32
    }
}

/// Receives export checkpoints every `checkpoint_every` frames and after the last frame.
///
/// Returning [`ControlFlow::Break`] cancels the export; the sink is aborted and the export fails
/// with [`KinetypeError::Cancelled`].
pub trait ExportObserver {
    fn checkpoint(&mut self, progress: &ExportProgress) -> ControlFlow<()>;
}

/// Observer that never cancels.
#[derive(Clone, Copy, Debug, Default)]
pub struct IgnoreProgress;

impl ExportObserver for IgnoreProgress {
    fn checkpoint(&mut self, _progress: &ExportProgress) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

impl<F> ExportObserver for F
where
    F: FnMut(&ExportProgress) -> ControlFlow<()>,
{
    fn checkpoint(&mut self, progress: &ExportProgress) -> ControlFlow<()> {
        self(progress)
    }
}

/// Everything needed to export one animation.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportJob {
    pub text: String,
    pub effect: EffectKind,
    pub style: StyleParams,
    pub settings: ExportSettings,
    /// Archive/directory base name; derived from `text` when `None`. Sanitized either way.
    pub base_name: Option<String>,
}

impl ExportJob {
    /// Output base name. Explicit names go through the same sanitizer as derived ones.
    pub fn base_name(&self) -> String {
        base_name_for(self.base_name.as_deref().unwrap_or(&self.text))
    }
}

/// Summary of a finished export.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExportReport {
    pub frames_written: u64,
    pub total_frames: u64,
}

/// Render frames `0..=total_frames` in order and hand each one to `sink`.
///
/// Export is all-or-nothing: on any render, sink or cancellation error the sink is aborted so no
/// partial output is published.
#[tracing::instrument(skip_all, fields(effect = %job.effect, fps = job.settings.fps))]
pub fn export_sequence<S: RasterSurface>(
    surface: &mut S,
    job: &ExportJob,
    sink: &mut dyn FrameSink,
    observer: &mut dyn ExportObserver,
) -> KinetypeResult<ExportReport> {
    job.settings.validate()?;
    let total = job.settings.total_frames();
    let canvas = surface.canvas();
    let cfg = SinkConfig {
        width: canvas.width,
        height: canvas.height,
        fps: job.settings.fps,
        total_frames: total,
        base_name: job.base_name(),
    };
    tracing::debug!(
        frames = cfg.frame_count(),
        base_name = %cfg.base_name,
        seeded = job.settings.seed.is_some(),
        "starting export"
    );

    sink.begin(&cfg)?;
    let mut written = 0u64;
    let res = write_frames(surface, job, total, sink, observer, &mut written).and_then(|()| sink.end());
    if let Err(e) = res {
        tracing::debug!(frames_written = written, error = %e, "export aborted");
        sink.abort();
        return Err(e);
    }

    Ok(ExportReport {
        frames_written: written,
        total_frames: total,
    })
}

fn write_frames<S: RasterSurface>(
    surface: &mut S,
    job: &ExportJob,
    total: u64,
    sink: &mut dyn FrameSink,
    observer: &mut dyn ExportObserver,
    written: &mut u64,
) -> KinetypeResult<()> {
    let every = u64::from(job.settings.checkpoint_every.max(1));
    let mut shared_rng = Rng64::from_entropy();

    for idx in 0..=total {
        let mut frame_rng = job.settings.seed.map(|seed| Rng64::for_frame(seed, idx));
        let rng = frame_rng.as_mut().unwrap_or(&mut shared_rng);

        render_effect_frame(
            surface,
            progress_at(idx, total),
            &job.text,
            job.effect,
            &job.style,
            rng,
        );
        sink.push_frame(idx, &surface.snapshot())?;
        *written += 1;

        if idx % every == 0 || idx == total {
            let progress = ExportProgress {
                frame: idx,
                total_frames: total,
            };
            tracing::debug!(frame = idx, percent = progress.percent(), "export checkpoint");
            if observer.checkpoint(&progress).is_break() {
                return Err(KinetypeError::Cancelled {
                    frames_written: *written,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/export/exporter.rs"]
mod tests;
