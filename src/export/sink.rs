use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::export::naming::{encode_png, frame_file_name, validate_base_name};
use crate::foundation::error::{KinetypeError, KinetypeResult};
use crate::surface::FrameRGBA;

/// Configuration provided to a [`FrameSink`] at the start of an export.
#[derive(Clone, Debug, PartialEq)]
pub struct SinkConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    /// Index of the last frame; the export writes `total_frames + 1` frames.
    pub total_frames: u64,
    /// Base name for archives and directories, see [`base_name_for`](crate::base_name_for).
    pub base_name: String,
}

impl SinkConfig {
    pub fn frame_count(&self) -> u64 {
        self.total_frames + 1
    }
}

/// Sink contract for consuming rendered frames.
///
/// Ordering contract: `push_frame` is called with indices `0, 1, ..., total_frames` in order.
/// After `begin` succeeds, exactly one of `end` or `abort` is called.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: &SinkConfig) -> KinetypeResult<()>;
    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> KinetypeResult<()>;
    /// Called once after the last frame; output becomes visible only here.
    fn end(&mut self) -> KinetypeResult<()>;
    /// Discard partial output after a failure or cancellation.
    fn abort(&mut self) {}
}

/// In-memory sink for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(u64, FrameRGBA)>,
    finished: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Frames in export order.
    pub fn frames(&self) -> &[(u64, FrameRGBA)] {
        &self.frames
    }

    /// Whether `end` was reached.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: &SinkConfig) -> KinetypeResult<()> {
        self.cfg = Some(cfg.clone());
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> KinetypeResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> KinetypeResult<()> {
        self.finished = true;
        Ok(())
    }

    fn abort(&mut self) {
        self.frames.clear();
    }
}

/// Writes `frame_NNNN.png` files into `<root>/<base_name>/`.
///
/// Frames go to a `<base_name>.partial` directory that is renamed into place by `end`.
#[derive(Debug)]
pub struct PngDirSink {
    root: PathBuf,
    staging: Option<PathBuf>,
    target: Option<PathBuf>,
    backup: Option<PathBuf>,
}

impl PngDirSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            staging: None,
            target: None,
            backup: None,
        }
    }

    /// Final output directory, known once `begin` has run.
    pub fn output_dir(&self) -> Option<&Path> {
        self.target.as_deref()
    }
}

impl FrameSink for PngDirSink {
    fn begin(&mut self, cfg: &SinkConfig) -> KinetypeResult<()> {
        validate_base_name(&cfg.base_name)?;
        let target = self.root.join(&cfg.base_name);
        let staging = self.root.join(format!("{}.partial", cfg.base_name));
        if staging.exists() {
            std::fs::remove_dir_all(&staging)
                .with_context(|| format!("remove stale '{}'", staging.display()))?;
        }
        std::fs::create_dir_all(&staging)
            .with_context(|| format!("create frame directory '{}'", staging.display()))?;
        self.backup = Some(self.root.join(format!("{}.previous", cfg.base_name)));
        self.staging = Some(staging);
        self.target = Some(target);
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> KinetypeResult<()> {
        let dir = self
            .staging
            .as_ref()
            .ok_or_else(|| KinetypeError::export("push_frame called before begin"))?;
        let path = dir.join(frame_file_name(idx));
        std::fs::write(&path, encode_png(frame)?)
            .with_context(|| format!("write frame '{}'", path.display()))?;
        Ok(())
    }

    /// Moves any existing output aside, publishes the staged frames, and restores the old
    /// output if publishing fails. Staging stays tracked until the rename succeeds.
    fn end(&mut self) -> KinetypeResult<()> {
        let (Some(staging), Some(target), Some(backup)) =
            (self.staging.as_deref(), self.target.as_deref(), self.backup.as_deref())
        else {
            return Err(KinetypeError::export("end called before begin"));
        };

        let replacing = target.exists();
        if replacing {
            if backup.exists() {
                std::fs::remove_dir_all(backup)
                    .with_context(|| format!("remove stale '{}'", backup.display()))?;
            }
            std::fs::rename(target, backup).with_context(|| {
                format!("move '{}' to '{}'", target.display(), backup.display())
            })?;
        }

        if let Err(e) = std::fs::rename(staging, target) {
            if replacing && let Err(restore) = std::fs::rename(backup, target) {
                tracing::warn!(
                    path = %backup.display(),
                    error = %restore,
                    "failed to restore previous frames"
                );
            }
            return Err(anyhow::Error::new(e)
                .context(format!(
                    "move '{}' to '{}'",
                    staging.display(),
                    target.display()
                ))
                .into());
        }

        if replacing && let Err(e) = std::fs::remove_dir_all(backup) {
            tracing::warn!(path = %backup.display(), error = %e, "failed to remove previous frames");
        }
        self.staging = None;
        Ok(())
    }

    fn abort(&mut self) {
        if let Some(staging) = self.staging.take()
            && staging.exists()
            && let Err(e) = std::fs::remove_dir_all(&staging)
        {
            tracing::warn!(path = %staging.display(), error = %e, "failed to remove partial frames");
        }
    }
}

/// Writes one `<base_name>.zip` archive of `frame_NNNN.png` entries into a directory.
///
/// PNG data is already compressed, so entries are stored as-is. The archive is built at
/// `<base_name>.zip.partial` and renamed by `end`.
pub struct ZipSink {
    out_dir: PathBuf,
    writer: Option<zip::ZipWriter<BufWriter<File>>>,
    partial: Option<PathBuf>,
    archive: Option<PathBuf>,
}

impl ZipSink {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            writer: None,
            partial: None,
            archive: None,
        }
    }

    /// Final archive path, known once `begin` has run.
    pub fn archive_path(&self) -> Option<&Path> {
        self.archive.as_deref()
    }
}

impl std::fmt::Debug for ZipSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZipSink")
            .field("out_dir", &self.out_dir)
            .field("open", &self.writer.is_some())
            .field("archive", &self.archive)
            .finish()
    }
}

impl FrameSink for ZipSink {
    fn begin(&mut self, cfg: &SinkConfig) -> KinetypeResult<()> {
        validate_base_name(&cfg.base_name)?;
        std::fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("create output directory '{}'", self.out_dir.display()))?;
        let archive = self.out_dir.join(format!("{}.zip", cfg.base_name));
        let partial = self.out_dir.join(format!("{}.zip.partial", cfg.base_name));
        let file = File::create(&partial)
            .with_context(|| format!("create archive '{}'", partial.display()))?;

        self.writer = Some(zip::ZipWriter::new(BufWriter::new(file)));
        self.partial = Some(partial);
        self.archive = Some(archive);
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> KinetypeResult<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| KinetypeError::export("push_frame called before begin"))?;
        let png = encode_png(frame)?;
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        let name = frame_file_name(idx);
        writer
            .start_file(name.as_str(), options)
            .map_err(|e| KinetypeError::export(format!("zip entry '{name}': {e}")))?;
        writer
            .write_all(&png)
            .with_context(|| format!("write zip entry '{name}'"))?;
        Ok(())
    }

    /// The partial archive stays tracked until the rename succeeds, so `abort` can remove it.
    fn end(&mut self) -> KinetypeResult<()> {
        let writer = self
            .writer
            .take()
            .ok_or_else(|| KinetypeError::export("end called before begin"))?;
        let (Some(partial), Some(archive)) = (self.partial.as_deref(), self.archive.as_deref())
        else {
            return Err(KinetypeError::export("end called before begin"));
        };

        let mut buf = writer
            .finish()
            .map_err(|e| KinetypeError::export(format!("finish zip archive: {e}")))?;
        buf.flush().context("flush zip archive")?;
        drop(buf);

        std::fs::rename(partial, archive).with_context(|| {
            format!("move '{}' to '{}'", partial.display(), archive.display())
        })?;
        tracing::debug!(archive = %archive.display(), "wrote frame archive");
        self.partial = None;
        Ok(())
    }

    fn abort(&mut self) {
        self.writer = None;
        if let Some(partial) = self.partial.take()
            && let Err(e) = std::fs::remove_file(&partial)
        {
            tracing::warn!(path = %partial.display(), error = %e, "failed to remove partial archive");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/sink.rs"]
mod tests;
