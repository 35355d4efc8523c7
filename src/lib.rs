//! Kinetype renders per-character kinetic typography onto a raster surface.
//!
//! A frame is a pure function of `(text, progress, effect, style)`:
//!
//! - [`layout_text`] places every character from shaped prefix widths
//! - [`local_progress`] staggers the global progress into a reveal wave in reading order
//! - an [`EffectKind`] draws each character from its anchor and local progress
//! - [`render_frame`] composes the three onto any [`Surface`]
//!
//! The same entry point drives live playback ([`Playback`]) and deterministic export of a PNG
//! sequence ([`export_sequence`] into a [`FrameSink`] such as [`ZipSink`]).
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod config;
pub(crate) mod effects;
pub(crate) mod export;
pub(crate) mod layout;
pub(crate) mod playback;
pub(crate) mod render;
pub(crate) mod surface;

pub use crate::foundation::core::{
    Affine, Canvas, HorizontalAlign, Point, Rect, Rgba8, Rgba8Premul, StyleParams, Vec2,
};
pub use crate::foundation::error::{KinetypeError, KinetypeResult};
pub use crate::foundation::math::Rng64;

pub use crate::animation::ease::Ease;
pub use crate::animation::stagger::{ACTIVE_DURATION, STAGGER_FRACTION, local_progress, start_delay};
pub use crate::config::animation::AnimationConfig;
pub use crate::effects::catalog::{EffectDescriptor, EffectKind, catalog};
pub use crate::effects::transforms::CharFrame;
pub use crate::export::exporter::{
    ExportJob, ExportObserver, ExportProgress, ExportReport, ExportSettings, IgnoreProgress,
    MAX_TOTAL_FRAMES, export_sequence,
};
pub use crate::export::naming::{
    FALLBACK_BASE_NAME, base_name_for, encode_png, frame_file_name, validate_base_name,
};
pub use crate::export::sink::{FrameSink, InMemorySink, PngDirSink, SinkConfig, ZipSink};
pub use crate::layout::engine::{CharLayout, LineLayout, TextLayout, layout_text, split_lines};
pub use crate::playback::controller::{Playback, PlaybackState};
pub use crate::render::frame::{render_effect_frame, render_frame};
pub use crate::surface::cpu::CpuSurface;
pub use crate::surface::font::{FontSource, LoadedFont};
pub use crate::surface::record::{DrawCmd, FixedMetrics, RecordingSurface};
pub use crate::surface::state::{DrawState, FontSpec, StateStack};
pub use crate::surface::{FrameRGBA, RasterSurface, Surface};
