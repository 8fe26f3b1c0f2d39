//! `sumie` is a CPU 2D compositor for layered scenes: backgrounds,
//! sprites, vector shapes, and rich text with inline bracket markup,
//! rasterized with `tiny-skia`.
//!
//! The central object is the [`Renderer`], which owns a raster buffer
//! and runs at most one asynchronous render at a time. Each render
//! receives a [`Surface`], the stateful drawing API; starting a new
//! render supersedes the previous one cooperatively, so a stale render
//! stops at its next drawing call instead of corrupting the buffer.
//!
//! ```no_run
//! use std::rc::Rc;
//! use sumie::{Color, FontStore, Paint, RectArgs, Renderer};
//!
//! let mut fonts = FontStore::new();
//! fonts.load_system_fonts();
//! let renderer = Renderer::new(1280, 720, Rc::new(fonts));
//!
//! let completed = pollster::block_on(renderer.render(true, |surface| async move {
//!     surface.draw_rect(RectArgs {
//!         w: 1280.,
//!         h: 720.,
//!         fill: Some(Paint::Solid(Color::rgb(24, 24, 32))),
//!         ..RectArgs::default()
//!     })
//! }))?;
//! assert!(completed);
//! # Ok::<(), sumie::Error>(())
//! ```

mod asset;
mod color;
mod error;
mod fonts;
mod paint;
mod path;
mod renderer;
mod scene;
mod surface;
mod text;

pub use asset::{
    Asset, AssetResolver, DirAssets, DirSaver, FileSaver, ImageHandle,
};
pub use color::Color;
pub use error::{Error, Result};
pub use fonts::FontStore;
pub use paint::{Composition, GradientStop, Outline, Paint, Repetition};
pub use path::{Path, PathBuilder, PathSegment};
pub use renderer::Renderer;
pub use scene::{ColorBackground, ImageBackground, Renderable, TransparentBackground};
pub use surface::{ImageArgs, ImageSource, PathArgs, RectArgs, Shadow, Surface, TextArgs};
pub use text::{
    layout::{Align, ItemKind, Paragraph, RenderItem, TextBackend, TextMetrics},
    same_style,
    tokenizer::{tokenize, Token},
    StyleRef, TextStyle,
};

pub use glam::Vec2;
