//! Font loading and text measurement.
//!
//! Measurement memoization lives here, scoped to the store rather than
//! to process-wide globals: advance widths are keyed by (style
//! identity, character) and line heights by (family, size), so
//! identical style handles always hit cache.

use std::{cell::RefCell, path::Path, rc::Rc};

use ahash::AHashMap;
use fontdb::{Family, Query, Stretch, Weight};
use owned_ttf_parser::{AsFaceRef, OwnedFace, OutlineBuilder};

use crate::{
    text::{layout::TextMetrics, StyleRef, TextStyle},
    Error, Result,
};

/// A font database plus parsed-face and measurement caches.
pub struct FontStore {
    db: fontdb::Database,
    faces: RefCell<AHashMap<fontdb::ID, Rc<FaceHandle>>>,
    widths: RefCell<AHashMap<(usize, char), f32>>,
    heights: RefCell<AHashMap<(String, u32), f32>>,
}

impl Default for FontStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FontStore {
    pub fn new() -> Self {
        Self {
            db: fontdb::Database::new(),
            faces: RefCell::new(AHashMap::new()),
            widths: RefCell::new(AHashMap::new()),
            heights: RefCell::new(AHashMap::new()),
        }
    }

    /// Registers a font from its raw data.
    pub fn load_font_data(&mut self, data: Vec<u8>) {
        self.db.load_font_data(data);
    }

    /// Registers every font found under `dir`.
    pub fn load_fonts_dir(&mut self, dir: impl AsRef<Path>) {
        self.db.load_fonts_dir(dir);
    }

    /// Registers the fonts installed on the system.
    pub fn load_system_fonts(&mut self) {
        self.db.load_system_fonts();
    }

    /// Resolves the face for a style, falling back to any loaded face
    /// when the family has no match.
    pub(crate) fn face_for_style(&self, style: &TextStyle) -> Result<Rc<FaceHandle>> {
        let query = Query {
            families: &[Family::Name(&style.font_family), Family::SansSerif],
            weight: if style.bold {
                Weight::BOLD
            } else {
                Weight::NORMAL
            },
            stretch: Stretch::Normal,
            style: if style.italic {
                fontdb::Style::Italic
            } else {
                fontdb::Style::Normal
            },
        };

        let id = self
            .db
            .query(&query)
            .or_else(|| self.db.faces().first().map(|face| face.id))
            .ok_or_else(|| Error::FontNotFound(style.font_family.clone()))?;

        if let Some(face) = self.faces.borrow().get(&id) {
            return Ok(face.clone());
        }

        let face = self
            .db
            .with_face_data(id, |data, index| OwnedFace::from_vec(data.to_vec(), index))
            .ok_or(Error::Backend("font face has no data"))?
            .map_err(|_| Error::Backend("malformed font"))?;

        let handle = Rc::new(FaceHandle {
            face,
            paths: RefCell::new(AHashMap::new()),
        });
        self.faces.borrow_mut().insert(id, handle.clone());
        Ok(handle)
    }
}

impl TextMetrics for FontStore {
    fn char_width(&self, style: &StyleRef, ch: char) -> Result<f32> {
        // Keyed by pointer identity; styles are immutable and shared,
        // so identical handles always measure identically.
        let key = (Rc::as_ptr(style) as usize, ch);
        if let Some(width) = self.widths.borrow().get(&key) {
            return Ok(*width);
        }

        let face = self.face_for_style(style)?;
        let width = face.advance(ch, style.font_size);
        self.widths.borrow_mut().insert(key, width);
        Ok(width)
    }

    fn line_height(&self, style: &TextStyle) -> Result<f32> {
        let key = (style.font_family.clone(), style.font_size.to_bits());
        if let Some(height) = self.heights.borrow().get(&key) {
            return Ok(*height);
        }

        let face = self.face_for_style(style)?;
        let height = face.line_height(style.font_size);
        self.heights.borrow_mut().insert(key, height);
        Ok(height)
    }
}

/// A parsed font face with size-scaled metric helpers.
pub(crate) struct FaceHandle {
    face: OwnedFace,
    paths: RefCell<AHashMap<char, Option<tiny_skia::Path>>>,
}

impl FaceHandle {
    /// Scale factor from font units to pixels at `size`.
    pub fn scale(&self, size: f32) -> f32 {
        size / self.face.as_face_ref().units_per_em() as f32
    }

    /// Advance width of `ch` at `size`, 0 for glyphs the face lacks.
    pub fn advance(&self, ch: char, size: f32) -> f32 {
        let face = self.face.as_face_ref();
        face.glyph_index(ch)
            .and_then(|glyph| face.glyph_hor_advance(glyph))
            .unwrap_or(0) as f32
            * self.scale(size)
    }

    /// Line-box height (ascent - descent + line gap) at `size`.
    pub fn line_height(&self, size: f32) -> f32 {
        let face = self.face.as_face_ref();
        (face.ascender() as f32 - face.descender() as f32 + face.line_gap() as f32)
            * self.scale(size)
    }

    /// The glyph outline for `ch` in font units (y up), or `None` for
    /// blank and missing glyphs.
    pub fn glyph_path(&self, ch: char) -> Option<tiny_skia::Path> {
        if let Some(path) = self.paths.borrow().get(&ch) {
            return path.clone();
        }

        let path = self.outline_glyph(ch);
        self.paths.borrow_mut().insert(ch, path.clone());
        path
    }

    fn outline_glyph(&self, ch: char) -> Option<tiny_skia::Path> {
        let face = self.face.as_face_ref();
        let glyph = face.glyph_index(ch)?;

        let mut sink = OutlineSink {
            builder: tiny_skia::PathBuilder::new(),
        };
        face.outline_glyph(glyph, &mut sink)?;
        sink.builder.finish()
    }

    /// Underline bar (offset from baseline, thickness) at `size`.
    pub fn underline(&self, size: f32) -> (f32, f32) {
        let scale = self.scale(size);
        match self.face.as_face_ref().underline_metrics() {
            Some(metrics) => (
                metrics.position as f32 * scale,
                metrics.thickness as f32 * scale,
            ),
            None => (-0.1 * size, 0.05 * size),
        }
    }

    /// Strikethrough bar (offset from baseline, thickness) at `size`.
    pub fn strikeout(&self, size: f32) -> (f32, f32) {
        let scale = self.scale(size);
        match self.face.as_face_ref().strikeout_metrics() {
            Some(metrics) => (
                metrics.position as f32 * scale,
                metrics.thickness as f32 * scale,
            ),
            None => (0.3 * size, 0.05 * size),
        }
    }
}

struct OutlineSink {
    builder: tiny_skia::PathBuilder,
}

impl OutlineBuilder for OutlineSink {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}
