//! Rich text: inline-markup tokenizing, style commands, layout,
//! and two-pass rendering.

use std::rc::Rc;

use crate::Color;

pub mod commands;
pub mod layout;
pub mod tokenizer;

/// The style of a run of text.
///
/// Styles are immutable once built: the layout engine shares them
/// between render items through [`StyleRef`] handles and compares them
/// by identity, so the backend state is only reapplied when the handle
/// actually changes. Style commands therefore always build a new style
/// instead of mutating one in place.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_family: String,
    pub font_size: f32,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub fill_color: Color,
    pub stroke_color: Option<Color>,
    pub stroke_width: f32,
    pub letter_spacing: f32,
    /// Multiplier applied to the resolved line height at explicit newlines.
    pub line_spacing: f32,
    /// Opacity in `[0, 1]`.
    pub alpha: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: String::from("aller"),
            font_size: 20.,
            bold: false,
            italic: false,
            underline: false,
            strikethrough: false,
            fill_color: Color::BLACK,
            stroke_color: None,
            stroke_width: 0.,
            letter_spacing: 0.,
            line_spacing: 1.,
            alpha: 1.,
        }
    }
}

impl TextStyle {
    /// Whether the stroke pass draws anything for this style.
    pub fn has_stroke(&self) -> bool {
        self.stroke_width > 0. && self.stroke_color.is_some()
    }
}

/// A shared, immutable handle to a [`TextStyle`].
///
/// Identity (not deep equality) is what groups render items: two handles
/// to structurally equal styles are still "different" styles.
pub type StyleRef = Rc<TextStyle>;

/// Compares two style handles by identity.
pub fn same_style(a: &StyleRef, b: &StyleRef) -> bool {
    Rc::ptr_eq(a, b)
}
