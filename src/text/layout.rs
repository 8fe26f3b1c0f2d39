//! Layout of tokenized markup into positioned render items, and the
//! two-pass (stroke then fill) rendering of those items.

use crate::{Error, Result};

use super::{
    commands, same_style,
    tokenizer::{tokenize, Token},
    StyleRef, TextStyle,
};

/// Horizontal alignment of a line within `[x_start, x_end]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Measurement backend for layout.
///
/// [`FontStore`](crate::FontStore) is the production implementation;
/// tests substitute fixed metrics.
pub trait TextMetrics {
    /// Advance width of `ch` under `style`.
    fn char_width(&self, style: &StyleRef, ch: char) -> Result<f32>;

    /// Resolved line-box height of `style`, before the line-spacing
    /// multiplier.
    fn line_height(&self, style: &TextStyle) -> Result<f32>;
}

/// Glyph-drawing backend for [`Paragraph::render`].
///
/// All three operations are rendering primitives: a surface
/// implementation checks its cancellation flag in each of them.
pub trait TextBackend {
    /// Makes `style` the active text style for subsequent glyph calls.
    fn apply_text_style(&self, style: &StyleRef) -> Result<()>;

    /// Strokes one character's outline at a baseline position.
    fn stroke_char(&self, ch: char, x: f32, y: f32, width: f32) -> Result<()>;

    /// Fills one character (and its underline/strikethrough bars) at a
    /// baseline position.
    fn fill_char(&self, ch: char, x: f32, y: f32, width: f32) -> Result<()>;
}

/// One positioned, styled unit of text output.
#[derive(Debug, Clone)]
pub struct RenderItem {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: ItemKind,
}

#[derive(Debug, Clone)]
pub enum ItemKind {
    Character { ch: char, style: StyleRef },
    LineBreak,
}

impl RenderItem {
    fn is_character(&self) -> bool {
        matches!(self.kind, ItemKind::Character { .. })
    }
}

/// A paragraph of rich text, laid out and ready for rendering.
///
/// Built by interpreting markup tokens over an explicit style stack;
/// positions are finalized by [`align`](Paragraph::align), which runs
/// the vertical pass and per-line horizontal alignment.
pub struct Paragraph {
    items: Vec<RenderItem>,
}

impl Paragraph {
    /// Tokenizes and lays out `markup` with `base` as the root style.
    ///
    /// Fails on unknown commands and on mismatched or unclosed tags;
    /// malformed markup never renders partially.
    pub fn layout(markup: &str, base: StyleRef, metrics: &dyn TextMetrics) -> Result<Self> {
        let mut items = Vec::new();

        let mut style_stack: Vec<StyleRef> = Vec::new();
        let mut tag_stack: Vec<String> = Vec::new();
        let mut style = base;
        let mut tag = String::new();
        let mut style_height = metrics.line_height(&style)?;

        for token in tokenize(markup) {
            match token {
                Token::Open { name, argument } => {
                    let command = commands::lookup(&name)
                        .ok_or_else(|| Error::UnknownCommand(name.clone()))?;
                    let new_style = StyleRef::new(command(&style, argument.as_deref())?);

                    style_stack.push(std::mem::replace(&mut style, new_style));
                    tag_stack.push(std::mem::replace(&mut tag, name));
                    style_height = metrics.line_height(&style)?;
                }
                Token::Close { name } => {
                    if name != tag {
                        return Err(Error::MismatchedTag(name));
                    }
                    // Stacks are pushed in lockstep, so both pops succeed.
                    style = style_stack.pop().unwrap();
                    tag = tag_stack.pop().unwrap();
                    style_height = metrics.line_height(&style)?;
                }
                Token::Newline => items.push(RenderItem {
                    x: 0.,
                    y: 0.,
                    width: 0.,
                    height: style_height * style.line_spacing,
                    kind: ItemKind::LineBreak,
                }),
                Token::Text(run) => {
                    for ch in run.chars() {
                        items.push(RenderItem {
                            x: 0.,
                            y: 0.,
                            width: metrics.char_width(&style, ch)?,
                            height: style_height,
                            kind: ItemKind::Character {
                                ch,
                                style: style.clone(),
                            },
                        });
                    }
                }
            }
        }

        if !tag_stack.is_empty() {
            return Err(Error::MismatchedTag(tag));
        }

        Ok(Self { items })
    }

    /// The laid-out items, in input order.
    pub fn items(&self) -> &[RenderItem] {
        &self.items
    }

    /// Positions every item: the vertical pass stamps line `y`
    /// coordinates and inserts letter spacing between adjacent
    /// characters, finalizing each line's horizontal alignment as it
    /// ends. The trailing line (without a terminating newline) is
    /// flushed through the same alignment step.
    pub fn align(&mut self, alignment: Align, x_start: f32, x_end: f32, y_start: f32) {
        let mut y = y_start;
        let mut line_start = 0;
        let mut line_width = 0f32;
        let mut line_height = 0f32;

        for i in 0..self.items.len() {
            // Letter spacing goes strictly between adjacent characters:
            // the previous character widens by its own spacing, and only
            // when another character follows it on the same line.
            if i > line_start && self.items[i].is_character() && self.items[i - 1].is_character() {
                let spacing = match &self.items[i - 1].kind {
                    ItemKind::Character { style, .. } => style.letter_spacing,
                    ItemKind::LineBreak => 0.,
                };
                self.items[i - 1].width += spacing;
                line_width += spacing;
            }

            let item = &mut self.items[i];
            item.y = y;
            line_height = line_height.max(item.height);
            line_width += item.width;

            if !item.is_character() {
                Self::fix_line(
                    &mut self.items[line_start..=i],
                    alignment,
                    x_start,
                    x_end,
                    line_width,
                );
                y += line_height;
                line_width = 0.;
                line_height = 0.;
                line_start = i + 1;
            }
        }

        Self::fix_line(
            &mut self.items[line_start..],
            alignment,
            x_start,
            x_end,
            line_width,
        );
    }

    fn fix_line(line: &mut [RenderItem], alignment: Align, x_start: f32, x_end: f32, width: f32) {
        let mut x = match alignment {
            Align::Left => x_start,
            Align::Center => x_start + (x_end - x_start) / 2. - width / 2.,
            Align::Right => x_end - width,
        };
        for item in line {
            item.x = x;
            x += item.width;
        }
    }

    /// Renders the paragraph: one full pass drawing every stroke, then
    /// one full pass drawing every fill, so no character's fill is
    /// covered by a neighbor's stroke.
    ///
    /// Each pass tracks its own last-applied style and only reapplies
    /// backend state when the item's style differs by identity.
    pub fn render(&self, backend: &impl TextBackend) -> Result<()> {
        let mut current: Option<&StyleRef> = None;
        for item in &self.items {
            let (ch, style) = match &item.kind {
                ItemKind::Character { ch, style } => (*ch, style),
                ItemKind::LineBreak => continue,
            };
            if !matches!(current, Some(c) if same_style(c, style)) {
                backend.apply_text_style(style)?;
                current = Some(style);
            }
            if style.has_stroke() {
                backend.stroke_char(ch, item.x, item.y, item.width)?;
            }
        }

        let mut current: Option<&StyleRef> = None;
        for item in &self.items {
            let (ch, style) = match &item.kind {
                ItemKind::Character { ch, style } => (*ch, style),
                ItemKind::LineBreak => continue,
            };
            if !matches!(current, Some(c) if same_style(c, style)) {
                backend.apply_text_style(style)?;
                current = Some(style);
            }
            backend.fill_char(ch, item.x, item.y, item.width)?;
        }

        Ok(())
    }
}
