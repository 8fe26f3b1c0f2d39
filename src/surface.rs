//! The per-render drawing surface.
//!
//! A [`Surface`] is created fresh for every render and wraps the
//! renderer's raster buffer. Every drawing primitive first checks the
//! surface's cancellation flag: once a render has been superseded, the
//! next primitive call fails with [`Error::Aborted`] instead of racing
//! the new render for the buffer.

use std::{
    cell::{Cell, Ref, RefCell},
    rc::Rc,
};

use glam::Vec2;
use tiny_skia::{
    BlendMode, FillRule, FilterQuality, LineJoin, Pixmap, PixmapPaint, Rect, Stroke, Transform,
};

use crate::{
    asset::{Asset, ImageHandle},
    fonts::{FaceHandle, FontStore},
    paint::{convert_composition, Composition, GradientStop, Outline, Paint, Repetition},
    path::{Path, PathSegment},
    renderer::Renderer,
    text::{
        layout::{Align, TextBackend},
        StyleRef, TextStyle,
    },
    Color, Error, Result,
};

/// The stateful drawing API over one raster target.
///
/// Cheap to clone; clones share the same target and cancellation flag.
#[derive(Clone)]
pub struct Surface {
    target: Rc<RefCell<Pixmap>>,
    aborted: Rc<Cell<bool>>,
    fonts: Rc<FontStore>,
    hq: bool,
    preview: bool,
    state: Rc<RefCell<DrawState>>,
}

struct DrawState {
    transform: Transform,
    text: Option<TextState>,
}

struct TextState {
    style: StyleRef,
    face: Rc<FaceHandle>,
}

/// What to draw in [`Surface::draw_image`].
#[derive(Clone, Copy)]
pub enum ImageSource<'a> {
    /// A resolved asset; the missing variant draws nothing.
    Asset(&'a Asset),
    /// A decoded image.
    Image(&'a ImageHandle),
    /// Another renderer's buffer.
    Layer(&'a Renderer),
}

impl<'a> From<&'a Asset> for ImageSource<'a> {
    fn from(asset: &'a Asset) -> Self {
        ImageSource::Asset(asset)
    }
}

impl<'a> From<&'a ImageHandle> for ImageSource<'a> {
    fn from(image: &'a ImageHandle) -> Self {
        ImageSource::Image(image)
    }
}

impl<'a> From<&'a Renderer> for ImageSource<'a> {
    fn from(renderer: &'a Renderer) -> Self {
        ImageSource::Layer(renderer)
    }
}

/// Parameters for [`Surface::draw_image`]. Width and height default to
/// the image's natural size; opacity is a percentage.
pub struct ImageArgs<'a> {
    image: ImageSource<'a>,
    x: f32,
    y: f32,
    w: Option<f32>,
    h: Option<f32>,
    flip: bool,
    opacity: f32,
    shadow: Option<Shadow>,
}

impl<'a> ImageArgs<'a> {
    pub fn new(image: impl Into<ImageSource<'a>>) -> Self {
        Self {
            image: image.into(),
            x: 0.,
            y: 0.,
            w: None,
            h: None,
            flip: false,
            opacity: 100.,
            shadow: None,
        }
    }

    pub fn pos(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn size(mut self, w: f32, h: f32) -> Self {
        self.w = Some(w);
        self.h = Some(h);
        self
    }

    pub fn flip(mut self, flip: bool) -> Self {
        self.flip = flip;
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn shadow(mut self, shadow: Shadow) -> Self {
        self.shadow = Some(shadow);
        self
    }
}

/// A drop shadow behind an image.
#[derive(Debug, Clone, Copy)]
pub struct Shadow {
    pub color: Color,
    pub blur: f32,
    pub offset: Vec2,
}

/// Parameters for [`Surface::draw_rect`].
#[derive(Default)]
pub struct RectArgs {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub fill: Option<Paint>,
    pub outline: Option<Outline>,
    pub composition: Option<Composition>,
}

/// Parameters for [`Surface::draw_path`].
pub struct PathArgs<'a> {
    pub path: &'a Path,
    pub fill: Option<Paint>,
    pub outline: Option<Outline>,
}

/// Parameters for the single-style, single-line [`Surface::draw_text`].
pub struct TextArgs<'a> {
    pub text: &'a str,
    pub x: f32,
    pub y: f32,
    pub align: Align,
    pub family: &'a str,
    pub size: f32,
    pub fill: Option<Paint>,
    pub outline: Option<Outline>,
}

impl Default for TextArgs<'_> {
    fn default() -> Self {
        Self {
            text: "",
            x: 0.,
            y: 0.,
            align: Align::Left,
            family: "",
            size: 20.,
            fill: None,
            outline: None,
        }
    }
}

impl Surface {
    pub(crate) fn new(
        target: Rc<RefCell<Pixmap>>,
        aborted: Rc<Cell<bool>>,
        fonts: Rc<FontStore>,
        hq: bool,
        preview: bool,
    ) -> Self {
        Self {
            target,
            aborted,
            fonts,
            hq,
            preview,
            state: Rc::new(RefCell::new(DrawState {
                transform: Transform::identity(),
                text: None,
            })),
        }
    }

    /// Whether this render resolves full-quality assets.
    pub fn hq(&self) -> bool {
        self.hq
    }

    /// Whether this surface draws the interactive preview (as opposed
    /// to an export buffer).
    pub fn is_preview(&self) -> bool {
        self.preview
    }

    pub fn width(&self) -> u32 {
        self.target.borrow().width()
    }

    pub fn height(&self) -> u32 {
        self.target.borrow().height()
    }

    /// Permanently marks this surface as superseded. Idempotent; every
    /// subsequent primitive call fails with [`Error::Aborted`].
    pub fn abort(&self) {
        self.aborted.set(true);
    }

    fn ensure_live(&self) -> Result<()> {
        if self.aborted.get() {
            Err(Error::Aborted)
        } else {
            Ok(())
        }
    }

    /// Draws an image, centered via a translate to its midpoint so that
    /// the optional horizontal mirror is independent of the image
    /// origin. A missing asset is a silent no-op.
    pub fn draw_image(&self, args: ImageArgs) -> Result<()> {
        self.ensure_live()?;

        let layer_ref: Ref<Pixmap>;
        let source: &Pixmap = match args.image {
            ImageSource::Asset(Asset::Missing) => {
                log::debug!("skipping draw of a missing asset");
                return Ok(());
            }
            ImageSource::Asset(Asset::Image(image)) => image.pixmap(),
            ImageSource::Image(image) => image.pixmap(),
            ImageSource::Layer(renderer) => {
                if Rc::ptr_eq(renderer.buffer(), &self.target) {
                    return Err(Error::Backend("cannot draw a renderer onto itself"));
                }
                layer_ref = renderer.buffer().borrow();
                &layer_ref
            }
        };

        let natural_w = source.width() as f32;
        let natural_h = source.height() as f32;
        let w = args.w.unwrap_or(natural_w);
        let h = args.h.unwrap_or(natural_h);

        let paint = PixmapPaint {
            opacity: if args.opacity < 100. {
                (args.opacity / 100.).clamp(0., 1.)
            } else {
                1.
            },
            blend_mode: BlendMode::SourceOver,
            quality: if self.hq {
                FilterQuality::Bilinear
            } else {
                FilterQuality::Nearest
            },
        };

        let transform = |x: f32, y: f32| {
            let mut ts = self.state.borrow().transform;
            ts = ts.pre_translate(x + w / 2., y + h / 2.);
            if args.flip {
                ts = ts.pre_scale(-1., 1.);
            }
            ts = ts.pre_scale(w / natural_w, h / natural_h);
            ts.pre_translate(-natural_w / 2., -natural_h / 2.)
        };

        let mut target = self.target.borrow_mut();

        if let Some(shadow) = &args.shadow {
            if shadow.blur > 0. {
                log::debug!("shadow blur is not reproduced by the cpu backend");
            }
            let silhouette = tint_silhouette(source, shadow.color);
            target.draw_pixmap(
                0,
                0,
                silhouette.as_ref(),
                &paint,
                transform(args.x + shadow.offset.x, args.y + shadow.offset.y),
                None,
            );
        }

        target.draw_pixmap(0, 0, source.as_ref(), &paint, transform(args.x, args.y), None);
        Ok(())
    }

    /// Draws a rectangle, fill before outline so the outline stays
    /// crisp on top.
    pub fn draw_rect(&self, args: RectArgs) -> Result<()> {
        self.ensure_live()?;

        let rect = Rect::from_xywh(args.x, args.y, args.w, args.h)
            .ok_or(Error::Backend("invalid rectangle"))?;
        let path = tiny_skia::PathBuilder::from_rect(rect);
        let blend = args
            .composition
            .map(convert_composition)
            .unwrap_or(BlendMode::SourceOver);

        if let Some(fill) = &args.fill {
            self.fill_raster_path(&path, fill, blend, 1.)?;
        }
        if let Some(outline) = &args.outline {
            self.stroke_raster_path(&path, outline, blend, 1., LineJoin::Miter)?;
        }
        Ok(())
    }

    /// Draws a vector path, fill before outline.
    pub fn draw_path(&self, args: PathArgs) -> Result<()> {
        self.ensure_live()?;

        let path = convert_path(args.path)?;
        if let Some(fill) = &args.fill {
            self.fill_raster_path(&path, fill, BlendMode::SourceOver, 1.)?;
        }
        if let Some(outline) = &args.outline {
            self.stroke_raster_path(&path, outline, BlendMode::SourceOver, 1., LineJoin::Miter)?;
        }
        Ok(())
    }

    /// Draws a single-style, single-line label. For rich multi-style
    /// markup, lay out a [`Paragraph`](crate::Paragraph) instead.
    pub fn draw_text(&self, args: TextArgs) -> Result<()> {
        self.ensure_live()?;

        let style = label_style(args.family, args.size);
        let face = self.fonts.face_for_style(&style)?;

        let width: f32 = args
            .text
            .chars()
            .map(|ch| face.advance(ch, args.size))
            .sum();
        let mut x = match args.align {
            Align::Left => args.x,
            Align::Center => args.x - width / 2.,
            Align::Right => args.x - width,
        };

        let start_x = x;
        if let Some(outline) = &args.outline {
            for ch in args.text.chars() {
                if let Some(glyph) = face.glyph_path(ch) {
                    let ts = self.glyph_transform(&face, args.size, x, args.y);
                    self.stroke_raster_path_at(&glyph, outline, ts, 1., LineJoin::Round)?;
                }
                x += face.advance(ch, args.size);
            }
        }

        if let Some(fill) = &args.fill {
            let mut x = start_x;
            for ch in args.text.chars() {
                if let Some(glyph) = face.glyph_path(ch) {
                    let ts = self.glyph_transform(&face, args.size, x, args.y);
                    self.fill_raster_path_at(&glyph, fill, BlendMode::SourceOver, ts, 1.)?;
                }
                x += face.advance(ch, args.size);
            }
        }
        Ok(())
    }

    /// Measures the advance width of a single-line label.
    pub fn measure_text(&self, text: &str, family: &str, size: f32) -> Result<f32> {
        self.ensure_live()?;

        let face = self.fonts.face_for_style(&label_style(family, size))?;
        Ok(text.chars().map(|ch| face.advance(ch, size)).sum())
    }

    /// Builds a repeating-pattern paint from an image or another
    /// renderer's current buffer (snapshotted).
    pub fn pattern_from(&self, image: ImageSource, repetition: Repetition) -> Paint {
        match image {
            ImageSource::Asset(Asset::Missing) => Paint::Solid(Color::TRANSPARENT),
            ImageSource::Asset(Asset::Image(handle)) => Paint::Pattern {
                image: handle.clone(),
                repetition,
            },
            ImageSource::Image(handle) => Paint::Pattern {
                image: handle.clone(),
                repetition,
            },
            ImageSource::Layer(renderer) => Paint::Pattern {
                image: ImageHandle::new(renderer.buffer().borrow().clone()),
                repetition,
            },
        }
    }

    /// Builds a linear-gradient paint between two points.
    pub fn linear_gradient(
        &self,
        start: Vec2,
        end: Vec2,
        stops: impl IntoIterator<Item = GradientStop>,
    ) -> Paint {
        Paint::LinearGradient {
            start,
            end,
            stops: stops.into_iter().collect(),
        }
    }

    /// Applies a scoped coordinate transform: `render` runs with the
    /// adjusted transform, and the previous transform is restored
    /// afterwards even if `render` fails.
    pub fn with_transform<R>(
        &self,
        transform: impl FnOnce(Transform) -> Transform,
        render: impl FnOnce(&Surface) -> Result<R>,
    ) -> Result<R> {
        self.ensure_live()?;

        let saved = self.state.borrow().transform;
        self.state.borrow_mut().transform = transform(saved);
        let result = render(self);
        self.state.borrow_mut().transform = saved;
        result
    }

    fn glyph_transform(&self, face: &FaceHandle, size: f32, x: f32, y: f32) -> Transform {
        let scale = face.scale(size);
        self.state
            .borrow()
            .transform
            .pre_translate(x, y)
            .pre_scale(scale, -scale)
    }

    fn fill_raster_path(
        &self,
        path: &tiny_skia::Path,
        paint: &Paint,
        blend: BlendMode,
        alpha: f32,
    ) -> Result<()> {
        let transform = self.state.borrow().transform;
        self.fill_raster_path_at(path, paint, blend, transform, alpha)
    }

    fn fill_raster_path_at(
        &self,
        path: &tiny_skia::Path,
        paint: &Paint,
        blend: BlendMode,
        transform: Transform,
        alpha: f32,
    ) -> Result<()> {
        let skia_paint = raster_paint(paint, blend, alpha)?;
        self.target
            .borrow_mut()
            .fill_path(path, &skia_paint, FillRule::Winding, transform, None);
        Ok(())
    }

    fn stroke_raster_path(
        &self,
        path: &tiny_skia::Path,
        outline: &Outline,
        blend: BlendMode,
        alpha: f32,
        line_join: LineJoin,
    ) -> Result<()> {
        let transform = self.state.borrow().transform;
        self.stroke_raster_path_with(path, outline, blend, transform, alpha, line_join)
    }

    fn stroke_raster_path_at(
        &self,
        path: &tiny_skia::Path,
        outline: &Outline,
        transform: Transform,
        alpha: f32,
        line_join: LineJoin,
    ) -> Result<()> {
        self.stroke_raster_path_with(
            path,
            outline,
            BlendMode::SourceOver,
            transform,
            alpha,
            line_join,
        )
    }

    fn stroke_raster_path_with(
        &self,
        path: &tiny_skia::Path,
        outline: &Outline,
        blend: BlendMode,
        transform: Transform,
        alpha: f32,
        line_join: LineJoin,
    ) -> Result<()> {
        let skia_paint = raster_paint(&outline.paint, blend, alpha)?;
        let stroke = Stroke {
            width: outline.width,
            line_join,
            ..Stroke::default()
        };
        self.target
            .borrow_mut()
            .stroke_path(path, &skia_paint, &stroke, transform, None);
        Ok(())
    }

    fn text_state(&self) -> Result<(StyleRef, Rc<FaceHandle>)> {
        match &self.state.borrow().text {
            Some(text) => Ok((text.style.clone(), text.face.clone())),
            None => Err(Error::Backend("no text style applied")),
        }
    }
}

impl TextBackend for Surface {
    fn apply_text_style(&self, style: &StyleRef) -> Result<()> {
        self.ensure_live()?;

        let face = self.fonts.face_for_style(style)?;
        self.state.borrow_mut().text = Some(TextState {
            style: style.clone(),
            face,
        });
        Ok(())
    }

    fn stroke_char(&self, ch: char, x: f32, y: f32, _width: f32) -> Result<()> {
        self.ensure_live()?;

        let (style, face) = self.text_state()?;
        let Some(color) = style.stroke_color else {
            return Ok(());
        };
        if let Some(glyph) = face.glyph_path(ch) {
            let outline = Outline::new(color, style.stroke_width);
            let ts = self.glyph_transform(&face, style.font_size, x, y);
            self.stroke_raster_path_at(&glyph, &outline, ts, style.alpha, LineJoin::Round)?;
        }
        Ok(())
    }

    fn fill_char(&self, ch: char, x: f32, y: f32, width: f32) -> Result<()> {
        self.ensure_live()?;

        let (style, face) = self.text_state()?;
        let paint = Paint::Solid(style.fill_color.with_alpha_factor(style.alpha));

        if let Some(glyph) = face.glyph_path(ch) {
            let ts = self.glyph_transform(&face, style.font_size, x, y);
            self.fill_raster_path_at(&glyph, &paint, BlendMode::SourceOver, ts, 1.)?;
        }

        // Decoration bars span the character's full (spacing-widened)
        // advance so adjacent underlines join up.
        if style.underline {
            let (position, thickness) = face.underline(style.font_size);
            self.fill_bar(x, y - position - thickness / 2., width, thickness, &paint)?;
        }
        if style.strikethrough {
            let (position, thickness) = face.strikeout(style.font_size);
            self.fill_bar(x, y - position - thickness / 2., width, thickness, &paint)?;
        }
        Ok(())
    }
}

impl Surface {
    fn fill_bar(&self, x: f32, y: f32, w: f32, h: f32, paint: &Paint) -> Result<()> {
        let Some(rect) = Rect::from_xywh(x, y, w, h) else {
            return Ok(());
        };
        let path = tiny_skia::PathBuilder::from_rect(rect);
        self.fill_raster_path(&path, paint, BlendMode::SourceOver, 1.)
    }
}

fn label_style(family: &str, size: f32) -> TextStyle {
    let mut style = TextStyle {
        font_size: size,
        ..TextStyle::default()
    };
    if !family.is_empty() {
        style.font_family = family.to_owned();
    }
    style
}

fn raster_paint<'a>(
    paint: &'a Paint,
    blend: BlendMode,
    alpha: f32,
) -> Result<tiny_skia::Paint<'a>> {
    let mut skia_paint = tiny_skia::Paint {
        blend_mode: blend,
        anti_alias: true,
        ..tiny_skia::Paint::default()
    };
    skia_paint.shader = match paint {
        Paint::Solid(color) if alpha < 1. => {
            tiny_skia::Shader::SolidColor(crate::paint::convert_color(
                color.with_alpha_factor(alpha),
            ))
        }
        _ => paint.to_shader()?,
    };
    Ok(skia_paint)
}

fn convert_path(path: &Path) -> Result<tiny_skia::Path> {
    let mut builder = tiny_skia::PathBuilder::new();
    for segment in path.segments() {
        match segment {
            PathSegment::MoveTo(pos) => builder.move_to(pos.x, pos.y),
            PathSegment::LineTo(pos) => builder.line_to(pos.x, pos.y),
            PathSegment::QuadTo { control, end } => {
                builder.quad_to(control.x, control.y, end.x, end.y)
            }
            PathSegment::CubicTo {
                control1,
                control2,
                end,
            } => builder.cubic_to(control1.x, control1.y, control2.x, control2.y, end.x, end.y),
            PathSegment::Close => builder.close(),
        }
    }
    builder.finish().ok_or(Error::Backend("invalid path"))
}

fn tint_silhouette(source: &Pixmap, color: Color) -> Pixmap {
    let mut data = Vec::with_capacity(source.data().len());
    for pixel in source.pixels() {
        let alpha = (pixel.alpha() as u16 * color.alpha() as u16 + 127) / 255;
        let premultiply = |channel: u8| ((channel as u16 * alpha + 127) / 255) as u8;
        data.extend([
            premultiply(color.red()),
            premultiply(color.green()),
            premultiply(color.blue()),
            alpha as u8,
        ]);
    }

    let size = tiny_skia_path::IntSize::from_wh(source.width(), source.height())
        .expect("source pixmap is never empty");
    Pixmap::from_vec(data, size).expect("silhouette matches source dimensions")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FontStore;

    fn test_surface(size: u32) -> Surface {
        let target = Rc::new(RefCell::new(Pixmap::new(size, size).unwrap()));
        Surface::new(
            target,
            Rc::new(Cell::new(false)),
            Rc::new(FontStore::new()),
            true,
            true,
        )
    }

    fn full_rect(surface: &Surface, color: Color) -> RectArgs {
        RectArgs {
            w: surface.width() as f32,
            h: surface.height() as f32,
            fill: Some(Paint::Solid(color)),
            ..RectArgs::default()
        }
    }

    fn pixel(surface: &Surface, x: u32, y: u32) -> [u8; 4] {
        let target = surface.target.borrow();
        let p = target.pixel(x, y).unwrap();
        [p.red(), p.green(), p.blue(), p.alpha()]
    }

    #[test]
    fn abort_fails_every_primitive() {
        let surface = test_surface(4);
        surface.abort();
        surface.abort();

        assert!(matches!(
            surface.draw_rect(full_rect(&surface, Color::BLACK)),
            Err(Error::Aborted)
        ));
        assert!(matches!(
            surface.draw_image(ImageArgs::new(&Asset::Missing)),
            Err(Error::Aborted)
        ));
        assert!(matches!(surface.measure_text("x", "", 20.), Err(Error::Aborted)));
    }

    #[test]
    fn missing_asset_is_a_true_noop() {
        let surface = test_surface(4);
        surface
            .draw_rect(full_rect(&surface, Color::rgb(200, 10, 10)))
            .unwrap();

        let before = surface.target.borrow().data().to_vec();
        surface
            .draw_image(ImageArgs::new(&Asset::Missing).pos(1., 1.))
            .unwrap();
        let after = surface.target.borrow().data().to_vec();

        assert_eq!(before, after);
    }

    #[test]
    fn rect_fill_covers_pixels() {
        let surface = test_surface(4);
        surface
            .draw_rect(full_rect(&surface, Color::rgb(0, 0, 255)))
            .unwrap();

        assert_eq!(pixel(&surface, 2, 2), [0, 0, 255, 255]);
    }

    #[test]
    fn image_draw_scales_to_requested_size() {
        let surface = test_surface(4);
        let image = ImageHandle::from_rgba8(1, 1, vec![0, 255, 0, 255]).unwrap();

        surface
            .draw_image(ImageArgs::new(&image).size(4., 4.))
            .unwrap();

        assert_eq!(pixel(&surface, 0, 0), [0, 255, 0, 255]);
        assert_eq!(pixel(&surface, 3, 3), [0, 255, 0, 255]);
    }

    #[test]
    fn transform_is_restored_after_errors() {
        let surface = test_surface(4);

        let result: Result<()> = surface.with_transform(
            |ts| ts.pre_translate(2., 2.),
            |_| Err(Error::Backend("boom")),
        );
        assert!(result.is_err());

        // A subsequent draw is not translated.
        surface
            .draw_rect(RectArgs {
                w: 1.,
                h: 1.,
                fill: Some(Paint::Solid(Color::WHITE)),
                ..RectArgs::default()
            })
            .unwrap();
        assert_eq!(pixel(&surface, 0, 0), [255, 255, 255, 255]);
    }

    #[test]
    fn scoped_transform_offsets_draws() {
        let surface = test_surface(4);

        surface
            .with_transform(
                |ts| ts.pre_translate(2., 2.),
                |surface| {
                    surface.draw_rect(RectArgs {
                        w: 1.,
                        h: 1.,
                        fill: Some(Paint::Solid(Color::WHITE)),
                        ..RectArgs::default()
                    })
                },
            )
            .unwrap();

        assert_eq!(pixel(&surface, 2, 2), [255, 255, 255, 255]);
        assert_eq!(pixel(&surface, 0, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn path_fill_respects_geometry() {
        let surface = test_surface(4);
        let triangle = Path::builder()
            .move_to(Vec2::new(0., 0.))
            .line_to(Vec2::new(4., 0.))
            .line_to(Vec2::new(0., 4.))
            .close();

        surface
            .draw_path(PathArgs {
                path: &triangle,
                fill: Some(Paint::Solid(Color::rgb(255, 0, 0))),
                outline: None,
            })
            .unwrap();

        assert_eq!(pixel(&surface, 0, 0), [255, 0, 0, 255]);
        assert_eq!(pixel(&surface, 3, 3), [0, 0, 0, 0]);
    }

    #[test]
    fn fill_is_drawn_before_outline() {
        let surface = test_surface(8);
        // Outline in a different color over the fill: the outline wins
        // on the rect's border pixels.
        surface
            .draw_rect(RectArgs {
                x: 2.,
                y: 2.,
                w: 4.,
                h: 4.,
                fill: Some(Paint::Solid(Color::rgb(255, 0, 0))),
                outline: Some(Outline::new(Color::rgb(0, 0, 255), 2.)),
                ..RectArgs::default()
            })
            .unwrap();

        assert_eq!(pixel(&surface, 4, 4), [255, 0, 0, 255]);
        assert_eq!(pixel(&surface, 2, 2), [0, 0, 255, 255]);
    }

    #[test]
    fn silhouette_tint_uses_source_alpha() {
        let source = ImageHandle::from_rgba8(1, 1, vec![10, 20, 30, 128]).unwrap();
        let tinted = tint_silhouette(source.pixmap(), Color::rgb(0, 0, 0));
        let pixel = tinted.pixel(0, 0).unwrap();

        assert_eq!(pixel.alpha(), 128);
        assert_eq!(pixel.red(), 0);
    }
}
