use glam::Vec2;
use tiny_skia::{FilterQuality, Point, Shader, SpreadMode, Transform};

use crate::{asset::ImageHandle, Color, Error, Result};

/// A paint source for fills and outlines: a solid color, a linear
/// gradient, or a repeating image pattern.
#[derive(Debug, Clone)]
pub enum Paint {
    Solid(Color),
    LinearGradient {
        start: Vec2,
        end: Vec2,
        stops: Vec<GradientStop>,
    },
    Pattern {
        image: ImageHandle,
        repetition: Repetition,
    },
}

impl Paint {
    /// Converts the paint into a `tiny-skia` shader borrowing from `self`.
    ///
    /// Fails with a backend error for degenerate gradients, matching the
    /// behavior of handing an invalid fill style to a raster backend.
    pub(crate) fn to_shader(&self) -> Result<Shader<'_>> {
        match self {
            Paint::Solid(color) => Ok(Shader::SolidColor(convert_color(*color))),
            Paint::LinearGradient { start, end, stops } => tiny_skia::LinearGradient::new(
                convert_point(*start),
                convert_point(*end),
                stops.iter().map(|stop| convert_gradient_stop(*stop)).collect(),
                SpreadMode::Pad,
                Transform::identity(),
            )
            .ok_or(Error::Backend("invalid linear gradient")),
            Paint::Pattern { image, repetition } => Ok(tiny_skia::Pattern::new(
                image.pixmap().as_ref(),
                // tiny-skia supports a single spread mode; per-axis
                // repetition degrades to full repetition.
                match repetition {
                    Repetition::NoRepeat => SpreadMode::Pad,
                    _ => SpreadMode::Repeat,
                },
                FilterQuality::Bilinear,
                1.0,
                Transform::identity(),
            )),
        }
    }
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

/// A "stop" in a gradient, consisting
/// of a position (0.0..=1.0) along the gradient
/// and the color value at that position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GradientStop {
    position: f32,
    color: Color,
}

impl GradientStop {
    pub fn new(position: f32, color: impl Into<Color>) -> Self {
        Self {
            position,
            color: color.into(),
        }
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// How an image pattern tiles its source.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Repetition {
    #[default]
    Repeat,
    RepeatX,
    RepeatY,
    NoRepeat,
}

/// Stroke parameters for shape and text outlines.
#[derive(Debug, Clone)]
pub struct Outline {
    pub paint: Paint,
    pub width: f32,
}

impl Outline {
    pub fn new(paint: impl Into<Paint>, width: f32) -> Self {
        Self {
            paint: paint.into(),
            width,
        }
    }
}

/// Pixel-blend override for shape drawing.
///
/// Mirrors the composite operations of a 2D canvas backend.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Composition {
    SourceOver,
    SourceIn,
    SourceOut,
    SourceAtop,
    DestinationOver,
    DestinationIn,
    DestinationOut,
    DestinationAtop,
    Lighter,
    Copy,
    Xor,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

pub(crate) fn convert_composition(composition: Composition) -> tiny_skia::BlendMode {
    use tiny_skia::BlendMode;
    match composition {
        Composition::SourceOver => BlendMode::SourceOver,
        Composition::SourceIn => BlendMode::SourceIn,
        Composition::SourceOut => BlendMode::SourceOut,
        Composition::SourceAtop => BlendMode::SourceAtop,
        Composition::DestinationOver => BlendMode::DestinationOver,
        Composition::DestinationIn => BlendMode::DestinationIn,
        Composition::DestinationOut => BlendMode::DestinationOut,
        Composition::DestinationAtop => BlendMode::DestinationAtop,
        Composition::Lighter => BlendMode::Plus,
        Composition::Copy => BlendMode::Source,
        Composition::Xor => BlendMode::Xor,
        Composition::Multiply => BlendMode::Multiply,
        Composition::Screen => BlendMode::Screen,
        Composition::Overlay => BlendMode::Overlay,
        Composition::Darken => BlendMode::Darken,
        Composition::Lighten => BlendMode::Lighten,
        Composition::ColorDodge => BlendMode::ColorDodge,
        Composition::ColorBurn => BlendMode::ColorBurn,
        Composition::HardLight => BlendMode::HardLight,
        Composition::SoftLight => BlendMode::SoftLight,
        Composition::Difference => BlendMode::Difference,
        Composition::Exclusion => BlendMode::Exclusion,
        Composition::Hue => BlendMode::Hue,
        Composition::Saturation => BlendMode::Saturation,
        Composition::Color => BlendMode::Color,
        Composition::Luminosity => BlendMode::Luminosity,
    }
}

pub(crate) fn convert_gradient_stop(stop: GradientStop) -> tiny_skia::GradientStop {
    tiny_skia::GradientStop::new(stop.position(), convert_color(stop.color()))
}

pub(crate) fn convert_color(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.red(), color.green(), color.blue(), color.alpha())
}

pub(crate) fn convert_point(point: Vec2) -> Point {
    Point::from_xy(point.x, point.y)
}
