//! Scene items: self-rendering pieces composed into a frame.

use futures_util::{future::LocalBoxFuture, FutureExt};

use crate::{
    asset::AssetResolver,
    paint::Paint,
    surface::{ImageArgs, RectArgs, Surface},
    Color, Result,
};

/// A scene item that knows how to draw itself onto a surface.
///
/// Items resolve their own assets, so rendering is asynchronous; the
/// surface's cancellation flag makes a stale item fail fast when its
/// render has been superseded.
pub trait Renderable {
    fn render<'a>(
        &'a self,
        surface: &'a Surface,
        assets: &'a dyn AssetResolver,
    ) -> LocalBoxFuture<'a, Result<()>>;
}

/// A backdrop image drawn at its natural size from the top-left corner.
#[derive(Debug, Clone)]
pub struct ImageBackground {
    pub path: String,
    /// Display label, not used for rendering.
    pub name: String,
    pub flip: bool,
}

impl ImageBackground {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            flip: false,
        }
    }
}

impl Renderable for ImageBackground {
    fn render<'a>(
        &'a self,
        surface: &'a Surface,
        assets: &'a dyn AssetResolver,
    ) -> LocalBoxFuture<'a, Result<()>> {
        async move {
            let asset = assets.get_asset(&self.path, surface.hq()).await;
            surface.draw_image(ImageArgs::new(&asset).flip(self.flip))
        }
        .boxed_local()
    }
}

/// A flat-color backdrop covering the whole surface.
#[derive(Debug, Clone, Copy)]
pub struct ColorBackground {
    pub color: Color,
}

impl Renderable for ColorBackground {
    fn render<'a>(
        &'a self,
        surface: &'a Surface,
        _assets: &'a dyn AssetResolver,
    ) -> LocalBoxFuture<'a, Result<()>> {
        async move {
            surface.draw_rect(RectArgs {
                w: surface.width() as f32,
                h: surface.height() as f32,
                fill: Some(Paint::Solid(self.color)),
                ..RectArgs::default()
            })
        }
        .boxed_local()
    }
}

/// The absence of a backdrop; leaves the cleared buffer untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransparentBackground;

impl Renderable for TransparentBackground {
    fn render<'a>(
        &'a self,
        _surface: &'a Surface,
        _assets: &'a dyn AssetResolver,
    ) -> LocalBoxFuture<'a, Result<()>> {
        async { Ok(()) }.boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{asset::Asset, FontStore, Renderer};
    use std::rc::Rc;

    struct NoAssets;

    impl AssetResolver for NoAssets {
        fn get_asset<'a>(&'a self, _path: &'a str, _hq: bool) -> LocalBoxFuture<'a, Asset> {
            async { Asset::Missing }.boxed_local()
        }
    }

    #[test]
    fn color_background_fills_the_surface() {
        let renderer = Renderer::new(3, 3, Rc::new(FontStore::new()));
        let background = ColorBackground {
            color: Color::rgb(10, 20, 30),
        };

        let done = pollster::block_on(renderer.render(true, |surface| async move {
            background.render(&surface, &NoAssets).await
        }))
        .unwrap();

        assert!(done);
        assert_eq!(renderer.sample_at(1, 1), Some(Color::rgb(10, 20, 30)));
    }

    #[test]
    fn unresolvable_image_background_renders_cleanly() {
        let renderer = Renderer::new(3, 3, Rc::new(FontStore::new()));
        let background = ImageBackground::new("missing/forest.png", "Forest");

        let done = pollster::block_on(renderer.render(true, |surface| async move {
            background.render(&surface, &NoAssets).await
        }))
        .unwrap();

        assert!(done);
        assert_eq!(renderer.sample_at(0, 0), Some(Color::TRANSPARENT));
    }
}
