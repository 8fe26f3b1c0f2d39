//! Render orchestration: buffer ownership and the supersession
//! lifecycle.
//!
//! A [`Renderer`] owns one raster buffer and runs at most one render at
//! a time. Starting a new render flags the in-flight one as aborted and
//! clears the buffer; the superseded render fails at its next primitive
//! call and resolves to `Ok(false)` instead of an error.

use std::{
    cell::{Cell, RefCell},
    future::Future,
    rc::Rc,
};

use tiny_skia::{Pixmap, PixmapPaint, Transform};

use crate::{
    asset::FileSaver,
    fonts::FontStore,
    surface::Surface,
    Color, Error, Result,
};

pub struct Renderer {
    buffer: Rc<RefCell<Pixmap>>,
    fonts: Rc<FontStore>,
    running: RefCell<Option<Rc<Cell<bool>>>>,
}

impl Renderer {
    /// # Panics
    /// Panics if either dimension is zero.
    pub fn new(width: u32, height: u32, fonts: Rc<FontStore>) -> Self {
        let buffer = Pixmap::new(width, height).expect("renderer dimensions must be nonzero");
        Self {
            buffer: Rc::new(RefCell::new(buffer)),
            fonts,
            running: RefCell::new(None),
        }
    }

    pub fn width(&self) -> u32 {
        self.buffer.borrow().width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.borrow().height()
    }

    pub fn fonts(&self) -> &Rc<FontStore> {
        &self.fonts
    }

    /// Runs `draw` against a fresh surface over this renderer's buffer.
    ///
    /// Any in-flight render is aborted first and the buffer cleared.
    /// Resolves to `Ok(true)` when the render completed, `Ok(false)`
    /// when it was superseded partway through.
    pub async fn render<F, Fut>(&self, hq: bool, draw: F) -> Result<bool>
    where
        F: FnOnce(Surface) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        if let Some(previous) = &*self.running.borrow() {
            log::debug!("superseding an in-flight render");
            previous.set(true);
        }
        self.buffer.borrow_mut().fill(tiny_skia::Color::TRANSPARENT);

        let flag = Rc::new(Cell::new(false));
        *self.running.borrow_mut() = Some(flag.clone());
        let surface = Surface::new(
            self.buffer.clone(),
            flag.clone(),
            self.fonts.clone(),
            hq,
            true,
        );

        let result = draw(surface).await;

        // Only the newest render may vacate the slot.
        {
            let mut running = self.running.borrow_mut();
            if matches!(&*running, Some(current) if Rc::ptr_eq(current, &flag)) {
                *running = None;
            }
        }

        match result {
            Ok(()) => Ok(true),
            Err(Error::Aborted) => {
                log::debug!("render superseded, discarding");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// Composites the current buffer onto `target` at `(x, y)`,
    /// optionally scaled to `size`.
    pub fn paint_onto(&self, target: &mut Pixmap, x: f32, y: f32, size: Option<(f32, f32)>) {
        let source = self.buffer.borrow();
        let mut transform = Transform::from_translate(x, y);
        if let Some((w, h)) = size {
            transform = transform.pre_scale(
                w / source.width() as f32,
                h / source.height() as f32,
            );
        }
        target.draw_pixmap(
            0,
            0,
            source.as_ref(),
            &PixmapPaint::default(),
            transform,
            None,
        );
    }

    /// Reads back one pixel as straight-alpha color. Out of bounds
    /// returns `None`.
    pub fn sample_at(&self, x: u32, y: u32) -> Option<Color> {
        self.buffer.borrow().pixel(x, y).map(|pixel| {
            let demultiplied = pixel.demultiply();
            Color::rgba(
                demultiplied.red(),
                demultiplied.green(),
                demultiplied.blue(),
                demultiplied.alpha(),
            )
        })
    }

    /// Renders `draw` into a throwaway full-quality buffer and hands
    /// the result to `saver`. The preview buffer and any in-flight
    /// preview render are untouched.
    pub async fn export_as_file<F, Fut>(
        &self,
        draw: F,
        saver: &dyn FileSaver,
        filename: &str,
    ) -> Result<String>
    where
        F: FnOnce(Surface) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let (width, height) = (self.width(), self.height());
        let buffer = Pixmap::new(width, height).expect("renderer dimensions must be nonzero");
        let buffer = Rc::new(RefCell::new(buffer));

        let surface = Surface::new(
            buffer.clone(),
            Rc::new(Cell::new(false)),
            self.fonts.clone(),
            true,
            false,
        );
        draw(surface).await?;

        let pixmap = buffer.borrow();
        saver.save(&pixmap, filename)
    }

    pub(crate) fn buffer(&self) -> &Rc<RefCell<Pixmap>> {
        &self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        paint::Paint,
        surface::RectArgs,
    };
    use futures_util::task::noop_waker_ref;
    use std::{
        pin::Pin,
        task::{Context, Poll},
    };

    fn test_renderer(size: u32) -> Renderer {
        Renderer::new(size, size, Rc::new(FontStore::new()))
    }

    fn poll_once<F: Future>(future: &mut Pin<Box<F>>) -> Poll<F::Output> {
        let mut cx = Context::from_waker(noop_waker_ref());
        future.as_mut().poll(&mut cx)
    }

    /// Pending once, then ready. Lets a test park a render mid-flight.
    #[derive(Default)]
    struct YieldOnce {
        polled: bool,
    }

    impl Future for YieldOnce {
        type Output = ();

        fn poll(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<()> {
            if self.polled {
                Poll::Ready(())
            } else {
                self.polled = true;
                Poll::Pending
            }
        }
    }

    #[test]
    fn uninterrupted_render_resolves_true() {
        let renderer = test_renderer(4);
        let done = pollster::block_on(renderer.render(true, |surface| async move {
            surface.draw_rect(RectArgs {
                w: 4.,
                h: 4.,
                fill: Some(Paint::Solid(Color::rgb(255, 0, 0))),
                ..RectArgs::default()
            })
        }));
        assert_eq!(done.unwrap(), true);
        assert_eq!(renderer.sample_at(1, 1), Some(Color::rgb(255, 0, 0)));
    }

    #[test]
    fn render_clears_previous_contents() {
        let renderer = test_renderer(4);
        pollster::block_on(renderer.render(true, |surface| async move {
            let args = full_fill_args(&surface);
            surface.draw_rect(args)
        }))
        .unwrap();
        assert_eq!(renderer.sample_at(0, 0).unwrap().alpha(), 255);

        pollster::block_on(renderer.render(true, |_| async { Ok(()) })).unwrap();
        assert_eq!(renderer.sample_at(0, 0), Some(Color::TRANSPARENT));
    }

    fn full_fill_args(surface: &Surface) -> RectArgs {
        RectArgs {
            w: surface.width() as f32,
            h: surface.height() as f32,
            fill: Some(Paint::Solid(Color::rgb(255, 0, 0))),
            ..RectArgs::default()
        }
    }

    #[test]
    fn superseded_render_resolves_false() {
        let renderer = test_renderer(4);

        let mut first = Box::pin(renderer.render(true, |surface| async move {
            surface.draw_rect(full_fill_args(&surface))?;
            YieldOnce::default().await;
            // Fails once the second render has claimed the buffer.
            surface.draw_rect(full_fill_args(&surface))
        }));
        assert!(poll_once(&mut first).is_pending());

        let second = pollster::block_on(renderer.render(true, |surface| async move {
            surface.draw_rect(RectArgs {
                w: 4.,
                h: 4.,
                fill: Some(Paint::Solid(Color::rgb(0, 0, 255))),
                ..RectArgs::default()
            })
        }));
        assert_eq!(second.unwrap(), true);

        assert!(matches!(poll_once(&mut first), Poll::Ready(Ok(false))));
        // The second render's output survives the stale resumption.
        assert_eq!(renderer.sample_at(2, 2), Some(Color::rgb(0, 0, 255)));
    }

    #[test]
    fn paint_onto_scales_into_target() {
        let renderer = test_renderer(2);
        pollster::block_on(renderer.render(true, |surface| async move {
            surface.draw_rect(full_fill_args(&surface))
        }))
        .unwrap();

        let mut target = Pixmap::new(4, 4).unwrap();
        renderer.paint_onto(&mut target, 0., 0., Some((4., 4.)));
        let pixel = target.pixel(3, 3).unwrap();
        assert_eq!((pixel.red(), pixel.alpha()), (255, 255));
    }

    #[test]
    fn sample_at_is_bounds_checked() {
        let renderer = test_renderer(2);
        assert!(renderer.sample_at(5, 5).is_none());
    }

    struct RecordingSaver {
        saved: RefCell<Option<(u32, u32, String)>>,
    }

    impl FileSaver for RecordingSaver {
        fn save(&self, image: &Pixmap, filename: &str) -> Result<String> {
            *self.saved.borrow_mut() =
                Some((image.width(), image.height(), filename.to_owned()));
            Ok(format!("saved/{filename}"))
        }
    }

    #[test]
    fn export_uses_a_separate_full_quality_buffer() {
        let renderer = test_renderer(4);
        pollster::block_on(renderer.render(true, |surface| async move {
            surface.draw_rect(full_fill_args(&surface))
        }))
        .unwrap();

        let saver = RecordingSaver {
            saved: RefCell::new(None),
        };
        let path = pollster::block_on(renderer.export_as_file(
            |surface| async move {
                assert!(surface.hq());
                assert!(!surface.is_preview());
                surface.draw_rect(RectArgs {
                    w: 4.,
                    h: 4.,
                    fill: Some(Paint::Solid(Color::rgb(0, 255, 0))),
                    ..RectArgs::default()
                })
            },
            &saver,
            "scene.png",
        ))
        .unwrap();

        assert_eq!(path, "saved/scene.png");
        assert_eq!(
            *saver.saved.borrow(),
            Some((4, 4, "scene.png".to_owned()))
        );
        // The preview buffer still holds the earlier render.
        assert_eq!(renderer.sample_at(1, 1), Some(Color::rgb(255, 0, 0)));
    }
}
