//! Collaborator contracts around the core: image asset resolution and
//! file saving. Both are deliberately thin; the renderer only ever sees
//! an [`Asset`] or a returned resource path.

use std::{
    path::{Path, PathBuf},
    rc::Rc,
};

use futures_util::{future::LocalBoxFuture, FutureExt};
use tiny_skia::Pixmap;
use tiny_skia_path::IntSize;

use crate::{Error, Result};

/// A decoded, premultiplied raster image, cheap to clone.
#[derive(Clone)]
pub struct ImageHandle {
    pixmap: Rc<Pixmap>,
}

impl std::fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageHandle")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl ImageHandle {
    pub fn new(pixmap: Pixmap) -> Self {
        Self {
            pixmap: Rc::new(pixmap),
        }
    }

    /// Builds a handle from straight (unpremultiplied) RGBA8 data.
    pub fn from_rgba8(width: u32, height: u32, mut data: Vec<u8>) -> Result<Self> {
        for pixel in data.chunks_exact_mut(4) {
            let a = pixel[3] as u16;
            for channel in &mut pixel[..3] {
                *channel = ((*channel as u16 * a + 127) / 255) as u8;
            }
        }

        let size = IntSize::from_wh(width, height).ok_or(Error::Backend("empty image"))?;
        let pixmap =
            Pixmap::from_vec(data, size).ok_or(Error::Backend("image data size mismatch"))?;
        Ok(Self::new(pixmap))
    }

    /// Decodes an encoded image (PNG/JPEG).
    pub fn decode(data: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(data)
            .map_err(|_| Error::Backend("failed to decode image"))?
            .to_rgba8();
        let (width, height) = image.dimensions();
        Self::from_rgba8(width, height, image.into_raw())
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub(crate) fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}

/// The result of asset resolution.
///
/// Resolution never fails: a broken or absent asset becomes
/// [`Asset::Missing`], which drawing primitives silently skip.
#[derive(Debug, Clone)]
pub enum Asset {
    Image(ImageHandle),
    Missing,
}

impl Asset {
    pub fn is_missing(&self) -> bool {
        matches!(self, Asset::Missing)
    }
}

/// Resolves asset paths to images, possibly asynchronously.
pub trait AssetResolver {
    /// `hq` requests the full-quality variant; resolvers may serve a
    /// cheaper one when it is false.
    fn get_asset<'a>(&'a self, path: &'a str, hq: bool) -> LocalBoxFuture<'a, Asset>;
}

/// Loads assets from a directory tree.
///
/// When a low-quality variant is requested, a `name.lq.ext` sibling is
/// preferred if it exists.
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn read(&self, path: &str, hq: bool) -> Result<ImageHandle> {
        let full = self.root.join(path);
        if !hq {
            if let Some(lq) = lq_variant(&full) {
                if let Ok(data) = std::fs::read(&lq) {
                    return ImageHandle::decode(&data);
                }
            }
        }
        ImageHandle::decode(&std::fs::read(&full)?)
    }
}

impl AssetResolver for DirAssets {
    fn get_asset<'a>(&'a self, path: &'a str, hq: bool) -> LocalBoxFuture<'a, Asset> {
        async move {
            match self.read(path, hq) {
                Ok(image) => Asset::Image(image),
                Err(e) => {
                    log::warn!("failed to load asset '{}': {}", path, e);
                    Asset::Missing
                }
            }
        }
        .boxed_local()
    }
}

fn lq_variant(path: &Path) -> Option<PathBuf> {
    let stem = path.file_stem()?.to_str()?;
    let ext = path.extension()?.to_str()?;
    Some(path.with_file_name(format!("{stem}.lq.{ext}")))
}

/// Persists a finished raster image, returning a resource reference.
///
/// Platform variation (download link, blob save, plain file) hides
/// entirely behind this call.
pub trait FileSaver {
    fn save(&self, image: &Pixmap, filename: &str) -> Result<String>;
}

/// Saves PNG files into a directory.
pub struct DirSaver {
    dir: PathBuf,
}

impl DirSaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl FileSaver for DirSaver {
    fn save(&self, image: &Pixmap, filename: &str) -> Result<String> {
        let path = self.dir.join(filename);
        let data = image
            .encode_png()
            .map_err(|_| Error::Backend("png encoding failed"))?;
        std::fs::write(&path, data)?;
        Ok(path.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_is_premultiplied() {
        let image = ImageHandle::from_rgba8(1, 1, vec![255, 255, 255, 128]).unwrap();
        let pixel = image.pixmap().pixel(0, 0).unwrap();

        assert_eq!(pixel.alpha(), 128);
        assert_eq!(pixel.red(), 128);
    }

    #[test]
    fn zero_sized_images_are_rejected() {
        assert!(ImageHandle::from_rgba8(0, 0, Vec::new()).is_err());
    }

    #[test]
    fn lq_naming() {
        let lq = lq_variant(Path::new("bg/classroom.png")).unwrap();
        assert_eq!(lq, Path::new("bg/classroom.lq.png"));
    }
}
