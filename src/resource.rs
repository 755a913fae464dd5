//! Image handles and the loader cache.
//!
//! Decoding images is the job of the host through a [`Loader`].
//! The world only keeps the returned [`Image`] handles,
//! which are memoized by the full set of [`ImageOptions`].

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use thiserror::Error;

/// The options that identify a loaded image.
///
/// Two requests with the same name but different options produce different images.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageOptions {
    /// The resource name of the image.
    pub name:   String,
    /// Mirror the image horizontally.
    pub flip_x: bool,
    /// Mirror the image vertically.
    pub flip_y: bool,
    /// Rotation in degrees; should be a multiple of 90.
    pub rotate: i32,
    /// Whether the image may be packed into a texture atlas.
    pub atlas:  bool,
    /// Transparent border in pixels added around the image in the atlas.
    pub border: u32,
}

impl ImageOptions {
    /// Creates options with the default flags for `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), flip_x: false, flip_y: true, rotate: 0, atlas: true, border: 1 }
    }
}

impl From<&str> for ImageOptions {
    fn from(name: &str) -> Self { Self::new(name) }
}

impl From<String> for ImageOptions {
    fn from(name: String) -> Self { Self::new(name) }
}

/// What a [`Loader`] reports about a loaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    /// An opaque value the host uses to find its own image object again.
    pub token:  u64,
    /// Width in pixels.
    pub width:  u32,
    /// Height in pixels.
    pub height: u32,
}

/// Loads images on behalf of the world.
pub trait Loader {
    /// Loads the image described by `options`.
    fn load(&mut self, options: &ImageOptions) -> Result<ImageInfo, LoadError>;
}

/// An image could not be loaded.
#[derive(Debug, Error)]
#[error("cannot load image {name}: {reason}")]
pub struct LoadError {
    /// The requested image name.
    pub name:   String,
    /// A description of the failure.
    pub reason: String,
}

/// A shared handle to a loaded image.
#[derive(Clone)]
pub struct Image(Rc<Loaded>);

struct Loaded {
    options: ImageOptions,
    info:    ImageInfo,
}

impl Image {
    /// The options this image was loaded with.
    pub fn options(&self) -> &ImageOptions { &self.0.options }

    /// The resource name of this image.
    pub fn name(&self) -> &str { &self.0.options.name }

    /// The host token of this image.
    pub fn token(&self) -> u64 { self.0.info.token }

    /// Width in pixels.
    pub fn width(&self) -> u32 { self.0.info.width }

    /// Height in pixels.
    pub fn height(&self) -> u32 { self.0.info.height }
}

impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool { Rc::ptr_eq(&self.0, &other.0) }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Image")
            .field("name", &self.name())
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// Memoizes images returned by a [`Loader`].
pub struct Cache {
    loader: Box<dyn Loader>,
    images: HashMap<ImageOptions, Image>,
}

impl Cache {
    /// Creates an empty cache backed by `loader`.
    pub fn new(loader: impl Loader + 'static) -> Self {
        Self { loader: Box::new(loader), images: HashMap::new() }
    }

    /// Returns the image for `options`, loading it on the first request.
    pub fn image(&mut self, options: &ImageOptions) -> Result<Image, LoadError> {
        if let Some(image) = self.images.get(options) {
            return Ok(image.clone());
        }

        let info = self.loader.load(options)?;
        log::debug!("Loaded image {:?} as {:?}", options, info);
        let image = Image(Rc::new(Loaded { options: options.clone(), info }));
        self.images.insert(options.clone(), image.clone());
        Ok(image)
    }

    /// The number of distinct images loaded so far.
    pub fn len(&self) -> usize { self.images.len() }

    /// Whether no image has been loaded yet.
    pub fn is_empty(&self) -> bool { self.images.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::{Cache, ImageOptions};
    use crate::test_util::FakeLoader;

    #[test]
    fn test_cache_by_name_and_options() {
        let mut cache = Cache::new(FakeLoader::default());

        let a = cache.image(&ImageOptions::new("cat.png")).expect("fake loader never fails");
        let b = cache.image(&ImageOptions::new("cat.png")).expect("fake loader never fails");
        assert_eq!(a, b);
        assert_eq!(cache.len(), 1);

        let flipped = ImageOptions { flip_x: true, ..ImageOptions::new("cat.png") };
        let c = cache.image(&flipped).expect("fake loader never fails");
        assert_ne!(a, c);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_load_error_is_not_cached() {
        let mut cache = Cache::new(FakeLoader::default());
        assert!(cache.image(&ImageOptions::new("missing.png")).is_err());
        assert!(cache.is_empty());
    }
}
