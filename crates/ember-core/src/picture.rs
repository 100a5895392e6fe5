//! Picture resources: anything with a size that can be sampled per pixel

use crate::color::Color;
use crate::error::{EmberError, Result};
use std::fmt;
use std::sync::Arc;

/// A readable raster surface.
///
/// Ownership lies with whoever created the picture; draw calls and animations
/// only borrow it or hold a shared handle.
pub trait Picture {
    /// Width and height in pixels
    fn size(&self) -> (u32, u32);

    /// Color of pixel `(x, y)`. Coordinates outside the picture yield
    /// [`Color::TRANSPARENT`].
    fn color_at(&self, x: u32, y: u32) -> Color;

    fn is_empty(&self) -> bool {
        let (w, h) = self.size();
        w == 0 || h == 0
    }
}

impl<P: Picture + ?Sized> Picture for &P {
    fn size(&self) -> (u32, u32) {
        (**self).size()
    }

    fn color_at(&self, x: u32, y: u32) -> Color {
        (**self).color_at(x, y)
    }
}

impl<P: Picture + ?Sized> Picture for Arc<P> {
    fn size(&self) -> (u32, u32) {
        (**self).size()
    }

    fn color_at(&self, x: u32, y: u32) -> Color {
        (**self).color_at(x, y)
    }
}

/// A rectangular window into another picture, sharing its pixels
#[derive(Clone)]
pub struct SubPicture {
    source: Arc<dyn Picture>,
    x: u32,
    y: u32,
    w: u32,
    h: u32,
}

impl SubPicture {
    /// Create a region of `source`. The region must lie fully inside it.
    pub fn new(source: Arc<dyn Picture>, x: u32, y: u32, w: u32, h: u32) -> Result<Self> {
        let (sw, sh) = source.size();
        let fits_x = x.checked_add(w).is_some_and(|right| right <= sw);
        let fits_y = y.checked_add(h).is_some_and(|bottom| bottom <= sh);
        if !fits_x || !fits_y {
            return Err(EmberError::ResourceUnavailable(format!(
                "region {}x{}+{}+{} lies outside a {}x{} picture",
                w, h, x, y, sw, sh
            )));
        }
        Ok(Self { source, x, y, w, h })
    }

    /// Offset of the region inside its source picture
    pub fn origin(&self) -> (u32, u32) {
        (self.x, self.y)
    }
}

impl Picture for SubPicture {
    fn size(&self) -> (u32, u32) {
        (self.w, self.h)
    }

    fn color_at(&self, x: u32, y: u32) -> Color {
        if x >= self.w || y >= self.h {
            return Color::TRANSPARENT;
        }
        self.source.color_at(self.x + x, self.y + y)
    }
}

impl fmt::Debug for SubPicture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubPicture")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("w", &self.w)
            .field("h", &self.h)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 4x2 picture whose red channel encodes x and green encodes y
    struct Gradient;

    impl Picture for Gradient {
        fn size(&self) -> (u32, u32) {
            (4, 2)
        }

        fn color_at(&self, x: u32, y: u32) -> Color {
            if x >= 4 || y >= 2 {
                return Color::TRANSPARENT;
            }
            Color::new(x as f64, y as f64, 0.0, 1.0)
        }
    }

    #[test]
    fn test_sub_picture_samples_source_with_offset() {
        let region = SubPicture::new(Arc::new(Gradient), 2, 1, 2, 1).unwrap();
        assert_eq!(region.size(), (2, 1));
        assert_eq!(region.origin(), (2, 1));
        assert_eq!(region.color_at(1, 0), Color::new(3.0, 1.0, 0.0, 1.0));
        assert_eq!(region.color_at(2, 0), Color::TRANSPARENT);
    }

    #[test]
    fn test_sub_picture_out_of_bounds() {
        let err = SubPicture::new(Arc::new(Gradient), 3, 0, 2, 1).unwrap_err();
        assert!(matches!(err, EmberError::ResourceUnavailable(_)));

        let err = SubPicture::new(Arc::new(Gradient), u32::MAX, 0, 2, 1).unwrap_err();
        assert!(matches!(err, EmberError::ResourceUnavailable(_)));
    }

    #[test]
    fn test_empty_picture() {
        let region = SubPicture::new(Arc::new(Gradient), 0, 0, 0, 2).unwrap();
        assert!(region.is_empty());
        assert!(!Gradient.is_empty());
    }
}
