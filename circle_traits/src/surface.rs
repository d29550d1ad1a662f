//! Device → drawing-surface coordinate mapping.

/// Maps device/client pixel coordinates into the drawing surface's local space.
pub trait SurfaceTransform {
    fn to_surface(&self, x: f64, y: f64) -> (f64, f64);
}

/// Device and surface coordinates coincide.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityTransform;

impl SurfaceTransform for IdentityTransform {
    #[inline]
    fn to_surface(&self, x: f64, y: f64) -> (f64, f64) {
        (x, y)
    }
}

/// Uniform scale followed by a translation:
/// surface = (device - offset) * scale
#[derive(Debug, Clone, Copy)]
pub struct AffineTransform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl AffineTransform {
    pub fn new(scale: f64, offset_x: f64, offset_y: f64) -> Self {
        Self {
            scale,
            offset_x,
            offset_y,
        }
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }
}

impl SurfaceTransform for AffineTransform {
    #[inline]
    fn to_surface(&self, x: f64, y: f64) -> (f64, f64) {
        ((x - self.offset_x) * self.scale, (y - self.offset_y) * self.scale)
    }
}

impl<T: SurfaceTransform + ?Sized> SurfaceTransform for &T {
    fn to_surface(&self, x: f64, y: f64) -> (f64, f64) {
        (**self).to_surface(x, y)
    }
}
