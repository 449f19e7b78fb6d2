#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::geom::Point;

/// Letterboxed fit of the scan image into the canvas viewport.
///
/// The image keeps its aspect ratio and is centered; `scale` maps image
/// pixels to CSS pixels and `offset_x` / `offset_y` locate the image's
/// top-left corner inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitView {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for FitView {
    fn default() -> Self {
        Self { scale: 1.0, offset_x: 0.0, offset_y: 0.0 }
    }
}

impl FitView {
    /// Fit an `image_w × image_h` image into a `view_w × view_h` viewport.
    ///
    /// Degenerate sizes fall back to the identity view.
    #[must_use]
    pub fn fit(image_w: f64, image_h: f64, view_w: f64, view_h: f64) -> Self {
        if image_w <= 0.0 || image_h <= 0.0 || view_w <= 0.0 || view_h <= 0.0 {
            return Self::default();
        }
        let scale = (view_w / image_w).min(view_h / image_h);
        Self {
            scale,
            offset_x: (view_w - image_w * scale) / 2.0,
            offset_y: (view_h - image_h * scale) / 2.0,
        }
    }

    /// Convert a screen-space point (CSS pixels) to image pixels.
    #[must_use]
    pub fn screen_to_image(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.offset_x) / self.scale,
            y: (screen.y - self.offset_y) / self.scale,
        }
    }

    /// Convert an image-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn image_to_screen(&self, image: Point) -> Point {
        Point {
            x: image.x * self.scale + self.offset_x,
            y: image.y * self.scale + self.offset_y,
        }
    }

    /// Convert a screen-space distance (pixels) to an image-space distance.
    #[must_use]
    pub fn screen_dist_to_image(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale
    }
}
