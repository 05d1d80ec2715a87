//! Bounding boxes and coordinate-space conversion.

use serde::{Deserialize, Serialize};

/// An axis-aligned box given by its upper-left and lower-right corners.
///
/// Coordinates are either absolute pixels or relative to the image size,
/// in which case every coordinate lies in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Upper-left x
    pub ulx: f32,
    /// Upper-left y
    pub uly: f32,
    /// Lower-right x
    pub lrx: f32,
    /// Lower-right y
    pub lry: f32,
    /// Whether the coordinates are absolute pixels
    pub absolute_coords: bool,
}

impl BoundingBox {
    /// Create a box in absolute pixel coordinates.
    pub fn absolute(ulx: f32, uly: f32, lrx: f32, lry: f32) -> Self {
        Self {
            ulx,
            uly,
            lrx,
            lry,
            absolute_coords: true,
        }
    }

    /// Create a box in coordinates relative to the image size.
    pub fn relative(ulx: f32, uly: f32, lrx: f32, lry: f32) -> Self {
        Self {
            ulx,
            uly,
            lrx,
            lry,
            absolute_coords: false,
        }
    }

    /// Box width (never negative).
    pub fn width(&self) -> f32 {
        (self.lrx - self.ulx).max(0.0)
    }

    /// Box height (never negative).
    pub fn height(&self) -> f32 {
        (self.lry - self.uly).max(0.0)
    }

    /// Convert the box into absolute or relative coordinates of an image
    /// with the given size. A box already in the target space is returned
    /// unchanged.
    pub fn transform(&self, width: f32, height: f32, to_absolute: bool) -> Self {
        if self.absolute_coords == to_absolute {
            return *self;
        }

        if to_absolute {
            Self::absolute(
                self.ulx * width,
                self.uly * height,
                self.lrx * width,
                self.lry * height,
            )
        } else {
            // A degenerate image has no meaningful relative space
            if width <= 0.0 || height <= 0.0 {
                return *self;
            }
            Self::relative(
                self.ulx / width,
                self.uly / height,
                self.lrx / width,
                self.lry / height,
            )
        }
    }

    /// Coordinates as `[x1, y1, x2, y2]`.
    pub fn to_xyxy(&self) -> [f32; 4] {
        [self.ulx, self.uly, self.lrx, self.lry]
    }

    /// Check whether `other` lies completely inside this box (edges inclusive).
    pub fn contains(&self, other: &BoundingBox) -> bool {
        self.ulx <= other.ulx
            && other.ulx <= self.lrx
            && self.uly <= other.uly
            && other.uly <= self.lry
            && self.ulx <= other.lrx
            && other.lrx <= self.lrx
            && self.uly <= other.lry
            && other.lry <= self.lry
    }
}
