//! Frame-to-preview coordinate mapping
//!
//! OCR bounding boxes arrive in the sensor frame's pixel space. The preview
//! surface shows that frame upright, scaled to fit inside the viewport with
//! its aspect ratio preserved and centered (letterbox/pillarbox bars when the
//! ratios differ). This module remaps boxes between the two spaces.

use thiserror::Error;

/// Axis-aligned rectangle in pixel coordinates (edges, not origin + size).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    /// Create a rectangle from its four edges
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Width of the rectangle (may be zero or negative for degenerate input)
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    /// Height of the rectangle
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Whether the rectangle encloses no area
    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }
}

/// Sensor rotation relative to the upright preview.
///
/// Only the four right-angle rotations a device sensor reports are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Parse a sensor-reported rotation in degrees
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees.rem_euclid(360) {
            0 => Some(Self::Deg0),
            90 => Some(Self::Deg90),
            180 => Some(Self::Deg180),
            270 => Some(Self::Deg270),
            _ => None,
        }
    }

    /// Rotation as degrees
    pub fn degrees(self) -> i32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// Whether this rotation swaps the frame's width and height relative to
    /// the upright preview
    pub fn swaps_axes(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }
}

/// Dimensions and rotation of a frame as delivered by the camera stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameGeometry {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Sensor rotation relative to the upright preview
    pub rotation: Rotation,
}

impl FrameGeometry {
    /// Create a frame geometry description
    pub fn new(width: u32, height: u32, rotation: Rotation) -> Self {
        Self {
            width,
            height,
            rotation,
        }
    }

    /// Frame dimensions after undoing the sensor rotation, i.e. as the
    /// preview shows them
    pub fn upright_dimensions(&self) -> (u32, u32) {
        if self.rotation.swaps_axes() {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }
}

/// Pixel dimensions of the destination preview surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Create a viewport description
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Precondition violations for coordinate mapping
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeometryError {
    #[error("source frame has zero area ({width}x{height})")]
    EmptyFrame { width: u32, height: u32 },
    #[error("preview viewport has zero area ({width}x{height})")]
    EmptyViewport { width: u32, height: u32 },
}

/// Map a rectangle from source-frame pixel space into preview viewport space.
///
/// The frame is treated as rotated upright, uniformly scaled to fit inside
/// the viewport, and centered. Coordinates are mapped linearly on all four
/// edges; nothing is clamped to the viewport, so callers clip downstream if
/// they need to.
pub fn map_to_viewport(
    rect: Rect,
    frame: FrameGeometry,
    viewport: Viewport,
) -> Result<Rect, GeometryError> {
    if frame.width == 0 || frame.height == 0 {
        return Err(GeometryError::EmptyFrame {
            width: frame.width,
            height: frame.height,
        });
    }
    if viewport.width == 0 || viewport.height == 0 {
        return Err(GeometryError::EmptyViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }

    let (upright_w, upright_h) = frame.upright_dimensions();

    let scale_x = viewport.width as f32 / upright_w as f32;
    let scale_y = viewport.height as f32 / upright_h as f32;
    let scale = scale_x.min(scale_y);

    let offset_x = (viewport.width as f32 - upright_w as f32 * scale) / 2.0;
    let offset_y = (viewport.height as f32 - upright_h as f32 * scale) / 2.0;

    Ok(Rect::new(
        (rect.left as f32 * scale + offset_x) as i32,
        (rect.top as f32 * scale + offset_y) as i32,
        (rect.right as f32 * scale + offset_x) as i32,
        (rect.bottom as f32 * scale + offset_y) as i32,
    ))
}
