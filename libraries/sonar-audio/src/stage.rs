//! Screen to audio-space mapping
//!
//! The canvas is mapped onto a stage `2 * half_width` units wide, centered on the
//! listener. Height keeps the canvas aspect ratio so that equal screen distances
//! sound equally far apart horizontally and vertically. Every cue sits at the
//! same depth in front of the listener.

use sonar_core::{CanvasSize, Position3D, ScreenRect};

/// Audio stage dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioStage {
    pub half_width: f32,
    pub depth: f32,
}

impl AudioStage {
    pub fn new(half_width: f32, depth: f32) -> Self {
        Self { half_width, depth }
    }

    /// Position of the stage origin, used when geometry is unusable
    pub fn origin(&self) -> Position3D {
        Position3D::new(0.0, 0.0, -self.depth)
    }

    /// Map the center of `rect` on `canvas` into audio space
    ///
    /// A missing rectangle is treated as the canvas center. A degenerate canvas
    /// (zero or negative width or height) maps everything to the origin.
    pub fn position_for(&self, rect: Option<&ScreenRect>, canvas: CanvasSize) -> Position3D {
        if canvas.is_degenerate() {
            return self.origin();
        }

        let width = canvas.width as f32;
        let height = canvas.height as f32;
        let aspect = height / width;
        let (cx, cy) = rect.map_or_else(|| canvas.center(), |rect| rect.center());

        let w = self.half_width;
        let x = (cx / width) * 2.0 * w - w;
        // Screen Y grows downward, audio Y grows upward
        let y = -((cy / height) * 2.0 * aspect * w - aspect * w);

        Position3D::new(x, y, -self.depth)
    }
}

impl Default for AudioStage {
    fn default() -> Self {
        Self::new(25.0, 5.0)
    }
}
