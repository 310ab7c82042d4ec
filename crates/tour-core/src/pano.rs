//! Pointer-drag model for the flat-panorama viewer: converts drag deltas
//! into an unbounded horizontal pan plus a clamped zoom scalar.

use crate::constants::{DRAG_SENSITIVITY, HOTSPOT_PARALLAX, MAX_ZOOM, MIN_ZOOM};

/// Camera state for one panorama viewpoint. Reset whenever the viewpoint
/// changes; no camera state persists across locations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanoCamera {
    pub rotation: f32,
    pub zoom: f32,
    /// Last pointer x while a drag is active.
    last_x: Option<f32>,
}

impl Default for PanoCamera {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            zoom: 1.0,
            last_x: None,
        }
    }
}

impl PanoCamera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.last_x.is_some()
    }

    /// Record the drag anchor and enter dragging mode.
    pub fn pointer_down(&mut self, x: f32) {
        self.last_x = Some(x);
    }

    /// Accumulate pan from the horizontal delta since the last event.
    /// Rotation is unbounded: no wraparound, no clamp.
    pub fn pointer_move(&mut self, x: f32) {
        if let Some(last) = self.last_x {
            self.rotation += (x - last) * DRAG_SENSITIVITY;
            self.last_x = Some(x);
        }
    }

    /// End the drag with no snap-back. Pointer-leave routes here too.
    pub fn pointer_up(&mut self) {
        self.last_x = None;
    }

    /// Nudge zoom by `delta`, clamped to the fixed range.
    pub fn adjust_zoom(&mut self, delta: f32) {
        self.zoom = (self.zoom + delta).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Horizontal translation applied to the background image, pixels.
    pub fn background_offset_px(&self) -> f32 {
        -self.rotation
    }

    /// Scaled offset applied to hotspot markers so they track the panned
    /// background.
    pub fn hotspot_offset_px(&self) -> f32 {
        self.rotation * HOTSPOT_PARALLAX
    }
}
