// Interaction tuning constants shared by the viewer variants.

// Panorama drag
pub const DRAG_SENSITIVITY: f32 = 0.5; // pan units per pixel of horizontal drag
pub const HOTSPOT_PARALLAX: f32 = 0.3; // fraction of the pan applied to hotspot markers

// Zoom
pub const MIN_ZOOM: f32 = 0.5;
pub const MAX_ZOOM: f32 = 3.0;
pub const ZOOM_STEP: f32 = 0.2; // per button press / key repeat

// Audio tour
pub const AUDIO_TICK_SECS: u32 = 1; // simulated playback granularity

// Distance
pub const EARTH_RADIUS_KM: f64 = 6371.0;
