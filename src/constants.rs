//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1600.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 900.0;

/// World units per degree of longitude/latitude in the map projection.
/// The camera and gizmos operate in world units; geometry stays in degrees.
pub const WORLD_UNITS_PER_DEGREE: f64 = 100.0;

/// Square meters per hectare (area display unit)
pub const SQUARE_METERS_PER_HECTARE: f64 = 10_000.0;

/// Minimum number of points in a closed ring (a triangle plus the closing
/// point). Rings below this are degenerate.
pub const MIN_RING_POINTS: usize = 4;

/// Default padding around a feature when fitting the viewport to its bounds
pub const DEFAULT_FIT_PADDING_PX: f32 = 40.0;

/// Default startup view center as [longitude, latitude]
pub const DEFAULT_START_CENTER: [f64; 2] = [37.6173, 55.7558];

/// Default startup camera zoom scale
pub const DEFAULT_VIEW_SCALE: f32 = 2.0;

/// Maximum length of a parcel name, enforced at the input boundary
pub const MAX_PARCEL_NAME_LEN: usize = 40;

/// Cursor-to-vertex hit radius in screen pixels for vertex dragging
pub const VERTEX_HIT_RADIUS_PX: f32 = 8.0;

/// Cursor-to-first-vertex radius in screen pixels that closes a sketch
pub const SKETCH_CLOSE_RADIUS_PX: f32 = 10.0;

/// Radius of rendered vertex handles in screen pixels
pub const VERTEX_HANDLE_RADIUS_PX: f32 = 3.5;

/// Camera zoom scale limits. Wide on purpose: a single parcel spans a tiny
/// fraction of a degree while fit-bounds on a large one can need the whole map.
pub const MIN_ZOOM_SCALE: f32 = 1e-4;
pub const MAX_ZOOM_SCALE: f32 = 100.0;
