//! Pan/zoom transform between screen and world space.

use log::warn;

use super::geometry::Point;

const DEFAULT_MIN_ZOOM: f64 = 0.3;
const DEFAULT_MAX_ZOOM: f64 = 2.0;

/// Pan offset and zoom factor for the canvas.
///
/// `screen = world * zoom + pan`. Zoom is clamped to `[min_zoom, max_zoom]`
/// and anchored at the origin, so zooming does not follow the cursor.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
	pan: Point,
	zoom: f64,
	min_zoom: f64,
	max_zoom: f64,
}

impl Default for Viewport {
	fn default() -> Self {
		Self::new(DEFAULT_MIN_ZOOM, DEFAULT_MAX_ZOOM)
	}
}

impl Viewport {
	/// Identity transform with the given zoom bounds.
	///
	/// Bounds that are not finite, not positive, or inverted are replaced by
	/// the defaults `[0.3, 2.0]`.
	pub fn new(min_zoom: f64, max_zoom: f64) -> Self {
		let usable = |z: f64| z.is_finite() && z > 0.0;
		let (min_zoom, max_zoom) = if usable(min_zoom) && usable(max_zoom) && min_zoom <= max_zoom {
			(min_zoom, max_zoom)
		} else {
			warn!(
				"invalid zoom bounds [{min_zoom}, {max_zoom}], using [{DEFAULT_MIN_ZOOM}, {DEFAULT_MAX_ZOOM}]"
			);
			(DEFAULT_MIN_ZOOM, DEFAULT_MAX_ZOOM)
		};
		Self {
			pan: Point::default(),
			zoom: 1.0_f64.clamp(min_zoom, max_zoom),
			min_zoom,
			max_zoom,
		}
	}

	/// Screen-space translation.
	pub fn pan(&self) -> Point {
		self.pan
	}

	/// Current zoom factor.
	pub fn zoom(&self) -> f64 {
		self.zoom
	}

	/// Inverse of [`Self::world_to_screen`].
	pub fn screen_to_world(&self, screen: Point) -> Point {
		(screen - self.pan) / self.zoom
	}

	/// `world * zoom + pan`.
	pub fn world_to_screen(&self, world: Point) -> Point {
		world * self.zoom + self.pan
	}

	/// Add `delta` to the zoom factor, clamping into bounds.
	pub fn adjust_zoom(&mut self, delta: f64) {
		let next = self.zoom + delta;
		self.zoom = if next.is_nan() {
			self.zoom
		} else {
			next.clamp(self.min_zoom, self.max_zoom)
		};
	}

	/// Set the zoom factor directly, clamping into bounds.
	pub fn set_zoom(&mut self, zoom: f64) {
		if !zoom.is_nan() {
			self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
		}
	}

	/// Translate by a screen-space delta.
	pub fn pan_by(&mut self, dx: f64, dy: f64) {
		self.pan = self.pan + Point::new(dx, dy);
	}

	/// Replace the pan offset.
	pub fn set_pan(&mut self, pan: Point) {
		self.pan = pan;
	}

	/// Where a newly created node goes: horizontally centred in a canvas of
	/// `canvas` screen size, stacked downward by `existing` nodes.
	pub fn default_node_position(
		&self,
		canvas: Point,
		node_width: f64,
		top_margin: f64,
		spacing: f64,
		existing: usize,
	) -> Point {
		let top_center = self.screen_to_world(Point::new(canvas.x / 2.0, top_margin));
		Point::new(
			top_center.x - node_width / 2.0,
			top_center.y + existing as f64 * spacing,
		)
	}
}
