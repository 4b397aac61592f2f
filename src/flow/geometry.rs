//! Points and node box geometry shared by the viewport, router and hit tests.

use std::ops::{Add, Div, Mul, Sub};

use serde::{Deserialize, Serialize};

/// A 2D point or vector. Whether it is in screen or world space depends on
/// where it came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
	/// Horizontal, growing right.
	pub x: f64,
	/// Vertical, growing down.
	pub y: f64,
}

impl Point {
	/// Shorthand constructor.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Euclidean length.
	pub fn length(self) -> f64 {
		(self.x * self.x + self.y * self.y).sqrt()
	}

	/// Distance to another point.
	pub fn distance(self, other: Point) -> f64 {
		(self - other).length()
	}

	/// Unit vector in the same direction, or `None` for a (near) zero vector.
	pub fn normalized(self) -> Option<Point> {
		let len = self.length();
		(len > 1e-9).then(|| self / len)
	}
}

impl Add for Point {
	type Output = Point;

	fn add(self, rhs: Point) -> Point {
		Point::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl Sub for Point {
	type Output = Point;

	fn sub(self, rhs: Point) -> Point {
		Point::new(self.x - rhs.x, self.y - rhs.y)
	}
}

impl Mul<f64> for Point {
	type Output = Point;

	fn mul(self, rhs: f64) -> Point {
		Point::new(self.x * rhs, self.y * rhs)
	}
}

impl Div<f64> for Point {
	type Output = Point;

	fn div(self, rhs: f64) -> Point {
		Point::new(self.x / rhs, self.y / rhs)
	}
}

/// Width and height of a rendered node in world units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeSize {
	/// Horizontal extent.
	pub width: f64,
	/// Vertical extent.
	pub height: f64,
}

impl NodeSize {
	/// Outbound port of a node whose top-left corner is `origin`: bottom centre.
	pub fn outbound_anchor(self, origin: Point) -> Point {
		Point::new(origin.x + self.width / 2.0, origin.y + self.height)
	}

	/// Inbound port of a node whose top-left corner is `origin`: top centre.
	pub fn inbound_anchor(self, origin: Point) -> Point {
		Point::new(origin.x + self.width / 2.0, origin.y)
	}

	/// Whether `p` lies inside the node box at `origin`.
	pub fn contains(self, origin: Point, p: Point) -> bool {
		p.x >= origin.x
			&& p.x <= origin.x + self.width
			&& p.y >= origin.y
			&& p.y <= origin.y + self.height
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn anchors_sit_on_box_edges() {
		let size = NodeSize {
			width: 200.0,
			height: 72.0,
		};
		let origin = Point::new(10.0, 20.0);
		assert_eq!(size.outbound_anchor(origin), Point::new(110.0, 92.0));
		assert_eq!(size.inbound_anchor(origin), Point::new(110.0, 20.0));
		assert!(size.contains(origin, Point::new(110.0, 50.0)));
		assert!(!size.contains(origin, Point::new(5.0, 50.0)));
	}

	#[test]
	fn zero_vector_has_no_direction() {
		assert!(Point::default().normalized().is_none());
		assert_eq!(Point::new(0.0, 3.0).normalized(), Some(Point::new(0.0, 1.0)));
	}
}
