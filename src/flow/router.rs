//! Edge curve geometry and hit testing.

use super::geometry::{NodeSize, Point};

/// Segments used to flatten a curve for hit testing.
const HIT_SAMPLES: usize = 24;

/// A cubic bezier from `start` to `end`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
	/// First endpoint.
	pub start: Point,
	/// Control point pulling away from `start`.
	pub control1: Point,
	/// Control point pulling into `end`.
	pub control2: Point,
	/// Last endpoint.
	pub end: Point,
}

impl CubicBezier {
	/// Point on the curve at `t` in `[0, 1]`.
	pub fn sample(&self, t: f64) -> Point {
		let mt = 1.0 - t;
		self.start * (mt * mt * mt)
			+ self.control1 * (3.0 * mt * mt * t)
			+ self.control2 * (3.0 * mt * t * t)
			+ self.end * (t * t * t)
	}

	/// Derivative at `t`.
	pub fn tangent(&self, t: f64) -> Point {
		let mt = 1.0 - t;
		(self.control1 - self.start) * (3.0 * mt * mt)
			+ (self.control2 - self.control1) * (6.0 * mt * t)
			+ (self.end - self.control2) * (3.0 * t * t)
	}

	/// Shortest distance from `p` to a polyline approximation of the curve.
	pub fn distance_to(&self, p: Point) -> f64 {
		let mut prev = self.start;
		let mut best = f64::INFINITY;
		for i in 1..=HIT_SAMPLES {
			let next = self.sample(i as f64 / HIT_SAMPLES as f64);
			best = best.min(segment_distance(p, prev, next));
			prev = next;
		}
		best
	}
}

fn segment_distance(p: Point, a: Point, b: Point) -> f64 {
	let ab = b - a;
	let len2 = ab.x * ab.x + ab.y * ab.y;
	if len2 < 1e-12 {
		return p.distance(a);
	}
	let t = (((p.x - a.x) * ab.x + (p.y - a.y) * ab.y) / len2).clamp(0.0, 1.0);
	p.distance(a + ab * t)
}

/// Triangle drawn at the target end of an edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arrowhead {
	/// Point touching the inbound port.
	pub tip: Point,
	/// Left base corner.
	pub left: Point,
	/// Right base corner.
	pub right: Point,
}

/// Everything needed to draw and click one edge, in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Route {
	/// The drawn curve.
	pub path: CubicBezier,
	/// Arrow at the target end.
	pub arrow: Arrowhead,
	/// Half-width of the clickable band around `path`.
	pub hit_tolerance: f64,
}

impl Route {
	/// Whether `p` falls inside the clickable band.
	pub fn hit(&self, p: Point) -> bool {
		self.path.distance_to(p) <= self.hit_tolerance
	}

	/// Where an edge label is drawn.
	pub fn midpoint(&self) -> Point {
		self.path.sample(0.5)
	}
}

/// Computes edge geometry for top-to-bottom flows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConnectionRouter {
	/// Box used to find port anchors.
	pub node_size: NodeSize,
	/// Copied into every [`Route`].
	pub hit_tolerance: f64,
	/// Arrowhead length.
	pub arrow_size: f64,
}

impl ConnectionRouter {
	/// Route an edge between the nodes whose top-left corners are given.
	pub fn route(&self, from_node: Point, to_node: Point) -> Route {
		self.route_points(
			self.node_size.outbound_anchor(from_node),
			self.node_size.inbound_anchor(to_node),
		)
	}

	/// Route between two port anchors. Control points share the vertical
	/// midpoint, giving an S curve.
	pub fn route_points(&self, start: Point, end: Point) -> Route {
		let mid_y = (start.y + end.y) / 2.0;
		let path = CubicBezier {
			start,
			control1: Point::new(start.x, mid_y),
			control2: Point::new(end.x, mid_y),
			end,
		};
		Route {
			path,
			arrow: self.arrowhead(&path),
			hit_tolerance: self.hit_tolerance,
		}
	}

	fn arrowhead(&self, path: &CubicBezier) -> Arrowhead {
		let dir = path
			.tangent(1.0)
			.normalized()
			.or_else(|| (path.end - path.start).normalized())
			.unwrap_or(Point::new(0.0, 1.0));
		let back = path.end - dir * self.arrow_size;
		let perp = Point::new(-dir.y, dir.x) * (self.arrow_size / 2.0);
		Arrowhead {
			tip: path.end,
			left: back + perp,
			right: back - perp,
		}
	}
}
