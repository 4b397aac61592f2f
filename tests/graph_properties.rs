use std::collections::HashSet;
use std::rc::Rc;

use flow_canvas::flow::{EdgeRejection, GraphModel, NodeId, NodeTypeRegistry, Point, Viewport};
use proptest::prelude::*;

const TYPES: [&str; 5] = [
	"trigger_message",
	"action_sms",
	"condition_if",
	"timing_delay",
	"end_flow",
];

#[derive(Clone, Debug)]
enum Op {
	AddNode(usize),
	DeleteNode(usize),
	AddEdge(usize, usize),
	DeleteEdge(usize, usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
	prop_oneof![
		(0..TYPES.len()).prop_map(Op::AddNode),
		(0usize..16).prop_map(Op::DeleteNode),
		(0usize..16, 0usize..16).prop_map(|(a, b)| Op::AddEdge(a, b)),
		(0usize..16, 0usize..16).prop_map(|(a, b)| Op::DeleteEdge(a, b)),
	]
}

/// Pick the `i`th node id seen so far, including deleted ones, so stale ids
/// get exercised too.
fn pick(seen: &[NodeId], i: usize) -> Option<NodeId> {
	(!seen.is_empty()).then(|| seen[i % seen.len()].clone())
}

fn assert_invariants(g: &GraphModel) {
	let nodes: HashSet<_> = g.list_nodes().iter().map(|n| n.id.clone()).collect();
	let mut pairs = HashSet::new();
	for e in g.list_edges() {
		assert!(nodes.contains(&e.from), "dangling source {}", e.from);
		assert!(nodes.contains(&e.to), "dangling target {}", e.to);
		assert_ne!(e.from, e.to, "self loop");
		assert!(pairs.insert((e.from.clone(), e.to.clone())), "duplicate edge");
	}
}

proptest! {
	#[test]
	fn topology_invariants_hold_after_every_op(ops in prop::collection::vec(op_strategy(), 1..80)) {
		let mut g = GraphModel::new(Rc::new(NodeTypeRegistry::builtin()));
		let mut seen: Vec<NodeId> = Vec::new();

		for op in ops {
			match op {
				Op::AddNode(t) => {
					seen.push(g.add_node(TYPES[t], Point::default()).unwrap());
				}
				Op::DeleteNode(i) => {
					if let Some(id) = pick(&seen, i) {
						let incident = g.list_edges().iter().filter(|e| e.touches(&id)).count();
						let before = g.list_edges().len();
						let existed = g.delete_node(&id).is_some();
						prop_assert_eq!(g.list_edges().len(), before - incident);
						if existed {
							prop_assert!(g.get_node(&id).is_none());
						}
					}
				}
				Op::AddEdge(a, b) => {
					if let (Some(from), Some(to)) = (pick(&seen, a), pick(&seen, b)) {
						let before = g.list_edges().to_vec();
						if g.add_edge(&from, &to, None).is_err() {
							prop_assert_eq!(g.list_edges(), before.as_slice());
						}
					}
				}
				Op::DeleteEdge(a, b) => {
					if let (Some(from), Some(to)) = (pick(&seen, a), pick(&seen, b)) {
						g.delete_edge(&from, &to);
						prop_assert!(g.find_edge(&from, &to).is_none());
					}
				}
			}
			assert_invariants(&g);
		}
	}

	#[test]
	fn self_loops_are_always_rejected(t in 0..TYPES.len()) {
		let mut g = GraphModel::new(Rc::new(NodeTypeRegistry::builtin()));
		let id = g.add_node(TYPES[t], Point::default()).unwrap();
		prop_assert_eq!(g.add_edge(&id, &id, None), Err(EdgeRejection::SelfLoop));
		prop_assert!(g.list_edges().is_empty());
	}

	#[test]
	fn screen_world_round_trip(
		px in -5000.0f64..5000.0,
		py in -5000.0f64..5000.0,
		pan_x in -2000.0f64..2000.0,
		pan_y in -2000.0f64..2000.0,
		zoom in 0.3f64..=2.0,
	) {
		let mut vp = Viewport::default();
		vp.set_pan(Point::new(pan_x, pan_y));
		vp.set_zoom(zoom);
		let p = Point::new(px, py);
		let back = vp.world_to_screen(vp.screen_to_world(p));
		prop_assert!((back.x - p.x).abs() < 1e-6);
		prop_assert!((back.y - p.y).abs() < 1e-6);
	}

	#[test]
	fn zoom_stays_in_bounds(deltas in prop::collection::vec(-5.0f64..5.0, 0..40)) {
		let mut vp = Viewport::default();
		for d in deltas {
			vp.adjust_zoom(d);
			prop_assert!((0.3..=2.0).contains(&vp.zoom()));
		}
	}
}

#[test]
fn extreme_zoom_converges_to_bounds() {
	let mut vp = Viewport::default();
	for _ in 0..3 {
		vp.adjust_zoom(f64::INFINITY);
	}
	assert_eq!(vp.zoom(), 2.0);
	for _ in 0..3 {
		vp.adjust_zoom(f64::NEG_INFINITY);
	}
	assert_eq!(vp.zoom(), 0.3);
}
