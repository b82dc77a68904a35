//! Turns the raw `/network/graph` topology into the undirected visual
//! model the canvas component renders.
//!
//! The service reports directed edges and may include both directions of
//! one physical link; the visual graph must carry exactly one edge per
//! unordered endpoint pair. When duplicates disagree on weight the first
//! occurrence wins (they are not expected to disagree).

use std::collections::HashSet;

use crate::api::GraphTopology;
use crate::components::force_graph::{GraphData, GraphLink, GraphNode};
use crate::format;

/// Canonical key of an unordered endpoint pair: the identifiers sorted
/// lexicographically and joined.
pub fn edge_key(a: &str, b: &str) -> String {
	if a <= b {
		format!("{a}-{b}")
	} else {
		format!("{b}-{a}")
	}
}

/// Builds the deduplicated visual model: one labeled node per unique
/// identifier, one weighted edge per unordered pair.
pub fn build_graph_model(topology: &GraphTopology) -> GraphData {
	let mut seen_nodes = HashSet::new();
	let nodes: Vec<GraphNode> = topology
		.nodes
		.iter()
		.filter(|id| seen_nodes.insert(id.as_str()))
		.map(|id| GraphNode {
			id: id.clone(),
			label: id.clone(),
		})
		.collect();

	let mut seen_edges = HashSet::new();
	let links: Vec<GraphLink> = topology
		.edges
		.iter()
		.filter(|edge| seen_edges.insert(edge_key(&edge.from, &edge.to)))
		.map(|edge| GraphLink {
			source: edge.from.clone(),
			target: edge.to.clone(),
			weight: edge.weight,
			label: format::edge_km(edge.weight),
		})
		.collect();

	GraphData { nodes, links }
}

/// What a visualization-toggle press should do given the current
/// visibility. Only the hidden state triggers a fetch and rebuild; hiding
/// never rebuilds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleAction {
	FetchAndShow,
	Hide,
}

pub fn toggle_action(visible: bool) -> ToggleAction {
	if visible {
		ToggleAction::Hide
	} else {
		ToggleAction::FetchAndShow
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::GraphEdge;

	fn edge(from: &str, to: &str, weight: f64) -> GraphEdge {
		GraphEdge {
			from: from.into(),
			to: to.into(),
			weight,
		}
	}

	#[test]
	fn both_directions_collapse_to_one_edge() {
		let topology = GraphTopology {
			nodes: vec!["A".into(), "B".into()],
			edges: vec![edge("A", "B", 3.0), edge("B", "A", 3.0)],
		};
		let model = build_graph_model(&topology);
		assert_eq!(model.links.len(), 1);
		assert_eq!(model.links[0].label, "3.0 km");
	}

	#[test]
	fn duplicate_disagreement_keeps_first_seen_weight() {
		let topology = GraphTopology {
			nodes: vec!["A".into(), "B".into()],
			edges: vec![edge("A", "B", 3.0), edge("B", "A", 99.0)],
		};
		let model = build_graph_model(&topology);
		assert_eq!(model.links.len(), 1);
		assert_eq!(model.links[0].weight, 3.0);
	}

	#[test]
	fn zero_edges_yields_nodes_only() {
		let topology = GraphTopology {
			nodes: vec!["A".into(), "B".into(), "A".into()],
			edges: vec![],
		};
		let model = build_graph_model(&topology);
		assert!(model.links.is_empty());
		assert_eq!(model.nodes.len(), 2, "duplicate node ids collapse");
		assert_eq!(model.nodes[0].label, "A");
	}

	#[test]
	fn edge_key_is_order_independent() {
		assert_eq!(edge_key("B", "A"), edge_key("A", "B"));
		assert_eq!(edge_key("A", "B"), "A-B");
	}

	#[test]
	fn second_press_before_settlement_hides_instead_of_refetching() {
		// Visibility flips on the press itself; the fetch settles later.
		let mut visible = false;
		let mut fetches = 0;

		assert_eq!(toggle_action(visible), ToggleAction::FetchAndShow);
		fetches += 1;
		visible = true;

		// fetch still in flight when the second press lands
		assert_eq!(toggle_action(visible), ToggleAction::Hide);
		visible = false;

		assert_eq!(fetches, 1);
		assert!(!visible);
	}

	#[test]
	fn toggling_twice_builds_exactly_once() {
		let mut visible = false;
		let mut constructions = 0;

		for _ in 0..2 {
			match toggle_action(visible) {
				ToggleAction::FetchAndShow => {
					constructions += 1;
					visible = true;
				}
				ToggleAction::Hide => visible = false,
			}
		}
		assert_eq!(constructions, 1);
		assert!(!visible);
	}
}
