//! Browser-side smoke tests, run with `wasm-pack test --headless`.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use shelter_dashboard::api::{GraphEdge, GraphTopology};
use shelter_dashboard::graph_model::build_graph_model;
use shelter_dashboard::state::LoadingCounter;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn graph_model_dedupes_in_browser() {
	let topology = GraphTopology {
		nodes: vec!["A".into(), "B".into()],
		edges: vec![
			GraphEdge {
				from: "A".into(),
				to: "B".into(),
				weight: 2.0,
			},
			GraphEdge {
				from: "B".into(),
				to: "A".into(),
				weight: 2.0,
			},
		],
	};
	let model = build_graph_model(&topology);
	assert_eq!(model.nodes.len(), 2);
	assert_eq!(model.links.len(), 1);
}

#[wasm_bindgen_test]
fn loading_guard_releases_on_drop() {
	let loading = LoadingCounter::new();
	{
		let _guard = loading.begin();
		assert!(loading.is_busy_untracked());
	}
	assert!(!loading.is_busy_untracked());
}
