//! Show/hide controller for the network visualization.
//!
//! Only a show-while-hidden press fetches the topology and rebuilds the
//! canvas model; hiding tears the canvas down without a rebuild, so
//! toggling show→hide constructs exactly one renderer instance.

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use super::force_graph::{ForceGraphCanvas, GraphData};
use crate::api::ApiClient;
use crate::graph_model::{ToggleAction, build_graph_model, toggle_action};
use crate::state::LoadingCounter;

#[component]
pub fn GraphPanel(api: ApiClient, loading: LoadingCounter) -> impl IntoView {
	let visible = RwSignal::new(false);
	let graph = RwSignal::new(GraphData::default());
	let load_error = RwSignal::new(None::<String>);

	let toggle = move |_| match toggle_action(visible.get_untracked()) {
		ToggleAction::Hide => visible.set(false),
		ToggleAction::FetchAndShow => {
			// Flip synchronously: a second press while the fetch is still
			// in flight must read the shown state and hide.
			visible.set(true);
			let api = api.clone();
			let guard = loading.begin();
			spawn_local(async move {
				match api.graph_topology().await {
					Ok(topology) => {
						let model = build_graph_model(&topology);
						log::info!(
							"network graph: {} nodes, {} edges",
							model.nodes.len(),
							model.links.len()
						);
						graph.set(model);
						load_error.set(None);
					}
					Err(err) => load_error.set(Some(err.to_string())),
				}
				drop(guard);
			});
		}
	};

	view! {
		<div class="graph-panel">
			<button class="btn" on:click=toggle>
				{move || {
					if visible.get() { "Hide network graph" } else { "Show network graph" }
				}}
			</button>
			<Show when=move || visible.get()>
				{move || {
					load_error
						.get()
						.map(|message| {
							view! {
								<div class="graph-error">
									<h4>"Could not load the network graph"</h4>
									<p>{message}</p>
								</div>
							}
						})
				}}
				<Show when=move || load_error.get().is_none()>
					<div class="graph-container" style="height: 520px;">
						<ForceGraphCanvas data=graph />
					</div>
				</Show>
			</Show>
		</div>
	}
}
