//! The dashboard page: top-level driver that fans out the initial loads,
//! owns the shared state and wires the action table to the controls.

use futures::join;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::actions::{ActionId, ActionInputs, ActionTable, build_actions};
use crate::api::{
	Adopter, ApiClient, ApiError, ConnectionState, Dog, Shelter, SortAlgorithm, SortCriteria,
};
use crate::components::graph_panel::GraphPanel;
use crate::components::result_panel::ResultPanel;
use crate::components::status::ConnectionStatus;
use crate::render;
use crate::selectors::{SelectOption, SelectorState};
use crate::state::{DashboardConfig, Panels, SessionState, Tab};

/// Liveness probe; failures surface only on the connectivity indicator.
async fn check_connection(api: ApiClient, connection: RwSignal<ConnectionState>) {
	let state = api.ping().await;
	if state != ConnectionState::Connected {
		log::error!("liveness check failed");
	}
	connection.set(state);
}

/// Aggregate load of the three entity snapshots, in parallel. All three
/// must succeed; a partial failure raises one notification and leaves the
/// listing panels and counters untouched.
async fn load_dashboard_data(api: ApiClient, session: SessionState, panels: Panels) {
	let _guard = session.loading.begin();
	let (shelters, dogs, adopters) = join!(api.shelters(), api.dogs(), api.adopters());
	apply_dashboard_data(session, panels, shelters, dogs, adopters);
}

/// Settlement half of the aggregate load, kept free of the network so the
/// counter and panel writes are testable.
fn apply_dashboard_data(
	session: SessionState,
	panels: Panels,
	shelters: Result<Vec<Shelter>, ApiError>,
	dogs: Result<Vec<Dog>, ApiError>,
	adopters: Result<Vec<Adopter>, ApiError>,
) {
	match (shelters, dogs, adopters) {
		(Ok(shelters), Ok(dogs), Ok(adopters)) => {
			session.shelter_count.set(shelters.len());
			session.dog_count.set(dogs.len());
			session.adopter_count.set(adopters.len());
			panels.shelters.set(Some(render::shelter_list(&shelters)));
			panels.dogs.set(Some(render::dog_list(&dogs)));
			panels.adopters.set(Some(render::adopter_list(&adopters)));
			log::info!(
				"dashboard data loaded: {} shelters, {} dogs, {} adopters",
				shelters.len(),
				dogs.len(),
				adopters.len()
			);
		}
		(shelters, dogs, adopters) => {
			let cause = shelters
				.err()
				.or_else(|| dogs.err())
				.or_else(|| adopters.err())
				.map(|e| e.to_string())
				.unwrap_or_default();
			log::error!("dashboard data load failed: {cause}");
			session
				.notice
				.set(Some("Failed to load dashboard data".into()));
		}
	}
}

/// Selector synchronization, independent of the aggregate load. Failures
/// degrade to the static fallback options and are only logged.
async fn sync_selectors(api: ApiClient, selectors: SelectorState) {
	let (shelters, adopters) = join!(api.shelters(), api.adopters());
	match shelters {
		Ok(list) => selectors.apply_shelters(&list),
		Err(err) => log::warn!("shelter selector sync failed, keeping fallbacks: {err}"),
	}
	match adopters {
		Ok(list) => selectors.apply_adopters(&list),
		Err(err) => log::warn!("adopter selector sync failed, keeping fallbacks: {err}"),
	}
}

/// Shelter logistics dashboard.
#[component]
pub fn Dashboard() -> impl IntoView {
	let config = DashboardConfig::default();
	let api = ApiClient::new(config.base_url.clone());
	let session = SessionState::new();
	let panels = Panels::new();
	let selectors = SelectorState::new();
	let inputs = ActionInputs::new();

	session.switch_tab(Tab::default());
	spawn_local(check_connection(api.clone(), session.connection));
	spawn_local(load_dashboard_data(api.clone(), session, panels));
	spawn_local(sync_selectors(api.clone(), selectors));

	let actions = build_actions(
		&api,
		session.loading,
		panels,
		selectors,
		inputs,
		config.resubmit,
	);
	// Each TabSection's children closure takes its own handle on the table.
	let (actions_traversal, actions_routes, actions_network) =
		(actions.clone(), actions.clone(), actions.clone());
	let (actions_matching, actions_sorting, actions_transport) =
		(actions.clone(), actions.clone(), actions);

	view! {
		<div class="dashboard">
			<header class="header">
				<h1>"Shelter Logistics Dashboard"</h1>
				<ConnectionStatus state=session.connection />
			</header>

			{move || {
				session
					.notice
					.get()
					.map(|message| {
						view! {
							<div class="notice error">
								<p>{message}</p>
								<button on:click=move |_| session.notice.set(None)>"Dismiss"</button>
							</div>
						}
					})
			}}

			<nav class="tab-bar">
				{Tab::ALL
					.into_iter()
					.map(|tab| {
						view! {
							<button
								class="tab-button"
								class:active=move || session.active_tab.get() == tab
								on:click=move |_| session.switch_tab(tab)
							>
								{tab.title()}
							</button>
						}
					})
					.collect_view()}
			</nav>

			<TabSection session tab=Tab::Overview>
				<div class="stats-grid">
					<StatCard label="Shelters" value=session.shelter_count />
					<StatCard label="Dogs" value=session.dog_count />
					<StatCard label="Adopters" value=session.adopter_count />
				</div>
				<h3>"Shelters"</h3>
				<ResultPanel view=panels.shelters />
				<h3>"Dogs"</h3>
				<ResultPanel view=panels.dogs />
				<h3>"Adopters"</h3>
				<ResultPanel view=panels.adopters />
			</TabSection>

			<TabSection session tab=Tab::Traversal>
				<h3>"Reachability between shelters"</h3>
				<div class="controls">
					<label>"From"</label>
					<OptionSelect options=selectors.shelter_options value=selectors.traversal_from />
					<label>"To"</label>
					<OptionSelect options=selectors.shelter_options value=selectors.traversal_to />
					<ActionButton actions=actions_traversal.clone() id=ActionId::ReachableBfs label="Run BFS" />
					<ActionButton actions=actions_traversal.clone() id=ActionId::ReachableDfs label="Run DFS" />
				</div>
				<ResultPanel view=panels.reachability />
			</TabSection>

			<TabSection session tab=Tab::Routes>
				<h3>"Shortest route (Dijkstra)"</h3>
				<div class="controls">
					<label>"From"</label>
					<OptionSelect options=selectors.shelter_options value=selectors.route_from />
					<label>"To"</label>
					<OptionSelect options=selectors.shelter_options value=selectors.route_to />
					<ActionButton
						actions=actions_routes.clone()
						id=ActionId::ShortestPath
						label="Find shortest path"
					/>
				</div>
				<ResultPanel view=panels.shortest_path />

				<h3>"Optimal tour (Branch & Bound)"</h3>
				<TourChecklist selectors />
				<div class="controls">
					<ActionButton actions=actions_routes.clone() id=ActionId::Tour label="Compute tour" />
				</div>
				<ResultPanel view=panels.tour />
			</TabSection>

			<TabSection session tab=Tab::Network>
				<h3>"Minimum spanning tree"</h3>
				<div class="controls">
					<ActionButton actions=actions_network.clone() id=ActionId::TreeKruskal label="Kruskal" />
					<ActionButton actions=actions_network.clone() id=ActionId::TreePrim label="Prim" />
				</div>
				<ResultPanel view=panels.spanning_tree />

				<h3>"Network visualization"</h3>
				<GraphPanel api=api.clone() loading=session.loading />
			</TabSection>

			<TabSection session tab=Tab::Matching>
				<h3>"Greedy selection for one adopter"</h3>
				<div class="controls">
					<label>"Adopter"</label>
					<OptionSelect options=selectors.adopter_options value=selectors.adopter />
					<ActionButton
						actions=actions_matching.clone()
						id=ActionId::GreedyMatch
						label="Run greedy matching"
					/>
				</div>
				<ResultPanel view=panels.greedy />

				<h3>"Constrained assignment (backtracking)"</h3>
				<div class="controls">
					<ActionButton
						actions=actions_matching.clone()
						id=ActionId::ExhaustiveMatch
						label="Run backtracking"
					/>
				</div>
				<ResultPanel view=panels.exhaustive />
			</TabSection>

			<TabSection session tab=Tab::Sorting>
				<h3>"Sort dogs"</h3>
				<div class="controls">
					<label>"Criteria"</label>
					<select on:change=move |ev| {
						inputs.sort_criteria.set(SortCriteria::from_query(&event_target_value(&ev)))
					}>
						<option value="priority">"Priority"</option>
						<option value="age">"Age"</option>
						<option value="weight">"Weight"</option>
					</select>
					<label>"Algorithm"</label>
					<select on:change=move |ev| {
						inputs.sort_algorithm.set(SortAlgorithm::from_query(&event_target_value(&ev)))
					}>
						<option value="mergesort">"MergeSort"</option>
						<option value="quicksort">"QuickSort"</option>
					</select>
					<ActionButton actions=actions_sorting.clone() id=ActionId::SortDogs label="Sort" />
				</div>
				<ResultPanel view=panels.sort />
			</TabSection>

			<TabSection session tab=Tab::Transport>
				<h3>"Vehicle capacity packing"</h3>
				<div class="controls">
					<label>"Capacity (kg)"</label>
					<input
						type="number"
						min="1"
						prop:value=move || inputs.capacity.get()
						on:input=move |ev| inputs.capacity.set(event_target_value(&ev))
					/>
					<ActionButton
						actions=actions_transport.clone()
						id=ActionId::PackTransport
						label="Optimize transport"
					/>
				</div>
				<ResultPanel view=panels.packing />
			</TabSection>

			<div class="loading-overlay" class:active=move || session.loading.is_busy()>
				<div class="spinner"></div>
				<p>"Loading..."</p>
			</div>
		</div>
	}
}

/// One tab's content region; only the active tab carries the `active`
/// class modifier.
#[component]
fn TabSection(session: SessionState, tab: Tab, children: Children) -> impl IntoView {
	view! {
		<section class="tab-content" class:active=move || session.active_tab.get() == tab>
			{children()}
		</section>
	}
}

#[component]
fn StatCard(label: &'static str, value: RwSignal<usize>) -> impl IntoView {
	view! {
		<div class="stat-card">
			<span class="stat-value">{move || value.get()}</span>
			<span class="stat-label">{label}</span>
		</div>
	}
}

/// A selector backed by the synchronized option set; its value signal
/// survives repopulation via the continuity rules in [`crate::selectors`].
#[component]
fn OptionSelect(options: RwSignal<Vec<SelectOption>>, value: RwSignal<String>) -> impl IntoView {
	view! {
		<select
			prop:value=move || value.get()
			on:change=move |ev| value.set(event_target_value(&ev))
		>
			{move || {
				options
					.get()
					.into_iter()
					.map(|option| {
						let selected = option.value == value.get_untracked();
						view! {
							<option value=option.value prop:selected=selected>
								{option.label}
							</option>
						}
					})
					.collect_view()
			}}
		</select>
	}
}

#[component]
fn ActionButton(actions: ActionTable, id: ActionId, label: &'static str) -> impl IntoView {
	view! {
		<button class="btn" on:click=move |_| actions.trigger(id)>
			{label}
		</button>
	}
}

/// The tour multi-select with its three idempotent helpers.
#[component]
fn TourChecklist(selectors: SelectorState) -> impl IntoView {
	view! {
		<div class="checkbox-toolbar">
			<button
				class="btn-small"
				on:click=move |_| selectors.tour_nodes.update(|list| list.select_all())
			>
				"Select all"
			</button>
			<button
				class="btn-small"
				on:click=move |_| selectors.tour_nodes.update(|list| list.select_none())
			>
				"Clear"
			</button>
			<button
				class="btn-small"
				on:click=move |_| selectors.tour_nodes.update(|list| list.select_default())
			>
				"Default"
			</button>
		</div>
		<div class="checkbox-group">
			{move || {
				selectors
					.tour_nodes
					.get()
					.entries
					.into_iter()
					.map(|entry| {
						let id = entry.id.clone();
						view! {
							<label>
								<input
									type="checkbox"
									prop:checked=entry.checked
									on:change=move |_| {
										selectors.tour_nodes.update(|list| list.toggle(&id))
									}
								/>
								" "
								{entry.label}
							</label>
						}
					})
					.collect_view()
			}}
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_aggregate_load_zeroes_counters_and_renders_messages() {
		let session = SessionState::new();
		let panels = Panels::new();
		session.shelter_count.set(5);
		session.dog_count.set(5);
		session.adopter_count.set(5);

		apply_dashboard_data(session, panels, Ok(vec![]), Ok(vec![]), Ok(vec![]));

		assert_eq!(session.shelter_count.get_untracked(), 0);
		assert_eq!(session.dog_count.get_untracked(), 0);
		assert_eq!(session.adopter_count.get_untracked(), 0);

		let shelters = panels.shelters.get_untracked().unwrap();
		assert!(shelters.sections[0].lines[0].contains("No shelters available"));
		assert_eq!(session.notice.get_untracked(), None);
	}

	#[test]
	fn partial_failure_raises_one_notice_and_touches_nothing_else() {
		let session = SessionState::new();
		let panels = Panels::new();

		apply_dashboard_data(
			session,
			panels,
			Ok(vec![]),
			Err(ApiError::Transport("connection refused".into())),
			Ok(vec![]),
		);

		assert_eq!(
			session.notice.get_untracked().as_deref(),
			Some("Failed to load dashboard data")
		);
		assert_eq!(session.shelter_count.get_untracked(), 0);
		assert!(panels.shelters.get_untracked().is_none());
		assert!(panels.dogs.get_untracked().is_none());
	}
}
