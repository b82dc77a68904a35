//! Per-action handlers and the declarative trigger table.
//!
//! Every handler shares one shape: validate inputs synchronously and
//! short-circuit to an error render with no network call, otherwise take a
//! loading guard, issue exactly one request, and render exactly once to
//! the action's own panel. Validation failures and remote failures go
//! through the same error view, so callers can assert on one shape.

use std::future::Future;
use std::rc::Rc;

use leptos::prelude::*;
use send_wrapper::SendWrapper;
use wasm_bindgen_futures::spawn_local;

use crate::api::{ApiClient, ApiError, MstAlgorithm, SortAlgorithm, SortCriteria, TraversalMethod};
use crate::render::{self, PanelView};
use crate::selectors::SelectorState;
use crate::state::{LoadingCounter, Panels, ResubmitPolicy};

/// Stable identifier of a user-triggerable action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionId {
	ReachableBfs,
	ReachableDfs,
	ShortestPath,
	Tour,
	TreeKruskal,
	TreePrim,
	GreedyMatch,
	ExhaustiveMatch,
	SortDogs,
	PackTransport,
}

/// Trigger-to-handler table, built once at startup so UI wiring stays
/// decoupled from the handlers themselves.
#[derive(Clone)]
pub struct ActionTable {
	// SendWrapper satisfies the Send bound on Leptos view children; the
	// table is only ever built and triggered on the single wasm thread.
	entries: SendWrapper<Rc<Vec<(ActionId, Rc<dyn Fn()>)>>>,
}

impl ActionTable {
	pub fn builder() -> ActionTableBuilder {
		ActionTableBuilder {
			entries: Vec::new(),
		}
	}

	pub fn trigger(&self, id: ActionId) {
		match self.entries.iter().find(|(entry, _)| *entry == id) {
			Some((_, handler)) => handler(),
			None => log::warn!("no handler registered for {id:?}"),
		}
	}
}

pub struct ActionTableBuilder {
	entries: Vec<(ActionId, Rc<dyn Fn()>)>,
}

impl ActionTableBuilder {
	pub fn register(mut self, id: ActionId, handler: impl Fn() + 'static) -> Self {
		self.entries.push((id, Rc::new(handler)));
		self
	}

	pub fn build(self) -> ActionTable {
		ActionTable {
			entries: SendWrapper::new(Rc::new(self.entries)),
		}
	}
}

/// Form inputs that feed actions but are not server-synchronized.
#[derive(Clone, Copy, Debug)]
pub struct ActionInputs {
	pub sort_criteria: RwSignal<SortCriteria>,
	pub sort_algorithm: RwSignal<SortAlgorithm>,
	pub capacity: RwSignal<String>,
}

impl ActionInputs {
	pub fn new() -> Self {
		Self {
			sort_criteria: RwSignal::new(SortCriteria::default()),
			sort_algorithm: RwSignal::new(SortAlgorithm::default()),
			capacity: RwSignal::new("250".into()),
		}
	}
}

impl Default for ActionInputs {
	fn default() -> Self {
		Self::new()
	}
}

/// Origin and destination must name two different shelters.
pub fn validate_endpoints(from: &str, to: &str) -> Result<(), String> {
	if from.is_empty() || to.is_empty() {
		return Err("Select an origin and a destination".into());
	}
	if from == to {
		return Err("Origin and destination must differ".into());
	}
	Ok(())
}

/// A tour needs at least two shelters.
pub fn validate_tour_nodes(nodes: &[String]) -> Result<(), String> {
	if nodes.len() < 2 {
		return Err("Select at least 2 shelters".into());
	}
	Ok(())
}

/// Vehicle capacity must parse as a positive number.
pub fn parse_capacity(raw: &str) -> Result<f64, String> {
	raw.trim()
		.parse::<f64>()
		.ok()
		.filter(|v| v.is_finite() && *v >= 1.0)
		.ok_or_else(|| "Enter a valid vehicle capacity".into())
}

/// Shared settlement path: one request, one render, guaranteed guard
/// release on success and failure alike.
fn submit<T, Fut, R>(
	resubmit: ResubmitPolicy,
	loading: LoadingCounter,
	panel: RwSignal<Option<PanelView>>,
	request: Fut,
	render: R,
) where
	T: 'static,
	Fut: Future<Output = Result<T, ApiError>> + 'static,
	R: FnOnce(T) -> PanelView + 'static,
{
	if resubmit == ResubmitPolicy::DisableWhileBusy && loading.is_busy_untracked() {
		log::info!("action ignored while another call is in flight");
		return;
	}
	let guard = loading.begin();
	spawn_local(async move {
		let view = match request.await {
			Ok(result) => render(result),
			Err(err) => PanelView::error(err.to_string()),
		};
		panel.set(Some(view));
		drop(guard);
	});
}

/// Builds the startup action table over the shared state.
pub fn build_actions(
	api: &ApiClient,
	loading: LoadingCounter,
	panels: Panels,
	selectors: SelectorState,
	inputs: ActionInputs,
	resubmit: ResubmitPolicy,
) -> ActionTable {
	let reachability = |method: TraversalMethod| {
		let api = api.clone();
		move || {
			let from = selectors.traversal_from.get_untracked();
			let to = selectors.traversal_to.get_untracked();
			if let Err(message) = validate_endpoints(&from, &to) {
				panels.reachability.set(Some(PanelView::error(message)));
				return;
			}
			let api = api.clone();
			let (from_r, to_r) = (from.clone(), to.clone());
			submit(
				resubmit,
				loading,
				panels.reachability,
				async move { api.reachability(&from, &to, method).await },
				move |result| render::reachability(&result, method, &from_r, &to_r),
			);
		}
	};

	let spanning_tree = |algorithm: MstAlgorithm| {
		let api = api.clone();
		move || {
			let api = api.clone();
			submit(
				resubmit,
				loading,
				panels.spanning_tree,
				async move { api.spanning_tree(algorithm).await },
				move |result| render::spanning_tree(&result, algorithm),
			);
		}
	};

	let shortest_path = {
		let api = api.clone();
		move || {
			let from = selectors.route_from.get_untracked();
			let to = selectors.route_to.get_untracked();
			if let Err(message) = validate_endpoints(&from, &to) {
				panels.shortest_path.set(Some(PanelView::error(message)));
				return;
			}
			let api = api.clone();
			let (from_r, to_r) = (from.clone(), to.clone());
			submit(
				resubmit,
				loading,
				panels.shortest_path,
				async move { api.shortest_path(&from, &to).await },
				move |result| render::shortest_path(&result, &from_r, &to_r),
			);
		}
	};

	let tour = {
		let api = api.clone();
		move || {
			let nodes = selectors.tour_nodes.with_untracked(|list| list.checked_ids());
			if let Err(message) = validate_tour_nodes(&nodes) {
				panels.tour.set(Some(PanelView::error(message)));
				return;
			}
			let api = api.clone();
			submit(
				resubmit,
				loading,
				panels.tour,
				async move { api.tour(&nodes).await },
				move |result| render::tour(&result),
			);
		}
	};

	let greedy = {
		let api = api.clone();
		move || {
			let adopter_id = selectors.adopter.get_untracked();
			if adopter_id.is_empty() {
				panels.greedy.set(Some(PanelView::error("Select an adopter")));
				return;
			}
			let api = api.clone();
			let adopter_r = adopter_id.clone();
			submit(
				resubmit,
				loading,
				panels.greedy,
				async move { api.greedy_assignment(&adopter_id).await },
				move |result| render::greedy_assignment(&result, &adopter_r),
			);
		}
	};

	let exhaustive = {
		let api = api.clone();
		move || {
			let api = api.clone();
			submit(
				resubmit,
				loading,
				panels.exhaustive,
				async move { api.exhaustive_assignment().await },
				move |result| render::assignment_set(&result),
			);
		}
	};

	let sort = {
		let api = api.clone();
		move || {
			let criteria = inputs.sort_criteria.get_untracked();
			let algorithm = inputs.sort_algorithm.get_untracked();
			let api = api.clone();
			submit(
				resubmit,
				loading,
				panels.sort,
				async move { api.sort_dogs(criteria, algorithm).await },
				move |result| render::sorted_dogs(&result, criteria, algorithm),
			);
		}
	};

	let packing = {
		let api = api.clone();
		move || {
			let capacity = match parse_capacity(&inputs.capacity.get_untracked()) {
				Ok(value) => value,
				Err(message) => {
					panels.packing.set(Some(PanelView::error(message)));
					return;
				}
			};
			let api = api.clone();
			submit(
				resubmit,
				loading,
				panels.packing,
				async move { api.capacity_packing(capacity).await },
				move |result| render::packing(&result, capacity),
			);
		}
	};

	ActionTable::builder()
		.register(ActionId::ReachableBfs, reachability(TraversalMethod::Bfs))
		.register(ActionId::ReachableDfs, reachability(TraversalMethod::Dfs))
		.register(ActionId::ShortestPath, shortest_path)
		.register(ActionId::Tour, tour)
		.register(ActionId::TreeKruskal, spanning_tree(MstAlgorithm::Kruskal))
		.register(ActionId::TreePrim, spanning_tree(MstAlgorithm::Prim))
		.register(ActionId::GreedyMatch, greedy)
		.register(ActionId::ExhaustiveMatch, exhaustive)
		.register(ActionId::SortDogs, sort)
		.register(ActionId::PackTransport, packing)
		.build()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn identical_endpoints_fail_validation() {
		assert!(validate_endpoints("A", "A").is_err());
		assert!(validate_endpoints("", "B").is_err());
		assert!(validate_endpoints("A", "B").is_ok());
	}

	#[test]
	fn tour_needs_at_least_two_nodes() {
		assert!(validate_tour_nodes(&[]).is_err());
		assert!(validate_tour_nodes(&["A".into()]).is_err());
		assert!(validate_tour_nodes(&["A".into(), "B".into()]).is_ok());
	}

	#[test]
	fn capacity_must_be_a_positive_number() {
		assert!(parse_capacity("abc").is_err());
		assert!(parse_capacity("0").is_err());
		assert!(parse_capacity("-5").is_err());
		assert!(parse_capacity("NaN").is_err());
		assert_eq!(parse_capacity(" 250 "), Ok(250.0));
	}

	#[test]
	fn validation_errors_share_the_remote_error_shape() {
		let from_validation = PanelView::error(validate_endpoints("A", "A").unwrap_err());
		let from_remote = PanelView::error(
			ApiError::Status {
				status: 500,
				message: "no dogs available".into(),
			}
			.to_string(),
		);
		assert_eq!(from_validation.title, from_remote.title);
		assert_eq!(from_validation.outcome, from_remote.outcome);
	}

	#[test]
	fn unregistered_trigger_is_ignored() {
		let table = ActionTable::builder().build();
		table.trigger(ActionId::SortDogs);
	}

	#[test]
	fn trigger_runs_the_registered_handler() {
		use std::cell::Cell;
		let hits = Rc::new(Cell::new(0));
		let hits_inner = hits.clone();
		let table = ActionTable::builder()
			.register(ActionId::Tour, move || hits_inner.set(hits_inner.get() + 1))
			.build();
		table.trigger(ActionId::Tour);
		table.trigger(ActionId::Tour);
		assert_eq!(hits.get(), 2);
	}
}
