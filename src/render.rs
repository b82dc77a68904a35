//! Typed panel content: every operation result (or failure) becomes a
//! [`PanelView`] before it touches the DOM, so rendering is testable and
//! one panel can never scribble over another.

use serde::Serialize;

use crate::api::{
	Adopter, AssignmentSetResult, Dog, GreedyAssignmentResult, MstAlgorithm, PackingResult,
	ReachabilityResult, Shelter, ShortestPathResult, SortAlgorithm, SortCriteria, SortedDogs,
	SpanningTreeResult, TourResult, TraversalMethod,
};
use crate::format;

/// Classification of a panel's content, reflected as a CSS class modifier.
/// `NotFound` is a well-formed negative outcome (no path, no route), kept
/// distinct from an operation failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
	Success,
	NotFound,
	Error,
}

impl Outcome {
	pub fn class(self) -> &'static str {
		match self {
			Outcome::Success => "success",
			Outcome::NotFound => "not-found",
			Outcome::Error => "error",
		}
	}
}

/// One titled block of result lines. `preformatted` renders the lines in a
/// `<pre>` instead of paragraphs.
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
	pub heading: Option<String>,
	pub lines: Vec<String>,
	pub preformatted: bool,
}

impl Section {
	pub fn new(heading: impl Into<String>, lines: Vec<String>) -> Self {
		Self {
			heading: Some(heading.into()),
			lines,
			preformatted: false,
		}
	}

	pub fn plain(lines: Vec<String>) -> Self {
		Self {
			heading: None,
			lines,
			preformatted: false,
		}
	}
}

/// Everything a result panel displays. An empty title is suppressed
/// entirely rather than rendered as an empty heading.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelView {
	pub outcome: Outcome,
	pub title: Option<String>,
	pub sections: Vec<Section>,
}

impl PanelView {
	pub fn success(title: impl Into<String>) -> Self {
		let title: String = title.into();
		Self {
			outcome: Outcome::Success,
			title: (!title.is_empty()).then_some(title),
			sections: Vec::new(),
		}
	}

	/// The one error shape used by validation failures and remote failures
	/// alike: title `Error`, message as the body.
	pub fn error(message: impl Into<String>) -> Self {
		Self {
			outcome: Outcome::Error,
			title: Some("Error".into()),
			sections: vec![Section::plain(vec![message.into()])],
		}
	}

	pub fn not_found(title: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			outcome: Outcome::NotFound,
			title: Some(title.into()),
			sections: vec![Section::plain(vec![message.into()])],
		}
	}

	/// Generic fallback for raw data with no dedicated view: pretty JSON.
	pub fn json(title: impl Into<String>, value: &impl Serialize) -> Self {
		let body = serde_json::to_string_pretty(value)
			.unwrap_or_else(|e| format!("unserializable value: {e}"));
		let mut view = Self::success(title);
		view.sections.push(Section {
			heading: None,
			lines: vec![body],
			preformatted: true,
		});
		view
	}

	pub fn with(mut self, section: Section) -> Self {
		self.sections.push(section);
		self
	}
}

/// Listing panel for shelters; the empty snapshot is a first-class case.
pub fn shelter_list(shelters: &[Shelter]) -> PanelView {
	if shelters.is_empty() {
		return PanelView::success("").with(Section::plain(vec!["No shelters available".into()]));
	}
	let mut view = PanelView::success("");
	for shelter in shelters {
		let capacity = shelter
			.capacity
			.map(|c| c.to_string())
			.unwrap_or_else(|| "N/A".into());
		view.sections.push(Section::new(
			shelter.label(),
			vec![format!("Capacity: {capacity} dogs")],
		));
	}
	view
}

/// Listing panel for dogs.
pub fn dog_list(dogs: &[Dog]) -> PanelView {
	if dogs.is_empty() {
		return PanelView::success("").with(Section::plain(vec!["No dogs available".into()]));
	}
	let mut view = PanelView::success("");
	for dog in dogs {
		let priority = dog
			.priority
			.map(|p| p.to_string())
			.unwrap_or_else(|| "N/A".into());
		view.sections.push(Section::new(
			dog.name.clone(),
			vec![
				format!(
					"Size: {} | Weight: {}kg | Age: {} years | Priority: {priority}",
					dog.size, dog.weight, dog.age
				),
				format!(
					"Energy: {} | Good with kids: {}",
					dog.energy,
					format::yes_no(dog.good_with_kids)
				),
			],
		));
	}
	view
}

/// Listing panel for adopters.
pub fn adopter_list(adopters: &[Adopter]) -> PanelView {
	if adopters.is_empty() {
		return PanelView::success("").with(Section::plain(vec!["No adopters registered".into()]));
	}
	let mut view = PanelView::success("");
	for adopter in adopters {
		let budget = adopter
			.budget
			.map(format::currency)
			.unwrap_or_else(|| "N/A".into());
		view.sections.push(Section::new(
			adopter.name.clone(),
			vec![
				format!(
					"Budget: {budget} | Max dogs: {}",
					adopter.max_dogs.unwrap_or(1)
				),
				format!(
					"Yard: {} | Kids: {}",
					format::yes_no(adopter.has_yard),
					format::yes_no(adopter.has_kids)
				),
			],
		));
	}
	view
}

/// Reachability result. The unreachable case names the algorithm and the
/// attempted endpoints instead of dumping a raw path array.
pub fn reachability(
	result: &ReachabilityResult,
	method: TraversalMethod,
	from: &str,
	to: &str,
) -> PanelView {
	if !result.exists {
		return PanelView::not_found(
			"Not reachable",
			format!(
				"No path from {from} to {to} was found with {}",
				method.label()
			),
		);
	}
	PanelView::success(format!("Path found ({})", method.label())).with(Section::plain(vec![
		format!("Path: {}", result.path.join(" → ")),
		format!("Hops: {}", result.steps),
	]))
}

/// Shortest-path result panel.
pub fn shortest_path(result: &ShortestPathResult, from: &str, to: &str) -> PanelView {
	if result.path.is_empty() {
		return PanelView::not_found(
			"Not reachable",
			format!("No path from {from} to {to} was found with Dijkstra"),
		);
	}
	PanelView::success("Shortest path found (Dijkstra)").with(Section::plain(vec![
		format!("Path: {}", result.path.join(" → ")),
		format!("Total distance: {}", format::distance_km(result.total_weight)),
		format!("Hops: {}", result.steps),
	]))
}

/// Exact tour result panel.
pub fn tour(result: &TourResult) -> PanelView {
	if result.route.is_empty() {
		return PanelView::not_found(
			"No tour",
			"The solver found no feasible tour over the selected shelters",
		);
	}
	let mut lines = vec![
		format!("Optimal route: {}", result.route.join(" → ")),
		format!(
			"Total distance: {}",
			result
				.total_distance_km
				.map(format::distance_km)
				.unwrap_or_else(|| "N/A".into())
		),
		format!("Shelters visited: {}", result.route.len()),
	];
	if let Some(explored) = result.nodes_explored {
		lines.push(format!("Nodes explored: {explored}"));
	}
	PanelView::success("Optimal tour found (Branch & Bound)").with(Section::plain(lines))
}

/// Spanning-tree result panel; an empty edge set renders an explicit
/// message, not an empty region.
pub fn spanning_tree(result: &SpanningTreeResult, algorithm: MstAlgorithm) -> PanelView {
	let mut view = PanelView::success(format!("Spanning tree computed ({})", algorithm.label()));
	if result.edges.is_empty() {
		return view.with(Section::plain(vec!["No spanning-tree edges".into()]));
	}
	view = view.with(Section::plain(vec![
		format!(
			"Minimum total distance: {}",
			format::distance_km(result.total_weight)
		),
		format!("Edges: {}", result.edges.len()),
	]));
	view.with(Section::new(
		"Tree edges",
		result
			.edges
			.iter()
			.map(|e| format!("{} ↔ {}: {}", e.from, e.to, format::edge_km(e.weight)))
			.collect(),
	))
}

/// Greedy assignment result panel.
pub fn greedy_assignment(result: &GreedyAssignmentResult, adopter_id: &str) -> PanelView {
	let adopter = result
		.adopter_name
		.clone()
		.unwrap_or_else(|| adopter_id.to_string());
	let mut view = PanelView::success("Greedy selection complete").with(Section::plain(vec![
		format!("Adopter: {adopter}"),
		format!("Dogs selected: {}", result.assigned_dogs.len()),
		format!("Total score: {}", format::maybe_f64(result.total_score)),
		format!("Total cost: {}", format::maybe_cost(result.total_cost)),
	]));
	if result.assigned_dogs.is_empty() {
		return view.with(Section::plain(vec!["No dogs assigned".into()]));
	}
	view.sections.push(Section::new(
		"Assigned dogs",
		result
			.assigned_dogs
			.iter()
			.map(|dog| format!("{} (cost {})", dog.label(), format::maybe_cost(dog.cost)))
			.collect(),
	));
	view
}

/// Exhaustive assignment-set result panel.
pub fn assignment_set(result: &AssignmentSetResult) -> PanelView {
	let mut view = PanelView::success("Backtracking assignment complete").with(Section::plain(
		vec![format!(
			"Total score: {}",
			format::maybe_f64(result.total_score)
		)],
	));
	if result.assignments.is_empty() {
		return view.with(Section::plain(vec!["No valid assignments found".into()]));
	}
	view = view.with(Section::plain(vec![format!(
		"Assignments: {}",
		result.assignments.len()
	)]));
	for assignment in &result.assignments {
		let dogs: Vec<String> = assignment
			.assigned_dogs
			.iter()
			.map(|d| d.label())
			.collect();
		view.sections.push(Section::new(
			assignment.adopter_name.clone(),
			vec![
				format!("Assigned dogs: {}", dogs.join(", ")),
				format!("Count: {} dog(s)", dogs.len()),
			],
		));
	}
	view
}

/// Sorted-dog-list result panel with numbered rows showing the criterion
/// value.
pub fn sorted_dogs(result: &SortedDogs, criteria: SortCriteria, algorithm: SortAlgorithm) -> PanelView {
	let criteria = result
		.criteria
		.as_deref()
		.map(SortCriteria::from_query)
		.unwrap_or(criteria);
	let algorithm = result
		.algorithm
		.as_deref()
		.map(SortAlgorithm::from_query)
		.unwrap_or(algorithm);
	let mut view = PanelView::success(format!("Dogs sorted ({})", algorithm.label())).with(
		Section::plain(vec![
			format!("Criteria: {}", criteria.label()),
			format!("Dogs: {}", result.dogs.len()),
		]),
	);
	if result.dogs.is_empty() {
		return view.with(Section::plain(vec!["No dogs to sort".into()]));
	}
	view.sections.push(Section::new(
		"Sorted list",
		result
			.dogs
			.iter()
			.enumerate()
			.map(|(i, dog)| {
				format!(
					"{}. {} — {}: {} | Size: {} | Weight: {}kg",
					i + 1,
					dog.name,
					criteria.label(),
					criteria.value_of(dog),
					dog.size,
					dog.weight
				)
			})
			.collect(),
	));
	view
}

/// Capacity-packing result panel with priority/weight ratios.
pub fn packing(result: &PackingResult, requested_capacity: f64) -> PanelView {
	let capacity = result.vehicle_capacity_kg.unwrap_or(requested_capacity);
	let mut view = PanelView::success("Transport optimized (Knapsack DP)").with(Section::plain(
		vec![
			format!("Vehicle capacity: {capacity} kg"),
			format!("Weight used: {} kg", result.total_weight_kg.unwrap_or(0.0)),
			format!(
				"Total priority: {}",
				result.total_priority.unwrap_or(0.0)
			),
			format!("Dogs transported: {}", result.selected_dogs.len()),
		],
	));
	if result.selected_dogs.is_empty() {
		return view.with(Section::plain(vec!["No dogs selected".into()]));
	}
	view.sections.push(Section::new(
		"Selected dogs",
		result
			.selected_dogs
			.iter()
			.map(|dog| {
				let ratio = if dog.weight_kg > 0.0 {
					format!("{:.2}", dog.priority / dog.weight_kg)
				} else {
					"N/A".into()
				};
				format!(
					"{} — Weight: {}kg | Priority: {} | P/W: {ratio}",
					dog.name, dog.weight_kg, dog.priority
				)
			})
			.collect(),
	));
	view
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::GraphEdge;

	#[test]
	fn empty_title_is_suppressed() {
		let view = PanelView::success("");
		assert_eq!(view.title, None);
		let view = PanelView::success("Done");
		assert_eq!(view.title.as_deref(), Some("Done"));
	}

	#[test]
	fn error_views_share_one_shape() {
		let validation = PanelView::error("Origin and destination must differ");
		let remote = PanelView::error("Error 500: no dogs available");
		assert_eq!(validation.title.as_deref(), Some("Error"));
		assert_eq!(remote.title.as_deref(), Some("Error"));
		assert_eq!(validation.outcome, Outcome::Error);
		assert!(remote.sections[0].lines[0].contains("no dogs available"));
	}

	#[test]
	fn empty_listings_render_explicit_messages() {
		assert!(shelter_list(&[]).sections[0].lines[0].contains("No shelters available"));
		assert!(dog_list(&[]).sections[0].lines[0].contains("No dogs available"));
		assert!(adopter_list(&[]).sections[0].lines[0].contains("No adopters registered"));
	}

	#[test]
	fn unreachable_names_algorithm_and_endpoints() {
		let result = ReachabilityResult {
			exists: false,
			path: vec![],
			steps: 0,
		};
		let view = reachability(&result, TraversalMethod::Dfs, "A", "K");
		assert_eq!(view.outcome, Outcome::NotFound);
		let body = &view.sections[0].lines[0];
		assert!(body.contains("DFS"));
		assert!(body.contains('A') && body.contains('K'));
	}

	#[test]
	fn reachable_path_renders_joined_route() {
		let result = ReachabilityResult {
			exists: true,
			path: vec!["A".into(), "B".into(), "C".into()],
			steps: 2,
		};
		let view = reachability(&result, TraversalMethod::Bfs, "A", "C");
		assert_eq!(view.outcome, Outcome::Success);
		assert!(view.sections[0].lines[0].contains("A → B → C"));
	}

	#[test]
	fn empty_spanning_tree_is_not_an_empty_region() {
		let result = SpanningTreeResult {
			edges: vec![],
			total_weight: 0.0,
		};
		let view = spanning_tree(&result, MstAlgorithm::Prim);
		assert!(view.sections[0].lines[0].contains("No spanning-tree edges"));
	}

	#[test]
	fn spanning_tree_edges_use_one_decimal_labels() {
		let result = SpanningTreeResult {
			edges: vec![GraphEdge {
				from: "A".into(),
				to: "B".into(),
				weight: 3.25,
			}],
			total_weight: 3.25,
		};
		let view = spanning_tree(&result, MstAlgorithm::Kruskal);
		let edges = view.sections.last().unwrap();
		assert!(edges.lines[0].contains("A ↔ B: 3.2 km") || edges.lines[0].contains("A ↔ B: 3.3 km"));
	}

	#[test]
	fn absent_greedy_totals_render_plain_na() {
		let result = GreedyAssignmentResult {
			adopter_name: None,
			assigned_dogs: vec![],
			total_score: None,
			total_cost: None,
		};
		let view = greedy_assignment(&result, "P1");
		let lines = &view.sections[0].lines;
		assert!(lines.iter().any(|l| l == "Total cost: N/A"));
		assert!(!lines.iter().any(|l| l.contains("$N/A")));
	}

	#[test]
	fn empty_assignment_set_renders_explicit_message() {
		let result = AssignmentSetResult {
			total_score: None,
			assignments: vec![],
		};
		let view = assignment_set(&result);
		assert!(
			view.sections
				.iter()
				.any(|s| s.lines.iter().any(|l| l.contains("No valid assignments")))
		);
	}

	#[test]
	fn json_fallback_is_preformatted() {
		let view = PanelView::json("Raw", &serde_json::json!({"a": 1}));
		assert!(view.sections[0].preformatted);
		assert!(view.sections[0].lines[0].contains("\"a\": 1"));
	}
}
