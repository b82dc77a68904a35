//! Wire types for the optimization service.
//!
//! The service has grown a few legacy field spellings (`tour` vs `route`,
//! `selectedDogs` vs `assignedDogs`, `totalDistance` vs `totalWeight`,
//! assignment sets as either a list or a map). All of that is normalized
//! here with serde aliases and custom deserializers so the rest of the app
//! only ever sees one shape per operation.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

/// Reserved identifier of the hub shelter (route origin / depot).
pub const HUB_ID: &str = "H";

/// A shelter node. Fetched read-only, never mutated client-side.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shelter {
	pub id: String,
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub capacity: Option<u32>,
}

impl Shelter {
	/// Display label. The hub always gets its fixed label, named or not.
	pub fn label(&self) -> String {
		if self.id == HUB_ID {
			format!("Hub Central ({})", self.id)
		} else {
			self.name
				.clone()
				.unwrap_or_else(|| format!("Shelter {}", self.id))
		}
	}
}

/// A dog snapshot as listed by the service.
///
/// Weight may arrive as `weight`, `weightKg`, or redundantly as both, so a
/// plain alias would trip serde's duplicate-field check; the wire struct
/// resolves the pair instead.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "DogWire")]
pub struct Dog {
	pub id: String,
	pub name: String,
	pub size: String,
	pub weight: f64,
	pub age: u32,
	pub energy: String,
	pub priority: Option<i64>,
	pub good_with_kids: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DogWire {
	#[serde(default)]
	id: String,
	#[serde(default)]
	name: String,
	#[serde(default)]
	size: String,
	#[serde(default)]
	weight: Option<f64>,
	#[serde(default)]
	weight_kg: Option<f64>,
	#[serde(default)]
	age: u32,
	#[serde(default)]
	energy: String,
	#[serde(default)]
	priority: Option<i64>,
	#[serde(default)]
	good_with_kids: bool,
}

impl From<DogWire> for Dog {
	fn from(wire: DogWire) -> Self {
		Self {
			id: wire.id,
			name: wire.name,
			size: wire.size,
			weight: wire.weight.or(wire.weight_kg).unwrap_or_default(),
			age: wire.age,
			energy: wire.energy,
			priority: wire.priority,
			good_with_kids: wire.good_with_kids,
		}
	}
}

/// An adopter snapshot.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Adopter {
	pub id: String,
	pub name: String,
	#[serde(default)]
	pub budget: Option<f64>,
	#[serde(default)]
	pub max_dogs: Option<u32>,
	#[serde(default)]
	pub has_yard: bool,
	#[serde(default)]
	pub has_kids: bool,
}

/// A weighted connection between two shelters. The service may report both
/// directions of the same physical link.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphEdge {
	pub from: String,
	pub to: String,
	pub weight: f64,
}

/// Raw network topology from `/network/graph`.
#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
pub struct GraphTopology {
	#[serde(default)]
	pub nodes: Vec<String>,
	#[serde(default)]
	pub edges: Vec<GraphEdge>,
}

/// Outcome of a reachability query (`/graph/reachable`).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReachabilityResult {
	#[serde(alias = "reachable")]
	pub exists: bool,
	#[serde(default)]
	pub path: Vec<String>,
	#[serde(default)]
	pub steps: u32,
}

/// Outcome of a shortest-path query (`/routes/shortest`).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortestPathResult {
	#[serde(default)]
	pub path: Vec<String>,
	#[serde(default, alias = "totalDistance")]
	pub total_weight: f64,
	#[serde(default)]
	pub steps: u32,
}

/// Outcome of the exact tour solver (`/routes/tsp/bnb`).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourResult {
	#[serde(default, alias = "tour")]
	pub route: Vec<String>,
	#[serde(default, alias = "totalDistance")]
	pub total_distance_km: Option<f64>,
	#[serde(default)]
	pub nodes_explored: Option<u64>,
}

/// Outcome of the spanning-tree computation (`/network/mst`).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpanningTreeResult {
	#[serde(default)]
	pub edges: Vec<GraphEdge>,
	#[serde(default)]
	pub total_weight: f64,
}

/// One dog allocated to an adopter.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedDog {
	#[serde(default)]
	pub dog_id: Option<String>,
	#[serde(default)]
	pub dog_name: Option<String>,
	#[serde(default)]
	pub cost: Option<f64>,
}

impl AssignedDog {
	/// Name when known, id otherwise.
	pub fn label(&self) -> String {
		self.dog_name
			.clone()
			.or_else(|| self.dog_id.clone())
			.unwrap_or_else(|| "?".into())
	}
}

/// Outcome of the greedy matcher (`/adoptions/greedy`).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GreedyAssignmentResult {
	#[serde(default)]
	pub adopter_name: Option<String>,
	#[serde(default, alias = "selectedDogs")]
	pub assigned_dogs: Vec<AssignedDog>,
	#[serde(default)]
	pub total_score: Option<f64>,
	#[serde(default)]
	pub total_cost: Option<f64>,
}

/// One adopter's allocation in an exhaustive assignment set.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
	#[serde(default)]
	pub adopter_name: String,
	#[serde(default, alias = "dogs")]
	pub assigned_dogs: Vec<AssignedDog>,
	#[serde(default)]
	pub total_cost: Option<f64>,
}

/// Outcome of the exhaustive matcher (`/adoptions/constraints/backtracking`).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentSetResult {
	#[serde(default)]
	pub total_score: Option<f64>,
	#[serde(default, deserialize_with = "list_or_map")]
	pub assignments: Vec<Assignment>,
}

/// Normalized sort outcome. The service returns either a bare dog list or an
/// envelope with criteria/algorithm echoes; [`SortPayload`] absorbs both.
#[derive(Clone, Debug, PartialEq)]
pub struct SortedDogs {
	pub dogs: Vec<Dog>,
	pub criteria: Option<String>,
	pub algorithm: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum SortPayload {
	Enveloped {
		#[serde(default)]
		dogs: Vec<Dog>,
		#[serde(default)]
		criteria: Option<String>,
		#[serde(default)]
		algorithm: Option<String>,
	},
	Bare(Vec<Dog>),
}

impl From<SortPayload> for SortedDogs {
	fn from(payload: SortPayload) -> Self {
		match payload {
			SortPayload::Enveloped {
				dogs,
				criteria,
				algorithm,
			} => Self {
				dogs,
				criteria,
				algorithm,
			},
			SortPayload::Bare(dogs) => Self {
				dogs,
				criteria: None,
				algorithm: None,
			},
		}
	}
}

/// One dog chosen by the capacity packer.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackedDog {
	#[serde(default)]
	pub name: String,
	#[serde(default, alias = "weight")]
	pub weight_kg: f64,
	#[serde(default)]
	pub priority: f64,
}

/// Outcome of the capacity packer (`/transport/optimal-dp`).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackingResult {
	#[serde(default)]
	pub vehicle_capacity_kg: Option<f64>,
	#[serde(default)]
	pub selected_dogs: Vec<PackedDog>,
	#[serde(default)]
	pub total_weight_kg: Option<f64>,
	#[serde(default)]
	pub total_priority: Option<f64>,
}

/// Traversal method for reachability queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraversalMethod {
	Bfs,
	Dfs,
}

impl TraversalMethod {
	pub fn query(self) -> &'static str {
		match self {
			Self::Bfs => "bfs",
			Self::Dfs => "dfs",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Self::Bfs => "BFS",
			Self::Dfs => "DFS",
		}
	}
}

/// Spanning-tree algorithm selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MstAlgorithm {
	Kruskal,
	Prim,
}

impl MstAlgorithm {
	pub fn query(self) -> &'static str {
		match self {
			Self::Kruskal => "kruskal",
			Self::Prim => "prim",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Self::Kruskal => "Kruskal",
			Self::Prim => "Prim",
		}
	}
}

/// Sort criterion for the dog listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortCriteria {
	#[default]
	Priority,
	Age,
	Weight,
}

impl SortCriteria {
	pub fn query(self) -> &'static str {
		match self {
			Self::Priority => "priority",
			Self::Age => "age",
			Self::Weight => "weight",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Self::Priority => "Priority",
			Self::Age => "Age",
			Self::Weight => "Weight",
		}
	}

	pub fn from_query(value: &str) -> Self {
		match value {
			"age" => Self::Age,
			"weight" => Self::Weight,
			_ => Self::Priority,
		}
	}

	/// The criterion's value on a concrete dog, for result rows.
	pub fn value_of(self, dog: &Dog) -> String {
		match self {
			Self::Priority => dog
				.priority
				.map(|p| p.to_string())
				.unwrap_or_else(|| "N/A".into()),
			Self::Age => dog.age.to_string(),
			Self::Weight => format!("{}", dog.weight),
		}
	}
}

/// Sort algorithm selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortAlgorithm {
	#[default]
	MergeSort,
	QuickSort,
}

impl SortAlgorithm {
	pub fn query(self) -> &'static str {
		match self {
			Self::MergeSort => "mergesort",
			Self::QuickSort => "quicksort",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Self::MergeSort => "MergeSort",
			Self::QuickSort => "QuickSort",
		}
	}

	pub fn from_query(value: &str) -> Self {
		match value {
			"quicksort" => Self::QuickSort,
			_ => Self::MergeSort,
		}
	}
}

/// Accepts an assignment set shaped as either a list or a keyed map.
fn list_or_map<'de, D>(deserializer: D) -> Result<Vec<Assignment>, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum ListOrMap {
		List(Vec<Assignment>),
		Map(BTreeMap<String, Assignment>),
	}

	Ok(match ListOrMap::deserialize(deserializer)? {
		ListOrMap::List(list) => list,
		ListOrMap::Map(map) => map.into_values().collect(),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn shelter_hub_label_ignores_name() {
		let hub: Shelter =
			serde_json::from_str(r#"{"id":"H","name":"Depot","capacity":50}"#).unwrap();
		assert_eq!(hub.label(), "Hub Central (H)");
	}

	#[test]
	fn shelter_label_falls_back_to_id() {
		let s: Shelter = serde_json::from_str(r#"{"id":"B"}"#).unwrap();
		assert_eq!(s.label(), "Shelter B");
		assert_eq!(s.capacity, None);
	}

	#[test]
	fn reachability_accepts_legacy_reachable_key() {
		let r: ReachabilityResult =
			serde_json::from_str(r#"{"reachable":true,"path":["A","B"],"steps":1}"#).unwrap();
		assert!(r.exists);
		assert_eq!(r.path, vec!["A", "B"]);
	}

	#[test]
	fn shortest_path_accepts_total_distance_alias() {
		let r: ShortestPathResult =
			serde_json::from_str(r#"{"path":["A","C"],"totalDistance":12.5,"steps":2}"#).unwrap();
		assert_eq!(r.total_weight, 12.5);
	}

	#[test]
	fn tour_accepts_legacy_tour_key() {
		let r: TourResult =
			serde_json::from_str(r#"{"tour":["A","B","A"],"totalDistanceKm":9.0}"#).unwrap();
		assert_eq!(r.route, vec!["A", "B", "A"]);
		assert_eq!(r.total_distance_km, Some(9.0));
	}

	#[test]
	fn greedy_accepts_selected_dogs_alias() {
		let r: GreedyAssignmentResult = serde_json::from_str(
			r#"{"adopterName":"Ana","selectedDogs":[{"dogId":"D1","cost":100.0}],"totalScore":3.5}"#,
		)
		.unwrap();
		assert_eq!(r.assigned_dogs.len(), 1);
		assert_eq!(r.assigned_dogs[0].label(), "D1");
	}

	#[test]
	fn assignment_set_accepts_map_shape() {
		let r: AssignmentSetResult = serde_json::from_str(
			r#"{"totalScore":7.0,"assignments":{"P1":{"adopterName":"Ana","assignedDogs":[{"dogName":"Rex"}]}}}"#,
		)
		.unwrap();
		assert_eq!(r.assignments.len(), 1);
		assert_eq!(r.assignments[0].adopter_name, "Ana");
	}

	#[test]
	fn assignment_set_accepts_list_shape() {
		let r: AssignmentSetResult = serde_json::from_str(
			r#"{"assignments":[{"adopterName":"Ana","dogs":[]},{"adopterName":"Luis","dogs":[]}]}"#,
		)
		.unwrap();
		assert_eq!(r.assignments.len(), 2);
		assert_eq!(r.total_score, None);
	}

	#[test]
	fn sort_payload_accepts_bare_list() {
		let payload: SortPayload =
			serde_json::from_str(r#"[{"id":"D1","name":"Rex","weightKg":12}]"#).unwrap();
		let sorted = SortedDogs::from(payload);
		assert_eq!(sorted.dogs.len(), 1);
		assert_eq!(sorted.dogs[0].weight, 12.0);
		assert_eq!(sorted.criteria, None);
	}

	#[test]
	fn sort_payload_accepts_envelope() {
		let payload: SortPayload = serde_json::from_str(
			r#"{"dogs":[{"id":"D1","name":"Rex"}],"criteria":"age","algorithm":"quicksort"}"#,
		)
		.unwrap();
		let sorted = SortedDogs::from(payload);
		assert_eq!(sorted.criteria.as_deref(), Some("age"));
		assert_eq!(sorted.algorithm.as_deref(), Some("quicksort"));
	}

	#[test]
	fn packing_result_defaults_optional_totals() {
		let r: PackingResult = serde_json::from_str(
			r#"{"selectedDogs":[{"name":"Rex","weightKg":12,"priority":8}]}"#,
		)
		.unwrap();
		assert_eq!(r.selected_dogs.len(), 1);
		assert_eq!(r.total_priority, None);
	}

	#[test]
	fn dog_tolerates_redundant_weight_spellings() {
		let dog: Dog = serde_json::from_str(
			r#"{"id":"D1","name":"Rex","weight":14.0,"weightKg":14.0}"#,
		)
		.unwrap();
		assert_eq!(dog.weight, 14.0);
	}

	#[test]
	fn sort_criteria_value_of_reads_the_right_field() {
		let dog: Dog = serde_json::from_str(
			r#"{"id":"D1","name":"Rex","weight":14.0,"age":3,"priority":9}"#,
		)
		.unwrap();
		assert_eq!(SortCriteria::Priority.value_of(&dog), "9");
		assert_eq!(SortCriteria::Age.value_of(&dog), "3");
		assert_eq!(SortCriteria::Weight.value_of(&dog), "14");
	}
}
