//! Keeps the route/adopter selectors and the tour checklist in sync with
//! the server-side entity lists.
//!
//! Option building is pure so the continuity rules (restore a still-valid
//! prior selection, hub labeling, first/near-last defaults, first-4
//! checklist prefix) are testable without a DOM. The signal plumbing at the
//! bottom applies those rules to the live selects.

use leptos::prelude::*;

use crate::api::{Adopter, Shelter};
use crate::format;

/// Destination selectors default to `min(len - 1, CAP)` rather than the
/// last entry, which on large lists can be an out-of-range sentinel.
pub const DESTINATION_DEFAULT_CAP: usize = 12;

/// How many checklist entries are pre-checked by default.
pub const DEFAULT_CHECKED_PREFIX: usize = 4;

/// Whether a selector feeds the origin or the destination of a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectorRole {
	Origin,
	Destination,
}

/// One `<option>` in a selector.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectOption {
	pub value: String,
	pub label: String,
}

/// Builds the shelter option set; the hub keeps its fixed label whether or
/// not it has a name.
pub fn shelter_options(shelters: &[Shelter]) -> Vec<SelectOption> {
	shelters
		.iter()
		.map(|shelter| SelectOption {
			value: shelter.id.clone(),
			label: shelter.label(),
		})
		.collect()
}

/// Builds the adopter option set with the compact suitability summary.
pub fn adopter_options(adopters: &[Adopter]) -> Vec<SelectOption> {
	adopters
		.iter()
		.map(|adopter| {
			let budget = adopter
				.budget
				.map(format::currency)
				.unwrap_or_else(|| "N/A".into());
			SelectOption {
				value: adopter.id.clone(),
				label: format!(
					"{} - {} ({budget}, Yard {}, Kids {}, Max: {})",
					adopter.id,
					adopter.name,
					format::check_mark(adopter.has_yard),
					format::check_mark(adopter.has_kids),
					adopter.max_dogs.unwrap_or(1)
				),
			}
		})
		.collect()
}

/// Value a selector should hold after repopulation: the prior value when it
/// still exists in the new option set, the role default otherwise.
pub fn resolve_selection(options: &[SelectOption], role: SelectorRole, prior: &str) -> String {
	if !prior.is_empty() && options.iter().any(|o| o.value == prior) {
		return prior.to_string();
	}
	if options.is_empty() {
		return String::new();
	}
	let index = match role {
		SelectorRole::Origin => 0,
		SelectorRole::Destination => (options.len() - 1).min(DESTINATION_DEFAULT_CAP),
	};
	options[index].value.clone()
}

/// One entry in the tour checklist.
#[derive(Clone, Debug, PartialEq)]
pub struct ChecklistEntry {
	pub id: String,
	pub label: String,
	pub checked: bool,
}

/// The multi-select shelter checklist for the tour action.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct NodeChecklist {
	pub entries: Vec<ChecklistEntry>,
}

impl NodeChecklist {
	/// Fresh checklist with the default prefix checked.
	pub fn from_shelters(shelters: &[Shelter]) -> Self {
		Self {
			entries: shelters
				.iter()
				.enumerate()
				.map(|(index, shelter)| ChecklistEntry {
					id: shelter.id.clone(),
					label: shelter.label(),
					checked: index < DEFAULT_CHECKED_PREFIX,
				})
				.collect(),
		}
	}

	pub fn select_all(&mut self) {
		for entry in &mut self.entries {
			entry.checked = true;
		}
	}

	pub fn select_none(&mut self) {
		for entry in &mut self.entries {
			entry.checked = false;
		}
	}

	pub fn select_default(&mut self) {
		for (index, entry) in self.entries.iter_mut().enumerate() {
			entry.checked = index < DEFAULT_CHECKED_PREFIX;
		}
	}

	pub fn toggle(&mut self, id: &str) {
		if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
			entry.checked = !entry.checked;
		}
	}

	pub fn checked_ids(&self) -> Vec<String> {
		self.entries
			.iter()
			.filter(|e| e.checked)
			.map(|e| e.id.clone())
			.collect()
	}
}

/// Static fallback options shown until (and in place of) a successful sync.
fn static_shelter_options() -> Vec<SelectOption> {
	["A", "B", "C", "D", "E", "H"]
		.into_iter()
		.map(|id| SelectOption {
			value: id.into(),
			label: if id == "H" {
				"Hub Central (H)".into()
			} else {
				format!("Shelter {id}")
			},
		})
		.collect()
}

fn static_adopter_options() -> Vec<SelectOption> {
	["P1", "P2", "P3"]
		.into_iter()
		.map(|id| SelectOption {
			value: id.into(),
			label: format!("Adopter {id}"),
		})
		.collect()
}

/// Signals behind every dependent selector on the page.
#[derive(Clone, Copy, Debug)]
pub struct SelectorState {
	pub shelter_options: RwSignal<Vec<SelectOption>>,
	pub adopter_options: RwSignal<Vec<SelectOption>>,
	pub traversal_from: RwSignal<String>,
	pub traversal_to: RwSignal<String>,
	pub route_from: RwSignal<String>,
	pub route_to: RwSignal<String>,
	pub tour_nodes: RwSignal<NodeChecklist>,
	pub adopter: RwSignal<String>,
}

impl SelectorState {
	pub fn new() -> Self {
		let shelters = static_shelter_options();
		let adopters = static_adopter_options();
		let first = shelters.first().map(|o| o.value.clone()).unwrap_or_default();
		let near_last = resolve_selection(&shelters, SelectorRole::Destination, "");
		let first_adopter = adopters.first().map(|o| o.value.clone()).unwrap_or_default();
		let checklist = NodeChecklist {
			entries: shelters
				.iter()
				.enumerate()
				.map(|(index, option)| ChecklistEntry {
					id: option.value.clone(),
					label: option.label.clone(),
					checked: index < DEFAULT_CHECKED_PREFIX,
				})
				.collect(),
		};
		Self {
			shelter_options: RwSignal::new(shelters),
			adopter_options: RwSignal::new(adopters),
			traversal_from: RwSignal::new(first.clone()),
			traversal_to: RwSignal::new(near_last.clone()),
			route_from: RwSignal::new(first),
			route_to: RwSignal::new(near_last),
			tour_nodes: RwSignal::new(checklist),
			adopter: RwSignal::new(first_adopter),
		}
	}

	/// Repopulates every shelter-dependent selector, preserving selections
	/// that survived the refresh. An empty snapshot keeps the fallbacks.
	pub fn apply_shelters(&self, shelters: &[Shelter]) {
		if shelters.is_empty() {
			return;
		}
		let options = shelter_options(shelters);
		for (signal, role) in [
			(self.traversal_from, SelectorRole::Origin),
			(self.traversal_to, SelectorRole::Destination),
			(self.route_from, SelectorRole::Origin),
			(self.route_to, SelectorRole::Destination),
		] {
			let prior = signal.get_untracked();
			signal.set(resolve_selection(&options, role, &prior));
		}
		self.shelter_options.set(options);
		self.tour_nodes.set(NodeChecklist::from_shelters(shelters));
	}

	/// Repopulates the adopter selector, preserving a surviving selection.
	pub fn apply_adopters(&self, adopters: &[Adopter]) {
		if adopters.is_empty() {
			return;
		}
		let options = adopter_options(adopters);
		let prior = self.adopter.get_untracked();
		self.adopter
			.set(resolve_selection(&options, SelectorRole::Origin, &prior));
		self.adopter_options.set(options);
	}
}

impl Default for SelectorState {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn shelters(ids: &[&str]) -> Vec<Shelter> {
		ids.iter()
			.map(|id| Shelter {
				id: (*id).into(),
				name: Some(format!("Shelter {id}")),
				capacity: Some(10),
			})
			.collect()
	}

	#[test]
	fn hub_is_labeled_distinctly_even_without_a_name() {
		let list = vec![Shelter {
			id: "H".into(),
			name: None,
			capacity: None,
		}];
		let options = shelter_options(&list);
		assert_eq!(options[0].label, "Hub Central (H)");
	}

	#[test]
	fn surviving_prior_selection_is_restored() {
		let options = shelter_options(&shelters(&["A", "B", "C"]));
		assert_eq!(
			resolve_selection(&options, SelectorRole::Origin, "B"),
			"B"
		);
		assert_eq!(
			resolve_selection(&options, SelectorRole::Destination, "B"),
			"B"
		);
	}

	#[test]
	fn origin_defaults_to_first_entry() {
		let options = shelter_options(&shelters(&["A", "B", "C"]));
		assert_eq!(resolve_selection(&options, SelectorRole::Origin, ""), "A");
		assert_eq!(
			resolve_selection(&options, SelectorRole::Origin, "Z"),
			"A",
			"vanished prior falls back to the default"
		);
	}

	#[test]
	fn destination_defaults_near_the_end_with_a_cap() {
		let small = shelter_options(&shelters(&["A", "B", "C"]));
		assert_eq!(
			resolve_selection(&small, SelectorRole::Destination, ""),
			"C"
		);

		let ids: Vec<String> = (0..20).map(|i| format!("S{i}")).collect();
		let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
		let large = shelter_options(&shelters(&id_refs));
		assert_eq!(
			resolve_selection(&large, SelectorRole::Destination, ""),
			format!("S{DESTINATION_DEFAULT_CAP}")
		);
	}

	#[test]
	fn checklist_prefix_and_helpers_are_idempotent() {
		let mut checklist = NodeChecklist::from_shelters(&shelters(&["A", "B", "C", "D", "E"]));
		assert_eq!(checklist.checked_ids(), vec!["A", "B", "C", "D"]);

		checklist.select_all();
		checklist.select_all();
		assert_eq!(checklist.checked_ids().len(), 5);

		checklist.select_none();
		checklist.select_none();
		assert!(checklist.checked_ids().is_empty());

		checklist.select_default();
		checklist.select_default();
		assert_eq!(checklist.checked_ids(), vec!["A", "B", "C", "D"]);
	}

	#[test]
	fn toggle_flips_one_entry() {
		let mut checklist = NodeChecklist::from_shelters(&shelters(&["A", "B"]));
		checklist.toggle("B");
		assert_eq!(checklist.checked_ids(), vec!["A"]);
		checklist.toggle("B");
		assert_eq!(checklist.checked_ids(), vec!["A", "B"]);
	}

	#[test]
	fn apply_shelters_preserves_surviving_selection() {
		let state = SelectorState::new();
		state.traversal_from.set("B".into());
		state.apply_shelters(&shelters(&["A", "B", "C"]));
		assert_eq!(state.traversal_from.get_untracked(), "B");
		assert_eq!(state.traversal_to.get_untracked(), "C");
	}

	#[test]
	fn empty_snapshot_keeps_static_fallbacks() {
		let state = SelectorState::new();
		let before = state.shelter_options.get_untracked();
		state.apply_shelters(&[]);
		assert_eq!(state.shelter_options.get_untracked(), before);
	}

	#[test]
	fn adopter_labels_carry_the_suitability_summary() {
		let adopters = vec![Adopter {
			id: "P1".into(),
			name: "Ana".into(),
			budget: Some(12500.0),
			max_dogs: Some(2),
			has_yard: true,
			has_kids: false,
		}];
		let options = adopter_options(&adopters);
		assert_eq!(options[0].label, "P1 - Ana ($12,500, Yard ✓, Kids ✗, Max: 2)");
	}
}
