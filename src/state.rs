//! Page-wide UI session state: the active-tab machine, the in-flight
//! loading counter and the dashboard configuration.
//!
//! The loading overlay deliberately counts rather than toggles: with two
//! overlapping loads a boolean would either hide the overlay while one is
//! still outstanding or leave it stuck after both finish.

use leptos::prelude::*;

use crate::api::ConnectionState;
use crate::render::PanelView;

/// Default service base address; the only external configuration the
/// dashboard takes.
pub const DEFAULT_API_BASE: &str = "http://localhost:8080";

/// What to do when an action is triggered while another call is in flight.
/// The panel is keyed to the action either way, so `Allow` merely accepts
/// that settlement order decides which response wins that panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ResubmitPolicy {
	#[default]
	Allow,
	DisableWhileBusy,
}

/// Startup configuration for the orchestrator.
#[derive(Clone, Debug)]
pub struct DashboardConfig {
	pub base_url: String,
	pub resubmit: ResubmitPolicy,
}

impl Default for DashboardConfig {
	fn default() -> Self {
		Self {
			base_url: DEFAULT_API_BASE.into(),
			resubmit: ResubmitPolicy::default(),
		}
	}
}

/// The dashboard's tabs. Exactly one is active at any time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Tab {
	#[default]
	Overview,
	Traversal,
	Routes,
	Network,
	Matching,
	Sorting,
	Transport,
}

impl Tab {
	pub const ALL: [Tab; 7] = [
		Tab::Overview,
		Tab::Traversal,
		Tab::Routes,
		Tab::Network,
		Tab::Matching,
		Tab::Sorting,
		Tab::Transport,
	];

	pub fn title(self) -> &'static str {
		match self {
			Tab::Overview => "Overview",
			Tab::Traversal => "Reachability",
			Tab::Routes => "Routes",
			Tab::Network => "Network",
			Tab::Matching => "Adoptions",
			Tab::Sorting => "Sorting",
			Tab::Transport => "Transport",
		}
	}
}

/// Pure tab transition: `None` means the request is a no-op because the tab
/// is already active.
pub fn activate(current: Tab, requested: Tab) -> Option<Tab> {
	(current != requested).then_some(requested)
}

/// Reference-counted busy flag backing the loading overlay.
#[derive(Clone, Copy, Debug)]
pub struct LoadingCounter(RwSignal<u32>);

impl LoadingCounter {
	pub fn new() -> Self {
		Self(RwSignal::new(0))
	}

	/// Marks one load as outstanding until the returned guard drops.
	pub fn begin(&self) -> LoadingGuard {
		self.0.update(|n| *n += 1);
		LoadingGuard(self.0)
	}

	/// Reactive: true while at least one load is outstanding.
	pub fn is_busy(&self) -> bool {
		self.0.get() > 0
	}

	pub fn is_busy_untracked(&self) -> bool {
		self.0.get_untracked() > 0
	}
}

impl Default for LoadingCounter {
	fn default() -> Self {
		Self::new()
	}
}

/// RAII release of one outstanding load. Dropping on any exit path keeps
/// the overlay honest even when a call fails.
pub struct LoadingGuard(RwSignal<u32>);

impl Drop for LoadingGuard {
	fn drop(&mut self) {
		self.0.update(|n| *n = n.saturating_sub(1));
	}
}

/// One signal per result panel. Results are keyed to the panel that
/// requested them, so a late response can only ever land on its own panel
/// (last write wins per panel, independently of the others).
#[derive(Clone, Copy, Debug)]
pub struct Panels {
	pub shelters: RwSignal<Option<PanelView>>,
	pub dogs: RwSignal<Option<PanelView>>,
	pub adopters: RwSignal<Option<PanelView>>,
	pub reachability: RwSignal<Option<PanelView>>,
	pub shortest_path: RwSignal<Option<PanelView>>,
	pub tour: RwSignal<Option<PanelView>>,
	pub spanning_tree: RwSignal<Option<PanelView>>,
	pub greedy: RwSignal<Option<PanelView>>,
	pub exhaustive: RwSignal<Option<PanelView>>,
	pub sort: RwSignal<Option<PanelView>>,
	pub packing: RwSignal<Option<PanelView>>,
}

impl Panels {
	pub fn new() -> Self {
		Self {
			shelters: RwSignal::new(None),
			dogs: RwSignal::new(None),
			adopters: RwSignal::new(None),
			reachability: RwSignal::new(None),
			shortest_path: RwSignal::new(None),
			tour: RwSignal::new(None),
			spanning_tree: RwSignal::new(None),
			greedy: RwSignal::new(None),
			exhaustive: RwSignal::new(None),
			sort: RwSignal::new(None),
			packing: RwSignal::new(None),
		}
	}
}

impl Default for Panels {
	fn default() -> Self {
		Self::new()
	}
}

/// Signals owned by the orchestrator and shared with the components.
#[derive(Clone, Copy, Debug)]
pub struct SessionState {
	pub active_tab: RwSignal<Tab>,
	pub loading: LoadingCounter,
	pub connection: RwSignal<ConnectionState>,
	/// One aggregate-load failure notification, or `None`.
	pub notice: RwSignal<Option<String>>,
	pub shelter_count: RwSignal<usize>,
	pub dog_count: RwSignal<usize>,
	pub adopter_count: RwSignal<usize>,
}

impl SessionState {
	pub fn new() -> Self {
		Self {
			active_tab: RwSignal::new(Tab::default()),
			loading: LoadingCounter::new(),
			connection: RwSignal::new(ConnectionState::Unknown),
			notice: RwSignal::new(None),
			shelter_count: RwSignal::new(0),
			dog_count: RwSignal::new(0),
			adopter_count: RwSignal::new(0),
		}
	}

	/// Activate a tab; activating the current tab is a no-op.
	pub fn switch_tab(&self, requested: Tab) {
		if let Some(next) = activate(self.active_tab.get_untracked(), requested) {
			self.active_tab.set(next);
		}
	}
}

impl Default for SessionState {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn activating_the_active_tab_is_a_noop() {
		assert_eq!(activate(Tab::Overview, Tab::Overview), None);
		assert_eq!(activate(Tab::Overview, Tab::Routes), Some(Tab::Routes));
		assert_eq!(activate(Tab::Routes, Tab::Routes), None);
	}

	#[test]
	fn overlapping_loads_keep_the_overlay_up() {
		let loading = LoadingCounter::new();
		assert!(!loading.is_busy_untracked());

		let first = loading.begin();
		let second = loading.begin();
		assert!(loading.is_busy_untracked());

		drop(first);
		assert!(loading.is_busy_untracked(), "one load still outstanding");

		drop(second);
		assert!(!loading.is_busy_untracked());
	}

	#[test]
	fn guard_release_survives_a_panicking_path() {
		let loading = LoadingCounter::new();
		let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
			let _guard = loading.begin();
			panic!("remote call blew up");
		}));
		assert!(result.is_err());
		assert!(!loading.is_busy_untracked());
	}
}
