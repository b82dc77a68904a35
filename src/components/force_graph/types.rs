/// A visual shelter node; the label is the shelter identifier.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: String,
	pub label: String,
}

/// An undirected weighted connection between two shelters.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
	pub weight: f64,
	pub label: String,
}

/// The deduplicated visual graph handed to the canvas.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}
