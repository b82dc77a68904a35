pub mod force_graph;
pub mod graph_panel;
pub mod result_panel;
pub mod status;
