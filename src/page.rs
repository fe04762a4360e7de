//! Page data embedded by the server.
//!
//! The network page carries a `<script id="network-data" type="application/json">`
//! element with the graph, the timeline, an optional in-flight task id and
//! optional settings overrides.

use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

use crate::components::force_graph::{GraphData, GraphLink, GraphNode};
use crate::config::Settings;
use crate::error::PageError;
use crate::timeline::Timeline;

/// Id of the script element holding the page data.
pub const DATA_ELEMENT_ID: &str = "network-data";

/// Everything the server hands to the client.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PageData {
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	#[serde(default, alias = "links")]
	pub edges: Vec<GraphLink>,
	/// Node ids in the order they appeared in the analysis.
	#[serde(default)]
	pub timeline: Vec<String>,
	/// Analysis task still running server-side, if any.
	#[serde(default)]
	pub task_id: Option<String>,
	/// Text of the analysis that produced this graph.
	#[serde(default)]
	pub original_text: Option<String>,
	#[serde(default)]
	pub settings: Settings,
}

impl PageData {
	/// Parses the page data; a blank `task_id` counts as none.
	pub fn from_json(json: &str) -> Result<Self, PageError> {
		let mut data: PageData = serde_json::from_str(json)?;
		if data.task_id.as_deref().is_some_and(|t| t.trim().is_empty()) {
			data.task_id = None;
		}
		Ok(data)
	}

	/// Nodes and edges for the canvas.
	pub fn graph(&self) -> GraphData {
		GraphData {
			nodes: self.nodes.clone(),
			links: self.edges.clone(),
		}
	}

	/// Timeline model over the node order.
	pub fn timeline(&self) -> Timeline {
		Timeline::new(self.timeline.clone())
	}
}

/// Reads and parses the page data element.
pub fn read_page_data() -> Result<PageData, PageError> {
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or(PageError::NoDocument)?;
	let element = document
		.get_element_by_id(DATA_ELEMENT_ID)
		.ok_or(PageError::MissingElement(DATA_ELEMENT_ID))?;
	let script: HtmlScriptElement = element
		.dyn_into()
		.map_err(|_| PageError::NotAScript(DATA_ELEMENT_ID))?;
	let json_text = script
		.text()
		.map_err(|_| PageError::NotAScript(DATA_ELEMENT_ID))?;
	PageData::from_json(&json_text)
}

/// Loads the page data, falling back to an empty page on any failure.
pub fn load_page_data() -> PageData {
	match read_page_data() {
		Ok(data) => {
			info!(
				"contingency-network: loaded {} nodes, {} edges, {} timeline steps",
				data.nodes.len(),
				data.edges.len(),
				data.timeline.len()
			);
			data
		}
		Err(e) => {
			warn!("contingency-network: {}; starting with an empty graph", e);
			PageData::default()
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_full_page() {
		let data = PageData::from_json(
			r##"{
				"nodes": [{"id": "s1", "label": "Rato", "group": "sujeito"}],
				"edges": [{"id": "e1", "from": "s1", "to": "s1"}],
				"timeline": ["s1"],
				"task_id": "task-42",
				"original_text": "O rato pressiona a barra.",
				"settings": {"poll_interval_ms": 1000}
			}"##,
		)
		.unwrap();

		assert_eq!(data.graph().nodes.len(), 1);
		assert_eq!(data.graph().links[0].target, "s1");
		assert_eq!(data.timeline().len(), 1);
		assert_eq!(data.task_id.as_deref(), Some("task-42"));
		assert_eq!(data.settings.poll_interval_ms, 1000);
		assert_eq!(data.settings.max_chars, 5000);
	}

	#[test]
	fn minimal_page_uses_defaults() {
		let data = PageData::from_json("{}").unwrap();
		assert!(data.nodes.is_empty());
		assert!(data.timeline().is_empty());
		assert_eq!(data.task_id, None);
		assert_eq!(data.settings, Settings::default());
	}

	#[test]
	fn blank_task_id_means_no_task() {
		let data = PageData::from_json(r#"{"task_id": "  "}"#).unwrap();
		assert_eq!(data.task_id, None);
		let data = PageData::from_json(r#"{"task_id": null}"#).unwrap();
		assert_eq!(data.task_id, None);
	}

	#[test]
	fn malformed_json_is_an_error() {
		assert!(matches!(
			PageData::from_json("{nodes: ["),
			Err(PageError::Parse(_))
		));
	}
}
