//! Graph data structures for input to the force graph component.
//!
//! Field names follow the wire format the server emits for the network page
//! (`from`/`to` endpoints, `{color, highlight, hover}` edge colors).

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Shape used to draw a node.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NodeShape {
	/// Filled circle.
	#[default]
	Dot,
	/// Rounded rectangle.
	Box,
	/// Circle stretched horizontally.
	Ellipse,
	/// Square rotated 45 degrees.
	Diamond,
	/// Any shape this renderer does not know; drawn as a dot.
	#[serde(other)]
	Unknown,
}

/// A node in the graph.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphNode {
	/// Unique identifier for this node. Used to reference nodes in links and
	/// in the timeline.
	pub id: String,
	/// Optional display label. Labeled nodes are rendered larger.
	#[serde(default)]
	pub label: Option<String>,
	/// Node type (e.g. "sujeito", "hipotese"); selects the color.
	#[serde(default)]
	pub group: Option<String>,
	/// Color sent by the server. Only used when the group has no configured color.
	#[serde(default)]
	pub color: Option<String>,
	/// Tooltip text; may span several lines.
	#[serde(default)]
	pub title: Option<String>,
	/// Drawing shape.
	#[serde(default)]
	pub shape: NodeShape,
	/// Never drawn, whatever the timeline position.
	#[serde(default)]
	pub hidden: bool,
}

/// Edge color, either a plain CSS color or the per-state object form.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum EdgeColor {
	/// One color for every state.
	Css(String),
	/// Separate colors per interaction state.
	States {
		/// Resting color.
		color: String,
		/// Color while an endpoint is highlighted.
		#[serde(default)]
		highlight: Option<String>,
		/// Color while hovered.
		#[serde(default)]
		hover: Option<String>,
	},
}

impl EdgeColor {
	/// Color in the resting state.
	pub fn base(&self) -> &str {
		match self {
			EdgeColor::Css(c) => c,
			EdgeColor::States { color, .. } => color,
		}
	}

	/// Color while either endpoint is highlighted.
	pub fn highlight(&self) -> &str {
		match self {
			EdgeColor::Css(c) => c,
			EdgeColor::States {
				color, highlight, ..
			} => highlight.as_deref().unwrap_or(color),
		}
	}
}

/// Which ends of an edge carry an arrow head.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArrowHeads {
	/// Head at the target end.
	pub to: bool,
	/// Head at the source end.
	pub from: bool,
}

impl Default for ArrowHeads {
	fn default() -> Self {
		Self {
			to: true,
			from: false,
		}
	}
}

impl ArrowHeads {
	/// Reads the string form, e.g. `"to"`, `"from"`, `"to, from"` or `""`.
	pub fn parse(ends: &str) -> Self {
		let mut heads = Self {
			to: false,
			from: false,
		};
		for end in ends.split(|c: char| c == ',' || c.is_whitespace()) {
			match end {
				"to" => heads.to = true,
				"from" => heads.from = true,
				_ => {}
			}
		}
		heads
	}
}

fn end_enabled(end: Option<&Value>) -> bool {
	match end {
		Some(Value::Bool(on)) => *on,
		Some(Value::Object(opts)) => opts.get("enabled").and_then(Value::as_bool).unwrap_or(true),
		_ => false,
	}
}

/// Accepts the string form, the `{to: {enabled}, from: ..}` object form, or
/// nothing (target head only).
fn arrows_from_wire<'de, D>(deserializer: D) -> Result<ArrowHeads, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(match Option::<Value>::deserialize(deserializer)? {
		Some(Value::String(ends)) => ArrowHeads::parse(&ends),
		Some(Value::Object(ends)) => ArrowHeads {
			to: end_enabled(ends.get("to")),
			from: end_enabled(ends.get("from")),
		},
		_ => ArrowHeads::default(),
	})
}

/// A directed edge between two nodes.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphLink {
	/// Server-side edge id.
	#[serde(default)]
	pub id: Option<String>,
	/// Source node ID.
	#[serde(alias = "from")]
	pub source: String,
	/// Target node ID.
	#[serde(alias = "to")]
	pub target: String,
	/// Text drawn at the edge midpoint; may span several lines.
	#[serde(default)]
	pub label: Option<String>,
	/// Hover text.
	#[serde(default)]
	pub title: Option<String>,
	/// Draw the line dashed.
	#[serde(default)]
	pub dashes: bool,
	/// Line color; the theme's edge color when absent.
	#[serde(default)]
	pub color: Option<EdgeColor>,
	/// Arrow heads to draw.
	#[serde(default, deserialize_with = "arrows_from_wire")]
	pub arrows: ArrowHeads,
}

/// Complete graph data: nodes and links.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphData {
	/// All nodes, hidden ones included.
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	/// Edges; the wire name is `edges`.
	#[serde(default, alias = "edges")]
	pub links: Vec<GraphLink>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_wire_format_edges() {
		let data: GraphData = serde_json::from_str(
			r##"{
				"nodes": [
					{"id": "s1", "label": "Rato", "group": "sujeito", "shape": "box"},
					{"id": "a1", "group": "acao", "shape": "star", "title": "ID: a1\nTipo: x"}
				],
				"edges": [
					{"id": "e1", "from": "s1", "to": "a1", "label": "Emite", "dashes": true,
					 "color": {"color": "#50C878", "highlight": "#3AA05A", "hover": "#3AA05A"}},
					{"source": "a1", "target": "s1", "color": "#848484"}
				]
			}"##,
		)
		.unwrap();

		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.nodes[0].shape, NodeShape::Box);
		assert_eq!(data.nodes[1].shape, NodeShape::Unknown);
		assert!(!data.nodes[1].hidden);

		let e1 = &data.links[0];
		assert_eq!((e1.source.as_str(), e1.target.as_str()), ("s1", "a1"));
		assert!(e1.dashes);
		let color = e1.color.as_ref().unwrap();
		assert_eq!(color.base(), "#50C878");
		assert_eq!(color.highlight(), "#3AA05A");

		let e2 = &data.links[1];
		assert!(!e2.dashes);
		assert_eq!(e2.color.as_ref().unwrap().highlight(), "#848484");
	}

	#[test]
	fn arrow_heads_follow_the_arrows_field() {
		let data: GraphData = serde_json::from_str(
			r#"{"edges": [
				{"from": "a", "to": "b"},
				{"from": "a", "to": "b", "arrows": "to"},
				{"from": "a", "to": "b", "arrows": ""},
				{"from": "a", "to": "b", "arrows": "to, from"},
				{"from": "a", "to": "b", "arrows": {"from": {"enabled": true}, "to": false}},
				{"from": "a", "to": "b", "arrows": null}
			]}"#,
		)
		.unwrap();
		let heads: Vec<(bool, bool)> = data.links.iter().map(|l| (l.arrows.to, l.arrows.from)).collect();
		assert_eq!(
			heads,
			[(true, false), (true, false), (false, false), (true, true), (false, true), (true, false)]
		);
	}

	#[test]
	fn missing_collections_are_empty() {
		let data: GraphData = serde_json::from_str("{}").unwrap();
		assert!(data.nodes.is_empty());
		assert!(data.links.is_empty());
	}
}
