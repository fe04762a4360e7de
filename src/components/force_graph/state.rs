//! Graph simulation state and interaction tracking.
//!
//! Wraps the `force_graph` physics simulation with per-node metadata, node
//! visibility, view transforms for pan/zoom, and highlight state for hover
//! effects with smooth intensity transitions.

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::{debug, warn};

use super::scale::{ScaleConfig, ScaledValues};
use super::types::{ArrowHeads, EdgeColor, GraphData, NodeShape};
use crate::config::{PhysicsSettings, Settings};
use crate::timeline::Visibility;

/// Fixed simulation step, in seconds.
pub const STEP: f32 = 0.016;

/// Zoom bounds shared by wheel, keyboard and fit.
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 10.0;

/// Seconds the pointer must rest on a node before its tooltip shows.
pub const TOOLTIP_DELAY: f64 = 0.25;

/// Per-node display metadata attached to each node in the simulation.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	/// Label already wrapped into lines.
	pub label: Vec<String>,
	pub title: Option<String>,
	pub color: String,
	pub shape: NodeShape,
	/// Size multiplier (1.0 = normal, >1.0 = larger/more connected)
	pub size: f64,
}

/// A drawn edge. Kept outside the simulation so several edges may join the
/// same pair of nodes.
#[derive(Clone, Debug)]
pub struct EdgeInfo {
	pub source: DefaultNodeIdx,
	pub target: DefaultNodeIdx,
	pub label: Vec<String>,
	pub color: Option<EdgeColor>,
	pub dashes: bool,
	pub arrows: ArrowHeads,
}

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to MIN_ZOOM..MAX_ZOOM).
	pub k: f64,
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Smooth highlight transitions with per-node intensity tracking.
///
/// Each node has an intensity (0.0 to 1.0) that eases towards 1.0 while it is
/// in the active set (hovered node plus visible neighbours) and decays back to
/// 0.0 afterwards, after a short hold time that prevents flicker along the
/// edge of a hover zone.
#[derive(Clone, Debug, Default)]
pub struct HighlightState {
	pub hovered_node: Option<DefaultNodeIdx>,
	/// Seconds the current node has been hovered.
	pub hover_elapsed: f64,
	target_set: HashSet<DefaultNodeIdx>,
	node_intensity: HashMap<DefaultNodeIdx, f64>,
	hold_timer: HashMap<DefaultNodeIdx, f64>,
	cached_max: f64,
}

const MIN_HOLD_TIME: f64 = 0.12;
const FADE_IN_SPEED: f64 = 6.0;
const FADE_OUT_SPEED: f64 = 4.0;

impl HighlightState {
	/// Update the hovered node. `neighbors` must already exclude hidden nodes.
	pub fn set_hover(
		&mut self,
		node: Option<DefaultNodeIdx>,
		neighbors: impl IntoIterator<Item = DefaultNodeIdx>,
	) {
		if self.hovered_node == node {
			return;
		}
		self.hovered_node = node;
		self.hover_elapsed = 0.0;
		self.target_set.clear();

		if let Some(idx) = node {
			self.target_set.insert(idx);
			self.target_set.extend(neighbors);
			for &idx in &self.target_set {
				self.hold_timer.insert(idx, MIN_HOLD_TIME);
			}
		}
	}

	/// Exponential smoothing: value += (target - value) * (1 - e^(-speed * dt))
	pub fn tick(&mut self, dt: f64) {
		let fade_in_factor = 1.0 - (-FADE_IN_SPEED * dt).exp();
		let fade_out_decay = (-FADE_OUT_SPEED * dt).exp();

		if self.hovered_node.is_some() {
			self.hover_elapsed += dt;
		}

		for &idx in &self.target_set {
			let intensity = self.node_intensity.entry(idx).or_insert(0.0);
			*intensity += (1.0 - *intensity) * fade_in_factor;
		}

		let target_set = &self.target_set;
		self.hold_timer.retain(|idx, timer| {
			if target_set.contains(idx) {
				true
			} else {
				*timer -= dt;
				*timer > 0.0
			}
		});

		let mut new_max: f64 = 0.0;
		let hold_timer = &self.hold_timer;
		self.node_intensity.retain(|idx, intensity| {
			if !target_set.contains(idx) && hold_timer.get(idx).copied().unwrap_or(0.0) <= 0.0 {
				*intensity *= fade_out_decay;
			}
			new_max = new_max.max(*intensity);
			target_set.contains(idx) || *intensity > 0.005
		});
		self.cached_max = new_max;
	}

	pub fn node_intensity(&self, idx: DefaultNodeIdx) -> f64 {
		self.node_intensity.get(&idx).copied().unwrap_or(0.0)
	}

	/// Geometric mean of the endpoint intensities.
	pub fn edge_intensity(&self, idx1: DefaultNodeIdx, idx2: DefaultNodeIdx) -> f64 {
		(self.node_intensity(idx1) * self.node_intensity(idx2)).sqrt()
	}

	pub fn max_intensity(&self) -> f64 {
		self.cached_max
	}

	/// Hovered node whose tooltip delay has elapsed.
	pub fn tooltip_node(&self) -> Option<DefaultNodeIdx> {
		self.hovered_node
			.filter(|_| self.hover_elapsed >= TOOLTIP_DELAY)
	}
}

/// Splits a label into lines of at most `max_chars` characters, breaking on
/// whitespace where possible. Existing line breaks are kept.
pub fn wrap_label(text: &str, max_chars: usize) -> Vec<String> {
	let max_chars = max_chars.max(1);
	let mut lines = Vec::new();
	for paragraph in text.lines() {
		let mut current = String::new();
		for word in paragraph.split_whitespace() {
			let word_len = word.chars().count();
			let current_len = current.chars().count();
			if current_len > 0 && current_len + 1 + word_len > max_chars {
				lines.push(std::mem::take(&mut current));
			}
			if !current.is_empty() {
				current.push(' ');
			}
			current.push_str(word);
			while current.chars().count() > max_chars {
				let head: String = current.chars().take(max_chars).collect();
				let tail: String = current.chars().skip(max_chars).collect();
				lines.push(head);
				current = tail;
			}
		}
		if !current.is_empty() {
			lines.push(current);
		}
	}
	lines
}

/// Core graph state combining physics simulation with interaction, visibility
/// and highlight tracking.
///
/// Created once when the component mounts, then mutated each frame by the
/// animation loop and by visibility updates from the timeline.
pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub edges: Vec<EdgeInfo>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub highlight: HighlightState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	id_to_idx: HashMap<String, DefaultNodeIdx>,
	/// Nodes the page data marks hidden; they stay hidden whatever the timeline says.
	data_hidden: HashSet<DefaultNodeIdx>,
	hidden: HashSet<DefaultNodeIdx>,
}

impl ForceGraphState {
	pub fn new(
		data: &GraphData,
		width: f64,
		height: f64,
		settings: &Settings,
		scale: &ScaleConfig,
	) -> Self {
		let PhysicsSettings {
			force_charge,
			force_spring,
			force_max,
			node_speed,
			damping_factor,
			..
		} = settings.physics;
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge,
			force_spring,
			force_max,
			node_speed,
			damping_factor,
		});
		let mut id_to_idx = HashMap::new();
		let mut hidden = HashSet::new();

		let mut edge_counts: HashMap<&str, usize> = HashMap::new();
		for link in &data.links {
			*edge_counts.entry(link.source.as_str()).or_insert(0) += 1;
			*edge_counts.entry(link.target.as_str()).or_insert(0) += 1;
		}
		let max_edges = edge_counts.values().copied().max().unwrap_or(1).max(1);

		for (i, node) in data.nodes.iter().enumerate() {
			if id_to_idx.contains_key(&node.id) {
				warn!("contingency-network: duplicate node id {:?} ignored", node.id);
				continue;
			}
			// Group color > server color > default color
			let color = match node.group.as_deref() {
				Some(g) if settings.node_colors.contains_key(g) => {
					settings.color_for_group(Some(g)).to_string()
				}
				_ => node
					.color
					.clone()
					.unwrap_or_else(|| settings.default_node_color.clone()),
			};
			let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
			let spread = 40.0 * (data.nodes.len() as f64).sqrt();
			let (x, y) = ((spread * angle.cos()) as f32, (spread * angle.sin()) as f32);

			let node_edges = edge_counts.get(node.id.as_str()).copied().unwrap_or(0);
			let edge_factor = (node_edges as f64 / max_edges as f64).sqrt();

			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node
						.label
						.as_deref()
						.map(|l| wrap_label(l, scale.node.label_wrap_chars))
						.unwrap_or_default(),
					title: node.title.clone(),
					color,
					shape: node.shape,
					size: 0.8 + 0.6 * edge_factor,
				},
			});
			if node.hidden {
				hidden.insert(idx);
			}
			id_to_idx.insert(node.id.clone(), idx);
		}

		let mut edges = Vec::new();
		for link in &data.links {
			let (Some(&src), Some(&tgt)) =
				(id_to_idx.get(&link.source), id_to_idx.get(&link.target))
			else {
				warn!(
					"contingency-network: edge {} -> {} references an unknown node, skipped",
					link.source, link.target
				);
				continue;
			};
			// Self loops are drawn but carry no spring force.
			if src != tgt {
				graph.add_edge(src, tgt, EdgeData::default());
			}
			edges.push(EdgeInfo {
				source: src,
				target: tgt,
				label: link
					.label
					.as_deref()
					.map(|l| l.lines().map(str::to_string).collect())
					.unwrap_or_default(),
				color: link.color.clone(),
				dashes: link.dashes,
				arrows: link.arrows,
			});
		}

		Self {
			graph,
			edges,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			highlight: HighlightState::default(),
			width,
			height,
			animation_running: true,
			id_to_idx,
			data_hidden: hidden.clone(),
			hidden,
		}
	}

	pub fn node_count(&self) -> usize {
		self.id_to_idx.len()
	}

	/// Runs the simulation ahead of the first frame so the graph appears settled.
	pub fn stabilize(&mut self, iterations: usize) {
		if self.node_count() == 0 {
			return;
		}
		for _ in 0..iterations {
			self.graph.update(STEP);
		}
		debug!("contingency-network: stabilized after {} iterations", iterations);
	}

	pub fn is_visible(&self, idx: DefaultNodeIdx) -> bool {
		!self.hidden.contains(&idx)
	}

	/// An edge is drawn only when both of its endpoints are visible.
	pub fn is_edge_visible(&self, edge: &EdgeInfo) -> bool {
		self.is_visible(edge.source) && self.is_visible(edge.target)
	}

	pub fn visible_count(&self) -> usize {
		self.node_count() - self.hidden.len()
	}

	/// Replaces the hidden set from a timeline visibility. Hidden nodes keep
	/// taking part in the simulation.
	pub fn apply_visibility(&mut self, visibility: &Visibility) {
		self.hidden = self
			.id_to_idx
			.iter()
			.filter(|(id, idx)| !visibility.shows(id) || self.data_hidden.contains(*idx))
			.map(|(_, &idx)| idx)
			.collect();

		if let Some(idx) = self.highlight.hovered_node {
			if self.hidden.contains(&idx) {
				self.set_hover(None);
			}
		}
		if let Some(idx) = self.drag.node_idx {
			if self.hidden.contains(&idx) {
				self.end_drag();
			}
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(
		&self,
		sx: f64,
		sy: f64,
		config: &ScaleConfig,
	) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if !self.is_visible(node.index()) {
				return;
			}
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			let hit = scale.node_radius * node.data.user_data.size + scale.hit_margin;
			if (dx * dx + dy * dy).sqrt() < hit {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn position_of(&self, idx: DefaultNodeIdx) -> Option<(f64, f64)> {
		let mut pos = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				pos = Some((node.x() as f64, node.y() as f64));
			}
		});
		pos
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		let neighbors: Vec<DefaultNodeIdx> = match node {
			Some(idx) => self
				.edges
				.iter()
				.filter(|e| self.is_edge_visible(e))
				.filter_map(|e| {
					if e.source == idx {
						Some(e.target)
					} else if e.target == idx {
						Some(e.source)
					} else {
						None
					}
				})
				.collect(),
			None => Vec::new(),
		};
		self.highlight.set_hover(node, neighbors);
	}

	pub fn begin_drag(&mut self, idx: DefaultNodeIdx, x: f64, y: f64) {
		self.drag.active = true;
		self.drag.node_idx = Some(idx);
		self.drag.start_x = x;
		self.drag.start_y = y;
		if let Some((nx, ny)) = self.position_of(idx) {
			self.drag.node_start_x = nx as f32;
			self.drag.node_start_y = ny as f32;
		}
	}

	pub fn drag_to(&mut self, x: f64, y: f64) {
		let Some(idx) = self.drag.node_idx else {
			return;
		};
		let (dx, dy) = (
			(x - self.drag.start_x) / self.transform.k,
			(y - self.drag.start_y) / self.transform.k,
		);
		let (nx, ny) = (
			self.drag.node_start_x + dx as f32,
			self.drag.node_start_y + dy as f32,
		);
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.x = nx;
				node.data.y = ny;
				node.data.is_anchor = true;
			}
		});
	}

	/// Releases the dragged node back to the simulation.
	pub fn end_drag(&mut self) {
		if let Some(idx) = self.drag.node_idx.take() {
			self.graph.visit_nodes_mut(|node| {
				if node.index() == idx {
					node.data.is_anchor = false;
				}
			});
		}
		self.drag.active = false;
	}

	pub fn begin_pan(&mut self, x: f64, y: f64) {
		self.pan.active = true;
		self.pan.start_x = x;
		self.pan.start_y = y;
		self.pan.transform_start_x = self.transform.x;
		self.pan.transform_start_y = self.transform.y;
	}

	pub fn pan_to(&mut self, x: f64, y: f64) {
		self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
		self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
	}

	pub fn pan_by(&mut self, dx: f64, dy: f64) {
		self.transform.x += dx;
		self.transform.y += dy;
	}

	/// Zooms by `factor` keeping the screen point (`x`, `y`) fixed.
	pub fn zoom_at(&mut self, x: f64, y: f64, factor: f64) {
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Centers the visible nodes in the viewport, zooming out as needed but
	/// never zooming in past 100%.
	pub fn fit(&mut self, padding: f64, config: &ScaleConfig) {
		let mut bounds: Option<(f64, f64, f64, f64)> = None;
		self.graph.visit_nodes(|node| {
			if !self.is_visible(node.index()) {
				return;
			}
			let r = config.node.radius * node.data.user_data.size;
			let (x, y) = (node.x() as f64, node.y() as f64);
			bounds = Some(match bounds {
				None => (x - r, y - r, x + r, y + r),
				Some((x0, y0, x1, y1)) => (x0.min(x - r), y0.min(y - r), x1.max(x + r), y1.max(y + r)),
			});
		});

		let Some((x0, y0, x1, y1)) = bounds else {
			self.transform = ViewTransform {
				x: self.width / 2.0,
				y: self.height / 2.0,
				k: 1.0,
			};
			return;
		};

		let avail_w = (self.width - 2.0 * padding).max(1.0);
		let avail_h = (self.height - 2.0 * padding).max(1.0);
		let (bw, bh) = ((x1 - x0).max(1.0), (y1 - y0).max(1.0));
		let k = (avail_w / bw).min(avail_h / bh).clamp(MIN_ZOOM, 1.0);
		let (cx, cy) = ((x0 + x1) / 2.0, (y0 + y1) / 2.0);
		self.transform = ViewTransform {
			x: self.width / 2.0 - cx * k,
			y: self.height / 2.0 - cy * k,
			k,
		};
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.highlight.tick(dt as f64);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::{GraphLink, GraphNode};

	fn node(id: &str, group: &str) -> GraphNode {
		GraphNode {
			id: id.into(),
			label: Some(format!("Node {id}")),
			group: Some(group.into()),
			color: None,
			title: None,
			shape: NodeShape::Dot,
			hidden: false,
		}
	}

	fn link(source: &str, target: &str) -> GraphLink {
		GraphLink {
			id: None,
			source: source.into(),
			target: target.into(),
			label: None,
			title: None,
			dashes: false,
			color: None,
			arrows: ArrowHeads::default(),
		}
	}

	fn sample() -> ForceGraphState {
		let data = GraphData {
			nodes: vec![node("s1", "sujeito"), node("a1", "acao"), node("h1", "outro")],
			links: vec![link("s1", "a1"), link("a1", "h1"), link("a1", "missing")],
		};
		ForceGraphState::new(
			&data,
			800.0,
			600.0,
			&Settings::default(),
			&ScaleConfig::default(),
		)
	}

	fn idx(state: &ForceGraphState, id: &str) -> DefaultNodeIdx {
		state.id_to_idx[id]
	}

	#[test]
	fn builds_nodes_and_skips_dangling_edges() {
		let state = sample();
		assert_eq!(state.node_count(), 3);
		assert_eq!(state.edges.len(), 2);

		let mut colors = HashMap::new();
		state.graph.visit_nodes(|n| {
			colors.insert(n.data.user_data.id.clone(), n.data.user_data.color.clone());
		});
		assert_eq!(colors["s1"], "#FFD700");
		assert_eq!(colors["h1"], "#999999");
	}

	#[test]
	fn visibility_hides_nodes_and_their_edges() {
		let mut state = sample();
		state.apply_visibility(&Visibility::only(["s1", "a1"]));

		assert!(state.is_visible(idx(&state, "s1")));
		assert!(!state.is_visible(idx(&state, "h1")));
		assert_eq!(state.visible_count(), 2);
		let drawn = state.edges.iter().filter(|e| state.is_edge_visible(e)).count();
		assert_eq!(drawn, 1);

		state.apply_visibility(&Visibility::All);
		assert_eq!(state.visible_count(), 3);
	}

	#[test]
	fn self_loops_are_kept_and_stabilize() {
		let data = GraphData {
			nodes: vec![node("s1", "sujeito"), node("a1", "acao")],
			links: vec![link("s1", "a1"), link("a1", "a1")],
		};
		let mut state =
			ForceGraphState::new(&data, 800.0, 600.0, &Settings::default(), &ScaleConfig::default());
		state.stabilize(10);
		state.tick(STEP);

		assert_eq!(state.edges.len(), 2);
		let a1 = idx(&state, "a1");
		assert!(state.edges.iter().any(|e| e.source == a1 && e.target == a1));
		assert!(state.position_of(a1).is_some_and(|(x, y)| x.is_finite() && y.is_finite()));
	}

	#[test]
	fn nodes_hidden_by_data_stay_hidden() {
		let mut hidden = node("x1", "acao");
		hidden.hidden = true;
		let data = GraphData {
			nodes: vec![node("s1", "sujeito"), hidden],
			links: vec![link("s1", "x1")],
		};
		let mut state =
			ForceGraphState::new(&data, 800.0, 600.0, &Settings::default(), &ScaleConfig::default());
		assert_eq!(state.visible_count(), 1);

		state.apply_visibility(&Visibility::All);
		assert!(!state.is_visible(idx(&state, "x1")));
		assert_eq!(state.edges.iter().filter(|e| state.is_edge_visible(e)).count(), 0);
	}

	#[test]
	fn hiding_the_hovered_node_clears_hover() {
		let mut state = sample();
		let h1 = idx(&state, "h1");
		state.set_hover(Some(h1));
		assert_eq!(state.highlight.hovered_node, Some(h1));

		state.apply_visibility(&Visibility::only(["s1"]));
		assert_eq!(state.highlight.hovered_node, None);
	}

	#[test]
	fn hover_neighbors_exclude_hidden_nodes() {
		let mut state = sample();
		let (s1, a1, h1) = (idx(&state, "s1"), idx(&state, "a1"), idx(&state, "h1"));
		state.apply_visibility(&Visibility::only(["s1", "a1"]));
		state.set_hover(Some(a1));
		state.highlight.tick(0.1);

		assert!(state.highlight.node_intensity(a1) > 0.0);
		assert!(state.highlight.node_intensity(s1) > 0.0);
		assert_eq!(state.highlight.node_intensity(h1), 0.0);
	}

	#[test]
	fn hit_testing_ignores_hidden_nodes() {
		let mut state = sample();
		let h1 = idx(&state, "h1");
		let (gx, gy) = state.position_of(h1).unwrap();
		let (sx, sy) = (
			gx * state.transform.k + state.transform.x,
			gy * state.transform.k + state.transform.y,
		);
		let config = ScaleConfig::default();
		assert_eq!(state.node_at_position(sx, sy, &config), Some(h1));

		state.apply_visibility(&Visibility::only(["s1", "a1"]));
		assert_ne!(state.node_at_position(sx, sy, &config), Some(h1));
	}

	#[test]
	fn fit_brings_visible_nodes_into_view_without_zooming_in() {
		let mut state = sample();
		state.graph.visit_nodes_mut(|n| {
			n.data.x *= 20.0;
			n.data.y *= 20.0;
		});
		state.transform = ViewTransform {
			x: -5000.0,
			y: 7000.0,
			k: 4.0,
		};
		state.fit(40.0, &ScaleConfig::default());

		assert!(state.transform.k <= 1.0 && state.transform.k >= MIN_ZOOM);
		let mut positions = Vec::new();
		state
			.graph
			.visit_nodes(|n| positions.push((n.x() as f64, n.y() as f64)));
		for (gx, gy) in positions {
			let (sx, sy) = (
				gx * state.transform.k + state.transform.x,
				gy * state.transform.k + state.transform.y,
			);
			assert!((40.0..=760.0).contains(&sx), "x {sx} outside viewport");
			assert!((40.0..=560.0).contains(&sy), "y {sy} outside viewport");
		}
	}

	#[test]
	fn fit_with_nothing_visible_resets_view() {
		let mut state = sample();
		state.apply_visibility(&Visibility::only(Vec::<String>::new()));
		state.transform.k = 3.0;
		state.fit(40.0, &ScaleConfig::default());
		assert_eq!(state.transform.k, 1.0);
		assert_eq!((state.transform.x, state.transform.y), (400.0, 300.0));
	}

	#[test]
	fn zoom_keeps_anchor_point_fixed() {
		let mut state = sample();
		let before = state.screen_to_graph(100.0, 50.0);
		state.zoom_at(100.0, 50.0, 1.1);
		let after = state.screen_to_graph(100.0, 50.0);
		assert!((before.0 - after.0).abs() < 1e-9);
		assert!((before.1 - after.1).abs() < 1e-9);

		for _ in 0..100 {
			state.zoom_at(0.0, 0.0, 1.1);
		}
		assert_eq!(state.transform.k, MAX_ZOOM);
	}

	#[test]
	fn tooltip_waits_for_delay() {
		let mut state = sample();
		let s1 = idx(&state, "s1");
		state.set_hover(Some(s1));
		state.highlight.tick(0.1);
		assert_eq!(state.highlight.tooltip_node(), None);
		state.highlight.tick(0.2);
		assert_eq!(state.highlight.tooltip_node(), Some(s1));
	}

	#[test]
	fn wraps_labels_on_words() {
		assert_eq!(
			wrap_label("Pressionar a barra de resposta", 12),
			vec!["Pressionar a", "barra de", "resposta"]
		);
		assert_eq!(wrap_label("Antecedente:\nSD", 24), vec!["Antecedente:", "SD"]);
		assert_eq!(wrap_label("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
		assert!(wrap_label("", 10).is_empty());
	}
}
