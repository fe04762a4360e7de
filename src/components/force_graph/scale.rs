//! Zoom-dependent scaling configuration for graph visuals.
//!
//! - **World-space** values scale with zoom (appear larger when zoomed in).
//! - **Screen-space** values stay the same pixel size at any zoom level.
//!
//! Rendering happens after the canvas transform is applied, so every value in
//! [`ScaledValues`] is expressed in world units.

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space scaling, clamped to min/max screen-space bounds.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// Compute the world-space value for a given base value and zoom level.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// Fades a visual element in between two zoom levels.
#[derive(Clone, Debug)]
pub struct ZoomFade {
	/// At or below this zoom the element is invisible.
	pub zero_alpha_k: f64,
	/// At or above this zoom the element is fully visible.
	pub full_alpha_k: f64,
}

impl ZoomFade {
	/// Alpha multiplier at zoom `k`.
	pub fn apply(&self, k: f64) -> f64 {
		if self.zero_alpha_k >= self.full_alpha_k {
			return 1.0;
		}
		((k - self.zero_alpha_k) / (self.full_alpha_k - self.zero_alpha_k)).clamp(0.0, 1.0)
	}
}

/// Configuration for node visual scaling.
#[derive(Clone, Debug)]
pub struct NodeScaleConfig {
	/// Base node radius in world units.
	pub radius: f64,
	/// How the radius reacts to zoom.
	pub radius_behavior: ScaleBehavior,
	/// Extra hit-test margin around the node outline, in world units.
	pub hit_margin: f64,
	/// Label font size in screen pixels at zoom 1.
	pub label_size: f64,
	/// Zoom level below which label fonts stop shrinking.
	pub label_min_k: f64,
	/// Labels are wrapped to this many characters per line.
	pub label_wrap_chars: usize,
}

/// Configuration for edge visual scaling.
#[derive(Clone, Debug)]
pub struct EdgeScaleConfig {
	/// Base line width in screen pixels.
	pub line_width: f64,
	/// Dash pattern (dash, gap) in world units for dashed edges.
	pub dash_pattern: (f64, f64),
	/// Arrow head length in world units.
	pub arrow_size: f64,
	/// How the arrow head reacts to zoom.
	pub arrow_behavior: ScaleBehavior,
	/// Edge label font size in screen pixels at zoom 1.
	pub label_size: f64,
	/// Edge labels fade out when zoomed far out.
	pub label_fade: ZoomFade,
}

/// Configuration for hover effects.
#[derive(Clone, Debug)]
pub struct HoverScaleConfig {
	/// Stroke width for hover ring in screen pixels.
	pub ring_width: f64,
	/// Ring offset from node edge in screen pixels.
	pub ring_offset: f64,
	/// Tooltip font size in screen pixels.
	pub tooltip_size: f64,
}

/// Complete scale configuration for all graph elements.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Nodes and their labels.
	pub node: NodeScaleConfig,
	/// Edges, arrows and edge labels.
	pub edge: EdgeScaleConfig,
	/// Hover ring and tooltip.
	pub hover: HoverScaleConfig,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node: NodeScaleConfig {
				radius: 12.0,
				radius_behavior: ScaleBehavior::Clamped {
					min_screen: 4.0,
					max_screen: f64::INFINITY,
				},
				hit_margin: 4.0,
				label_size: 12.0,
				label_min_k: 0.5,
				label_wrap_chars: 24,
			},
			edge: EdgeScaleConfig {
				line_width: 1.5,
				dash_pattern: (6.0, 4.0),
				arrow_size: 8.0,
				arrow_behavior: ScaleBehavior::Clamped {
					min_screen: 4.0,
					max_screen: 18.0,
				},
				label_size: 10.0,
				label_fade: ZoomFade {
					zero_alpha_k: 0.35,
					full_alpha_k: 0.7,
				},
			},
			hover: HoverScaleConfig {
				ring_width: 1.5,
				ring_offset: 3.0,
				tooltip_size: 12.0,
			},
		}
	}
}

/// Pre-computed scale values for a specific zoom level.
///
/// Create this once per frame and pass it to rendering functions.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// Zoom level these values were computed for.
	pub k: f64,
	/// Node radius in world units, before the per-node size factor.
	pub node_radius: f64,
	/// Hit-test margin in world units.
	pub hit_margin: f64,
	/// Node label font, e.g. "12px sans-serif".
	pub label_font: String,
	/// Line height for node labels in world units.
	pub label_line_height: f64,
	/// Edge line width in world units.
	pub edge_line_width: f64,
	/// Dash and gap lengths in world units.
	pub dash_pattern: (f64, f64),
	/// Arrow head length in world units.
	pub arrow_size: f64,
	/// Edge label font.
	pub edge_label_font: String,
	/// Line height for edge labels in world units.
	pub edge_label_line_height: f64,
	/// Edge label alpha multiplier [0, 1].
	pub edge_label_alpha: f64,
	/// Hover ring stroke width in world units.
	pub ring_width: f64,
	/// Hover ring gap from the node outline in world units.
	pub ring_offset: f64,
}

impl ScaledValues {
	/// Resolves every size for zoom `k`.
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let label_px = config.node.label_size / k.max(config.node.label_min_k);
		let edge_label_px = config.edge.label_size / k.max(config.node.label_min_k);

		Self {
			k,
			node_radius: config.node.radius_behavior.apply(config.node.radius, k),
			hit_margin: config.node.hit_margin,
			label_font: format!("{}px Inter, sans-serif", label_px),
			label_line_height: label_px * 1.2,
			edge_line_width: config.edge.line_width / k,
			dash_pattern: config.edge.dash_pattern,
			arrow_size: config
				.edge
				.arrow_behavior
				.apply(config.edge.arrow_size, k),
			edge_label_font: format!("{}px Inter, sans-serif", edge_label_px),
			edge_label_line_height: edge_label_px * 1.2,
			edge_label_alpha: config.edge.label_fade.apply(k),
			ring_width: config.hover.ring_width / k,
			ring_offset: config.hover.ring_offset / k,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clamped_radius_keeps_minimum_screen_size() {
		let b = ScaleBehavior::Clamped {
			min_screen: 4.0,
			max_screen: f64::INFINITY,
		};
		assert_eq!(b.apply(12.0, 1.0), 12.0);
		// At k = 0.25 a 12-unit node would be 3px; clamped to 4px = 16 world units.
		assert_eq!(b.apply(12.0, 0.25), 16.0);
		assert_eq!(ScaleBehavior::Screen.apply(10.0, 2.0), 5.0);
		assert_eq!(ScaleBehavior::World.apply(10.0, 2.0), 10.0);
	}

	#[test]
	fn edge_labels_fade_when_zoomed_out() {
		let config = ScaleConfig::default();
		assert_eq!(ScaledValues::new(&config, 1.0).edge_label_alpha, 1.0);
		assert_eq!(ScaledValues::new(&config, 0.2).edge_label_alpha, 0.0);
		let mid = ScaledValues::new(&config, 0.525).edge_label_alpha;
		assert!(mid > 0.4 && mid < 0.6);
	}
}
