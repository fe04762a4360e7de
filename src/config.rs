//! Runtime settings for the network page.
//!
//! Every field has a default, so the server only needs to embed the values it
//! wants to change under `settings` in the page data.

use std::collections::HashMap;

use serde::Deserialize;

/// Node group colors used by the legend and by the graph.
pub fn default_node_colors() -> HashMap<String, String> {
	[
		("sujeito", "#FFD700"),
		("acao", "#ADD8E6"),
		("estimulo", "#90EE90"),
		("condicao", "#FFA07A"),
		("hipotese", "#a753f5"),
	]
	.into_iter()
	.map(|(k, v)| (k.to_string(), v.to_string()))
	.collect()
}

/// Which visual theme the graph canvas uses.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
	/// Light background, dark labels.
	#[default]
	Light,
	/// Dark background, light labels.
	Dark,
}

/// Force simulation and stabilization parameters.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PhysicsSettings {
	/// Node repulsion strength.
	pub force_charge: f32,
	/// Edge spring stiffness.
	pub force_spring: f32,
	/// Upper bound on the force applied to a node in one step.
	pub force_max: f32,
	/// Velocity scale of the integration.
	pub node_speed: f32,
	/// Fraction of velocity kept each step.
	pub damping_factor: f32,
	/// Simulation steps run before the first frame is drawn.
	pub stabilization_iterations: usize,
	/// Screen-space padding (pixels) kept around the graph when fitting the view.
	pub fit_padding: f64,
}

impl Default for PhysicsSettings {
	fn default() -> Self {
		Self {
			force_charge: 250.0,
			force_spring: 0.03,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
			stabilization_iterations: 1000,
			fit_padding: 40.0,
		}
	}
}

/// All settings for the page.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
	/// Base path of the progress endpoint; the task id is appended as a path segment.
	pub progress_endpoint: String,
	/// Delay between progress polls.
	pub poll_interval_ms: u32,
	/// Where the analysis form posts to.
	pub analysis_action: String,
	/// Maximum length of the analysis text, in UTF-16 code units.
	pub max_chars: usize,
	/// Locale used for progress log timestamps.
	pub locale: String,
	/// Fill color per node group, also listed in the legend.
	pub node_colors: HashMap<String, String>,
	/// Fill for nodes whose group has no color.
	pub default_node_color: String,
	/// Canvas theme.
	pub theme: ThemeName,
	/// Layout simulation parameters.
	pub physics: PhysicsSettings,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			progress_endpoint: "/analysis_progress".into(),
			poll_interval_ms: 2000,
			analysis_action: "/analise".into(),
			max_chars: 5000,
			locale: "pt-BR".into(),
			node_colors: default_node_colors(),
			default_node_color: "#999999".into(),
			theme: ThemeName::default(),
			physics: PhysicsSettings::default(),
		}
	}
}

impl Settings {
	/// Color for a node group, falling back to the default node color.
	pub fn color_for_group(&self, group: Option<&str>) -> &str {
		group
			.and_then(|g| self.node_colors.get(g))
			.map(String::as_str)
			.unwrap_or(&self.default_node_color)
	}

	/// Full progress URL for a task.
	pub fn progress_url(&self, task_id: &str) -> String {
		format!("{}/{}", self.progress_endpoint.trim_end_matches('/'), task_id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_match_page_contract() {
		let s = Settings::default();
		assert_eq!(s.poll_interval_ms, 2000);
		assert_eq!(s.progress_url("abc"), "/analysis_progress/abc");
		assert_eq!(s.physics.damping_factor, 0.9);
		assert_eq!(s.physics.stabilization_iterations, 1000);
	}

	#[test]
	fn partial_override_keeps_other_defaults() {
		let s: Settings = serde_json::from_str(
			r#"{"poll_interval_ms": 500, "theme": "dark", "physics": {"fit_padding": 10.0}}"#,
		)
		.unwrap();
		assert_eq!(s.poll_interval_ms, 500);
		assert_eq!(s.theme, ThemeName::Dark);
		assert_eq!(s.physics.fit_padding, 10.0);
		assert_eq!(s.physics.stabilization_iterations, 1000);
		assert_eq!(s.max_chars, 5000);
	}

	#[test]
	fn group_colors_fall_back() {
		let s = Settings::default();
		assert_eq!(s.color_for_group(Some("sujeito")), "#FFD700");
		assert_eq!(s.color_for_group(Some("desconhecido")), "#999999");
		assert_eq!(s.color_for_group(None), "#999999");
	}

	#[test]
	fn trailing_slash_in_endpoint() {
		let s = Settings {
			progress_endpoint: "/progress/".into(),
			..Settings::default()
		};
		assert_eq!(s.progress_url("t1"), "/progress/t1");
	}
}
