//! Node-group legend with a show/hide toggle.

use std::collections::HashMap;

use leptos::prelude::*;

/// Display order and captions for the known node groups.
const KNOWN_GROUPS: [(&str, &str); 5] = [
	("sujeito", "Sujeito"),
	("acao", "Ação"),
	("estimulo", "Estímulo"),
	("condicao", "Condição"),
	("hipotese", "Hipótese"),
];

/// `(caption, color)` rows: known groups first in their usual order, then any
/// extra groups alphabetically under their raw name.
pub fn legend_entries(colors: &HashMap<String, String>) -> Vec<(String, String)> {
	let mut rows: Vec<(String, String)> = KNOWN_GROUPS
		.iter()
		.filter_map(|(group, caption)| colors.get(*group).map(|c| (caption.to_string(), c.clone())))
		.collect();

	let mut extra: Vec<(String, String)> = colors
		.iter()
		.filter(|(group, _)| !KNOWN_GROUPS.iter().any(|(known, _)| known == group))
		.map(|(group, color)| (group.clone(), color.clone()))
		.collect();
	extra.sort();
	rows.extend(extra);
	rows
}

/// Legend box, hidden until the toggle button is pressed.
#[component]
pub fn Legend(node_colors: HashMap<String, String>) -> impl IntoView {
	let shown = RwSignal::new(false);
	let rows = legend_entries(&node_colors);

	view! {
		<button
			id="toggleLegendButton"
			class="legend-toggle"
			title="Legenda"
			on:click=move |_| shown.update(|s| *s = !*s)
		>
			<i class=move || if shown.get() { "fa fa-eye-slash" } else { "fa fa-eye" }></i>
		</button>
		<div
			id="legendInfoBox"
			class="legend-info-box"
			style:display=move || if shown.get() { "" } else { "none" }
		>
			<ul class="legend-list">
				{rows
					.into_iter()
					.map(|(caption, color)| {
						view! {
							<li class="legend-item">
								<span class="legend-swatch" style:background-color=color></span>
								{caption}
							</li>
						}
					})
					.collect_view()}
			</ul>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::default_node_colors;

	#[test]
	fn known_groups_keep_their_order() {
		let rows = legend_entries(&default_node_colors());
		let captions: Vec<&str> = rows.iter().map(|(c, _)| c.as_str()).collect();
		assert_eq!(captions, ["Sujeito", "Ação", "Estímulo", "Condição", "Hipótese"]);
		assert_eq!(rows[0].1, "#FFD700");
	}

	#[test]
	fn extra_groups_follow_sorted() {
		let mut colors = default_node_colors();
		colors.remove("condicao");
		colors.insert("zeta".into(), "#000".into());
		colors.insert("beta".into(), "#111".into());
		let rows = legend_entries(&colors);
		assert_eq!(rows.len(), 6);
		assert_eq!(rows[4], ("beta".to_string(), "#111".to_string()));
		assert_eq!(rows[5].0, "zeta");
	}
}
