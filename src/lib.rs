//! contingency-network: interactive viewer for contingency analysis graphs.
//!
//! This crate provides the WASM client for the network page: a force-directed
//! graph with a timeline slider that reveals nodes in the order the analysis
//! produced them, plus the sidebar form, legend and the loading overlay that
//! follows a running analysis task.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info};

pub mod components;
pub mod config;
pub mod error;
pub mod page;
pub mod poller;
pub mod progress;
pub mod timeline;

pub use components::force_graph::{ForceGraphCanvas, GraphData, GraphLink, GraphNode};
pub use components::{Legend, ProgressOverlay, Sidebar, TimelineScrubber};
pub use config::Settings;
pub use poller::ProgressController;
pub use timeline::{Timeline, Visibility};

const RESUME_MESSAGE: &str = "Atualização de gráfico anterior detectada. Buscando progresso...";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("contingency-network: logging initialized");
}

/// Main application component.
/// Loads the page data from the DOM and wires the graph, timeline and overlay together.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let page = page::load_page_data();
	let settings = page.settings.clone();

	let graph_data = page.graph();
	let graph_signal = Signal::derive(move || graph_data.clone());
	let visibility = RwSignal::new(Visibility::All);
	let ready = RwSignal::new(false);

	// The overlay covers the page until the layout has stabilized.
	let progress = ProgressController::new(&settings, true);
	if let Some(task_id) = page.task_id.as_deref() {
		progress.show_overlay();
		progress.start(task_id);
		progress.add_message(RESUME_MESSAGE, "info");
	}

	let progress_ready = progress.clone();
	Effect::new(move |_| {
		if ready.get() && !progress_ready.is_polling() {
			progress_ready.hide_overlay();
		}
	});

	let theme_attr = match settings.theme {
		config::ThemeName::Light => "light",
		config::ThemeName::Dark => "dark",
	};

	view! {
		<Html attr:lang="pt-BR" attr:dir="ltr" attr:data-theme=theme_attr />
		<Title text="Rede de Contingências" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<ForceGraphCanvas
				data=graph_signal
				visibility=visibility
				settings=settings.clone()
				ready=ready
				fullscreen=true
			/>
			<div class="graph-overlay">
				<h1>"Rede de Contingências"</h1>
				<p class="subtitle">
					"Arraste nós para reposicioná-los. Role para aproximar. Arraste o fundo para mover."
				</p>
			</div>
			<Legend node_colors=settings.node_colors.clone() />
			<TimelineScrubber timeline=page.timeline() ready=ready visibility=visibility />
		</div>
		<Sidebar settings=settings.clone() original_text=page.original_text.clone() progress=progress.clone() />
		<ProgressOverlay progress=progress />
	}
}
