//! Loading overlay with the task progress log.

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::poller::ProgressController;
use crate::progress::LogEntry;

/// Overlay shown while the graph settles or an analysis task runs. The close
/// button hides it and stops polling.
#[component]
pub fn ProgressOverlay(progress: ProgressController) -> impl IntoView {
	let container = NodeRef::<leptos::html::Div>::new();
	let log = progress.log;
	let visible = progress.overlay_visible;

	// Keep the newest line in view once the list has been patched.
	Effect::new(move |_| {
		log.track();
		let scroll = Closure::once_into_js(move || {
			if let Some(el) = container.get_untracked() {
				el.set_scroll_top(el.scroll_height());
			}
		});
		if let Some(window) = web_sys::window() {
			let _ = window.request_animation_frame(scroll.unchecked_ref());
		}
	});

	view! {
		<div id="loadingOverlay" class="loading-overlay" class:visible=move || visible.get()>
			<div class="loading-content">
				<button
					id="closeOverlayButton"
					class="close-overlay"
					title="Fechar"
					on:click=move |_| progress.hide_overlay()
				>
					<i class="fa fa-times"></i>
				</button>
				<div class="spinner"></div>
				<h3>"Processando..."</h3>
				<div id="progressLogContainer" class="progress-log-container" node_ref=container>
					<ul id="progressLogList" class="progress-log-list">
						<For
							each=move || log.with(|l| l.entries().to_vec())
							key=|entry: &LogEntry| entry.key
							children=move |entry: LogEntry| {
								view! { <li class=entry.class()>{entry.display()}</li> }
							}
						/>
					</ul>
				</div>
			</div>
		</div>
	}
}
