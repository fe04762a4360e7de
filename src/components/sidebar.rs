//! Collapsible sidebar holding the analysis form.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use log::info;

use crate::config::Settings;
use crate::poller::ProgressController;
use crate::progress::char_count_label;

const SUBMIT_MESSAGE: &str = "Enviando nova solicitação de análise do gráfico...";

/// Sidebar toggle button plus the sidebar itself.
///
/// Submitting the form opens the loading overlay and lets the browser carry
/// on with the regular POST.
#[component]
pub fn Sidebar(
	settings: Settings,
	#[prop(default = None)] original_text: Option<String>,
	progress: ProgressController,
) -> impl IntoView {
	let open = RwSignal::new(false);
	let text = RwSignal::new(original_text.unwrap_or_default());
	let max_chars = settings.max_chars;

	let on_submit = move |_: SubmitEvent| {
		info!("contingency-network: submitting analysis form");
		progress.show_overlay();
		progress.add_message(SUBMIT_MESSAGE, "info");
	};

	view! {
		<button
			id="sidebarToggle"
			class="sidebar-toggle"
			title="Nova análise"
			on:click=move |_| open.update(|o| *o = !*o)
		>
			<i class=move || if open.get() { "fa fa-times" } else { "fa fa-bars" }></i>
		</button>
		<aside id="sidebar" class="sidebar" class:visible=move || open.get()>
			<h2>"Nova análise"</h2>
			<form id="updateForm" method="post" action=settings.analysis_action on:submit=on_submit>
				<textarea
					id="analysisTextarea"
					name="texto_entrada"
					rows="12"
					maxlength=max_chars.to_string()
					prop:value=move || text.get()
					on:input=move |ev| text.set(event_target_value(&ev))
				></textarea>
				<div id="charCountNetwork" class="char-count">
					{move || text.with(|t| char_count_label(t, max_chars))}
				</div>
				<button type="submit" id="updateGraphButton" class="btn-submit">
					"Atualizar gráfico"
				</button>
			</form>
		</aside>
	}
}
