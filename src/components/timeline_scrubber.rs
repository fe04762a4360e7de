//! Range input that scrubs through the analysis timeline.

use leptos::ev::Event;
use leptos::prelude::*;
use log::debug;

use crate::timeline::{Timeline, Visibility};

/// Slider over the timeline. Stays inert until `ready` turns true, then jumps
/// to the last step and starts driving `visibility`.
#[component]
pub fn TimelineScrubber(
	timeline: Timeline,
	ready: RwSignal<bool>,
	visibility: RwSignal<Visibility>,
) -> impl IntoView {
	let timeline = StoredValue::new(timeline);
	let initialized = RwSignal::new(false);
	let min = RwSignal::new(0usize);
	let max = RwSignal::new(0usize);
	let value = RwSignal::new(0usize);
	let label = RwSignal::new(String::from("0"));

	Effect::new(move |_| {
		if !ready.get() || initialized.get_untracked() {
			return;
		}
		let (slider, shown) = timeline.with_value(|t| (t.initial_slider(), t.initial_visibility()));
		debug!(
			"contingency-network: timeline initialized with {} steps",
			timeline.with_value(Timeline::len)
		);
		min.set(slider.min);
		max.set(slider.max);
		value.set(slider.value);
		label.set(slider.label);
		visibility.set(shown);
		initialized.set(true);
	});

	let on_input = move |ev: Event| {
		let Ok(index) = event_target_value(&ev).parse::<usize>() else {
			return;
		};
		let (text, shown) = timeline.with_value(|t| (t.label_at(index), t.visible_at(index)));
		value.set(index);
		label.set(text);
		visibility.set(shown);
	};

	view! {
		<div class="timeline-container">
			<input
				type="range"
				id="timelineRange"
				min=move || min.get().to_string()
				max=move || max.get().to_string()
				prop:value=move || value.get().to_string()
				disabled=move || !initialized.get()
				on:input=on_input
			/>
			<span id="timelineLabel">{move || label.get()}</span>
		</div>
	}
}
