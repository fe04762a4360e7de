//! Leptos component wrapping the force-directed graph canvas.
//!
//! The component creates an HTML canvas element and wires up mouse, wheel and
//! window keyboard handlers for node dragging, panning, and zooming. The
//! simulation is stabilized and the view fitted before the first frame; after
//! that an animation loop runs via `requestAnimationFrame`.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, info};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, HtmlInputElement, HtmlTextAreaElement,
	KeyboardEvent, MouseEvent, WheelEvent, Window,
};

use super::render;
use super::scale::ScaleConfig;
use super::state::{ForceGraphState, STEP};
use super::theme::Theme;
use super::types::GraphData;
use crate::config::Settings;
use crate::timeline::Visibility;

/// Keyboard pan step in screen pixels.
const KEY_PAN_STEP: f64 = 10.0;
/// Keyboard zoom step (5%).
const KEY_ZOOM_STEP: f64 = 0.05;

/// Bundles graph simulation state with visual configuration.
struct GraphContext {
	state: ForceGraphState,
	scale: ScaleConfig,
	theme: Theme,
}

type SharedContext = Rc<RefCell<Option<GraphContext>>>;

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

/// Pointer position relative to the canvas' top-left corner.
fn canvas_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Keys typed into form fields must not move the graph.
fn typing_in_field(ev: &KeyboardEvent) -> bool {
	ev.target().is_some_and(|t| {
		t.dyn_ref::<HtmlInputElement>().is_some() || t.dyn_ref::<HtmlTextAreaElement>().is_some()
	})
}

/// Renders an interactive force-directed graph on a canvas element.
///
/// `visibility` is re-applied whenever it changes; hidden nodes keep their
/// place in the simulation. `ready` is set once the layout has stabilized and
/// the view has been fitted, including when there are no nodes at all.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(into)] visibility: Signal<Visibility>,
	settings: Settings,
	ready: RwSignal<bool>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: SharedContext = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let keydown_cb: Rc<RefCell<Option<Closure<dyn FnMut(KeyboardEvent)>>>> =
		Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init, keydown_cb_init) = (
		context.clone(),
		animate.clone(),
		resize_cb.clone(),
		keydown_cb.clone(),
	);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if context_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			error!("contingency-network: no window, graph not started");
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((800.0, 600.0))
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into().ok())
		{
			Some(ctx) => ctx,
			None => {
				error!("contingency-network: 2d canvas context unavailable");
				return;
			}
		};

		let scale = ScaleConfig::default();
		let mut state = ForceGraphState::new(&data.get_untracked(), w, h, &settings, &scale);
		state.apply_visibility(&visibility.get_untracked());
		state.stabilize(settings.physics.stabilization_iterations);
		state.fit(settings.physics.fit_padding, &scale);
		info!(
			"contingency-network: graph ready with {} nodes ({} visible)",
			state.node_count(),
			state.visible_count()
		);

		*context_init.borrow_mut() = Some(GraphContext {
			state,
			scale,
			theme: Theme::from_name(settings.theme),
		});

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.state.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let context_keys = context_init.clone();
		*keydown_cb_init.borrow_mut() = Some(Closure::new(move |ev: KeyboardEvent| {
			if typing_in_field(&ev) {
				return;
			}
			if let Some(ref mut c) = *context_keys.borrow_mut() {
				let (cx, cy) = (c.state.width / 2.0, c.state.height / 2.0);
				match ev.key().as_str() {
					"ArrowLeft" => c.state.pan_by(KEY_PAN_STEP, 0.0),
					"ArrowRight" => c.state.pan_by(-KEY_PAN_STEP, 0.0),
					"ArrowUp" => c.state.pan_by(0.0, KEY_PAN_STEP),
					"ArrowDown" => c.state.pan_by(0.0, -KEY_PAN_STEP),
					"+" | "=" | "PageUp" => c.state.zoom_at(cx, cy, 1.0 + KEY_ZOOM_STEP),
					"-" | "_" | "PageDown" => c.state.zoom_at(cx, cy, 1.0 - KEY_ZOOM_STEP),
					_ => {}
				}
			}
		}));
		if let Some(ref cb) = *keydown_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("keydown", cb.as_ref().unchecked_ref());
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				if c.state.animation_running {
					c.state.tick(STEP);
				}
				render::render(&c.state, &ctx, &c.scale, &c.theme);
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}

		ready.set(true);
	});

	let context_vis = context.clone();
	Effect::new(move |_| {
		let current = visibility.get();
		if let Some(ref mut c) = *context_vis.borrow_mut() {
			c.state.apply_visibility(&current);
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_md.borrow_mut() {
			match c.state.node_at_position(x, y, &c.scale) {
				Some(idx) => c.state.begin_drag(idx, x, y),
				None => c.state.begin_pan(x, y),
			}
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			if c.state.drag.active {
				c.state.drag_to(x, y);
			} else {
				let hovered = c.state.node_at_position(x, y, &c.scale);
				c.state.set_hover(hovered);
				if c.state.pan.active {
					c.state.pan_to(x, y);
				}
			}
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			c.state.end_drag();
			c.state.pan.active = false;
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.end_drag();
			c.state.pan.active = false;
			c.state.set_hover(None);
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			c.state.zoom_at(x, y, factor);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			id="mynetwork"
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
