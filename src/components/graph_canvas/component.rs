//! Leptos component wrapping the subject graph canvas.
//!
//! The component creates an HTML canvas element and wires up mouse/wheel event
//! handlers for node dragging, panning, and zooming. An animation loop runs via
//! `requestAnimationFrame`, advancing the edge flow and hover transitions and
//! redrawing each frame. A new [`GraphView`] replaces the scene wholesale.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::scene::SceneState;
use super::theme::Theme;
use crate::graph::GraphView;

const FRAME_DT: f64 = 0.016;
const FALLBACK_SIZE: (f64, f64) = (800.0, 600.0);

/// Scene plus its visual configuration.
struct CanvasContext {
	scene: SceneState,
	theme: Theme,
}

type SharedContext = Rc<RefCell<Option<CanvasContext>>>;
type SharedClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Event handler that forwards to the scene once the canvas is initialized.
fn scene_handler<E, H>(context: SharedContext, handle: H) -> impl Fn(E) + 'static
where
	E: 'static,
	H: Fn(&mut SceneState, &E) + 'static,
{
	move |ev| {
		if let Some(ref mut c) = *context.borrow_mut() {
			handle(&mut c.scene, &ev);
		}
	}
}

/// Undo actions for everything the canvas registers with the window.
///
/// Runs in reverse registration order when dropped, which happens when the
/// component's owner is cleaned up.
#[derive(Default)]
struct Teardown(Vec<Box<dyn FnOnce()>>);

impl Teardown {
	fn defer(&mut self, action: impl FnOnce() + 'static) {
		self.0.push(Box::new(action));
	}
}

impl Drop for Teardown {
	fn drop(&mut self) {
		while let Some(action) = self.0.pop() {
			action();
		}
	}
}

fn canvas_size(canvas: &HtmlCanvasElement, width: Option<f64>, height: Option<f64>) -> (f64, f64) {
	let parent = canvas.parent_element();
	(
		width.unwrap_or_else(|| {
			parent
				.as_ref()
				.map(|p| p.client_width() as f64)
				.filter(|w| *w > 0.0)
				.unwrap_or(FALLBACK_SIZE.0)
		}),
		height.unwrap_or_else(|| {
			parent
				.as_ref()
				.map(|p| p.client_height() as f64)
				.filter(|h| *h > 0.0)
				.unwrap_or(FALLBACK_SIZE.1)
		}),
	)
}

fn local_coords(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Renders the subject graph on a canvas element.
///
/// Sizes itself to its parent container and follows window resizes.
/// Explicit `width`/`height` override automatic sizing.
#[component]
pub fn GraphCanvas(
	#[prop(into)] data: Signal<GraphView>,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: SharedContext = Rc::new(RefCell::new(None));
	let animate: SharedClosure = Rc::new(RefCell::new(None));
	let resize_cb: SharedClosure = Rc::new(RefCell::new(None));
	let frame: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
	let teardown = StoredValue::new_local(Teardown::default());
	on_cleanup(move || teardown.dispose());
	let (context_init, animate_init, resize_cb_init, frame_init) =
		(context.clone(), animate.clone(), resize_cb.clone(), frame.clone());

	Effect::new(move |_| {
		let view = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();

		if let Some(ref mut c) = *context_init.borrow_mut() {
			debug!("study-planner: canvas scene replaced ({} nodes)", view.nodes.len());
			c.scene = SceneState::new(&view, c.scene.width, c.scene.height);
			return;
		}

		let Some(window) = web_sys::window() else {
			return;
		};
		let (w, h) = canvas_size(&canvas, width, height);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => {
					warn!("study-planner: canvas context has an unexpected type");
					return;
				}
			},
			_ => {
				warn!("study-planner: 2d canvas context unavailable");
				return;
			}
		};

		*context_init.borrow_mut() = Some(CanvasContext {
			scene: SceneState::new(&view, w, h),
			theme: Theme::default(),
		});

		let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = canvas_size(&canvas_resize, width, height);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut c) = *context_resize.borrow_mut() {
				c.scene.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (context_anim, animate_inner, frame_inner) =
			(context_init.clone(), animate_init.clone(), frame_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.scene.tick(FRAME_DT);
				render::render(&c.scene, &ctx, &c.theme);
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				frame_inner.set(win.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			frame_init.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
		}

		let (animate_stop, resize_stop, frame_stop) =
			(animate_init.clone(), resize_cb_init.clone(), frame_init.clone());
		teardown.update_value(|t| {
			t.defer(move || {
				if let Some(id) = frame_stop.take() {
					let _ = window.cancel_animation_frame(id);
				}
				animate_stop.borrow_mut().take();
				if let Some(cb) = resize_stop.borrow_mut().take() {
					let _ = window
						.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
				}
				debug!("study-planner: canvas render loop stopped");
			});
		});
	});

	let on_mousedown = scene_handler(context.clone(), move |scene, ev: &MouseEvent| {
		if let Some((x, y)) = local_coords(canvas_ref, ev) {
			scene.pointer_down(x, y);
		}
	});
	let on_mousemove = scene_handler(context.clone(), move |scene, ev: &MouseEvent| {
		if let Some((x, y)) = local_coords(canvas_ref, ev) {
			scene.pointer_move(x, y);
		}
	});
	let on_mouseup = scene_handler(context.clone(), |scene, _: &MouseEvent| scene.pointer_up());
	let on_mouseleave = scene_handler(context.clone(), |scene, _: &MouseEvent| scene.pointer_leave());
	let on_wheel = scene_handler(context.clone(), move |scene, ev: &WheelEvent| {
		ev.prevent_default();
		if let Some((x, y)) = local_coords(canvas_ref, ev) {
			scene.zoom_at(x, y, ev.delta_y());
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
