use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::state::DiagramState;
use crate::catalog::Catalog;
use crate::error::SurfaceError;
use crate::graph::Variant;
use crate::layout::Point;
use crate::tooltip::TooltipContent;
use crate::visibility::Toggles;

type SharedState = Rc<RefCell<Option<DiagramState>>>;
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn viewport(window: &Window) -> (f64, f64) {
	let dim = |v: Result<JsValue, JsValue>, fallback: f64| {
		v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback)
	};
	(dim(window.inner_width(), 800.0), dim(window.inner_height(), 600.0))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, SurfaceError> {
	canvas
		.get_context("2d")
		.map_err(|e| SurfaceError::ContextUnavailable(format!("{e:?}")))?
		.ok_or_else(|| SurfaceError::ContextUnavailable("no 2d context".into()))?
		.dyn_into()
		.map_err(|_| SurfaceError::ContextUnavailable("not a 2d context".into()))
}

fn pointer(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

struct Mount {
	catalog: Arc<Catalog>,
	variant: Variant,
	toggles: Toggles,
	fullscreen: bool,
	state: SharedState,
	animate: FrameCallback,
	resize_cb: FrameCallback,
}

impl Mount {
	fn run(self, canvas: HtmlCanvasElement) -> Result<(), SurfaceError> {
		let window = web_sys::window().ok_or(SurfaceError::NoWindow)?;
		let (w, h) = if self.fullscreen {
			viewport(&window)
		} else {
			canvas
				.parent_element()
				.map(|p| (p.client_width() as f64, p.client_height() as f64))
				.unwrap_or((800.0, 600.0))
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		let ctx = context_2d(&canvas)?;

		let mut diagram = DiagramState::new(self.catalog, self.variant, w, h);
		diagram.set_toggles(self.toggles);
		*self.state.borrow_mut() = Some(diagram);

		if self.fullscreen {
			let (state_resize, canvas_resize) = (self.state.clone(), canvas.clone());
			*self.resize_cb.borrow_mut() = Some(Closure::new(move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				let (nw, nh) = viewport(&win);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *self.resize_cb.borrow() {
				let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (state_anim, animate_inner) = (self.state.clone(), self.animate.clone());
		*self.animate.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(0.016);
				render::render(s, &ctx);
			}
			if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *self.animate.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
		Ok(())
	}
}

/// Canvas rendering of one diagram variant, with its legends and tooltip.
#[component]
pub fn DiagramCanvas(
	catalog: Arc<Catalog>,
	variant: Variant,
	#[prop(into, default = Signal::stored(Toggles::default()))] toggles: Signal<Toggles>,
	#[prop(default = false)] fullscreen: bool,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let animate: FrameCallback = Rc::new(RefCell::new(None));
	let resize_cb: FrameCallback = Rc::new(RefCell::new(None));
	let tooltip = RwSignal::new(None::<(TooltipContent, Point)>);
	let (state_init, animate_init, resize_cb_init) = (state.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let mount = Mount {
			catalog: catalog.clone(),
			variant,
			toggles: toggles.get_untracked(),
			fullscreen,
			state: state_init.clone(),
			animate: animate_init.clone(),
			resize_cb: resize_cb_init.clone(),
		};
		if let Err(e) = mount.run(canvas.into()) {
			warn!("diagram: {e}; nothing will be drawn");
		}
	});

	let state_tg = state.clone();
	Effect::new(move |_| {
		let toggles = toggles.get();
		if let Some(ref mut s) = *state_tg.borrow_mut() {
			s.set_toggles(toggles);
		}
	});

	// Runs `f` on the live state, then mirrors its tooltip into the view.
	let with_state = move |f: &dyn Fn(&mut DiagramState)| {
		if let Some(ref mut s) = *state.borrow_mut() {
			f(s);
			tooltip.set(s.tooltip.current().cloned());
		}
	};
	let with_state = Rc::new(with_state);

	let ws = with_state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if let Some((x, y)) = pointer(canvas_ref, &ev) {
			ws(&|s| s.pointer_down(x, y));
		}
	};

	let ws = with_state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let Some((x, y)) = pointer(canvas_ref, &ev) {
			ws(&|s| s.pointer_move(x, y));
		}
	};

	let ws = with_state.clone();
	let on_mouseup = move |_: MouseEvent| ws(&|s| s.pointer_up());

	let ws = with_state.clone();
	let on_mouseleave = move |_: MouseEvent| ws(&|s| s.pointer_leave());

	let ws = with_state.clone();
	let on_click = move |ev: MouseEvent| {
		if let Some((x, y)) = pointer(canvas_ref, &ev) {
			ws(&|s| s.click(x, y));
		}
	};

	let ws = with_state.clone();
	let on_dblclick = move |ev: MouseEvent| {
		if let Some((x, y)) = pointer(canvas_ref, &ev) {
			ws(&|s| s.double_click(x, y));
		}
	};

	let ws = with_state;
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some((x, y)) = pointer(canvas_ref, &ev) {
			let delta = ev.delta_y();
			ws(&|s| s.wheel(x, y, delta));
		}
	};

	let tooltip_view = move || {
		tooltip.get().map(|(content, at)| {
			let style = format!("position: absolute; left: {}px; top: {}px;", at.x + 12.0, at.y + 12.0);
			view! {
				<div class="diagram-tooltip" style=style>
					<strong>{content.title}</strong>
					{content
						.lines
						.into_iter()
						.map(|(label, value)| view! { <div>{format!("{label}: {value}")}</div> })
						.collect_view()}
				</div>
			}
		})
	};

	view! {
		<div class="diagram" style="position: relative;">
			<canvas
				node_ref=canvas_ref
				class="diagram-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:click=on_click
				on:dblclick=on_dblclick
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			{tooltip_view}
		</div>
	}
}
