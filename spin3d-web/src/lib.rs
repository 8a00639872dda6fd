/// Spin3D Web - 2D canvas frontend compiled to WASM
///
/// Draws the depth-sorted quads onto a `<canvas>` element and drives the
/// animation from `setTimeout`.
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use log::error;
use nalgebra::Point3;
use spin3d_core::{
    Animation, AnimationConfig, ColorSource, DisplaySurface, Palette, Polyhedron, QuadCommand, StopHandle, Timer,
    Viewport,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

/// Display surface backed by a 2D canvas context
pub struct CanvasSurface {
    context: CanvasRenderingContext2d,
    viewport: Viewport,
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement, viewport: Viewport) -> Result<Self, JsValue> {
        canvas.set_width(viewport.width);
        canvas.set_height(viewport.height);
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { context, viewport })
    }
}

impl DisplaySurface for CanvasSurface {
    fn clear(&mut self) {
        self.context.clear_rect(
            0.0,
            0.0,
            f64::from(self.viewport.width),
            f64::from(self.viewport.height),
        );
    }

    fn draw_quad(&mut self, quad: &QuadCommand) {
        let [first, rest @ ..] = quad.points.map(|p| self.viewport.to_screen(&p));
        self.context.begin_path();
        self.context.move_to(first.x, first.y);
        for p in rest {
            self.context.line_to(p.x, p.y);
        }
        self.context.close_path();
        self.context.set_fill_style_str(&quad.color.to_string());
        self.context.fill();
    }
}

type TickCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Handle of the most recently armed `setTimeout`
#[derive(Debug, Default)]
pub struct PendingTimeout {
    handle: Cell<Option<i32>>,
}

impl PendingTimeout {
    /// Record a newly armed timeout, returning the one it supersedes
    pub fn arm(&self, handle: i32) -> Option<i32> {
        self.handle.replace(Some(handle))
    }

    pub fn take(&self) -> Option<i32> {
        self.handle.take()
    }
}

/// Timer that schedules the shared tick callback with `setTimeout`
pub struct TimeoutTimer {
    window: Window,
    callback: TickCallback,
    pending: PendingTimeout,
}

impl TimeoutTimer {
    /// Clear the armed timeout so the callback is never invoked again
    pub fn cancel(&self) {
        if let Some(handle) = self.pending.take() {
            self.window.clear_timeout_with_handle(handle);
        }
    }
}

impl Timer for TimeoutTimer {
    fn after(&mut self, delay: Duration) {
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            error!("tick requested before the callback was installed");
            return;
        };
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.as_ref().unchecked_ref(), millis)
        {
            Ok(handle) => {
                // The superseded handle has already fired.
                self.pending.arm(handle);
            }
            Err(e) => error!("setTimeout failed: {:?}", e),
        }
    }
}

/// A spinning cube bound to a canvas element
#[wasm_bindgen]
pub struct WebAnimation {
    animation: Rc<RefCell<Animation<CanvasSurface, TimeoutTimer>>>,
    stop: StopHandle,
}

#[wasm_bindgen]
impl WebAnimation {
    /// Bind to the canvas with the given id, using the default configuration
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<WebAnimation, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let canvas = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id {}", canvas_id)))?
            .dyn_into::<HtmlCanvasElement>()?;

        let config = AnimationConfig::default();
        let surface = CanvasSurface::new(&canvas, config.viewport())?;
        let callback: TickCallback = Rc::new(RefCell::new(None));
        let timer = TimeoutTimer {
            window,
            callback: Rc::clone(&callback),
            pending: PendingTimeout::default(),
        };

        let mut animation =
            Animation::new(&config, surface, timer).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let cube = Polyhedron::cube(Point3::new(100.0, 100.0, 100.0), 200.0, Palette::default().take_colors(6))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        animation.add_shape(cube);

        let stop = animation.stop_handle();
        let animation = Rc::new(RefCell::new(animation));

        let weak = Rc::downgrade(&animation);
        *callback.borrow_mut() = Some(Closure::new(move || {
            if let Some(animation) = weak.upgrade() {
                animation.borrow_mut().tick();
            }
        }));

        Ok(WebAnimation { animation, stop })
    }

    pub fn start(&self) -> Result<(), JsValue> {
        self.animation
            .borrow_mut()
            .start()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Stop after the current frame; no further ticks are scheduled
    pub fn stop(&self) {
        self.stop.stop();
        self.cancel_pending();
    }

    #[wasm_bindgen(getter)]
    pub fn frames(&self) -> f64 {
        self.animation.borrow().frame_count() as f64
    }
}

impl WebAnimation {
    fn cancel_pending(&self) {
        // Only fails while a tick is running, and that tick will not re-arm.
        if let Ok(animation) = self.animation.try_borrow() {
            animation.timer().cancel();
        }
    }
}

impl Drop for WebAnimation {
    fn drop(&mut self) {
        self.stop.stop();
        self.cancel_pending();
    }
}
