use console_error_panic_hook::set_once;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use foundation::time::Time;
use gpu::Renderer;
use layers::{PopulateSummary, populate_scene};
use runtime::{RenderLoop, Tick};
use scene::Composer;
use scene::camera::Viewport;

mod config;
mod loader;
mod wgpu;

pub use config::ViewerConfig;
pub use loader::{LoadError, fetch_simulation};
use wgpu::{WgpuContext, color_space, init_wgpu_from_canvas, render_scene, resize_wgpu, upload_frame};

const CANVAS_ID: &str = "fluidview-canvas";

fn log(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

fn log_error(msg: &str) {
    web_sys::console::error_1(&JsValue::from_str(msg));
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    Ok(())
}

#[derive(Debug)]
struct ViewerInner {
    config: ViewerConfig,
    composer: Composer,
    canvas: web_sys::HtmlCanvasElement,
    surface: Option<WgpuContext>,
    render_loop: RenderLoop,
    summary: Option<PopulateSummary>,
    starting: bool,
    /// Id of the scheduled animation frame, if any.
    pending_frame: Option<i32>,
    /// Set once the JS handle is freed; nothing is scheduled afterwards.
    disposed: bool,
}

impl ViewerInner {
    fn draw(&self) -> Result<(), JsValue> {
        let Some(ctx) = &self.surface else {
            return Ok(());
        };
        render_scene(
            ctx,
            Renderer::view_proj(&self.composer),
            Renderer::clear_color(&self.composer, color_space(ctx)),
        )
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// One viewer instance: a canvas, the scene composed onto it and the redraw
/// loop. The scene is filled once by `start` and only read afterwards.
#[wasm_bindgen]
pub struct FluidViewer {
    inner: Rc<RefCell<ViewerInner>>,
    frame_callback: FrameCallback,
}

#[wasm_bindgen]
impl FluidViewer {
    /// Create the canvas, attach it to `document.body` and build an empty
    /// scene sized to the window. `config` may be omitted.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<FluidViewer, JsValue> {
        let config: ViewerConfig = if config.is_undefined() || config.is_null() {
            ViewerConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;

        let width = window.inner_width()?.as_f64().unwrap_or(1280.0);
        let height = window.inner_height()?.as_f64().unwrap_or(720.0);

        let canvas: web_sys::HtmlCanvasElement = document
            .create_element("canvas")?
            .dyn_into()
            .map_err(|_| JsValue::from_str("created element is not a canvas"))?;
        canvas.set_id(CANVAS_ID);
        canvas.set_attribute("style", "display: block")?;
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
        body.append_child(&canvas)?;

        let composer = Composer::new(Viewport::new(width, height), &config.composer_config());

        let inner = Rc::new(RefCell::new(ViewerInner {
            config,
            composer,
            canvas,
            surface: None,
            render_loop: RenderLoop::new(),
            summary: None,
            starting: false,
            pending_frame: None,
            disposed: false,
        }));

        let frame_callback: FrameCallback = Rc::new(RefCell::new(None));
        // Weak handles: the callback must not keep a freed viewer alive.
        let cb_inner = Rc::downgrade(&inner);
        let cb_self = Rc::downgrade(&frame_callback);
        *frame_callback.borrow_mut() = Some(Closure::new(move |timestamp_ms: f64| {
            on_animation_frame(&cb_inner, &cb_self, timestamp_ms);
        }));

        Ok(FluidViewer {
            inner,
            frame_callback,
        })
    }

    /// Acquire the GPU surface, load frame 0 from `url` (or the configured
    /// snapshot URL), populate the scene and enter the redraw loop.
    ///
    /// Once the scene is populated, later calls only restart the loop.
    pub fn start(&self, url: Option<String>) -> js_sys::Promise {
        let inner = self.inner.clone();
        let frame_callback = self.frame_callback.clone();

        future_to_promise(async move {
            let (populated, starting) = {
                let s = inner.borrow();
                (s.summary.is_some(), s.starting)
            };
            if populated {
                begin_loop(&inner, &frame_callback)?;
                return Ok(JsValue::UNDEFINED);
            }
            if starting {
                return Err(JsValue::from_str("viewer start already in progress"));
            }

            inner.borrow_mut().starting = true;
            let result = load_and_populate(&inner, url).await;
            inner.borrow_mut().starting = false;
            if let Err(err) = &result {
                log_error(&format!("viewer startup failed: {}", describe(err)));
            }
            result?;

            begin_loop(&inner, &frame_callback)?;
            Ok(JsValue::UNDEFINED)
        })
    }

    /// Leave the loop. A callback that is already scheduled still fires once
    /// and ends the chain without drawing.
    pub fn stop(&self) {
        self.inner.borrow_mut().render_loop.stop();
    }

    pub fn resize(&self, width: f64, height: f64) {
        let mut s = self.inner.borrow_mut();
        s.composer.resize(width, height);
        let (px_w, px_h) = surface_size(width, height);
        s.canvas.set_width(px_w);
        s.canvas.set_height(px_h);
        if let Some(ctx) = s.surface.as_mut() {
            resize_wgpu(ctx, px_w, px_h);
        }
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().render_loop.is_running()
    }

    pub fn cell_count(&self) -> usize {
        self.inner.borrow().summary.map_or(0, |s| s.cells)
    }

    pub fn marker_count(&self) -> usize {
        self.inner.borrow().composer.marker_count()
    }

    pub fn has_marker(&self, name: &str) -> bool {
        self.inner.borrow().composer.marker(name).is_some()
    }

    pub fn frames_drawn(&self) -> f64 {
        self.inner.borrow().render_loop.frames_drawn() as f64
    }
}

/// Freeing the JS handle stops the loop and cancels the scheduled frame, so the
/// callback closure can be dropped with the viewer.
impl Drop for FluidViewer {
    fn drop(&mut self) {
        let Ok(mut s) = self.inner.try_borrow_mut() else {
            return;
        };
        s.disposed = true;
        s.render_loop.stop();
        if let (Some(id), Some(window)) = (s.pending_frame.take(), web_sys::window()) {
            let _ = window.cancel_animation_frame(id);
        }
        s.canvas.remove();
    }
}

async fn load_and_populate(
    inner: &Rc<RefCell<ViewerInner>>,
    url: Option<String>,
) -> Result<(), JsValue> {
    let (canvas, needs_surface, url) = {
        let s = inner.borrow();
        (
            s.canvas.clone(),
            s.surface.is_none(),
            url.unwrap_or_else(|| s.config.snapshot_url.clone()),
        )
    };

    if needs_surface {
        let ctx = init_wgpu_from_canvas(canvas).await?;
        log("wgpu surface ready");
        inner.borrow_mut().surface = Some(ctx);
    }

    let file = fetch_simulation(&url).await?;
    let snapshot = &file.first;
    log(&format!(
        "loaded {url}: {} frame(s), using frame 0 ({}x{} pressure grid, {} entities)",
        file.frame_count,
        snapshot.pressure.rows(),
        snapshot.pressure.cols(),
        snapshot.entities.len(),
    ));

    let mut s = inner.borrow_mut();
    let summary = populate_scene(&mut s.composer, snapshot);
    let ViewerInner {
        composer, surface, ..
    } = &mut *s;
    if let Some(ctx) = surface.as_mut() {
        let frame = Renderer::collect_3d(composer, color_space(ctx));
        upload_frame(ctx, &frame);
    }
    s.summary = Some(summary);
    log(&format!(
        "scene populated: {} cells, {} markers",
        summary.cells, summary.markers
    ));
    Ok(())
}

fn begin_loop(inner: &Rc<RefCell<ViewerInner>>, frame_callback: &FrameCallback) -> Result<(), JsValue> {
    let schedule = {
        let mut s = inner.borrow_mut();
        !s.disposed && s.render_loop.start()
    };
    if schedule {
        log("render loop started");
        request_frame(inner, frame_callback)?;
    }
    Ok(())
}

fn request_frame(inner: &Rc<RefCell<ViewerInner>>, frame_callback: &FrameCallback) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let cb = frame_callback.borrow();
    let cb = cb
        .as_ref()
        .ok_or_else(|| JsValue::from_str("frame callback missing"))?;
    let id = window.request_animation_frame(cb.as_ref().unchecked_ref())?;
    inner.borrow_mut().pending_frame = Some(id);
    Ok(())
}

fn on_animation_frame(
    inner: &Weak<RefCell<ViewerInner>>,
    frame_callback: &Weak<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
    timestamp_ms: f64,
) {
    // Viewer freed: end the chain.
    let Some(frame_callback) = frame_callback.upgrade() else {
        return;
    };
    let Some((inner, tick)) = advance_loop(inner, Time::from_millis(timestamp_ms), |s| {
        s.pending_frame = None;
        &mut s.render_loop
    }) else {
        return;
    };

    match tick {
        Tick::Draw(_) => {
            if let Err(err) = request_frame(&inner, &frame_callback) {
                log_error(&format!("failed to schedule frame: {}", describe(&err)));
            }
            if let Err(err) = inner.borrow().draw() {
                log_error(&format!("draw failed: {}", describe(&err)));
            }
        }
        Tick::Halt => {
            let frames = inner.borrow().render_loop.frames_drawn();
            log(&format!("render loop stopped after {frames} frame(s)"));
        }
    }
}

/// Canvas and surface size for a CSS viewport; never below one pixel.
fn surface_size(width: f64, height: f64) -> (u32, u32) {
    (width.max(1.0) as u32, height.max(1.0) as u32)
}

/// Run one display callback against the loop owned by `owner`. `None` once the
/// owner has been dropped, which ends the callback chain.
fn advance_loop<T>(
    owner: &Weak<RefCell<T>>,
    time: Time,
    render_loop: impl FnOnce(&mut T) -> &mut RenderLoop,
) -> Option<(Rc<RefCell<T>>, Tick)> {
    let owner = owner.upgrade()?;
    let tick = render_loop(&mut *owner.borrow_mut()).on_callback(time);
    Some((owner, tick))
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}
