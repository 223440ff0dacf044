use crate::core::{ModelFit, ViewerSession, Viewport};
use crate::loader::PendingLoad;
use crate::render;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub session: Rc<RefCell<ViewerSession>>,
    pub gpu: render::GpuState<'a>,
    pub pending_model: Option<PendingLoad>,
    pub started: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        self.poll_model();

        let now = self.started.elapsed().as_secs_f64();
        let (output, viewport) = {
            let mut session = self.session.borrow_mut();
            (session.frame(now), session.viewport())
        };

        self.gpu.resize_if_needed(viewport.width, viewport.height);
        if let Err(e) = self.gpu.render(&output) {
            log::error!("render error: {:?}", e);
        }
    }

    /// Hand a finished load to the renderer and the session. A failed load
    /// is logged once and the viewer keeps running without a model.
    fn poll_model(&mut self) {
        let Some(result) = self.pending_model.as_ref().and_then(PendingLoad::poll) else {
            return;
        };
        let url = self
            .pending_model
            .take()
            .map(|p| p.url().to_string())
            .unwrap_or_default();
        match result {
            Ok(model) => {
                self.gpu.upload_model(&model);
                let fit = ModelFit::for_model(&model);
                self.session.borrow_mut().attach_model(fit);
                log::info!(
                    "[model] attached {}: center=({:.2},{:.2},{:.2}) scale={:.3}",
                    url,
                    fit.center.x,
                    fit.center.y,
                    fit.center.z,
                    fit.scale
                );
            }
            Err(e) => log::error!("[model] Error loading model: {e}"),
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    viewport: Viewport,
) -> anyhow::Result<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    render::GpuState::new(leaked_canvas, viewport).await
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
