#![cfg(target_arch = "wasm32")]
use crate::core::{IdleAnimator, ViewerSession};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod input;
mod loader;
mod render;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("cauldron-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let config = dom::ViewerConfig::from_document(&document);
    let container = document
        .get_element_by_id(&config.container_id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", config.container_id))?;

    let canvas = dom::mount_canvas(&document, &container)?;
    let viewport = dom::window_viewport(&window);
    dom::sync_canvas_backing_size(&canvas, viewport);

    // Without WebGPU there is nothing to show; bail out before wiring input.
    let gpu = frame::init_gpu(&canvas, viewport)
        .await
        .map_err(|e| e.context("WebGPU init"))?;

    let animator = IdleAnimator::random(&mut rand::thread_rng());
    log::info!(
        "[viewer] {}x{} idle axis=({:.2},{:.2},{:.2}) model={}",
        viewport.width,
        viewport.height,
        animator.axis().x,
        animator.axis().y,
        animator.axis().z,
        config.model_url
    );
    let session = Rc::new(RefCell::new(ViewerSession::new(viewport, animator)));

    let pending_model = loader::PendingLoad::spawn(config.model_url.clone());

    events::wire_window_resize(&canvas, session.clone());
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        session: session.clone(),
    });

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        session,
        gpu,
        pending_model: Some(pending_model),
        started: Instant::now(),
    }));
    frame::start_loop(frame_ctx);

    Ok(())
}
