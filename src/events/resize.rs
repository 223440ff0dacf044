use crate::core::ViewerSession;
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Keep the session viewport and canvas backing store in step with the
/// window. The GPU surface follows on the next frame.
pub fn wire_window_resize(canvas: &web::HtmlCanvasElement, session: Rc<RefCell<ViewerSession>>) {
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        if let Some(window) = web::window() {
            let viewport = dom::window_viewport(&window);
            dom::sync_canvas_backing_size(&canvas_resize, viewport);
            session.borrow_mut().resize(viewport.width, viewport.height);
            log::debug!("[resize] {}x{}", viewport.width, viewport.height);
        }
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}
