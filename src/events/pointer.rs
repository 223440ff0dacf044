use crate::core::{PointerPhase, ViewerSession};
use crate::input;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub session: Rc<RefCell<ViewerSession>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    for (event, phase) in [
        ("mousedown", PointerPhase::Start),
        ("mousemove", PointerPhase::Move),
        ("mouseup", PointerPhase::End),
        ("mouseleave", PointerPhase::Leave),
    ] {
        wire_mouse(&w, event, phase);
    }
    for (event, phase) in [
        ("touchstart", PointerPhase::Start),
        ("touchmove", PointerPhase::Move),
        ("touchend", PointerPhase::End),
        ("touchcancel", PointerPhase::Cancel),
    ] {
        wire_touch(&w, event, phase);
    }
}

fn wire_mouse(w: &InputWiring, event: &'static str, phase: PointerPhase) {
    let session = w.session.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let pointer = input::mouse_input(phase, &ev);
        session.borrow_mut().handle_pointer(pointer);
        if phase == PointerPhase::Start {
            log::debug!("[input] {} at ({}, {})", event, ev.client_x(), ev.client_y());
        }
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);

    _ = w
        .canvas
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_touch(w: &InputWiring, event: &'static str, phase: PointerPhase) {
    let session = w.session.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::TouchEvent| {
        // Start/move events without a touch point carry nothing to act on.
        if let Some(pointer) = input::touch_input(phase, &ev) {
            session.borrow_mut().handle_pointer(pointer);
        }
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);

    _ = w
        .canvas
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}
