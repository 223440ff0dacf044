use crate::core::{PointerInput, PointerPhase};
use glam::Vec2;
use web_sys as web;

// ---------------- Pointer helpers ----------------
#[inline]
pub fn mouse_client_pos(ev: &web::MouseEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

/// Client positions of the active touch points, in list order.
pub fn touch_client_positions(ev: &web::TouchEvent) -> Vec<Vec2> {
    let list = ev.touches();
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|t| Vec2::new(t.client_x() as f32, t.client_y() as f32))
        .collect()
}

#[inline]
pub fn mouse_input(phase: PointerPhase, ev: &web::MouseEvent) -> PointerInput {
    PointerInput::from_mouse(phase, mouse_client_pos(ev))
}

#[inline]
pub fn touch_input(phase: PointerPhase, ev: &web::TouchEvent) -> Option<PointerInput> {
    PointerInput::from_touches(phase, &touch_client_positions(ev))
}
