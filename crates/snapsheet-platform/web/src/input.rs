use snapsheet_core::{KeyEvent, KeyEventType, PointerEventKind, PointerInput};
use wasm_bindgen::JsCast;
use web_sys::{Event, KeyboardEvent, MouseEvent, TouchEvent};

/// Reduces a pointer, mouse or touch event to a [`PointerInput`].
///
/// Returns `None` for any other event type.
pub fn pointer_input(kind: PointerEventKind, event: &Event) -> Option<PointerInput> {
    // PointerEvent extends MouseEvent.
    if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
        return Some(PointerInput::pointer(kind, mouse.page_y() as f64));
    }
    let touch = event.dyn_ref::<TouchEvent>()?;
    let touches = touch.touches();
    let ys = (0..touches.length())
        .filter_map(|index| touches.item(index))
        .map(|touch| touch.page_y() as f64);
    Some(PointerInput::touch(kind, ys))
}

pub fn key_input(event: &Event, event_type: KeyEventType) -> Option<KeyEvent> {
    let keyboard = event.dyn_ref::<KeyboardEvent>()?;
    Some(KeyEvent::new(keyboard.key(), event_type))
}
