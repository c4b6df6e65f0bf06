use std::{cell::RefCell, rc::Rc};

use futures::channel::oneshot;
use gloo_console::info;
use gloo_utils::window;
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::{GeolocationPosition, js_sys::Reflect};
use workout_tracker_lib::{collaborators::LocationResult, error::LocationError, workout::Coords};

type PendingAnswer = Rc<RefCell<Option<oneshot::Sender<LocationResult>>>>;

/// Asks the browser for the current position once. Exactly one answer arrives
/// on the returned receiver, or the sender is dropped.
pub fn request_position() -> oneshot::Receiver<LocationResult> {
    let (tx, rx) = oneshot::channel();
    let navigator = window().navigator();

    if !Reflect::has(&navigator, &JsValue::from_str("geolocation")).unwrap_or(false) {
        let _ = tx.send(Err(LocationError::Unsupported));
        return rx;
    }

    let geolocation = match navigator.geolocation() {
        Ok(geolocation) => geolocation,
        Err(_) => {
            let _ = tx.send(Err(LocationError::Unsupported));
            return rx;
        }
    };

    let pending: PendingAnswer = Rc::new(RefCell::new(Some(tx)));

    let on_success = {
        let pending = pending.clone();
        Closure::once_into_js(move |position: GeolocationPosition| {
            let coords = position.coords();
            info!(format!("Position: https://www.google.com/maps/@{},{}", coords.latitude(), coords.longitude()));
            answer(&pending, Ok(Coords::new(coords.latitude(), coords.longitude())));
        })
    };

    let on_error = {
        let pending = pending.clone();
        Closure::once_into_js(move |_error: JsValue| {
            answer(&pending, Err(LocationError::Unavailable));
        })
    };

    if geolocation
        .get_current_position_with_error_callback(on_success.unchecked_ref(), Some(on_error.unchecked_ref()))
        .is_err()
    {
        answer(&pending, Err(LocationError::Unsupported));
    }

    rx
}

fn answer(pending: &PendingAnswer, result: LocationResult) {
    if let Some(tx) = pending.borrow_mut().take() {
        let _ = tx.send(result);
    }
}
