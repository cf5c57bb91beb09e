use crate::WebState;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Drive one core frame per display refresh for the lifetime of the page.
pub fn start_loop(state: Rc<RefCell<WebState>>) {
    let tick: FrameCallback = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        state.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &FrameCallback) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

/// Poll the decay task on a browser interval. The core's own task keeps the
/// cadence honest when the browser throttles or bunches interval callbacks.
pub fn start_decay_timer(state: Rc<RefCell<WebState>>, period_ms: f64) -> Option<i32> {
    let window = web::window()?;
    let on_interval = Closure::wrap(Box::new(move || {
        state.borrow_mut().decay();
    }) as Box<dyn FnMut()>);
    let id = window
        .set_interval_with_callback_and_timeout_and_arguments_0(
            on_interval.as_ref().unchecked_ref(),
            period_ms.round().max(1.0) as i32,
        )
        .map_err(|e| log::error!("setInterval failed: {:?}", e))
        .ok();
    on_interval.forget();
    id
}
