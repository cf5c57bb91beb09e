use beatpose_core::AudioClock;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Playback position of the page's `<audio>` element.
pub struct MediaClock {
    element: web::HtmlAudioElement,
}

impl MediaClock {
    /// Loops the track and starts playback. Until playback starts the clock
    /// reads 0 and the scene rests.
    pub fn new(element: web::HtmlAudioElement) -> Self {
        element.set_loop(true);
        start_playback(element.clone());
        Self { element }
    }
}

impl AudioClock for MediaClock {
    fn current_time(&self) -> f64 {
        let t = self.element.current_time();
        if t.is_finite() {
            t
        } else {
            0.0
        }
    }
}

// Browsers may refuse autoplay until the user interacts; retry on the first click.
fn start_playback(element: web::HtmlAudioElement) {
    let promise = match element.play() {
        Ok(p) => p,
        Err(e) => {
            log::warn!("audio play() failed: {:?}", e);
            return;
        }
    };
    spawn_local(async move {
        if JsFuture::from(promise).await.is_ok() {
            return;
        }
        log::info!("autoplay blocked, waiting for a click");
        let Some(body) = crate::dom::window_document().and_then(|d| d.body()) else {
            return;
        };
        let on_click = Closure::wrap(Box::new(move || {
            _ = element.play();
        }) as Box<dyn FnMut()>);
        let opts = web::AddEventListenerOptions::new();
        opts.set_once(true);
        _ = body.add_event_listener_with_callback_and_add_event_listener_options(
            "click",
            on_click.as_ref().unchecked_ref(),
            &opts,
        );
        on_click.forget();
    });
}
