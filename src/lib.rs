#![cfg(target_arch = "wasm32")]
use beatpose_core::{
    ColorModeTap, ElementInstance, FrameSnapshot, NullSink, ReactiveCore, ReactiveParams,
    RenderSink, SilentAudio, Spectrum, SystemClock,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod audio;
mod dom;
mod frame;
mod overlay;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("beatpose-web starting");
    Ok(())
}

/// Hands each finished frame to the page's renderer as packed
/// `[x, y, z, scale, r, g, b, emissive]` records plus the color mode.
struct JsRenderSink<'a> {
    callback: &'a js_sys::Function,
}

impl RenderSink for JsRenderSink<'_> {
    fn render(&mut self, frame: &FrameSnapshot) {
        let buf = js_sys::Float32Array::from(frame.as_floats());
        let color_mode = JsValue::from_f64(frame.color_mode as f64);
        if let Err(e) = self.callback.call2(&JsValue::NULL, &buf, &color_mode) {
            log::error!("render callback failed: {:?}", e);
        }
    }
}

pub(crate) struct WebState {
    core: ReactiveCore,
    audio: Option<audio::MediaClock>,
    overlay: Option<overlay::PoseOverlay>,
    render: Option<js_sys::Function>,
    // Readable while the render callback holds the state borrow.
    color_mode: Rc<Cell<f32>>,
    started: bool,
}

impl WebState {
    fn frame(&mut self) {
        match &self.audio {
            Some(clock) => self.core.push_frame(clock),
            None => self.core.push_frame(&SilentAudio),
        }
        self.drain();
    }

    fn decay(&mut self) {
        self.core.poll_timers();
        self.drain();
    }

    fn pose(&mut self, y: Option<f32>) {
        if let Some(overlay) = &self.overlay {
            overlay.clear();
        }
        self.core.push_pose(y);
        self.drain();
    }

    fn drain(&mut self) {
        let WebState {
            core,
            render,
            color_mode,
            ..
        } = self;
        match render {
            Some(callback) => core.process(&mut ColorModeTap {
                latest: Rc::as_ref(color_mode),
                inner: &mut JsRenderSink { callback },
            }),
            None => core.process(&mut NullSink),
        };
        color_mode.set(core.color_mode());
    }
}

/// Browser handle to the reactive core.
///
/// ```js
/// const bp = new BeatPose(spectrumJson);
/// bp.attach_audio(document.querySelector("audio"));
/// pose.onResults(r => bp.push_pose(r.poseLandmarks ? r.poseLandmarks[0].y : undefined));
/// bp.start((elements, colorMode) => { /* update meshes */ renderer.render(scene, camera); });
/// ```
#[wasm_bindgen]
pub struct BeatPose {
    state: Rc<RefCell<WebState>>,
    color_mode: Rc<Cell<f32>>,
    decay_period_ms: f64,
}

#[wasm_bindgen]
impl BeatPose {
    /// Unparseable spectrum data is logged and the scene runs at rest.
    #[wasm_bindgen(constructor)]
    pub fn new(spectrum_json: &str, seed: Option<u32>) -> Result<BeatPose, JsValue> {
        let spectrum = Spectrum::from_json(spectrum_json).unwrap_or_else(|e| {
            log::error!("spectrum unavailable: {e}");
            Spectrum::empty()
        });
        let params = ReactiveParams::default();
        let seed = seed.unwrap_or_else(rand::random::<u32>);
        let core = ReactiveCore::new(spectrum, &params, seed as u64, SystemClock::new())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let overlay = dom::window_document().and_then(|d| {
            overlay::PoseOverlay::attach(&d)
                .map_err(|e| log::warn!("pose overlay disabled: {e:#}"))
                .ok()
        });
        let color_mode = Rc::new(Cell::new(core.color_mode()));
        Ok(BeatPose {
            state: Rc::new(RefCell::new(WebState {
                core,
                audio: None,
                overlay,
                render: None,
                color_mode: color_mode.clone(),
                started: false,
            })),
            color_mode,
            decay_period_ms: params.palette.decay_period_ms,
        })
    }

    /// Number of `f32`s per element in the render buffer.
    pub fn floats_per_element() -> usize {
        ElementInstance::FLOATS
    }

    pub fn attach_audio(&self, element: web::HtmlAudioElement) {
        if let Ok(mut state) = self.state.try_borrow_mut() {
            state.audio = Some(audio::MediaClock::new(element));
        }
    }

    /// Feed one pose result: the tracked landmark's normalized `y`, or
    /// `undefined` when nothing was detected.
    pub fn push_pose(&self, y: Option<f32>) {
        match self.state.try_borrow_mut() {
            Ok(mut state) => state.pose(y),
            Err(_) => log::warn!("pose result dropped: core busy"),
        }
    }

    /// Current color mode. Safe to call from inside the render callback, where
    /// it reports the mode of the frame being rendered.
    pub fn color_mode(&self) -> f32 {
        self.color_mode.get()
    }

    /// Begin the frame loop and the decay timer. `render(elements, colorMode)`
    /// is called once per display refresh after the frame is complete.
    pub fn start(&self, render: js_sys::Function) -> Result<(), JsValue> {
        {
            let mut state = self
                .state
                .try_borrow_mut()
                .map_err(|_| JsValue::from_str("core busy"))?;
            state.render = Some(render);
            if state.started {
                return Ok(());
            }
            state.started = true;
        }
        frame::start_loop(self.state.clone());
        frame::start_decay_timer(self.state.clone(), self.decay_period_ms);
        Ok(())
    }
}
