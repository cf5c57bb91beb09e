use crate::dom;
use wasm_bindgen::JsCast;
use web_sys as web;

const OVERLAY_ID: &str = "overlay";

/// Transparent 2D canvas stacked over the scene for pose feedback. Cleared on
/// every pose result so stale feedback never lingers.
pub struct PoseOverlay {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl PoseOverlay {
    /// Reuse `#overlay` when the page has one, otherwise append it to `<body>`.
    pub fn attach(document: &web::Document) -> anyhow::Result<Self> {
        let canvas = match document.get_element_by_id(OVERLAY_ID) {
            Some(el) => el.dyn_into::<web::HtmlCanvasElement>(),
            None => {
                let el = document
                    .create_element("canvas")
                    .map_err(|e| anyhow::anyhow!("{:?}", e))?;
                el.set_id(OVERLAY_ID);
                let body = document.body().ok_or_else(|| anyhow::anyhow!("no body"))?;
                body.append_child(&el).map_err(|e| anyhow::anyhow!("{:?}", e))?;
                el.dyn_into::<web::HtmlCanvasElement>()
            }
        }
        .map_err(|e| anyhow::anyhow!("#{OVERLAY_ID} is not a canvas: {:?}", e))?;

        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;

        dom::wire_canvas_resize(&canvas);
        Ok(Self { canvas, ctx })
    }

    pub fn clear(&self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }
}
