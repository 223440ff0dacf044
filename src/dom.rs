use crate::constants::{CONTAINER_ID, DEFAULT_MODEL_URL, MODEL_URL_ATTRIBUTE};
use crate::core::Viewport;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Where to mount and what to load.
#[derive(Clone, Debug)]
pub struct ViewerConfig {
    pub container_id: String,
    pub model_url: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            container_id: CONTAINER_ID.to_string(),
            model_url: DEFAULT_MODEL_URL.to_string(),
        }
    }
}

impl ViewerConfig {
    /// Defaults, with the model URL overridable by the container's
    /// `data-model` attribute.
    pub fn from_document(document: &web::Document) -> Self {
        let mut config = Self::default();
        if let Some(url) = document
            .get_element_by_id(&config.container_id)
            .and_then(|el| el.get_attribute(MODEL_URL_ATTRIBUTE))
            .filter(|s| !s.trim().is_empty())
        {
            config.model_url = url;
        }
        config
    }
}

#[inline]
pub fn window_viewport(window: &web::Window) -> Viewport {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    Viewport::new(w as u32, h as u32)
}

/// Create the render canvas and append it to the container.
pub fn mount_canvas(
    document: &web::Document,
    container: &web::Element,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("create canvas: {:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    container
        .append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("append canvas: {:?}", e))?;
    Ok(canvas)
}

/// Size the canvas backing store to the viewport, one pixel per CSS pixel.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, viewport: Viewport) {
    canvas.set_width(viewport.width);
    canvas.set_height(viewport.height);
    _ = canvas.set_attribute(
        "style",
        &format!(
            "display:block;touch-action:none;width:{}px;height:{}px",
            viewport.width, viewport.height
        ),
    );
}
