use crate::core::{LoadError, LoadProgress, ModelData};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

type LoadSlot = Rc<RefCell<Option<Result<ModelData, LoadError>>>>;

/// An in-flight model load. The result is parked in a slot and picked up by
/// the frame loop via [`PendingLoad::poll`]; nothing else touches it.
pub struct PendingLoad {
    url: String,
    slot: LoadSlot,
}

impl PendingLoad {
    /// Start fetching and parsing `url` on the local executor.
    pub fn spawn(url: String) -> Self {
        let slot: LoadSlot = Rc::new(RefCell::new(None));
        let slot_task = slot.clone();
        let url_task = url.clone();
        spawn_local(async move {
            let result = load_model(&url_task).await;
            *slot_task.borrow_mut() = Some(result);
        });
        Self { url, slot }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Take the result if the load has finished.
    pub fn poll(&self) -> Option<Result<ModelData, LoadError>> {
        self.slot.borrow_mut().take()
    }
}

async fn load_model(url: &str) -> Result<ModelData, LoadError> {
    let bytes = fetch_bytes(url).await?;
    let model = ModelData::from_glb(&bytes)?;
    log::info!(
        "[model] parsed {}: meshes={} textures={} vertices={} triangles={}",
        url,
        model.meshes.len(),
        model.textures.len(),
        model.vertex_count(),
        model.triangle_count()
    );
    Ok(model)
}

async fn fetch_bytes(url: &str) -> Result<Vec<u8>, LoadError> {
    let window = web::window().ok_or_else(|| LoadError::Fetch("no window".into()))?;
    let resp_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(fetch_error)?;
    let resp: web::Response = resp_value.dyn_into().map_err(fetch_error)?;
    if !resp.ok() {
        return Err(LoadError::Status(resp.status()));
    }
    let total = resp
        .headers()
        .get("content-length")
        .ok()
        .flatten()
        .and_then(|s| s.parse::<u64>().ok());
    let mut progress = LoadProgress::new(total);
    report_progress(&mut progress);

    let bytes = match resp.body() {
        Some(stream) => read_stream(&stream, &mut progress).await?,
        None => {
            let body = resp.array_buffer().map_err(fetch_error)?;
            let buf = JsFuture::from(body).await.map_err(fetch_error)?;
            let bytes = js_sys::Uint8Array::new(&buf).to_vec();
            if let Some(pct) = progress.advance(bytes.len() as u64) {
                log::info!("[model] {}% loaded", pct);
            }
            bytes
        }
    };
    if progress.total().is_none() {
        log::info!("[model] {} bytes loaded", progress.loaded());
    }
    Ok(bytes)
}

/// Drain a body stream chunk by chunk, logging progress as it arrives.
async fn read_stream(
    stream: &web::ReadableStream,
    progress: &mut LoadProgress,
) -> Result<Vec<u8>, LoadError> {
    let reader: web::ReadableStreamDefaultReader = stream.get_reader().unchecked_into();
    let mut bytes = Vec::with_capacity(progress.total().unwrap_or(0) as usize);
    loop {
        let chunk = JsFuture::from(reader.read()).await.map_err(fetch_error)?;
        let done = js_sys::Reflect::get(&chunk, &JsValue::from_str("done"))
            .map_err(fetch_error)?
            .as_bool()
            .unwrap_or(true);
        if done {
            break;
        }
        let value =
            js_sys::Reflect::get(&chunk, &JsValue::from_str("value")).map_err(fetch_error)?;
        let data = js_sys::Uint8Array::new(&value);
        let start = bytes.len();
        bytes.resize(start + data.length() as usize, 0);
        data.copy_to(&mut bytes[start..]);
        if let Some(pct) = progress.advance(u64::from(data.length())) {
            log::info!("[model] {}% loaded", pct);
        }
    }
    Ok(bytes)
}

fn report_progress(progress: &mut LoadProgress) {
    if let Some(pct) = progress.report() {
        log::info!("[model] {}% loaded", pct);
    }
}

fn fetch_error(e: JsValue) -> LoadError {
    LoadError::Fetch(format!("{:?}", e))
}
