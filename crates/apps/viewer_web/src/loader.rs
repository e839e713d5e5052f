use gloo_net::http::Request;
use wasm_bindgen::JsValue;

use formats::{SimulationFile, SnapshotError, parse_simulation};

#[derive(Debug)]
pub enum LoadError {
    Request(String),
    Status { url: String, status: u16 },
    Body(String),
    Snapshot(SnapshotError),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Request(msg) => write!(f, "snapshot request failed: {msg}"),
            LoadError::Status { url, status } => {
                write!(f, "snapshot request to {url} returned HTTP {status}")
            }
            LoadError::Body(msg) => write!(f, "failed to read snapshot body: {msg}"),
            LoadError::Snapshot(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<LoadError> for JsValue {
    fn from(e: LoadError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

/// GET `url` and keep frame 0 of the simulation file. No retry, no timeout.
pub async fn fetch_simulation(url: &str) -> Result<SimulationFile, LoadError> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| LoadError::Request(e.to_string()))?;
    if !resp.ok() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: resp.status(),
        });
    }
    let text = resp
        .text()
        .await
        .map_err(|e| LoadError::Body(e.to_string()))?;
    parse_simulation(&text).map_err(LoadError::Snapshot)
}
