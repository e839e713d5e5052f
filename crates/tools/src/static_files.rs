use std::path::{Path, PathBuf};

pub const INDEX_FILE: &str = "index.html";

/// Map a request path onto a file under `root`. Returns `None` for paths that
/// try to leave `root`.
pub fn resolve(root: &Path, request_path: &str) -> Option<PathBuf> {
    let mut out = root.to_path_buf();
    let mut is_dir = true;
    for segment in request_path.split('/') {
        match segment {
            "" | "." => {
                is_dir = true;
            }
            ".." => return None,
            s if s.contains('\\') || s.contains(':') => return None,
            s => {
                out.push(s);
                is_dir = false;
            }
        }
    }
    if is_dir {
        out.push(INDEX_FILE);
    }
    Some(out)
}

pub fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("js") | Some("mjs") => "text/javascript",
        Some("wasm") => "application/wasm",
        Some("json") => "application/json",
        Some("css") => "text/css",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}
