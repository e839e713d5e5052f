use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use clap::{Parser, Subcommand};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tools::static_files;

#[derive(Parser, Debug)]
#[command(author, version, about = "Inspect and serve fluid simulation snapshots")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarize what the viewer would draw for a simulation file
    Inspect {
        /// Path to a simulation JSON file (array of snapshots)
        file: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Serve the web viewer and its snapshot over HTTP
    Serve {
        /// Directory holding index.html, pkg/ and simulation.json
        #[arg(long, env = "FLUIDVIEW_ROOT", default_value = "crates/apps/viewer_web/www")]
        root: PathBuf,

        /// Listen address
        #[arg(long, env = "FLUIDVIEW_ADDR", default_value = "127.0.0.1:8080")]
        addr: SocketAddr,
    },
}

#[derive(Clone)]
struct AppState {
    root: PathBuf,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let result = match args.command {
        Command::Inspect { file, json } => cmd_inspect(&file, json),
        Command::Serve { root, addr } => cmd_serve(root, addr).await,
    };
    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn cmd_inspect(path: &Path, json: bool) -> Result<(), String> {
    let bytes = fs::read(path).map_err(|e| format!("read {path:?}: {e}"))?;
    let file = formats::parse_simulation_slice(&bytes).map_err(|e| format!("{path:?}: {e}"))?;
    let summary = tools::summarize(&file);
    if json {
        let payload =
            serde_json::to_string_pretty(&summary).map_err(|e| format!("json: {e}"))?;
        println!("{payload}");
    } else {
        println!("{summary}");
    }
    Ok(())
}

async fn cmd_serve(root: PathBuf, addr: SocketAddr) -> Result<(), String> {
    if !root.is_dir() {
        return Err(format!("serve root is not a directory: {root:?}"));
    }
    if !root.join("pkg").is_dir() {
        info!("no pkg/ under {root:?}; build the viewer with wasm-pack first");
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    let app = Router::new()
        .route("/healthz", get(healthz))
        .fallback(get_static)
        .with_state(AppState { root: root.clone() })
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("bind {addr}: {e}"))?;
    info!("serving {root:?} on http://{addr}");
    axum::serve(listener, app)
        .await
        .map_err(|e| format!("server: {e}"))
}

async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

async fn get_static(State(state): State<AppState>, uri: Uri) -> Response {
    match static_files::resolve(&state.root, uri.path()) {
        Some(path) => serve_file(&path, static_files::content_type(&path)).await,
        None => (StatusCode::BAD_REQUEST, "bad path").into_response(),
    }
}

async fn serve_file(path: &Path, content_type: &str) -> Response {
    match tokio::fs::read(path).await {
        Ok(data) => {
            let mut headers = HeaderMap::new();
            headers.insert(
                http::header::CONTENT_TYPE,
                HeaderValue::from_str(content_type)
                    .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream")),
            );
            (StatusCode::OK, headers, Body::from(data)).into_response()
        }
        Err(err) => {
            error!("file read failed: {path:?} -> {err}");
            (StatusCode::NOT_FOUND, "not found").into_response()
        }
    }
}
