//! Local HTTP server
//!
//! Documents are resolved on every request, so edits in the content
//! directory show up on the next reload without regenerating. The proposal
//! index is loaded once at startup.

use anyhow::Result;
use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::content::ContentSource;
use crate::generator::Generator;
use crate::index::{self, apply_filters, Controls, IndexEntry, LpIndex};
use crate::LpDocs;

/// Server state
pub struct ServerState {
    source: ContentSource,
    generator: Generator,
    public_dir: PathBuf,
    /// None when neither index location could be read at startup
    index: Option<LpIndex>,
}

impl ServerState {
    pub fn new(app: &LpDocs, index: Option<LpIndex>) -> Result<Self> {
        Ok(Self {
            source: app.source(),
            generator: Generator::new(app)?,
            public_dir: app.public_dir.clone(),
            index,
        })
    }

    /// State with the index loaded from the configured locations
    pub fn load(app: &LpDocs) -> Result<Self> {
        let index = match index::loader::load_for_site(app) {
            Ok(index) => {
                tracing::info!("Loaded {} proposals into the list view", index.lps.len());
                Some(index)
            }
            Err(e) => {
                tracing::error!("Proposal index unavailable: {}", e);
                None
            }
        };
        Self::new(app, index)
    }
}

/// Build the application router
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/docs", get(docs_root_handler))
        .route("/docs/", get(docs_root_handler))
        .route("/docs/*slug", get(docs_handler))
        .route("/lps", get(lps_handler))
        .route("/lps/", get(lps_handler))
        .route("/api/lps", get(api_lps_handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(app: &LpDocs, ip: &str, port: u16, open: bool) -> Result<()> {
    let state = Arc::new(ServerState::load(app)?);
    let router = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

async fn home_handler(State(state): State<Arc<ServerState>>) -> Response {
    let rendered = {
        let state = state.clone();
        tokio::task::spawn_blocking(move || {
            let records = state.source.list_all();
            state.generator.render_home(&records)
        })
        .await
    };

    match rendered {
        Ok(Ok(html)) => Html(html).into_response(),
        Ok(Err(e)) => internal_error(e),
        Err(e) => internal_error(e),
    }
}

async fn docs_root_handler(State(state): State<Arc<ServerState>>) -> Response {
    render_doc(state, Vec::new()).await
}

async fn docs_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    let segments = slug
        .split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    render_doc(state, segments).await
}

/// Resolve and render a document, or answer with the 404 page
async fn render_doc(state: Arc<ServerState>, slug: Vec<String>) -> Response {
    let rendered = {
        let state = state.clone();
        tokio::task::spawn_blocking(move || {
            state
                .source
                .get(&slug)
                .map(|record| state.generator.render_doc(&record))
        })
        .await
    };

    match rendered {
        Ok(Some(Ok(html))) => Html(html).into_response(),
        Ok(Some(Err(e))) => internal_error(e),
        Ok(None) => not_found(&state),
        Err(e) => internal_error(e),
    }
}

async fn lps_handler(
    State(state): State<Arc<ServerState>>,
    Query(controls): Query<Controls>,
) -> Response {
    let Some(index) = &state.index else {
        return index_unavailable();
    };

    match state.generator.render_list(index, &controls) {
        Ok(html) => Html(html).into_response(),
        Err(e) => internal_error(e),
    }
}

#[derive(Serialize)]
struct LpsResponse<'a> {
    count: usize,
    lps: Vec<&'a IndexEntry>,
}

async fn api_lps_handler(
    State(state): State<Arc<ServerState>>,
    Query(controls): Query<Controls>,
) -> Response {
    let Some(index) = &state.index else {
        return index_unavailable();
    };

    let lps = apply_filters(&index.lps, &controls);
    Json(LpsResponse {
        count: lps.len(),
        lps,
    })
    .into_response()
}

/// Static files from the public directory
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let mut service = ServeDir::new(&state.public_dir).append_index_html_on_directories(true);
    match service.try_call(request).await {
        Ok(response) if response.status() == StatusCode::NOT_FOUND => not_found(&state),
        Ok(response) => response.into_response(),
        Err(e) => internal_error(e),
    }
}

fn not_found(state: &ServerState) -> Response {
    match state
        .generator
        .render_not_found("This proposal does not exist.")
    {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

fn index_unavailable() -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        "Proposal index unavailable. Run `lp-docs index` and restart the server.",
    )
        .into_response()
}

fn internal_error<E: std::fmt::Display>(e: E) -> Response {
    tracing::error!("Request failed: {}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
