//! HTTP server: site pages and the post data endpoint

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::content::{filter_posts, ContentLoader, MarkdownRenderer};
use crate::templates::TemplateRenderer;
use crate::Folio;

/// Number of posts listed on the home page
const RECENT_POSTS: usize = 3;

/// Server state, shared read-only between requests
struct ServerState {
    folio: Folio,
    markdown: MarkdownRenderer,
    templates: TemplateRenderer,
}

impl ServerState {
    fn loader(&self) -> ContentLoader {
        ContentLoader::new(&self.folio)
    }
}

/// `?q=` search parameter
#[derive(Debug, Default, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

/// Build the application router
pub fn router(folio: Folio) -> Result<Router> {
    let static_dir = folio.static_dir.clone();
    let state = Arc::new(ServerState {
        markdown: MarkdownRenderer::with_theme(&folio.config.highlight.theme),
        templates: TemplateRenderer::new()?,
        folio,
    });

    let app = Router::new()
        .route("/", get(home_handler))
        .route("/projects", get(projects_handler))
        .route("/blog", get(blog_handler))
        .route("/blog/:slug", get(post_handler))
        .route("/api/posts", get(api_posts_handler))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(not_found_handler)
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

/// Start the server
pub async fn start(folio: &Folio, ip: &str, port: u16) -> Result<()> {
    let app = router(folio.clone())?;

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn home_handler(State(state): State<Arc<ServerState>>) -> Response {
    let posts = match state.loader().load_posts() {
        Ok(posts) => posts,
        Err(e) => return server_error(e),
    };
    let recent: Vec<_> = posts.into_iter().take(RECENT_POSTS).collect();
    html_page(state.templates.render_home(&state.folio.config, &recent))
}

async fn projects_handler(State(state): State<Arc<ServerState>>) -> Response {
    html_page(state.templates.render_projects(&state.folio.config))
}

async fn blog_handler(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let posts = match state.loader().load_posts() {
        Ok(posts) => posts,
        Err(e) => return server_error(e),
    };
    let matching = filter_posts(&posts, &params.q);
    html_page(
        state
            .templates
            .render_blog(&state.folio.config, &matching, &params.q),
    )
}

async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    let Some(post) = state.loader().find_post(&slug) else {
        return not_found(&state);
    };

    let body = state.markdown.render(&post.content);
    html_page(
        state
            .templates
            .render_post(&state.folio.config, &post.meta, &body),
    )
}

async fn api_posts_handler(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    match state.loader().load_posts() {
        Ok(posts) => Json(filter_posts(&posts, &params.q)).into_response(),
        Err(e) => server_error(e),
    }
}

async fn not_found_handler(State(state): State<Arc<ServerState>>) -> Response {
    not_found(&state)
}

fn not_found(state: &ServerState) -> Response {
    match state.templates.render_not_found(&state.folio.config) {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Failed to render not-found page: {}", e);
            (StatusCode::NOT_FOUND, "Not found").into_response()
        }
    }
}

fn html_page(rendered: Result<String>) -> Response {
    match rendered {
        Ok(html) => Html(html).into_response(),
        Err(e) => server_error(e),
    }
}

fn server_error(e: anyhow::Error) -> Response {
    tracing::error!("Request failed: {:#}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
}
