use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use folio_core::compose::{compose, PostSummary};
use folio_core::persist::{load_bundle, IndexPaths};
use folio_core::search::Searcher;
use folio_core::slug::kebab_case;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod context;
pub mod render;

use context::RequestContext;
use render::pages::{self, TagCount};

/// Text that identifies the site owner in the side menu and on `/about`.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub author: String,
    pub bio: String,
    /// Prefix the site is mounted under, e.g. `/blog`; empty for the root.
    pub path_prefix: String,
}

impl SiteConfig {
    pub fn root_path(&self) -> String {
        format!("{}/", self.path_prefix.trim_end_matches('/'))
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            author: "the author".into(),
            bio: "a software developer. I love programming, writing, and learning new things.".into(),
            path_prefix: String::new(),
        }
    }
}

pub struct AppConfig {
    pub index_dir: PathBuf,
    pub site: SiteConfig,
}

#[derive(Clone)]
pub struct AppState {
    pub searcher: Searcher,
    pub site: Arc<SiteConfig>,
}

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub keywords: String,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub header: String,
    pub total_hits: usize,
    pub results: Vec<PostSummary>,
}

#[derive(Deserialize)]
pub struct ThemeParams {
    pub back: Option<String>,
}

pub fn build_app(config: AppConfig) -> Result<Router> {
    // A missing or inconsistent index degrades search instead of refusing to start
    let searcher = Searcher::from_result(load_bundle(&IndexPaths::new(&config.index_dir)));
    tracing::info!(index = %config.index_dir.display(), available = searcher.is_available(), docs = searcher.doc_count(), "search ready");
    let state = AppState { searcher, site: Arc::new(config.site) };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Ok(router(state).layer(cors).layer(TraceLayer::new_for_http()))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/about", get(about_handler))
        .route("/about/", get(about_handler))
        .route("/tags", get(tags_handler))
        .route("/tags/", get(tags_handler))
        .route("/tags/:tag", get(tag_handler))
        .route("/search", get(search_handler))
        .route("/search/", get(search_handler))
        .route("/api/search", get(api_search_handler))
        .route("/theme", get(theme_handler))
        .route("/health", get(|| async { "ok" }))
        .with_state(state)
}

pub async fn home_handler(State(state): State<AppState>, req: RequestContext) -> Response {
    let posts: Vec<PostSummary> = state.searcher.documents().map(PostSummary::from).collect();
    render::page(&state, req, "Home", |ctx| pages::post_list(&posts, ctx.mode))
}

pub async fn about_handler(State(state): State<AppState>, req: RequestContext) -> Response {
    render::page(&state, req, "About", |_| pages::about(&state.site))
}

pub async fn tags_handler(State(state): State<AppState>, req: RequestContext) -> Response {
    let tags = tag_counts(&state.searcher);
    render::page(&state, req, "Tags", |_| pages::tags(&tags))
}

pub async fn tag_handler(State(state): State<AppState>, Path(tag): Path<String>, req: RequestContext) -> Response {
    let slug = kebab_case(&tag);
    let mut name = None;
    let posts: Vec<PostSummary> = state
        .searcher
        .documents()
        .filter(|doc| match doc.tags.iter().find(|t| kebab_case(t) == slug) {
            Some(t) => {
                name.get_or_insert_with(|| t.clone());
                true
            }
            None => false,
        })
        .map(PostSummary::from)
        .collect();

    match name {
        Some(name) => render::page(&state, req, &name, |ctx| pages::tag(&name, &posts, ctx.mode)),
        None => {
            let page = render::page(&state, req, "Not found", |_| pages::not_found(&slug));
            (StatusCode::NOT_FOUND, page).into_response()
        }
    }
}

pub async fn search_handler(State(state): State<AppState>, req: RequestContext) -> Response {
    let view = compose(&state.searcher, &req.keywords);
    render::page(&state, req, "Search", |ctx| pages::search(&view, ctx))
}

pub async fn api_search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let view = compose(&state.searcher, &params.keywords);
    Json(SearchResponse { query: view.query, header: view.header, total_hits: view.items.len(), results: view.items })
}

/// Flip the theme cookie and return to the page the toggle was pressed on.
pub async fn theme_handler(req: RequestContext, Query(params): Query<ThemeParams>) -> impl IntoResponse {
    let back = params.back.filter(|b| is_local_path(b)).unwrap_or_else(|| "/".into());
    let cookie = format!(
        "{}={}; Path=/; Max-Age=31536000; SameSite=Lax",
        context::THEME_COOKIE,
        req.theme.toggled().as_str()
    );
    ([(header::SET_COOKIE, cookie)], Redirect::to(&back))
}

/// Same-site absolute path that is also a valid `Location` value.
fn is_local_path(back: &str) -> bool {
    let mut chars = back.chars();
    chars.next() == Some('/')
        && !matches!(chars.next(), Some('/' | '\\'))
        && !back.chars().any(char::is_control)
        && HeaderValue::try_from(back).is_ok()
}

/// Tags keyed by slug, named by their first spelling in store order.
fn tag_counts(searcher: &Searcher) -> Vec<TagCount> {
    let mut by_slug: BTreeMap<String, TagCount> = BTreeMap::new();
    for doc in searcher.documents() {
        let mut seen = BTreeSet::new();
        for tag in &doc.tags {
            let slug = kebab_case(tag);
            if slug.is_empty() || !seen.insert(slug.clone()) { continue; }
            by_slug
                .entry(slug.clone())
                .or_insert_with(|| TagCount { name: tag.clone(), href: format!("/tags/{slug}"), count: 0 })
                .count += 1;
        }
    }
    by_slug.into_values().collect()
}
