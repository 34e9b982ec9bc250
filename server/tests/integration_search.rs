use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use folio_core::builder::IndexBuilder;
use folio_core::persist::{save_bundle, IndexPaths};
use folio_core::{CoverImage, SearchDocument};
use http_body_util::BodyExt;
use serde_json::Value;
use server::{build_app, AppConfig, SiteConfig};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

const DESKTOP: (&str, &str) = ("sec-ch-viewport-width", "1440");
const MOBILE: (&str, &str) = ("cookie", "viewport_width=375");

fn post(url: &str, title: &str, excerpt: &str, tags: &[&str]) -> SearchDocument {
    SearchDocument {
        url: url.into(),
        title: title.into(),
        description: None,
        excerpt: excerpt.into(),
        cover: Some(CoverImage::Url(format!("{url}cover.png"))),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

fn build_tiny_index(dir: &std::path::Path) {
    let mut b = IndexBuilder::new();
    b.add(post("/react-hooks/", "React hooks", "useState in practice", &["React"]), "react react").unwrap();
    b.add(post("/redux/", "Redux without tears", "State containers", &["React", "Redux"]), "react").unwrap();
    b.add(post("/clojure/", "Learning Clojure", "Parens everywhere", &["Clojure"]), "lisp").unwrap();
    b.add(post("/webgl/", "WebGL shaders", "Fragments", &["Graphics"]), "gpu").unwrap();
    let bundle = b.finish().unwrap();
    save_bundle(&IndexPaths::new(dir), &bundle, "2024-01-01T00:00:00Z".into()).unwrap();
}

fn app() -> (TempDir, Router) {
    let dir = tempdir().unwrap();
    build_tiny_index(dir.path());
    let config = AppConfig { index_dir: dir.path().to_path_buf(), site: SiteConfig::default() };
    (dir, build_app(config).unwrap())
}

async fn call(app: &Router, uri: &str, headers: &[(&str, &str)]) -> (StatusCode, axum::http::HeaderMap, String) {
    let mut req = Request::get(uri);
    for (k, v) in headers {
        req = req.header(*k, *v);
    }
    let resp = app.clone().oneshot(req.body(Body::empty()).unwrap()).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    (status, headers, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn unresolved_viewport_renders_no_layout() {
    let (_dir, app) = app();
    let (status, headers, body) = call(&app, "/search?keywords=react", &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers.get("accept-ch").is_some());
    assert!(!body.contains("side-menu"));
    assert!(!body.contains("mobile-nav"));
    assert!(!body.contains("React hooks"));
}

#[tokio::test]
async fn desktop_search_renders_side_menu_and_tags() {
    let (_dir, app) = app();
    let (status, _, body) = call(&app, "/search?keywords=react", &[DESKTOP]).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"data-layout="desktop""#));
    assert!(body.contains(r#"id="side-menu""#));
    assert!(!body.contains(r#"id="mobile-nav""#));
    assert!(body.contains("There are two results for &quot;react&quot;"));
    assert!(body.contains(r#"href="/tags/react""#));
    assert!(body.contains("Search all 4 tagged posts"));
    let first = body.find("React hooks").unwrap();
    let second = body.find("Redux without tears").unwrap();
    assert!(first < second);
}

#[tokio::test]
async fn mobile_search_hides_tag_links() {
    let (_dir, app) = app();
    let (_, _, body) = call(&app, "/search?keywords=clojure", &[MOBILE]).await;
    assert!(body.contains(r#"data-layout="mobile""#));
    assert!(body.contains(r#"id="mobile-nav""#));
    assert!(!body.contains(r#"id="side-menu""#));
    assert!(body.contains("There&#39;s one result") || body.contains("There's one result"));
    assert!(!body.contains(r#"href="/tags/clojure""#));
    assert!(body.contains("<h4>"));
}

#[tokio::test]
async fn empty_query_prompts_for_search() {
    let (_dir, app) = app();
    let (_, _, body) = call(&app, "/search", &[DESKTOP]).await;
    assert!(body.contains("Search for a post"));
    assert!(!body.contains(r#"class="post-item""#));
}

#[tokio::test]
async fn mobile_menu_opens_and_closes() {
    let (_dir, app) = app();
    let (_, _, closed) = call(&app, "/", &[MOBILE]).await;
    assert!(!closed.contains("mobile-menu"));
    assert!(closed.contains(r#"data-glyph="menu""#));
    assert!(closed.contains(r#"href="/?menu=open""#));

    let (_, _, open) = call(&app, "/?menu=open", &[MOBILE]).await;
    assert!(open.contains(r#"id="mobile-menu""#));
    assert!(open.contains(r#"data-glyph="close""#));
    for href in ["/", "/about", "/tags", "/search"] {
        assert!(open.contains(&format!(r#"<a href="{href}">"#)));
    }
}

#[tokio::test]
async fn api_search_returns_ranked_json() {
    let (_dir, app) = app();
    let (status, _, body) = call(&app, "/api/search?keywords=react", &[]).await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["total_hits"], 2);
    let arr = json["results"].as_array().unwrap();
    assert_eq!(arr[0]["slug"], "/react-hooks/");
    assert_eq!(arr[1]["slug"], "/redux/");
    assert_eq!(json["header"], "There are two results for \"react\"");
}

#[tokio::test]
async fn tag_pages() {
    let (_dir, app) = app();
    let (status, _, body) = call(&app, "/tags", &[DESKTOP]).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"href="/tags/react""#));

    let (status, _, body) = call(&app, "/tags/react", &[DESKTOP]).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("two posts tagged"));

    let (status, _, _) = call(&app, "/tags/haskell", &[DESKTOP]).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn home_link_hidden_on_root() {
    let (_dir, app) = app();
    let (_, _, root) = call(&app, "/", &[DESKTOP]).await;
    assert!(!root.contains(">Home</a>"));
    let (_, _, about) = call(&app, "/about/", &[DESKTOP]).await;
    assert!(about.contains(">Home</a>"));
}

#[tokio::test]
async fn theme_toggle_sets_cookie_and_redirects() {
    let (_dir, app) = app();
    let (status, headers, _) = call(&app, "/theme?back=%2Fabout", &[("cookie", "theme=dark")]).await;
    assert!(status.is_redirection());
    assert_eq!(headers[header::LOCATION], "/about");
    assert!(headers[header::SET_COOKIE].to_str().unwrap().starts_with("theme=light"));

    let (_, headers, _) = call(&app, "/theme?back=https://evil.example", &[]).await;
    assert_eq!(headers[header::LOCATION], "/");
}

#[tokio::test]
async fn theme_toggle_rejects_unsafe_back_paths() {
    let (_dir, app) = app();
    for back in ["%2F%0Aa", "/%5Cevil.example", "%2F%2Fevil.example"] {
        let (status, headers, _) = call(&app, &format!("/theme?back={back}"), &[]).await;
        assert!(status.is_redirection(), "{back}");
        assert_eq!(headers[header::LOCATION], "/", "{back}");
    }
}

#[tokio::test]
async fn missing_index_still_serves_pages() {
    let dir = tempdir().unwrap();
    let config = AppConfig { index_dir: dir.path().join("absent"), site: SiteConfig::default() };
    let app = build_app(config).unwrap();
    let (status, _, body) = call(&app, "/search?keywords=react", &[DESKTOP]).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("There are zero results for &quot;react&quot;"));
    let (_, _, body) = call(&app, "/health", &[]).await;
    assert_eq!(body, "ok");
}
