//! Per-request ambient values. Renderers receive these through an explicit
//! [`PageContext`] and never look at headers themselves.

use crate::{AppState, SiteConfig};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use folio_core::display::{DisplayMode, Theme};
use folio_core::nav::{search_href, MenuState};
use std::convert::Infallible;
use std::sync::Arc;
use url::form_urlencoded;

pub const VIEWPORT_COOKIE: &str = "viewport_width";
pub const THEME_COOKIE: &str = "theme";
/// Client hints consulted for the viewport width, most specific first.
pub const VIEWPORT_HINTS: [&str; 2] = ["sec-ch-viewport-width", "viewport-width"];

/// What a request tells us before the layout is known.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub path: String,
    pub keywords: String,
    pub viewport_width: Option<u32>,
    pub theme: Theme,
    pub menu: MenuState,
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let mut keywords = String::new();
        let mut menu = MenuState::Closed;
        let mut query_width = None;
        if let Some(query) = parts.uri.query() {
            for (key, value) in form_urlencoded::parse(query.as_bytes()) {
                match key.as_ref() {
                    "keywords" => keywords = value.into_owned(),
                    "menu" if value == "open" => menu = menu.open(),
                    VIEWPORT_COOKIE => query_width = parse_width(&value),
                    _ => {}
                }
            }
        }
        Ok(Self {
            path: parts.uri.path().to_string(),
            keywords,
            viewport_width: viewport_width(&parts.headers).or(query_width),
            theme: cookie(&parts.headers, THEME_COOKIE).map(Theme::parse).unwrap_or_default(),
            menu,
        })
    }
}

fn viewport_width(headers: &HeaderMap) -> Option<u32> {
    VIEWPORT_HINTS
        .iter()
        .find_map(|name| headers.get(*name).and_then(|v| v.to_str().ok()).and_then(parse_width))
        .or_else(|| cookie(headers, VIEWPORT_COOKIE).and_then(parse_width))
}

fn parse_width(raw: &str) -> Option<u32> {
    let w: f64 = raw.trim().parse().ok()?;
    (w.is_finite() && w >= 0.0).then(|| w.round() as u32)
}

/// First value of cookie `name` across all `Cookie` headers.
fn cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v)
}

/// Ambient values for one rendered page, with the display mode resolved.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub site: Arc<SiteConfig>,
    pub path: String,
    pub keywords: String,
    pub mode: DisplayMode,
    pub theme: Theme,
    pub menu: MenuState,
    pub doc_count: usize,
}

impl PageContext {
    pub fn new(state: &AppState, req: RequestContext, mode: DisplayMode) -> Self {
        Self {
            site: state.site.clone(),
            path: req.path,
            keywords: req.keywords,
            mode,
            theme: req.theme,
            menu: req.menu,
            doc_count: state.searcher.doc_count(),
        }
    }

    pub fn root_path(&self) -> String { self.site.root_path() }

    pub fn is_search(&self) -> bool {
        self.path.trim_end_matches('/') == "/search"
    }

    /// This page's URL with the menu in `menu` state.
    pub fn href_with_menu(&self, menu: MenuState) -> String {
        let base = if self.is_search() { search_href(&self.keywords) } else { self.path.clone() };
        if !menu.is_open() {
            return base;
        }
        let sep = if base.contains('?') { '&' } else { '?' };
        format!("{base}{sep}menu=open")
    }

    pub fn current_href(&self) -> String { self.href_with_menu(self.menu) }

    pub fn menu_toggle_href(&self) -> String { self.href_with_menu(self.menu.toggled()) }

    pub fn theme_toggle_href(&self) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("back", &self.current_href())
            .finish();
        format!("/theme?{query}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn hint_wins_over_cookie() {
        let mut h = HeaderMap::new();
        h.insert(header::COOKIE, HeaderValue::from_static("theme=dark; viewport_width=375"));
        assert_eq!(viewport_width(&h), Some(375));
        h.insert("sec-ch-viewport-width", HeaderValue::from_static("1440"));
        assert_eq!(viewport_width(&h), Some(1440));
        assert_eq!(cookie(&h, "theme"), Some("dark"));
    }

    #[tokio::test]
    async fn query_width_is_the_last_resort() {
        let req = |uri: &str, cookie: Option<&'static str>| {
            let mut b = axum::http::Request::get(uri);
            if let Some(c) = cookie {
                b = b.header(header::COOKIE, c);
            }
            b.body(()).unwrap().into_parts().0
        };
        let mut parts = req("/search?keywords=rust&viewport_width=800", None);
        let ctx = RequestContext::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(ctx.viewport_width, Some(800));
        assert_eq!(ctx.keywords, "rust");

        let mut parts = req("/?viewport_width=800", Some("viewport_width=1440"));
        let ctx = RequestContext::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(ctx.viewport_width, Some(1440));
    }

    #[test]
    fn garbage_width_is_unresolved() {
        let mut h = HeaderMap::new();
        h.insert(header::COOKIE, HeaderValue::from_static("viewport_width=wide"));
        assert_eq!(viewport_width(&h), None);
    }
}
