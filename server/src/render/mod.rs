//! HTML rendering with maud.
//!
//! [`page`] is the single entry point handlers use: it resolves the display
//! mode, mounts exactly one layout, and falls back to a bare measurement
//! shell while the viewport width is still unknown.

use crate::context::{PageContext, RequestContext, VIEWPORT_COOKIE};
use crate::AppState;
use axum::http::{header, HeaderValue};
use axum::response::{IntoResponse, Response};
use folio_core::display::{DisplayMode, BREAKPOINT_PX};
use maud::{html, Markup, PreEscaped, DOCTYPE};

pub mod layout;
pub mod nav;
pub mod pages;
pub mod post_item;

const VARY: &str = "Sec-CH-Viewport-Width, Viewport-Width, Cookie";

const STYLES: &str = r#"
:root { --bg: #fff; --text: #222; --logo: #333; }
body.dark { --bg: #1c1c1e; --text: #e6e6e6; --logo: #e6e6e6; }
body { margin: 0; background: var(--bg); color: var(--text); font-family: Georgia, serif; }
a { color: inherit; }
.desktop-layout { max-width: 1200px; padding: 2rem 0.5rem; margin: 0 auto; }
.side-menu { display: flex; flex-direction: column; justify-content: space-between; text-align: center; position: fixed; height: 100%; min-width: 300px; max-width: 300px; padding-top: 25px; padding-bottom: 100px; box-sizing: border-box; }
.side-menu .top { display: grid; grid-gap: 30px; justify-items: center; }
.side-links { display: grid; margin-top: -15px; }
.side-menu .bottom { display: flex; justify-content: center; }
.side-menu input { width: 85%; }
.horizontal { display: flex; flex-direction: row; }
.vertical-divider { border-left: 1px solid grey; height: 90vh; margin-top: 5vh; top: 0; opacity: 0.15; position: fixed; margin-left: 320px; }
.desktop-main { margin-left: 350px; padding-bottom: 40px; }
.app-bar { position: fixed; top: 0; left: 0; right: 0; height: 55px; display: flex; flex-direction: row; align-items: center; padding: 0.2em 0.2em 0; background: var(--bg); z-index: 1; }
.app-bar .grow { flex-grow: 1; }
.menu-dropdown { position: fixed; top: 55px; left: 0; width: 100%; height: 100vh; max-height: 40vh; margin: 0; padding: 10px 0 0; list-style: none; background: var(--bg); display: flex; flex-direction: column; justify-content: space-around; align-items: center; }
.mobile-main { position: relative; padding: 70px 20px 60px; }
.post-item { display: flex; flex-direction: row; align-items: center; }
.post-text { min-height: 100px; margin-bottom: 10px; display: flex; flex-direction: column; justify-content: center; }
.post-text h3, .post-text h4, .post-text h5 { margin-top: 0; }
.post-text h4 { margin-bottom: 10px; }
.post-text h5 { margin-bottom: 0; line-height: normal; }
.tag { padding-right: 10px; }
.cover { display: inline-block; position: relative; overflow: hidden; border-radius: 50%; width: 65px; height: 65px; min-width: 65px; min-height: 65px; margin-right: 30px; background-size: cover; }
.cover img { width: 100%; height: 100%; object-fit: cover; }
"#;

/// Resizing across the breakpoint re-renders with the other layout.
fn resize_script() -> String {
    format!(
        "(function(){{var m=window.matchMedia('(max-width: {BREAKPOINT_PX}px)');\
         m.addEventListener('change',function(){{document.cookie='{VIEWPORT_COOKIE}='+window.innerWidth+';path=/;SameSite=Lax';location.reload();}});}})();"
    )
}

/// Measures the viewport, stores it, and reloads. Renders no layout.
///
/// Without cookies the width rides along as a query parameter instead; a
/// page that already carries one never reloads again.
fn measure_script() -> String {
    format!(
        "(function(){{var w=Math.round(window.innerWidth);\
         document.cookie='{VIEWPORT_COOKIE}='+w+';path=/;SameSite=Lax';\
         if(document.cookie.indexOf('{VIEWPORT_COOKIE}=')!==-1){{location.reload();return;}}\
         var u=new URL(location.href);if(u.searchParams.has('{VIEWPORT_COOKIE}'))return;\
         u.searchParams.set('{VIEWPORT_COOKIE}',w);location.replace(u.toString());}})();"
    )
}

fn head_tags(title: &str) -> Markup {
    html! {
        meta charset="utf-8";
        meta name="viewport" content="width=device-width, initial-scale=1";
        title { (title) }
    }
}

/// Empty page sent until the viewport width is known.
pub fn measurement_shell() -> Response {
    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                (head_tags(""))
                script { (PreEscaped(measure_script())) }
            }
            body {}
        }
    };
    let mut resp = markup.into_response();
    let headers = resp.headers_mut();
    let hints = HeaderValue::from_static("Sec-CH-Viewport-Width, Viewport-Width");
    headers.insert("accept-ch", hints.clone());
    headers.insert("critical-ch", hints);
    headers.insert(header::VARY, HeaderValue::from_static(VARY));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    resp
}

/// Render `content` inside the layout for this request's display mode.
pub fn page(
    state: &AppState,
    req: RequestContext,
    title: &str,
    content: impl FnOnce(&PageContext) -> Markup,
) -> Response {
    let Some(mode) = DisplayMode::resolve(req.viewport_width) else {
        tracing::debug!(path = %req.path, "viewport unresolved, sending measurement shell");
        return measurement_shell();
    };
    let ctx = PageContext::new(state, req, mode);
    let chrome = layout::layout(&ctx, content(&ctx));
    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                (head_tags(title))
                style { (PreEscaped(STYLES)) }
            }
            body.(ctx.theme.as_str()) data-layout=(layout::layout_name(ctx.mode)) {
                (chrome)
                script { (PreEscaped(resize_script())) }
            }
        }
    };
    let mut resp = markup.into_response();
    resp.headers_mut().insert(header::VARY, HeaderValue::from_static(VARY));
    resp
}
