use crate::context::PageContext;
use folio_core::display::Theme;
use folio_core::nav::{show_home_link, MenuGlyph, MOBILE_MENU_LINKS};
use maud::{html, Markup, PreEscaped};

const MENU_PATH: &str = "M3 18h18v-2H3v2zm0-5h18v-2H3v2zm0-7v2h18V6H3z";
const CLOSE_PATH: &str = "M19 6.41 17.59 5 12 10.59 6.41 5 5 6.41 10.59 12 5 17.59 6.41 19 12 13.41 17.59 19 19 17.59 13.41 12z";

/// Keeps the caret at the end after the search page reloads with focus.
const SEARCH_ON_FOCUS: &str = "var n=this.value.length;this.setSelectionRange(n,n);";
const SEARCH_ON_INPUT: &str =
    "window.location.replace('/search?keywords='+encodeURIComponent(this.value));";

fn icon(path: &str) -> Markup {
    html! {
        svg width="24" height="24" viewBox="0 0 24 24" fill="currentColor" aria-hidden="true" {
            path d=(path) {}
        }
    }
}

pub fn site_logo() -> Markup {
    html! {
        a.logo href="/" aria-label="Home" {
            svg width="53" height="53" viewBox="0 0 53 53" aria-hidden="true" {
                circle cx="26.5" cy="26.5" r="24" fill="none" stroke="var(--logo)" stroke-width="3" {}
                circle cx="26.5" cy="26.5" r="8" fill="var(--logo)" {}
            }
        }
    }
}

pub fn theme_toggle(ctx: &PageContext) -> Markup {
    let label = match ctx.theme {
        Theme::Light => "Dark mode",
        Theme::Dark => "Light mode",
    };
    html! {
        a.theme-toggle href=(ctx.theme_toggle_href()) aria-label=(label) {
            (PreEscaped(match ctx.theme { Theme::Light => "&#9789;", Theme::Dark => "&#9788;" }))
        }
    }
}

/// Fixed desktop panel: logo, bio, theme toggle, Home link and search box.
pub fn side_nav(ctx: &PageContext) -> Markup {
    let placeholder = format!("Search all {} tagged posts", ctx.doc_count);
    html! {
        nav #side-menu.side-menu {
            div.top {
                (site_logo())
                p {
                    "Hey, I'm " a href="/about" { (ctx.site.author) } ", " (ctx.site.bio)
                }
                (theme_toggle(ctx))
                div.side-links {
                    @if show_home_link(&ctx.path, &ctx.root_path()) {
                        a href="/" { "Home" }
                    }
                }
            }
            div.bottom {
                form action="/search" method="get" role="search" {
                    input #search-input type="search" name="keywords"
                        value=(ctx.keywords)
                        placeholder=(placeholder)
                        aria-controls="search-results-count"
                        autofocus[ctx.is_search()]
                        onfocus=(SEARCH_ON_FOCUS)
                        oninput=(SEARCH_ON_INPUT);
                }
            }
        }
    }
}

/// Search box for pages without the side menu.
pub fn search_form(ctx: &PageContext) -> Markup {
    html! {
        form.search-form action="/search" method="get" role="search" {
            input #search-input type="search" name="keywords"
                value=(ctx.keywords)
                placeholder="Search posts"
                aria-controls="search-results-count"
                autofocus
                onfocus=(SEARCH_ON_FOCUS)
                oninput=(SEARCH_ON_INPUT);
        }
    }
}

/// Top bar with a two-state dropdown menu.
pub fn mobile_nav(ctx: &PageContext) -> Markup {
    let (glyph, label) = match ctx.menu.glyph() {
        MenuGlyph::Menu => (MENU_PATH, "Open menu"),
        MenuGlyph::Close => (CLOSE_PATH, "Close menu"),
    };
    html! {
        header #mobile-nav.app-bar {
            (theme_toggle(ctx))
            div.grow {}
            div.logo-small { (site_logo()) }
            div.grow {}
            a.menu-button href=(ctx.menu_toggle_href()) aria-label=(label)
                aria-expanded=(ctx.menu.is_open()) data-glyph=(glyph_name(ctx.menu.glyph())) {
                (icon(glyph))
            }
            @if ctx.menu.is_open() {
                ul #mobile-menu.menu-dropdown {
                    @for (text, href) in MOBILE_MENU_LINKS {
                        li { a href=(href) { (text) } }
                    }
                }
            }
        }
    }
}

fn glyph_name(glyph: MenuGlyph) -> &'static str {
    match glyph {
        MenuGlyph::Menu => "menu",
        MenuGlyph::Close => "close",
    }
}
