use super::nav::{mobile_nav, side_nav};
use crate::context::PageContext;
use folio_core::display::{DisplayMode, NavChrome};
use maud::{html, Markup};

pub fn layout_name(mode: DisplayMode) -> &'static str {
    match mode.chrome() {
        NavChrome::TopBar => "mobile",
        NavChrome::SideMenu => "desktop",
    }
}

/// Exactly one navigation chrome around `content`.
pub fn layout(ctx: &PageContext, content: Markup) -> Markup {
    match ctx.mode.chrome() {
        NavChrome::TopBar => html! {
            (mobile_nav(ctx))
            main.mobile-main { (content) }
        },
        NavChrome::SideMenu => html! {
            div.desktop-layout {
                (side_nav(ctx))
                div.horizontal {
                    div.vertical-divider {}
                    main.desktop-main { (content) }
                }
            }
        },
    }
}
