use super::nav::search_form;
use super::post_item::post_item;
use crate::context::PageContext;
use crate::SiteConfig;
use folio_core::cardinal::cardinal;
use folio_core::compose::{PostSummary, ResultsView};
use folio_core::display::DisplayMode;
use maud::{html, Markup};

pub struct TagCount {
    pub name: String,
    pub href: String,
    pub count: usize,
}

pub fn post_list(posts: &[PostSummary], mode: DisplayMode) -> Markup {
    html! {
        div.post-list {
            @for post in posts { (post_item(post, mode)) }
        }
    }
}

pub fn search(view: &ResultsView, ctx: &PageContext) -> Markup {
    html! {
        // The side menu carries its own search box
        @if ctx.mode.is_mobile_or_tablet() { (search_form(ctx)) }
        h3 #search-results-count { (view.header) }
        (post_list(&view.items, ctx.mode))
    }
}

pub fn about(site: &SiteConfig) -> Markup {
    html! {
        h2 { "About me" }
        p { "I'm " (site.author) ", " (site.bio) }
    }
}

pub fn tags(tags: &[TagCount]) -> Markup {
    html! {
        h2 { "Tags" }
        ul.tag-list {
            @for tag in tags {
                li { a href=(tag.href) { (tag.name) } " (" (tag.count) ")" }
            }
        }
    }
}

pub fn tag(name: &str, posts: &[PostSummary], mode: DisplayMode) -> Markup {
    let count = cardinal(posts.len() as u64);
    let noun = if count == "one" { "post" } else { "posts" };
    html! {
        h3 { (count) " " (noun) " tagged \"" (name) "\"" }
        (post_list(posts, mode))
        p { a href="/tags" { "All tags" } }
    }
}

pub fn not_found(slug: &str) -> Markup {
    html! {
        h2 { "Nothing here" }
        p { "No posts are tagged " code { (slug) } "." }
    }
}
