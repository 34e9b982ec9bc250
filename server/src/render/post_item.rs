use folio_core::compose::{Heading, PostSummary};
use folio_core::display::DisplayMode;
use folio_core::{CoverImage, FixedImage};
use maud::{html, Markup};

/// Covers render as circles of this many pixels square.
pub const THUMBNAIL_PX: u32 = 65;

fn placeholder_style(image: &FixedImage) -> Option<String> {
    image
        .base64
        .as_deref()
        .map(|data| format!("background-image:url('{data}')"))
}

fn cover(image: Option<&CoverImage>) -> Markup {
    match image {
        Some(CoverImage::Url(src)) => html! {
            img.cover src=(src) alt="Blog Post Cover" width=(THUMBNAIL_PX) height=(THUMBNAIL_PX);
        },
        Some(CoverImage::Processed(fixed)) => html! {
            span.cover.cover-fixed style=[placeholder_style(fixed)] {
                img src=(fixed.src) srcset=[fixed.src_set.as_deref()] sizes=(format!("{THUMBNAIL_PX}px"))
                    loading="lazy" decoding="async" alt="" width=(THUMBNAIL_PX) height=(THUMBNAIL_PX);
            }
        },
        None => html! { span.cover.cover-empty {} },
    }
}

/// One clickable post row. Tag links appear only on desktop.
pub fn post_item(post: &PostSummary, mode: DisplayMode) -> Markup {
    let title = html! { a href=(post.slug) { (post.title) } };
    html! {
        div.post-item {
            a.cover-link href=(post.slug) { (cover(post.cover.as_ref())) }
            div.post-text {
                @match post.title_heading(mode) {
                    Heading::H3 => { h3 { (title) } },
                    Heading::H4 => { h4 { (title) } },
                }
                h5.post-description {
                    @for tag in post.visible_tags(mode) {
                        a.tag href=(tag.href) { (tag.name) }
                    }
                    (post.description)
                }
            }
        }
    }
}
