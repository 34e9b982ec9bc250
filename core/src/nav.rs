use url::form_urlencoded;

/// Links in the mobile dropdown, in display order.
pub const MOBILE_MENU_LINKS: [(&str, &str); 4] = [
    ("Home", "/"),
    ("About", "/about"),
    ("Tags", "/tags"),
    ("Search", "/search"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuGlyph {
    Menu,
    Close,
}

impl MenuState {
    pub fn open(self) -> Self { Self::Open }

    pub fn close(self) -> Self { Self::Closed }

    /// The transition the menu button performs from this state.
    pub fn toggled(self) -> Self {
        match self {
            Self::Closed => self.open(),
            Self::Open => self.close(),
        }
    }

    pub fn is_open(self) -> bool { self == Self::Open }

    pub fn glyph(self) -> MenuGlyph {
        match self {
            Self::Closed => MenuGlyph::Menu,
            Self::Open => MenuGlyph::Close,
        }
    }
}

/// Whether the side menu shows its "Home" link on `path`.
pub fn show_home_link(path: &str, root_path: &str) -> bool {
    if path == root_path {
        path == "/about/"
    } else {
        path != "/"
    }
}

/// Client-side navigation target for a search box value.
pub fn search_href(text: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("keywords", text)
        .finish();
    format!("/search?{query}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_keywords() {
        assert_eq!(search_href("rust & wasm"), "/search?keywords=rust+%26+wasm");
        assert_eq!(search_href(""), "/search?keywords=");
    }
}
