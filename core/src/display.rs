use serde::{Deserialize, Serialize};

/// Widths at or below this many CSS pixels use the mobile/tablet chrome.
pub const BREAKPOINT_PX: u32 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    MobileOrTablet,
    Desktop,
}

/// Navigation surface mounted for a display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavChrome {
    /// Compact top bar with a collapsible menu; search lives on its own page.
    TopBar,
    /// Fixed side panel with an embedded search box.
    SideMenu,
}

impl DisplayMode {
    pub fn from_viewport_width(width: u32) -> Self {
        if width <= BREAKPOINT_PX { Self::MobileOrTablet } else { Self::Desktop }
    }

    /// `None` until a width has been measured.
    pub fn resolve(width: Option<u32>) -> Option<Self> {
        width.map(Self::from_viewport_width)
    }

    pub fn is_mobile_or_tablet(self) -> bool { self == Self::MobileOrTablet }

    pub fn chrome(self) -> NavChrome {
        match self {
            Self::MobileOrTablet => NavChrome::TopBar,
            Self::Desktop => NavChrome::SideMenu,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Unknown values fall back to the default theme.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "dark" => Self::Dark,
            _ => Self::Light,
        }
    }
}
