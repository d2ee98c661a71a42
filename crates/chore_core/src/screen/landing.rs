//! Landing page and navigation between screens.

pub const APP_TITLE: &str = "Kid Chore Tracker";
pub const APP_TAGLINE: &str = "Friendly chore tracker for families";

/// The three navigable views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Setup,
    Checklist,
}

impl Screen {
    pub fn route(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Setup => "/setup",
            Self::Checklist => "/checklist",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Home => APP_TITLE,
            Self::Setup => "Parent Setup",
            Self::Checklist => "Checklist",
        }
    }

    /// Resolves a route path; a trailing slash is tolerated.
    pub fn from_route(path: &str) -> Option<Self> {
        match path.trim().trim_end_matches('/') {
            "" => Some(Self::Home),
            "/setup" => Some(Self::Setup),
            "/checklist" => Some(Self::Checklist),
            _ => None,
        }
    }

    /// Cross-link shown in the screen header.
    pub fn header_link(self) -> Option<NavLink> {
        match self {
            Self::Home => None,
            Self::Setup => Some(NavLink::new("Go to Checklist →", Self::Checklist)),
            Self::Checklist => Some(NavLink::new("← Back to Setup", Self::Setup)),
        }
    }
}

/// A labelled hyperlink to another screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub target: Screen,
}

impl NavLink {
    const fn new(label: &'static str, target: Screen) -> Self {
        Self { label, target }
    }

    pub fn href(&self) -> &'static str {
        self.target.route()
    }
}

/// Static landing content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandingPage {
    pub title: &'static str,
    pub tagline: &'static str,
    pub links: Vec<NavLink>,
}

pub fn landing_page() -> LandingPage {
    LandingPage {
        title: APP_TITLE,
        tagline: APP_TAGLINE,
        links: vec![
            NavLink::new("Parent Setup →", Screen::Setup),
            NavLink::new("Checklist →", Screen::Checklist),
        ],
    }
}
