//! Contents of the About dialog

pub const CREATOR: &str = "Creator: Amit Pritam";

/// Clickable rows in the About dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AboutLink {
    Instagram,
    Github,
}

impl AboutLink {
    pub const ALL: [AboutLink; 2] = [AboutLink::Instagram, AboutLink::Github];

    pub fn label(self) -> &'static str {
        match self {
            AboutLink::Instagram => "Instagram - @amit.pritam",
            AboutLink::Github => "Github - amitpritam1989",
        }
    }

    pub fn url(self) -> &'static str {
        match self {
            AboutLink::Instagram => "https://www.instagram.com/amit.pritam/",
            AboutLink::Github => "https://github.com/amitpritam1989",
        }
    }
}
