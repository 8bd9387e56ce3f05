//! Help carousel shown over the input screen
//!
//! Exists only while the help dialog is open; closing drops it, so the
//! page index never outlives the dialog.

/// Number of help pages
pub const HELP_IMAGE_COUNT: usize = 3;

/// One page of the help carousel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpPage {
    /// PNG bytes, embedded at build time
    pub image: &'static [u8],
    pub caption: &'static str,
}

pub const HELP_PAGES: [HelpPage; HELP_IMAGE_COUNT] = [
    HelpPage {
        image: include_bytes!("../../assets/help/how_to_1.png"),
        caption: "Type your ID into the text field",
    },
    HelpPage {
        image: include_bytes!("../../assets/help/how_to_2.png"),
        caption: "Press Save to store it on this device",
    },
    HelpPage {
        image: include_bytes!("../../assets/help/how_to_3.png"),
        caption: "Show the code; it carries today's date",
    },
];

/// Position in the help carousel. Always `index < HELP_IMAGE_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HelpCarousel {
    index: usize,
}

impl HelpCarousel {
    /// A freshly opened carousel starts at the first page
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn page(&self) -> &'static HelpPage {
        &HELP_PAGES[self.index]
    }

    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    pub fn has_next(&self) -> bool {
        self.index + 1 < HELP_IMAGE_COUNT
    }

    /// Advance one page; no-op on the last page
    pub fn next(&mut self) {
        if self.has_next() {
            self.index += 1;
        }
    }

    /// Go back one page; no-op on the first page
    pub fn previous(&mut self) {
        if self.has_previous() {
            self.index -= 1;
        }
    }
}
