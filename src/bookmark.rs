/// Data structures for the bookmark popup
use serde::{Deserialize, Serialize};

pub const DEFAULT_LINK: &str = "https://github.com/evanlong-me/sidepanel-extension-template";
pub const DEFAULT_TITLE: &str = "evanlong-me/sidepanel-extension-template";

/// The unsaved bookmark held by the popup form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookmarkDraft {
    pub link: String,
    pub title: String,
    pub description: String,
    /// Collected by the form but not sent anywhere yet.
    pub tags: String,
}

impl Default for BookmarkDraft {
    fn default() -> Self {
        BookmarkDraft {
            link: DEFAULT_LINK.to_string(),
            title: DEFAULT_TITLE.to_string(),
            description: String::new(),
            tags: String::new(),
        }
    }
}

/// Names one editable field of a [`BookmarkDraft`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Link,
    Title,
    Description,
    Tags,
}

impl BookmarkDraft {
    pub fn update_field(&mut self, field: DraftField, value: String) {
        match field {
            DraftField::Link => self.link = value,
            DraftField::Title => self.title = value,
            DraftField::Description => self.description = value,
            DraftField::Tags => self.tags = value,
        }
    }

    /// Overwrite link/title with whatever the tab carries; the rest is kept.
    pub fn apply_active_tab(&mut self, tab: &ActiveTab) {
        if let Some(url) = &tab.url {
            self.link = url.clone();
        }
        if let Some(title) = &tab.title {
            self.title = title.clone();
        }
    }

    /// Description to post as a comment, if there is anything besides whitespace
    pub fn note(&self) -> Option<&str> {
        if self.description.trim().is_empty() {
            None
        } else {
            Some(self.description.as_str())
        }
    }
}

/// The active browser tab as reported by `chrome.tabs.query`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ActiveTab {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// Returned after the issue (and optional comment) was created
#[derive(Debug, Clone, PartialEq)]
pub struct SavedBookmark {
    pub issue_number: u64,
    pub issue_url: String,
    pub commented: bool,
}
