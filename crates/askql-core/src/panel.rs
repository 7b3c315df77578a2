//! Analysis side panel — thought process and supporting content tabs.

use serde::{Deserialize, Serialize};

/// Tabs the analysis panel can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisTab {
    /// The reasoning trace behind the answer.
    ThoughtProcess,

    /// The retrieved content the answer was grounded on.
    SupportingContent,
}

/// Tab selection state for one lane's analysis panel.
///
/// Selecting the active tab again closes the panel; selecting a different
/// tab switches directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisPanel {
    active: Option<AnalysisTab>,
}

impl AnalysisPanel {
    /// A closed panel.
    #[must_use]
    pub const fn new() -> Self {
        Self { active: None }
    }

    /// The currently active tab, if the panel is open.
    #[must_use]
    pub const fn active_tab(&self) -> Option<AnalysisTab> {
        self.active
    }

    /// Toggle `tab`: close if it is already active, otherwise activate it.
    pub fn toggle(&mut self, tab: AnalysisTab) {
        if self.active == Some(tab) {
            self.active = None;
        } else {
            self.active = Some(tab);
        }
    }

    /// Close the panel.
    pub fn close(&mut self) {
        self.active = None;
    }
}
