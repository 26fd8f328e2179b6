//! UI state - presentation state separate from domain data

/// Screen shown in the main area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Dashboard,
    Contracts,
    Upload,
    Processing,
    /// Detail view for one contract id
    ContractDetail(u32),
}

impl Page {
    /// Pages listed in the navigation bar
    pub fn tabs() -> Vec<Page> {
        vec![Page::Dashboard, Page::Contracts, Page::Upload, Page::Processing]
    }

    pub fn name(&self) -> &str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Contracts => "Contracts",
            Page::Upload => "Upload",
            Page::Processing => "Processing",
            Page::ContractDetail(_) => "Contract",
        }
    }

    /// Navigation bar tab this page belongs to
    pub fn tab_index(&self) -> usize {
        match self {
            Page::Dashboard => 0,
            Page::Contracts | Page::ContractDetail(_) => 1,
            Page::Upload => 2,
            Page::Processing => 3,
        }
    }

    pub fn next_tab(&self) -> Page {
        let tabs = Self::tabs();
        tabs[(self.tab_index() + 1) % tabs.len()]
    }

    pub fn previous_tab(&self) -> Page {
        let tabs = Self::tabs();
        tabs[(self.tab_index() + tabs.len() - 1) % tabs.len()]
    }
}

/// Which text input, if any, currently captures key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the contract list search box
    Search,
    /// Typing into the upload form
    UploadForm,
    /// Typing a feedback comment on the detail page
    FeedbackComment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_cycling_wraps() {
        assert_eq!(Page::Dashboard.next_tab(), Page::Contracts);
        assert_eq!(Page::Processing.next_tab(), Page::Dashboard);
        assert_eq!(Page::Dashboard.previous_tab(), Page::Processing);
    }

    #[test]
    fn test_detail_page_sits_under_contracts_tab() {
        assert_eq!(Page::ContractDetail(4).tab_index(), Page::Contracts.tab_index());
        assert_eq!(Page::ContractDetail(4).next_tab(), Page::Upload);
    }
}
