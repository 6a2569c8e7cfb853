//! Pagination bar derivation.

use charpage_core::PageNumber;
use charpage_query::PageInfo;

/// Enabled state and targets of the Previous/Next controls.
///
/// Previous jumps to the server-reported `prev` page while Next advances the
/// local page by one; the two are intentionally not symmetric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationControls {
    pub current_page: PageNumber,
    pub max_pages: PageNumber,
    pub has_prev: bool,
    pub has_next: bool,
    prev: Option<PageNumber>,
}

impl PaginationControls {
    pub fn derive(current_page: PageNumber, info: &PageInfo, max_pages: PageNumber) -> Self {
        Self {
            current_page,
            max_pages,
            has_prev: info.prev.is_some(),
            has_next: info.next.is_some() && current_page < max_pages,
            prev: info.prev,
        }
    }

    /// Page the Previous control moves to, when enabled.
    pub fn previous_target(&self) -> Option<PageNumber> {
        if self.has_prev {
            self.prev
        } else {
            None
        }
    }

    /// Page the Next control moves to, when enabled.
    pub fn next_target(&self) -> Option<PageNumber> {
        if self.has_next {
            self.current_page.checked_add(1)
        } else {
            None
        }
    }

    pub fn label(&self) -> String {
        format!("{} / {}", self.current_page, self.max_pages)
    }
}
