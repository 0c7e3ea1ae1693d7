//! Access Policy
//!
//! Decides how far into a book a reader may go. Unpurchased books are readable
//! up to the free-page threshold; purchased books are readable to the end.

use std::num::NonZeroU32;

/// Pages of an unpurchased book that may be read for free.
pub const FREE_PAGE_THRESHOLD: NonZeroU32 = match NonZeroU32::new(5) {
    Some(pages) => pages,
    None => NonZeroU32::MIN,
};

/// Page count assumed for books that don't declare one.
pub const DEFAULT_TOTAL_PAGES: NonZeroU32 = match NonZeroU32::new(300) {
    Some(pages) => pages,
    None => NonZeroU32::MIN,
};

/// Outcome of evaluating the policy for one requested page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessDecision {
    /// Whether the requested page may be shown
    pub allowed: bool,

    /// Last page the reader may navigate to
    pub effective_max_page: u32,
}

impl AccessDecision {
    /// Clamp `page` into `[1, effective_max_page]`.
    pub fn clamp_page(&self, page: u32) -> u32 {
        page.clamp(1, self.effective_max_page.max(1))
    }
}

/// Reader gating rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessPolicy {
    free_page_threshold: NonZeroU32,
    default_total_pages: NonZeroU32,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::new(FREE_PAGE_THRESHOLD, DEFAULT_TOTAL_PAGES)
    }
}

impl AccessPolicy {
    /// Create a policy with a custom threshold and fallback page count.
    pub fn new(free_page_threshold: NonZeroU32, default_total_pages: NonZeroU32) -> Self {
        Self {
            free_page_threshold,
            default_total_pages,
        }
    }

    /// Pages readable without purchase.
    pub fn free_page_threshold(&self) -> u32 {
        self.free_page_threshold.get()
    }

    /// Page count to use for a book, falling back to the default when it is
    /// missing or zero.
    pub fn total_pages(&self, pages: Option<u32>) -> u32 {
        pages
            .filter(|&pages| pages > 0)
            .unwrap_or(self.default_total_pages.get())
    }

    /// Last readable page.
    pub fn effective_max_page(&self, is_purchased: bool, total_pages: u32) -> u32 {
        if is_purchased {
            total_pages.max(1)
        } else {
            self.free_page_threshold.get()
        }
    }

    /// Evaluate the policy for `requested_page`.
    pub fn evaluate(&self, is_purchased: bool, requested_page: u32, total_pages: u32) -> AccessDecision {
        let effective_max_page = self.effective_max_page(is_purchased, total_pages);

        AccessDecision {
            allowed: requested_page <= effective_max_page,
            effective_max_page,
        }
    }
}
