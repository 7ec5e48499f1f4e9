//! Navigation Controller
//!
//! Tracks the current page index and interprets in-flow navigation requests
//! emitted by interactive sections. Every rejection is a silent no-op:
//! malformed navigation config degrades gracefully instead of blocking the
//! customer journey.

use crate::document::{Page, PageType};

/// A navigation request, parsed from the wire strings sections emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavTarget {
    Next,
    Previous,
    /// Jump to the first thank-you page.
    Final,
    /// Jump to an explicit page id.
    Page(String),
}

impl NavTarget {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "next" => NavTarget::Next,
            "previous" => NavTarget::Previous,
            "final" => NavTarget::Final,
            other => NavTarget::Page(other.to_string()),
        }
    }
}

/// Page-index state machine for one customer session.
///
/// When an external index is supplied (preview/embedding contexts) the
/// controller is read-only: internal navigation requests are ignored.
#[derive(Debug, Clone, Default)]
pub struct NavigationController {
    current: usize,
    external_override: Option<usize>,
}

impl NavigationController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force an externally driven index. Passing `None` returns control to
    /// in-flow navigation.
    pub fn set_external_index(&mut self, index: Option<usize>) {
        self.external_override = index;
    }

    pub fn is_externally_driven(&self) -> bool {
        self.external_override.is_some()
    }

    /// The effective index, clamped into `[0, pages.len() - 1]`.
    /// An empty page list pins the index to 0.
    pub fn current_index(&self, pages: &[Page]) -> usize {
        let index = self.external_override.unwrap_or(self.current);
        if pages.is_empty() {
            0
        } else {
            index.min(pages.len() - 1)
        }
    }

    /// Apply one navigation request against the resolved page list.
    ///
    /// Returns `true` if the index changed. Out-of-bounds and not-found
    /// targets leave the index untouched and return `false`.
    pub fn navigate(&mut self, target: &NavTarget, pages: &[Page]) -> bool {
        if self.external_override.is_some() || pages.is_empty() {
            return false;
        }
        let current = self.current.min(pages.len() - 1);
        let next = match target {
            NavTarget::Next => {
                if current + 1 < pages.len() {
                    Some(current + 1)
                } else {
                    None
                }
            }
            NavTarget::Previous => current.checked_sub(1),
            NavTarget::Final => pages.iter().position(|p| p.page_type == PageType::ThankYou),
            NavTarget::Page(id) => pages.iter().position(|p| p.id == *id),
        };
        match next {
            Some(index) if index != current => {
                self.current = index;
                true
            }
            _ => {
                self.current = current;
                false
            }
        }
    }
}
