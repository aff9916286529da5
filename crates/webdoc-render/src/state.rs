//! Block-level state shared across the line scan.
//!
//! The converter threads a single [`BlockState`] through the document: at
//! most one open list and at most one open image group at a time. The two are
//! independent, deliberately overlapping pieces of state — not a nested
//! stack — and closing order (list before group) is part of the observable
//! output. The transition methods only mutate state and report which tags
//! the caller must emit, keeping the machine testable apart from string
//! building.

use crate::attrs::AttrValue;

/// Kind of the currently open list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListKind {
    /// `<ul>` list.
    Unordered,
    /// `<ol>` list.
    Ordered,
}

impl ListKind {
    /// Opening tag for this list kind.
    #[must_use]
    pub fn open_tag(self) -> &'static str {
        match self {
            Self::Unordered => "<ul>",
            Self::Ordered => "<ol>",
        }
    }

    /// Closing tag for this list kind.
    #[must_use]
    pub fn close_tag(self) -> &'static str {
        match self {
            Self::Unordered => "</ul>",
            Self::Ordered => "</ol>",
        }
    }
}

/// Tags a list-item line requires before its `<li>`.
#[derive(Debug, PartialEq, Eq)]
pub struct ListTransition {
    /// List to close first, when switching kinds.
    pub close: Option<ListKind>,
    /// List to open, when none of this kind was open.
    pub open: Option<ListKind>,
}

/// Wrapper changes required by an image carrying a `group` attribute.
#[derive(Debug, PartialEq, Eq)]
pub struct GroupTransition {
    /// Close the previous group's wrapper first.
    pub close_previous: bool,
    /// Open a new group wrapper.
    pub open_new: bool,
}

/// Open-list / open-group state for one conversion run.
///
/// Created empty at run start, discarded after the final flush. Never shared
/// between runs.
#[derive(Debug, Default)]
pub struct BlockState {
    open_list: Option<ListKind>,
    open_group: Option<AttrValue>,
}

impl BlockState {
    /// Close the open list, if any, returning its kind.
    pub fn take_list(&mut self) -> Option<ListKind> {
        self.open_list.take()
    }

    /// Move onto a list item of `kind`.
    ///
    /// Continuing a list of the same kind requires nothing; otherwise the
    /// other kind closes first and `kind` opens.
    pub fn enter_list(&mut self, kind: ListKind) -> ListTransition {
        if self.open_list == Some(kind) {
            return ListTransition {
                close: None,
                open: None,
            };
        }
        let close = self.open_list.replace(kind);
        ListTransition {
            close,
            open: Some(kind),
        }
    }

    /// Move onto an image whose `group` attribute has the given value.
    ///
    /// The group key is the raw attribute value: two flags continue one
    /// group, a flag and the string `"true"` do not. Images sharing the open
    /// group's key accumulate inside the existing wrapper.
    pub fn enter_group(&mut self, key: &AttrValue) -> GroupTransition {
        if self.open_group.as_ref() == Some(key) {
            return GroupTransition {
                close_previous: false,
                open_new: false,
            };
        }
        let close_previous = self.open_group.replace(key.clone()).is_some();
        GroupTransition {
            close_previous,
            open_new: true,
        }
    }

    /// Close the open group, if any. Returns whether one was open.
    pub fn take_group(&mut self) -> bool {
        self.open_group.take().is_some()
    }

    /// Currently open list kind.
    #[must_use]
    pub fn list(&self) -> Option<ListKind> {
        self.open_list
    }

    /// Key of the currently open group.
    #[must_use]
    pub fn group(&self) -> Option<&AttrValue> {
        self.open_group.as_ref()
    }
}
