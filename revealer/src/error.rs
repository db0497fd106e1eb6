use thiserror::Error;

use crate::{NodeId, ViewPhase};

/// Failure reported by an [`crate::Animator`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("animator failed: {reason}")]
pub struct AnimatorError {
    pub reason: String,
}

impl AnimatorError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// A required node is absent from the host markup.
    #[error("missing required element `{element}`{}", entry_suffix(.entry))]
    MissingElement {
        element: &'static str,
        entry: Option<usize>,
    },

    #[error("menu has {menu} entries but there are {content} content entries")]
    EntryCountMismatch { menu: usize, content: usize },

    #[error("content entry {entry} has {images} gallery images but {captions} captions")]
    GalleryMismatch {
        entry: usize,
        images: usize,
        captions: usize,
    },

    #[error("menu has no entries")]
    EmptyMenu,

    #[error("asset `{reference}` not found ({available} assets available)")]
    AssetNotFound { reference: String, available: usize },

    #[error("entry index {index} out of range ({count} entries)")]
    IndexOutOfRange { index: usize, count: usize },

    /// The call is not legal in the current view phase.
    #[error("cannot {op} while {phase:?}")]
    InvalidTransition { op: &'static str, phase: ViewPhase },

    #[error("no layout bounds for node {0:?}")]
    LayoutUnavailable(NodeId),

    #[error(transparent)]
    Animator(#[from] AnimatorError),
}

fn entry_suffix(entry: &Option<usize>) -> String {
    match entry {
        Some(i) => format!(" in entry {i}"),
        None => String::new(),
    }
}

pub type Result<T> = core::result::Result<T, Error>;
