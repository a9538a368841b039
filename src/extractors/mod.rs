//! HTML extraction modules
//!
//! The Open Graph extractor plus the document and tree types it works on.

mod document;
mod meta_tree;
mod namespace;
mod opengraph_extractor;

pub use document::*;
pub use meta_tree::*;
pub use namespace::*;
pub use opengraph_extractor::*;

use serde::{Deserialize, Serialize};

/// Per-call extraction options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Return `None` instead of defaulting the namespace
    pub strict: bool,
    /// How `property` attributes are matched against the namespace
    pub prefix_match: PrefixMatch,
    /// Fill in `title` and `image` from the page body when no tag set them
    pub fallbacks: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            strict: false,
            prefix_match: PrefixMatch::Segment,
            fallbacks: true,
        }
    }
}

impl ExtractOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn prefix_match(mut self, prefix_match: PrefixMatch) -> Self {
        self.prefix_match = prefix_match;
        self
    }

    pub fn fallbacks(mut self, fallbacks: bool) -> Self {
        self.fallbacks = fallbacks;
        self
    }
}
