//! Open Graph namespace discovery
//!
//! Pages may bind the Open Graph schema to any prefix through an
//! `xmlns:<prefix>` attribute on the root element.

use serde::{Deserialize, Serialize};

/// Schema URI an `xmlns:` declaration must carry to name the OG prefix
pub const OG_SCHEMA_URI: &str = "http://opengraphprotocol.org/schema/";

/// Prefix used when the page declares none
pub const DEFAULT_NAMESPACE: &str = "og";

const XMLNS_PREFIX: &str = "xmlns:";

/// Find the namespace bound to the Open Graph schema.
///
/// The first `xmlns:<ns>` attribute whose value matches [`OG_SCHEMA_URI`]
/// (ASCII case-insensitive) wins. An empty `<ns>` is ignored.
pub fn namespace_from_attributes<'a, I>(attrs: I) -> Option<&'a str>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    attrs.into_iter().find_map(|(name, value)| {
        let ns = name.strip_prefix(XMLNS_PREFIX)?;
        if ns.is_empty() || !value.eq_ignore_ascii_case(OG_SCHEMA_URI) {
            return None;
        }
        Some(ns)
    })
}

/// How a `property` attribute is matched against the namespace
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrefixMatch {
    /// `property` must start with `<ns>:`
    #[default]
    Segment,
    /// `property` only needs to start with `<ns>`; the character after the
    /// namespace is dropped whatever it is
    Loose,
}

impl PrefixMatch {
    /// Strip the namespace from `property`, returning the property path
    pub fn strip<'a>(self, property: &'a str, namespace: &str) -> Option<&'a str> {
        let rest = property.strip_prefix(namespace)?;
        match self {
            PrefixMatch::Segment => rest.strip_prefix(':'),
            PrefixMatch::Loose => {
                let mut chars = rest.chars();
                chars.next();
                Some(chars.as_str())
            }
        }
    }
}
