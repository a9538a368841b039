//! OpenGraph meta tags extraction
//!
//! Collects `<meta property="<ns>:...">` tags into a [`MetaTree`], where the
//! namespace comes from the page's `xmlns:` declaration or defaults to `og`.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use super::{
    namespace_from_attributes, Document, ExtractOptions, HtmlDocument, MetaElement, MetaTree,
    MetaValue, PrefixMatch, DEFAULT_NAMESPACE, MAX_PATH_DEPTH,
};

/// Shorthand properties and the canonical paths they expand to
pub const SHORTHAND_PROPERTIES: [(&str, &str); 3] = [
    ("image", "image:url"),
    ("video", "video:url"),
    ("audio", "audio:url"),
];

/// Why a `<meta>` element contributed nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingProperty,
    ForeignNamespace,
    /// More than [`MAX_PATH_DEPTH`] colon-separated segments
    TooDeep,
}

/// Decision for one `<meta>` element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaCandidate<'a> {
    Insert { path: &'a str, content: &'a str },
    Skip(SkipReason),
}

impl<'a> MetaCandidate<'a> {
    pub fn classify(element: MetaElement<'a>, namespace: &str, prefix_match: PrefixMatch) -> Self {
        let Some(property) = element.property else {
            return MetaCandidate::Skip(SkipReason::MissingProperty);
        };
        match prefix_match.strip(property, namespace) {
            Some(path) if path.matches(':').count() >= MAX_PATH_DEPTH => {
                MetaCandidate::Skip(SkipReason::TooDeep)
            }
            Some(path) => MetaCandidate::Insert {
                path,
                content: element.content.unwrap_or(""),
            },
            None => MetaCandidate::Skip(SkipReason::ForeignNamespace),
        }
    }
}

/// Open Graph extractor configuration
#[derive(Debug, Clone)]
pub struct Extractor {
    default_namespace: String,
    shorthands: BTreeMap<String, String>,
}

impl Default for Extractor {
    fn default() -> Self {
        Self {
            default_namespace: DEFAULT_NAMESPACE.to_string(),
            shorthands: SHORTHAND_PROPERTIES
                .iter()
                .map(|(short, full)| (short.to_string(), full.to_string()))
                .collect(),
        }
    }
}

impl Extractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Namespace used when the page declares none and strict mode is off
    pub fn with_default_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.default_namespace = namespace.into();
        self
    }

    /// Register an extra shorthand; `short` must equal the whole property path
    pub fn with_shorthand(mut self, short: impl Into<String>, full: impl Into<String>) -> Self {
        self.shorthands.insert(short.into(), full.into());
        self
    }

    /// Parse `html` and extract its Open Graph tree.
    ///
    /// Returns `None` only in strict mode, when the page has no root element
    /// or no `xmlns:` declaration for the Open Graph schema.
    pub fn extract(&self, html: &str, options: &ExtractOptions) -> Option<MetaTree> {
        let document = HtmlDocument::parse(html);
        self.extract_document(&document, options)
    }

    /// Extract from an already parsed document
    pub fn extract_document<D>(&self, document: &D, options: &ExtractOptions) -> Option<MetaTree>
    where
        D: Document + ?Sized,
    {
        let namespace = self.resolve_namespace(document, options)?;
        let mut tree = MetaTree::new();

        for element in document.meta_elements() {
            match MetaCandidate::classify(element, &namespace, options.prefix_match) {
                MetaCandidate::Insert { path, content } => {
                    let path = self.expand_shorthand(path);
                    let segments: Vec<&str> = path.split(':').collect();
                    if !tree.insert(&segments, content.to_string()) {
                        trace!(path, "skipping over-deep expanded path");
                    }
                }
                MetaCandidate::Skip(reason) => {
                    trace!(?reason, property = ?element.property, "skipping meta element");
                }
            }
        }

        if options.fallbacks {
            apply_fallbacks(document, &mut tree);
        }

        debug!(namespace = %namespace, keys = tree.len(), "extracted open graph tree");
        Some(tree)
    }

    fn resolve_namespace<D>(&self, document: &D, options: &ExtractOptions) -> Option<String>
    where
        D: Document + ?Sized,
    {
        let declared = match document.root_attributes() {
            Some(attrs) => namespace_from_attributes(attrs).map(str::to_string),
            None if options.strict => {
                debug!("no root element, aborting strict extraction");
                return None;
            }
            None => None,
        };

        match declared {
            Some(ns) => Some(ns),
            None if options.strict => {
                debug!("no open graph namespace declared, aborting strict extraction");
                None
            }
            None => Some(self.default_namespace.clone()),
        }
    }

    fn expand_shorthand<'a>(&'a self, path: &'a str) -> &'a str {
        self.shorthands.get(path).map(String::as_str).unwrap_or(path)
    }
}

/// Extract with the default extractor configuration
pub fn extract_opengraph(html: &str, options: &ExtractOptions) -> Option<MetaTree> {
    Extractor::default().extract(html, options)
}

/// Fill `title` and `image` from the page body when no tag provided them
fn apply_fallbacks<D>(document: &D, tree: &mut MetaTree)
where
    D: Document + ?Sized,
{
    if !tree.contains_key("title") {
        let title = document.title_text().unwrap_or_default();
        tree.set("title", MetaValue::Text(title));
    }

    if !tree.contains_key("image") {
        if let Some(img) = document.first_image() {
            let mut image = MetaTree::new();
            if let Some(src) = img.src {
                image.set("url", MetaValue::Text(src.to_string()));
            }
            for (key, value) in [("width", img.width), ("height", img.height)] {
                if let Some(value) = value.filter(|v| !v.is_empty()) {
                    image.set(key, MetaValue::Text(value.to_string()));
                }
            }
            tree.set("image", MetaValue::Object(image));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::ImageElement;
    use serde_json::{json, Value};

    fn lenient() -> ExtractOptions {
        ExtractOptions::new().fallbacks(false)
    }

    #[test]
    fn test_extract_opengraph() {
        let html = r#"
        <html>
        <head>
            <meta property="og:title" content="Test Page">
            <meta property="og:description" content="A test description">
            <meta property="og:image" content="https://example.com/image.jpg">
            <meta property="og:image:width" content="1200">
            <meta name="twitter:card" content="summary_large_image">
            <meta name="description" content="Page description">
        </head>
        </html>
        "#;

        let result = extract_opengraph(html, &ExtractOptions::default()).unwrap();

        assert_eq!(
            result.to_json(),
            json!({
                "title": "Test Page",
                "description": "A test description",
                "image": {"url": "https://example.com/image.jpg", "width": "1200"}
            })
        );
    }

    #[test]
    fn test_declared_namespace_replaces_og() {
        let html = r#"
        <html xmlns:foo="http://opengraphprotocol.org/schema/">
        <head>
            <meta property="foo:title" content="Declared">
            <meta property="og:title" content="Ignored">
            <meta property="foo:type" content="article">
        </head>
        </html>
        "#;

        let result = extract_opengraph(html, &lenient()).unwrap();
        assert_eq!(result.to_json(), json!({"title": "Declared", "type": "article"}));
    }

    #[test]
    fn test_strict_without_declaration_is_none() {
        let html = r#"<html><head><meta property="og:title" content="T"></head></html>"#;

        assert!(extract_opengraph(html, &ExtractOptions::new().strict(true)).is_none());

        let result = extract_opengraph(html, &lenient()).unwrap();
        assert_eq!(result.to_json(), json!({"title": "T"}));
    }

    #[test]
    fn test_strict_with_declaration_allows_empty_tree() {
        let html = r#"<html xmlns:og="http://opengraphprotocol.org/schema/"><head></head></html>"#;
        let options = ExtractOptions::new().strict(true).fallbacks(false);

        let result = extract_opengraph(html, &options).unwrap();
        assert!(result.is_empty());
    }

    struct RootlessDocument;

    impl Document for RootlessDocument {
        fn root_attributes(&self) -> Option<Vec<(&str, &str)>> {
            None
        }

        fn meta_elements(&self) -> Vec<MetaElement<'_>> {
            vec![MetaElement {
                property: Some("og:title"),
                content: Some("Orphan"),
            }]
        }

        fn title_text(&self) -> Option<String> {
            None
        }

        fn first_image(&self) -> Option<ImageElement<'_>> {
            None
        }
    }

    #[test]
    fn test_rootless_document() {
        let extractor = Extractor::default();

        let strict = ExtractOptions::new().strict(true);
        assert!(extractor.extract_document(&RootlessDocument, &strict).is_none());

        let result = extractor
            .extract_document(&RootlessDocument, &ExtractOptions::default())
            .unwrap();
        assert_eq!(result.to_json(), json!({"title": "Orphan"}));
    }

    #[test]
    fn test_shorthand_equivalence() {
        let short = r#"<html><head><meta property="og:image" content="a.png"></head></html>"#;
        let long = r#"<html><head><meta property="og:image:url" content="a.png"></head></html>"#;

        let a = extract_opengraph(short, &lenient()).unwrap();
        let b = extract_opengraph(long, &lenient()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.lookup("image:url").and_then(MetaValue::as_text), Some("a.png"));
    }

    #[test]
    fn test_structured_image_repetition() {
        let html = r#"
        <html><head>
            <meta property="og:image" content="one.png">
            <meta property="og:image:width" content="100">
            <meta property="og:image" content="two.png">
            <meta property="og:image:width" content="200">
        </head></html>
        "#;

        let result = extract_opengraph(html, &lenient()).unwrap();
        assert_eq!(
            result.to_json(),
            json!({"image": {"url": ["one.png", "two.png"], "width": ["100", "200"]}})
        );
    }

    #[test]
    fn test_repeated_property_appends() {
        let html = r#"
        <html><head>
            <meta property="og:locale:alternate" content="a">
            <meta property="og:locale:alternate" content="b">
            <meta property="og:locale:alternate" content="c">
        </head></html>
        "#;

        let result = extract_opengraph(html, &lenient()).unwrap();
        assert_eq!(
            result.to_json(),
            json!({"locale": {"alternate": ["a", "b", "c"]}})
        );
    }

    #[test]
    fn test_missing_content_is_empty_and_missing_property_skipped() {
        let html = r#"
        <html><head>
            <meta property="og:type">
            <meta content="no property">
            <meta property="fb:app_id" content="123">
        </head></html>
        "#;

        let result = extract_opengraph(html, &lenient()).unwrap();
        assert_eq!(result.to_json(), json!({"type": ""}));
    }

    #[test]
    fn test_loose_prefix_match() {
        let html = r#"
        <html><head>
            <meta property="og:title" content="Colon">
            <meta property="ogxsite_name" content="Loose">
        </head></html>
        "#;

        let segment = extract_opengraph(html, &lenient()).unwrap();
        assert_eq!(segment.to_json(), json!({"title": "Colon"}));

        let loose = extract_opengraph(html, &lenient().prefix_match(PrefixMatch::Loose)).unwrap();
        assert_eq!(loose.to_json(), json!({"title": "Colon", "site_name": "Loose"}));
    }

    #[test]
    fn test_title_fallback() {
        let html = r#"<html><head><title>Document Title</title></head><body></body></html>"#;
        let result = extract_opengraph(html, &ExtractOptions::default()).unwrap();
        assert_eq!(result.get("title").and_then(MetaValue::as_text), Some("Document Title"));

        let untitled = extract_opengraph("<html><body></body></html>", &ExtractOptions::default())
            .unwrap();
        assert_eq!(untitled.get("title").and_then(MetaValue::as_text), Some(""));
    }

    #[test]
    fn test_image_fallback() {
        let html = r#"
        <html><head><meta property="og:title" content="T"></head>
        <body>
            <img src="/hero.jpg" width="800" height="">
            <img src="/other.jpg" width="1" height="1">
        </body></html>
        "#;

        let result = extract_opengraph(html, &ExtractOptions::default()).unwrap();
        assert_eq!(
            result.to_json(),
            json!({"title": "T", "image": {"url": "/hero.jpg", "width": "800"}})
        );

        let without = extract_opengraph(html, &lenient()).unwrap();
        assert!(without.get("image").is_none());
    }

    #[test]
    fn test_image_fallback_keeps_empty_src() {
        let html = r#"
        <html><head><meta property="og:title" content="T"></head>
        <body><img src="" width="5"></body></html>
        "#;

        let result = extract_opengraph(html, &ExtractOptions::default()).unwrap();
        assert_eq!(
            result.get("image").map(Value::from),
            Some(json!({"url": "", "width": "5"}))
        );
    }

    #[test]
    fn test_over_deep_property_is_skipped() {
        let html = format!(
            r#"<html><head>
                <meta property="og:{}" content="x">
                <meta property="og:title" content="Survives">
            </head></html>"#,
            ":".repeat(100_000)
        );

        let result = extract_opengraph(&html, &lenient()).unwrap();
        assert_eq!(result.to_json(), json!({"title": "Survives"}));
    }

    #[test]
    fn test_classify_depth_limit() {
        let at_limit = format!("og:{}", vec!["k"; MAX_PATH_DEPTH].join(":"));
        let over_limit = format!("og:{}", vec!["k"; MAX_PATH_DEPTH + 1].join(":"));

        let candidate = |property| {
            MetaCandidate::classify(
                MetaElement {
                    property: Some(property),
                    content: Some("v"),
                },
                "og",
                PrefixMatch::Segment,
            )
        };

        assert!(matches!(candidate(&at_limit), MetaCandidate::Insert { .. }));
        assert_eq!(
            candidate(&over_limit),
            MetaCandidate::Skip(SkipReason::TooDeep)
        );
    }

    #[test]
    fn test_og_image_suppresses_image_fallback() {
        let html = r#"
        <html><head>
            <title>Ignored</title>
            <meta property="og:title" content="Kept">
            <meta property="og:image" content="/og.png">
        </head>
        <body><img src="/body.png"></body></html>
        "#;

        let result = extract_opengraph(html, &ExtractOptions::default()).unwrap();
        assert_eq!(
            result.to_json(),
            json!({"title": "Kept", "image": {"url": "/og.png"}})
        );
    }

    #[test]
    fn test_custom_extractor_configuration() {
        let extractor = Extractor::new()
            .with_default_namespace("fb")
            .with_shorthand("app", "app:id");
        let html = r#"<html><head><meta property="fb:app" content="42"></head></html>"#;

        let result = extractor.extract(html, &lenient()).unwrap();
        assert_eq!(result.to_json(), json!({"app": {"id": "42"}}));
    }
}
