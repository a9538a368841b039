//! Read-only document queries used by the Open Graph extractor
//!
//! The extractor only needs a handful of lookups. They are expressed as the
//! [`Document`] trait so already-parsed documents from other sources can be
//! fed in directly.

use scraper::{ElementRef, Html, Selector};

/// `property`/`content` pair of a `<meta>` element
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetaElement<'a> {
    pub property: Option<&'a str>,
    pub content: Option<&'a str>,
}

/// Attributes of an `<img>` element used for the image fallback
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageElement<'a> {
    pub src: Option<&'a str>,
    pub width: Option<&'a str>,
    pub height: Option<&'a str>,
}

/// Queries the extractor runs against a parsed page
pub trait Document {
    /// Attributes of the root `html` element in declaration order,
    /// or `None` when the document has no root element
    fn root_attributes(&self) -> Option<Vec<(&str, &str)>>;

    /// Every `meta` element in document order
    fn meta_elements(&self) -> Vec<MetaElement<'_>>;

    /// Text of the first `title` element
    fn title_text(&self) -> Option<String>;

    /// The first `img` element
    fn first_image(&self) -> Option<ImageElement<'_>>;
}

/// [`Document`] backed by a `scraper` HTML tree
#[derive(Debug)]
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    pub fn parse(text: &str) -> Self {
        Self {
            html: Html::parse_document(text),
        }
    }

    pub fn html(&self) -> &Html {
        &self.html
    }

    fn select_first(&self, selector_str: &str) -> Option<ElementRef<'_>> {
        let selector = Selector::parse(selector_str).ok()?;
        self.html.select(&selector).next()
    }
}

impl From<Html> for HtmlDocument {
    fn from(html: Html) -> Self {
        Self { html }
    }
}

impl Document for HtmlDocument {
    fn root_attributes(&self) -> Option<Vec<(&str, &str)>> {
        self.select_first("html")
            .map(|el| el.value().attrs().collect())
    }

    fn meta_elements(&self) -> Vec<MetaElement<'_>> {
        let selector = match Selector::parse("meta") {
            Ok(s) => s,
            Err(_) => return vec![],
        };

        self.html
            .select(&selector)
            .map(|el| MetaElement {
                property: el.value().attr("property"),
                content: el.value().attr("content"),
            })
            .collect()
    }

    fn title_text(&self) -> Option<String> {
        self.select_first("title")
            .map(|el| el.text().collect::<String>())
    }

    fn first_image(&self) -> Option<ImageElement<'_>> {
        self.select_first("img").map(|el| ImageElement {
            src: el.value().attr("src"),
            width: el.value().attr("width"),
            height: el.value().attr("height"),
        })
    }
}
