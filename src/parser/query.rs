//! Selector queries

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::parser::error::QueryError;

static TARGET_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"::(?:(text)|attr\(\s*([A-Za-z_][\w:.-]*)\s*\))\s*$")
        .expect("target suffix pattern is valid")
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// What a query extracts from each matching element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Outer HTML of the element
    Html,
    /// Whitespace-normalised text content
    Text,
    /// Value of the named attribute
    Attr(String),
}

/// A compiled selector query
#[derive(Debug, Clone)]
pub struct Query {
    raw: String,
    selector: Selector,
    target: Target,
}

impl Query {
    /// Compile a query of the form `css`, `css::text` or `css::attr(name)`
    pub fn parse(raw: &str) -> Result<Self, QueryError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(QueryError::Empty);
        }

        let (css, target) = match TARGET_SUFFIX.captures(raw) {
            Some(caps) => {
                let start = caps.get(0).map_or(raw.len(), |m| m.start());
                let target = match caps.get(2) {
                    Some(attr) => Target::Attr(attr.as_str().to_string()),
                    None => Target::Text,
                };
                (raw[..start].trim(), target)
            }
            None => (raw, Target::Html),
        };

        if css.is_empty() {
            return Err(QueryError::Empty);
        }

        let selector = Selector::parse(css).map_err(|e| QueryError::InvalidSelector {
            query: raw.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            raw: raw.to_string(),
            selector,
            target,
        })
    }

    /// The literal query string
    pub fn build(&self) -> &str {
        &self.raw
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    /// The value extracted from the first match that yields one
    pub fn first(&self, document: &Html) -> Option<String> {
        document
            .select(&self.selector)
            .find_map(|element| self.extract(element))
    }

    /// The values extracted from every match, in document order
    pub fn all(&self, document: &Html) -> Vec<String> {
        document
            .select(&self.selector)
            .filter_map(|element| self.extract(element))
            .collect()
    }

    /// The value extracted from the first match within `scope`, including `scope` itself
    pub fn first_in(&self, scope: ElementRef<'_>) -> Option<String> {
        self.select_in(scope).find_map(|element| self.extract(element))
    }

    /// The values extracted from every match within `scope`, including `scope` itself
    pub fn all_in(&self, scope: ElementRef<'_>) -> Vec<String> {
        self.select_in(scope)
            .filter_map(|element| self.extract(element))
            .collect()
    }

    /// Matching elements of the whole document, in document order
    pub(crate) fn select<'a>(&'a self, document: &'a Html) -> impl Iterator<Item = ElementRef<'a>> {
        document.select(&self.selector)
    }

    fn select_in<'a>(&'a self, scope: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
        std::iter::once(scope)
            .filter(|element| self.selector.matches(element))
            .chain(scope.select(&self.selector))
    }

    pub(crate) fn extract(&self, element: ElementRef<'_>) -> Option<String> {
        let value = match &self.target {
            Target::Html => element.html(),
            Target::Text => {
                let text = element.text().collect::<String>();
                WHITESPACE.replace_all(text.trim(), " ").into_owned()
            }
            Target::Attr(name) => element.value().attr(name)?.trim().to_string(),
        };
        (!value.is_empty()).then_some(value)
    }
}

impl FromStr for Query {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <ul>
            <li class="job"><a href="/a">  First
                job </a></li>
            <li class="job"><a href="/b">Second</a></li>
            <li class="job"><a>Third</a></li>
        </ul>
    "#;

    #[test]
    fn test_parse_targets() {
        assert_eq!(Query::parse("li.job").unwrap().target(), &Target::Html);
        assert_eq!(Query::parse("li a::text").unwrap().target(), &Target::Text);
        assert_eq!(
            Query::parse("li a::attr(href)").unwrap().target(),
            &Target::Attr("href".to_string())
        );
        assert_eq!(
            Query::parse("img::attr( data-src )").unwrap().target(),
            &Target::Attr("data-src".to_string())
        );
    }

    #[test]
    fn test_build_returns_literal_query() {
        let query = Query::parse("div[class*='tags'] span::text").unwrap();
        assert_eq!(query.build(), "div[class*='tags'] span::text");
        assert_eq!(query.to_string(), query.build());
    }

    #[test]
    fn test_invalid_queries() {
        assert!(matches!(Query::parse("   "), Err(QueryError::Empty)));
        assert!(matches!(Query::parse("::text"), Err(QueryError::Empty)));
        assert!(matches!(
            Query::parse("div[[::text"),
            Err(QueryError::InvalidSelector { .. })
        ));
    }

    #[test]
    fn test_text_is_whitespace_normalised() {
        let document = Html::parse_document(PAGE);
        let query = Query::parse("li.job a::text").unwrap();
        assert_eq!(query.first(&document).as_deref(), Some("First job"));
        assert_eq!(query.all(&document), vec!["First job", "Second", "Third"]);
    }

    #[test]
    fn test_attribute_skips_elements_without_it() {
        let document = Html::parse_document(PAGE);
        let query = Query::parse("li.job a::attr(href)").unwrap();
        assert_eq!(query.all(&document), vec!["/a", "/b"]);
    }

    #[test]
    fn test_no_match_yields_nothing() {
        let document = Html::parse_document(PAGE);
        let query = Query::parse("h3::text").unwrap();
        assert_eq!(query.first(&document), None);
        assert!(query.all(&document).is_empty());
    }

    #[test]
    fn test_scoped_queries_include_the_scope_element() {
        let document = Html::parse_document(PAGE);
        let scope_query = Query::parse("li.job").unwrap();
        let scope = scope_query
            .select(&document)
            .nth(1)
            .unwrap();

        let link = Query::parse("a::attr(href)").unwrap();
        assert_eq!(link.all_in(scope), vec!["/b"]);
        let item = Query::parse("li::text").unwrap();
        assert_eq!(item.first_in(scope).as_deref(), Some("Second"));
    }

    #[test]
    fn test_html_target_returns_outer_html() {
        let document = Html::parse_document(PAGE);
        let query = Query::parse("li.job").unwrap();
        let fragments = query.all(&document);
        assert_eq!(fragments.len(), 3);
        assert!(fragments[1].starts_with("<li class=\"job\">"));
        assert!(fragments[1].contains("Second"));
    }
}
