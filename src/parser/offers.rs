//! Fragment isolation and per-fragment offer extraction

use scraper::{ElementRef, Html};
use std::iter::FusedIterator;
use tracing::{debug, trace};

use crate::offer::{Criteria, Offer, ProgrammingLanguage};
use crate::parser::query::Query;

/// The markup of one container match, plus the name of its root element
#[derive(Debug, Clone)]
struct Fragment {
    html: String,
    tag: String,
}

impl Fragment {
    /// Markup that re-creates the parent elements the HTML5 parser requires
    /// before table-only elements such as `tr` or `td`.
    fn context(&self) -> (&'static str, &'static str) {
        match self.tag.as_str() {
            "tr" => ("<table><tbody>", "</tbody></table>"),
            "td" | "th" => ("<table><tbody><tr>", "</tr></tbody></table>"),
            "tbody" | "thead" | "tfoot" | "caption" | "colgroup" => ("<table>", "</table>"),
            "col" => ("<table><colgroup>", "</colgroup></table>"),
            _ => ("", ""),
        }
    }

    fn parse(&self) -> Html {
        let (open, close) = self.context();
        Html::parse_fragment(&format!("{}{}{}", open, self.html, close))
    }
}

/// A page split into the repeated fragments that each hold one offer
#[derive(Debug, Clone)]
pub struct Parser {
    fragments: Vec<Fragment>,
}

impl Parser {
    /// Evaluate `container` once against `html` and keep the matching fragments.
    ///
    /// A container that matches nothing (including empty or garbage input) leaves
    /// the parser with zero fragments; it is not an error.
    pub fn new(html: &str, container: &Query) -> Self {
        let document = Html::parse_document(html);
        let fragments: Vec<Fragment> = container
            .select(&document)
            .filter_map(|element| {
                Some(Fragment {
                    html: container.extract(element)?,
                    tag: element.value().name().to_string(),
                })
            })
            .collect();
        debug!(
            "Container query '{}' matched {} fragments",
            container.build(),
            fragments.len()
        );
        Self { fragments }
    }

    /// Number of fragments isolated from the page
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Lazily build one offer per fragment, in document order.
    ///
    /// Each field query runs against the fragment's own element. A missing link or
    /// name yields an empty string and missing tags yield an empty list; neither
    /// stops the extraction of later fragments.
    pub fn extract_offers(
        self,
        language: ProgrammingLanguage,
        link_query: &Query,
        name_query: &Query,
        tags_query: &Query,
    ) -> Offers {
        Offers {
            fragments: self.fragments.into_iter(),
            language,
            link_query: link_query.clone(),
            name_query: name_query.clone(),
            tags_query: tags_query.clone(),
            criteria: None,
        }
    }
}

/// Single-pass iterator over the offers of a page.
///
/// Fragments are parsed only as the iterator is advanced, so taking the first few
/// offers never touches the rest of the page.
#[derive(Debug)]
pub struct Offers {
    fragments: std::vec::IntoIter<Fragment>,
    language: ProgrammingLanguage,
    link_query: Query,
    name_query: Query,
    tags_query: Query,
    criteria: Option<Criteria>,
}

impl Offers {
    /// Skip offers that do not satisfy `criteria`. Empty criteria are ignored.
    pub fn filtered_by(mut self, criteria: Criteria) -> Self {
        self.criteria = (!criteria.is_empty()).then_some(criteria);
        self
    }

    /// Fragments not yet turned into offers
    pub fn remaining(&self) -> usize {
        self.fragments.len()
    }

    fn build(&self, fragment: &Fragment) -> Offer {
        let document = fragment.parse();
        // The first element carrying the fragment's tag is the fragment root; the
        // context wrappers never share its name.
        let scope = document
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|element| element.value().name() == fragment.tag)
            .unwrap_or_else(|| document.root_element());

        let url = self.link_query.first_in(scope).unwrap_or_default();
        let name = self.name_query.first_in(scope).unwrap_or_default();
        let tags = self.tags_query.all_in(scope);
        trace!(name = %name, url = %url, tags = tags.len(), "Extracted offer");
        Offer::new(self.language, name, tags, url)
    }
}

impl Iterator for Offers {
    type Item = Offer;

    fn next(&mut self) -> Option<Offer> {
        while let Some(fragment) = self.fragments.next() {
            let offer = self.build(&fragment);
            match &self.criteria {
                Some(criteria) if !criteria.matches(&offer) => {
                    trace!(name = %offer.name(), "Offer rejected by criteria");
                }
                _ => return Some(offer),
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.fragments.len();
        match self.criteria {
            Some(_) => (0, Some(remaining)),
            None => (remaining, Some(remaining)),
        }
    }
}

impl FusedIterator for Offers {}
