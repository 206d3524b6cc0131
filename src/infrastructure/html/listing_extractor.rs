//! Field extraction for Amazon listing pages.
//!
//! Listing layout varies by product category and region, so every field is
//! looked up through an ordered list of [`Strategy`] values; the first one
//! that yields non-empty text wins. A field whose strategies all miss is
//! simply `None`.

use crate::domain::entities::listing_facts::ListingFacts;
use crate::domain::ports::listing_extractor::ListingExtractor;
use crate::domain::values::weight::is_directional_mark;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::debug;

mod selectors {
    use super::*;

    pub static PRICE_PRIMARY: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "#corePriceDisplay_desktop_feature_div > \
             div.a-section.a-spacing-none.aok-align-center.aok-relative > \
             span.aok-offscreen",
        )
        .expect("valid selector")
    });

    pub static PRICE_CORE: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse("#corePrice_feature_div span.a-offscreen").expect("valid selector")
    });

    pub static PRICE_DISPLAY: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse("#corePriceDisplay_desktop_feature_div span.a-price span.a-offscreen")
            .expect("valid selector")
    });

    pub static TABLE_HEADER: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("th").expect("valid selector"));

    pub static DETAIL_BULLET: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse("#detailBullets_feature_div li").expect("valid selector")
    });
}

/// Marketing suffix that follows the amount ("$19.99 with 20 percent savings").
const PRICE_SUFFIX: &str = " with";

const WEIGHT_LABEL: &str = "item weight";
const DIMENSIONS_LABEL: &str = "dimensions";

/// One way of locating a field's text in a listing page.
#[derive(Debug, Clone, Copy)]
pub enum Strategy {
    /// Text of the first element matching a selector.
    Element(&'static LazyLock<Selector>),
    /// Specification table: the `td` beside the first `th` whose label
    /// contains the given text.
    SpecTable(&'static str),
    /// Detail bullets: the part after the first colon of the first bullet
    /// containing the given text.
    DetailBullet(&'static str),
}

pub static PRICE_STRATEGIES: [Strategy; 3] = [
    Strategy::Element(&selectors::PRICE_PRIMARY),
    Strategy::Element(&selectors::PRICE_CORE),
    Strategy::Element(&selectors::PRICE_DISPLAY),
];

pub static WEIGHT_STRATEGIES: [Strategy; 2] = [
    Strategy::SpecTable(WEIGHT_LABEL),
    Strategy::DetailBullet(WEIGHT_LABEL),
];

pub static DIMENSION_STRATEGIES: [Strategy; 2] = [
    Strategy::SpecTable(DIMENSIONS_LABEL),
    Strategy::DetailBullet(DIMENSIONS_LABEL),
];

impl Strategy {
    pub fn apply(&self, document: &Html) -> Option<String> {
        let text = match self {
            Strategy::Element(selector) => document
                .select(LazyLock::force(selector))
                .next()
                .map(|el| stripped_text(el, "")),
            Strategy::SpecTable(label) => spec_table_value(document, label),
            Strategy::DetailBullet(label) => detail_bullet_value(document, label),
        }?;
        let text = clean(&text);
        (!text.is_empty()).then_some(text)
    }
}

/// Runs strategies in order, returning the first hit.
pub fn first_match(document: &Html, strategies: &[Strategy]) -> Option<String> {
    strategies.iter().find_map(|s| {
        let hit = s.apply(document);
        if hit.is_none() {
            debug!(strategy = ?s, "extraction strategy missed");
        }
        hit
    })
}

/// Concatenates an element's text nodes, each trimmed, dropping empty ones.
fn stripped_text(el: ElementRef<'_>, separator: &str) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

fn clean(text: &str) -> String {
    text.trim_matches(|c: char| c.is_whitespace() || is_directional_mark(c))
        .to_string()
}

fn spec_table_value(document: &Html, label: &str) -> Option<String> {
    // Only the first matching header counts, even if it has no value cell.
    let header = document
        .select(&selectors::TABLE_HEADER)
        .find(|th| stripped_text(*th, "").to_lowercase().contains(label))?;
    header
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sib| sib.value().name() == "td")
        .map(|td| stripped_text(td, ""))
}

fn detail_bullet_value(document: &Html, label: &str) -> Option<String> {
    let bullet = document
        .select(&selectors::DETAIL_BULLET)
        .map(|li| stripped_text(li, " "))
        .find(|text| text.to_lowercase().contains(label))?;
    bullet
        .split_once(':')
        .map(|(_, value)| value.to_string())
}

fn truncate_price(text: String) -> String {
    match text.find(PRICE_SUFFIX) {
        Some(idx) => text[..idx].trim_end().to_string(),
        None => text,
    }
}

/// Extractor for Amazon listing markup. Both marketplaces share one layout,
/// so the same instance serves source and destination pages.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlListingExtractor;

impl HtmlListingExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract_document(&self, document: &Html) -> ListingFacts {
        ListingFacts {
            price_text: first_match(document, &PRICE_STRATEGIES)
                .map(truncate_price)
                .filter(|p| !p.is_empty()),
            weight_text: first_match(document, &WEIGHT_STRATEGIES),
            dimensions_text: first_match(document, &DIMENSION_STRATEGIES),
        }
    }
}

impl ListingExtractor for HtmlListingExtractor {
    fn extract(&self, html: &[u8]) -> ListingFacts {
        let document = Html::parse_document(&String::from_utf8_lossy(html));
        let facts = self.extract_document(&document);
        debug!(
            price = facts.price_text.is_some(),
            weight = facts.weight_text.is_some(),
            dimensions = facts.dimensions_text.is_some(),
            "extracted listing facts"
        );
        facts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(body: &str) -> Html {
        Html::parse_document(&format!("<html><body>{body}</body></html>"))
    }

    const PRIMARY_PRICE: &str = r#"
        <div id="corePriceDisplay_desktop_feature_div">
          <div class="a-section a-spacing-none aok-align-center aok-relative">
            <span class="aok-offscreen"> $24.99 with 15 percent savings </span>
          </div>
        </div>"#;

    #[test]
    fn test_primary_price_truncated_at_with() {
        let d = doc(PRIMARY_PRICE);
        assert_eq!(
            Strategy::Element(&selectors::PRICE_PRIMARY).apply(&d).as_deref(),
            Some("$24.99 with 15 percent savings")
        );
        let facts = HtmlListingExtractor.extract_document(&d);
        assert_eq!(facts.price_text.as_deref(), Some("$24.99"));
    }

    #[test]
    fn test_empty_primary_price_falls_back() {
        let d = doc(
            r#"<div id="corePriceDisplay_desktop_feature_div">
                 <div class="a-section a-spacing-none aok-align-center aok-relative">
                   <span class="aok-offscreen">  </span>
                 </div>
               </div>
               <div id="corePrice_feature_div"><span class="a-offscreen">$12.50</span></div>"#,
        );
        assert!(Strategy::Element(&selectors::PRICE_PRIMARY).apply(&d).is_none());
        assert_eq!(first_match(&d, &PRICE_STRATEGIES).as_deref(), Some("$12.50"));
    }

    #[test]
    fn test_spec_table_strategy() {
        let d = doc(
            r#"<table>
                 <tr><th>Brand</th><td>Acme</td></tr>
                 <tr><th> Item Weight </th><td>‎2.2 pounds</td></tr>
                 <tr><th>Product Dimensions</th><td>10 x 8 x 2 inches</td></tr>
               </table>"#,
        );
        assert_eq!(
            Strategy::SpecTable(WEIGHT_LABEL).apply(&d).as_deref(),
            Some("2.2 pounds")
        );
        assert_eq!(
            Strategy::SpecTable(DIMENSIONS_LABEL).apply(&d).as_deref(),
            Some("10 x 8 x 2 inches")
        );
    }

    #[test]
    fn test_detail_bullet_strategy() {
        let d = doc(
            r#"<div id="detailBullets_feature_div"><ul>
                 <li><span class="a-text-bold">Package Dimensions ‏ : ‎</span><span>12 x 6 x 3 Inches; 1.1 Pounds</span></li>
                 <li><span class="a-text-bold">Item Weight ‏ : ‎</span><span>500 Grams</span></li>
               </ul></div>"#,
        );
        assert_eq!(
            Strategy::DetailBullet(WEIGHT_LABEL).apply(&d).as_deref(),
            Some("500 Grams")
        );
        assert_eq!(
            Strategy::DetailBullet(DIMENSIONS_LABEL).apply(&d).as_deref(),
            Some("12 x 6 x 3 Inches; 1.1 Pounds")
        );
    }

    #[test]
    fn test_bullet_without_colon_misses() {
        let d = doc(r#"<div id="detailBullets_feature_div"><ul><li>Item Weight unknown</li></ul></div>"#);
        assert!(Strategy::DetailBullet(WEIGHT_LABEL).apply(&d).is_none());
    }

    #[test]
    fn test_table_wins_over_bullets() {
        let d = doc(
            r#"<table><tr><th>Item Weight</th><td>3 pounds</td></tr></table>
               <div id="detailBullets_feature_div"><ul><li>Item Weight : 9 pounds</li></ul></div>"#,
        );
        let facts = HtmlListingExtractor.extract_document(&d);
        assert_eq!(facts.weight_text.as_deref(), Some("3 pounds"));
    }

    #[test]
    fn test_fields_degrade_independently() {
        let d = doc(r#"<table><tr><th>Item Weight</th><td>3 pounds</td></tr></table>"#);
        let facts = HtmlListingExtractor.extract_document(&d);
        assert!(facts.price_text.is_none());
        assert_eq!(facts.weight_text.as_deref(), Some("3 pounds"));
        assert!(facts.dimensions_text.is_none());
    }

    #[test]
    fn test_garbage_input_never_panics() {
        let facts = HtmlListingExtractor.extract(b"\xff\xfe<<not html");
        assert!(facts.is_empty());
        assert!(HtmlListingExtractor.extract(b"").is_empty());
    }
}
