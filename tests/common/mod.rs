//! Shared test helpers.

#![allow(dead_code)]

use async_trait::async_trait;
use landedcost::config::AppConfig;
use landedcost::domain::error::DomainError;
use landedcost::domain::ports::page_fetcher::PageFetcher;
use landedcost::LandedCost;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const SOURCE: &str = "https://www.amazon.com";
pub const DESTINATION: &str = "https://www.amazon.in";

/// Serves canned pages by URL; anything else is a fetch failure.
#[derive(Default)]
pub struct StaticFetcher {
    pages: HashMap<String, Vec<u8>>,
    calls: AtomicUsize,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into().into_bytes());
        self
    }

    pub fn with_source(self, id: &str, html: impl Into<String>) -> Self {
        self.with_page(format!("{SOURCE}/dp/{id}"), html)
    }

    pub fn with_destination(self, id: &str, html: impl Into<String>) -> Self {
        self.with_page(format!("{DESTINATION}/dp/{id}"), html)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| DomainError::Fetch(format!("{url} returned 404 Not Found")))
    }
}

pub fn setup(fetcher: StaticFetcher) -> (LandedCost, Arc<StaticFetcher>) {
    let fetcher = Arc::new(fetcher);
    let lc = LandedCost::with_fetcher(fetcher.clone(), &AppConfig::default());
    (lc, fetcher)
}

/// Listing page with the fixed-path price element and an optional
/// product-details table.
pub fn listing_page(price: Option<&str>, rows: &[(&str, &str)]) -> String {
    let price_html = price
        .map(|p| {
            format!(
                r#"<div id="corePriceDisplay_desktop_feature_div">
                     <div class="a-section a-spacing-none aok-align-center aok-relative">
                       <span class="aok-offscreen">{p}</span>
                       <span aria-hidden="true" class="a-price">{p}</span>
                     </div>
                   </div>"#
            )
        })
        .unwrap_or_default();
    let rows_html: String = rows
        .iter()
        .map(|(label, value)| {
            format!(r#"<tr><th class="a-color-secondary prodDetSectionEntry">{label}</th><td class="a-size-base prodDetAttrValue">{value}</td></tr>"#)
        })
        .collect();
    format!(
        r#"<!doctype html><html><head><title>Listing</title></head><body>
           <div id="ppd">{price_html}</div>
           <table id="productDetails_techSpec_section_1">{rows_html}</table>
           </body></html>"#
    )
}

/// Listing page whose details live only in the detail-bullets block.
pub fn bullet_page(price: Option<&str>, bullets: &[(&str, &str)]) -> String {
    let price_html = price
        .map(|p| {
            format!(r#"<div id="corePrice_feature_div"><span class="a-price"><span class="a-offscreen">{p}</span></span></div>"#)
        })
        .unwrap_or_default();
    let items: String = bullets
        .iter()
        .map(|(label, value)| {
            format!(
                "<li><span class=\"a-list-item\"><span class=\"a-text-bold\">{label} \u{200f} : \u{200e}</span> <span>{value}</span></span></li>"
            )
        })
        .collect();
    format!(
        r#"<html><body>{price_html}
           <div id="detailBullets_feature_div"><ul class="a-unordered-list">{items}</ul></div>
           </body></html>"#
    )
}
