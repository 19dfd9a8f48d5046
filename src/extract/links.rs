// src/extract/links.rs
// =============================================================================
// Extracts internal article links from page content.
//
// Only links inside paragraph blocks count. Navigation menus, infoboxes and
// footers never reach this function because the fetcher already dropped
// them when it selected the paragraphs.
//
// A link is internal when its href starts with the article prefix (/wiki/ by
// default). Internal hrefs are made absolute by prepending the site origin.
// Everything else is skipped:
// - external URLs (https://other.site/...)
// - anchors (#section)
// - other namespaces (/w/index.php?...)
//
// The result keeps document order and keeps duplicates. Deduplication is the
// frontier's job, not ours.
// =============================================================================

use scraper::{Html, Selector};

use crate::config::SiteScope;
use crate::fetch::PageContent;

/// Returns every internal link in `content`, as absolute URLs, in document order.
///
/// Example (default scope):
///   `<p><a href="/wiki/A">A</a> <a href="https://x.org/">x</a></p>`
///   -> `["https://en.wikipedia.org/wiki/A"]`
pub fn extract_internal_links(content: &PageContent, scope: &SiteScope) -> Vec<String> {
    // Constant selector, known to be valid
    let anchors = Selector::parse("a[href]").unwrap();

    let mut links = Vec::new();

    for paragraph in &content.paragraphs {
        let fragment = Html::parse_fragment(&paragraph.html);

        for element in fragment.select(&anchors) {
            if let Some(url) = element.value().attr("href").and_then(|href| scope.resolve(href)) {
                links.push(url);
            }
        }
    }

    links
}
