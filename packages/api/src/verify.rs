//! Cross-check of extracted locations against a published HTML listing
//!
//! Payers also publish the in-network files of a plan as an HTML page. Links
//! on that page and extracted locations are compared with their query
//! strings removed, since signed URLs differ on every request.

use hashbrown::HashSet;
use mrf_index_client::error;
use regex::Regex;

use crate::Result;

const HREF_PATTERN: &str = r#"href=['"]?([^'" >]+)"#;

/// Part of `url` before the first `?`
#[must_use]
pub fn strip_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(base, _)| base)
}

/// Differences between an HTML listing and an extraction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyReport {
    /// Links on the page, in page order, with no extracted counterpart
    pub missing_from_extraction: Vec<String>,
    /// Extracted locations, in input order, not linked from the page
    pub missing_from_html: Vec<String>,
    pub html_links: usize,
    pub extracted: usize,
}

impl VerifyReport {
    /// Both sides name the same files
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.missing_from_extraction.is_empty() && self.missing_from_html.is_empty()
    }
}

/// Extracts `href` targets and compares them with extracted locations
#[derive(Debug, Clone)]
pub struct LinkVerifier {
    href: Regex,
}

impl LinkVerifier {
    /// # Errors
    ///
    /// Fails with a `Config` error if the link pattern does not compile.
    pub fn new() -> Result<Self> {
        let href = Regex::new(HREF_PATTERN).map_err(error::config)?;
        Ok(Self { href })
    }

    /// Every `href` target in `html`, in page order
    pub fn links<'h>(&self, html: &'h str) -> impl Iterator<Item = &'h str> {
        self.href
            .captures_iter(html)
            .filter_map(|captures| captures.get(1))
            .map(|target| target.as_str())
    }

    /// Compare the links in `html` with `locations`
    ///
    /// Each missing entry is reported once, with its query string removed.
    pub fn verify<I, S>(&self, html: &str, locations: I) -> VerifyReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let links: Vec<&str> = self.links(html).map(strip_query).collect();
        let extracted: Vec<String> = locations
            .into_iter()
            .map(|location| strip_query(location.as_ref()).to_string())
            .collect();

        let link_set: HashSet<&str> = links.iter().copied().collect();
        let extracted_set: HashSet<&str> = extracted.iter().map(String::as_str).collect();

        let mut report = VerifyReport {
            html_links: links.len(),
            extracted: extracted.len(),
            ..VerifyReport::default()
        };

        let mut reported = HashSet::new();
        for link in &links {
            if !extracted_set.contains(link) && reported.insert(*link) {
                report.missing_from_extraction.push((*link).to_string());
            }
        }

        let mut reported = HashSet::new();
        for location in &extracted {
            if !link_set.contains(location.as_str()) && reported.insert(location.as_str()) {
                report.missing_from_html.push(location.clone());
            }
        }

        tracing::info!(
            target: "mrf_index::verify",
            html_links = report.html_links,
            extracted = report.extracted,
            missing_from_extraction = report.missing_from_extraction.len(),
            missing_from_html = report.missing_from_html.len(),
            "Verification finished"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
        <a href="https://mrf.example/a.json.gz?sig=1">a</a>
        <a href='https://mrf.example/b.json.gz'>b</a>
        <a href=https://mrf.example/c.json.gz>c</a>
        <a href="https://mrf.example/c.json.gz?sig=2">c again</a>
    </body></html>"#;

    #[test]
    fn strips_query_strings() {
        assert_eq!(strip_query("http://x/f?a=1?b"), "http://x/f");
        assert_eq!(strip_query("http://x/f"), "http://x/f");
    }

    #[test]
    fn finds_quoted_and_bare_links() {
        let verifier = LinkVerifier::new().unwrap();
        let links: Vec<&str> = verifier.links(PAGE).collect();
        assert_eq!(
            links,
            [
                "https://mrf.example/a.json.gz?sig=1",
                "https://mrf.example/b.json.gz",
                "https://mrf.example/c.json.gz",
                "https://mrf.example/c.json.gz?sig=2",
            ]
        );
    }

    #[test]
    fn matching_sides_are_clean() {
        let verifier = LinkVerifier::new().unwrap();
        let report = verifier.verify(
            PAGE,
            [
                "https://mrf.example/a.json.gz?sig=other",
                "https://mrf.example/b.json.gz",
                "https://mrf.example/c.json.gz",
            ],
        );
        assert!(report.is_clean(), "{report:?}");
        assert_eq!(report.html_links, 4);
        assert_eq!(report.extracted, 3);
    }

    #[test]
    fn reports_each_side_once() {
        let verifier = LinkVerifier::new().unwrap();
        let report = verifier.verify(
            PAGE,
            [
                "https://mrf.example/a.json.gz",
                "https://mrf.example/z.json.gz?sig=9",
                "https://mrf.example/z.json.gz",
            ],
        );
        assert_eq!(
            report.missing_from_extraction,
            ["https://mrf.example/b.json.gz", "https://mrf.example/c.json.gz"]
        );
        assert_eq!(report.missing_from_html, ["https://mrf.example/z.json.gz"]);
        assert!(!report.is_clean());
    }
}
