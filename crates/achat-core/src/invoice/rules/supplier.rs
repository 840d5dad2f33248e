//! Supplier name matchers.
//!
//! Each matcher looks at one kind of evidence and returns an optional name.
//! The parser runs them in the order returned by [`default_supplier_matchers`]
//! and keeps the first hit.

use std::path::Path;

use tracing::debug;

use crate::models::ExtractionConfig;

use super::patterns::DOMAIN;
use super::{contains_any_phrase, tokens};

/// Extensions that look like a top-level domain inside file names ("scan.pdf").
const FILE_EXTENSIONS: &[&str] = &["pdf", "jpg", "jpeg", "png", "doc", "docx", "xls", "xlsx", "txt", "csv"];

/// Second-level labels that come before a country code ("sonatel.co.sn").
const SECOND_LEVEL_LABELS: &[&str] = &["co", "com", "org", "net", "gouv", "gov", "ac", "edu"];

/// Minimum length of a supplier name derived from a domain.
const MIN_DOMAIN_NAME_LEN: usize = 3;

/// Minimum length of an uppercase header line accepted as a name.
const MIN_HEADER_LINE_LEN: usize = 6;

/// Text of a document together with its optional original file name.
#[derive(Debug, Clone, Copy)]
pub struct Document<'a> {
    pub text: &'a str,
    pub filename: Option<&'a str>,
}

impl<'a> Document<'a> {
    pub fn new(text: &'a str, filename: Option<&'a str>) -> Self {
        Self { text, filename }
    }
}

/// A source of supplier names.
pub trait SupplierMatcher: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Supplier name found in the document, if any.
    fn find(&self, doc: &Document<'_>) -> Option<String>;
}

/// Supplier matchers in priority order: domain, file name, header lines.
pub fn default_supplier_matchers(config: &ExtractionConfig) -> Vec<Box<dyn SupplierMatcher>> {
    vec![
        Box::new(DomainMatcher::new(config)),
        Box::new(FilenameMatcher::new(config)),
        Box::new(HeaderLineMatcher::new(config)),
    ]
}

fn normalize_words(s: &str) -> String {
    s.split(|c: char| c == '-' || c == '_' || c == '.' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Web domain or e-mail domain ("contact@sencom.sn" gives "SENCOM").
pub struct DomainMatcher {
    generic_domains: Vec<String>,
}

impl DomainMatcher {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            generic_domains: config
                .generic_mail_domains
                .iter()
                .map(|d| d.to_lowercase())
                .collect(),
        }
    }

    fn is_generic(&self, host: &str) -> bool {
        host.split('.')
            .any(|label| self.generic_domains.iter().any(|g| g == label))
    }

    /// Registrable label of a host: "www.ga2c-services.co.sn" gives "ga2c-services".
    fn registrable_label(host: &str) -> Option<&str> {
        let mut labels: Vec<&str> = host.split('.').collect();
        if labels.first().is_some_and(|l| l.eq_ignore_ascii_case("www")) {
            labels.remove(0);
        }
        labels.pop()?;
        if labels.len() > 1
            && labels
                .last()
                .is_some_and(|l| SECOND_LEVEL_LABELS.iter().any(|s| l.eq_ignore_ascii_case(s)))
        {
            labels.pop();
        }
        labels.pop()
    }
}

impl SupplierMatcher for DomainMatcher {
    fn name(&self) -> &'static str {
        "domain"
    }

    fn find(&self, doc: &Document<'_>) -> Option<String> {
        for caps in DOMAIN.captures_iter(doc.text) {
            let Some(host) = caps.get(1) else {
                continue;
            };

            // Local part of an e-mail address ("jean.dupont@..."), not a host
            if doc.text[host.end()..].starts_with('@') {
                continue;
            }

            let host_str = host.as_str().to_lowercase();
            let tld = host_str.rsplit('.').next().unwrap_or_default();
            if FILE_EXTENSIONS.contains(&tld) {
                continue;
            }
            if self.is_generic(&host_str) {
                debug!("Skipping generic mail domain: {}", host_str);
                continue;
            }

            let Some(label) = Self::registrable_label(&host_str) else {
                continue;
            };
            if !label.chars().any(|c| c.is_ascii_alphabetic()) {
                continue;
            }

            let name = normalize_words(label);
            if name.chars().count() >= MIN_DOMAIN_NAME_LEN {
                return Some(name);
            }
        }
        None
    }
}

/// Original file name, minus extension, bracketed segments and invoice words.
pub struct FilenameMatcher {
    noise_words: Vec<String>,
}

impl FilenameMatcher {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            noise_words: config
                .filename_noise_words
                .iter()
                .map(|w| w.to_lowercase())
                .collect(),
        }
    }
}

fn strip_bracketed(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut depth = 0usize;
    for c in s.chars() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => {
                depth = depth.saturating_sub(1);
                out.push(' ');
            }
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

impl SupplierMatcher for FilenameMatcher {
    fn name(&self) -> &'static str {
        "filename"
    }

    fn find(&self, doc: &Document<'_>) -> Option<String> {
        let filename = doc.filename?;
        let stem = Path::new(filename).file_stem()?.to_string_lossy();

        let stripped = strip_bracketed(&stem);
        let words: Vec<&str> = stripped
            .split(|c: char| c == '_' || c == '-' || c == '.' || c.is_whitespace())
            .filter(|w| !w.is_empty())
            .filter(|w| !self.noise_words.iter().any(|n| n == &w.to_lowercase()))
            .collect();

        if words.len() >= 2 {
            Some(words.join(" ").to_uppercase())
        } else {
            None
        }
    }
}

/// First header line carrying a legal-form suffix, a known supplier, or
/// written in capitals without looking like a document title.
pub struct HeaderLineMatcher {
    legal_suffixes: Vec<String>,
    known_suppliers: Vec<String>,
    header_words: Vec<String>,
    max_lines: usize,
}

impl HeaderLineMatcher {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            legal_suffixes: config.legal_suffixes.clone(),
            known_suppliers: config.known_suppliers.clone(),
            header_words: config.header_words.clone(),
            max_lines: config.header_lines,
        }
    }

    fn is_uppercase_line(line: &str) -> bool {
        if line.chars().count() < MIN_HEADER_LINE_LEN {
            return false;
        }
        let allowed = line.chars().all(|c| {
            (c.is_alphabetic() && !c.is_lowercase())
                || c.is_ascii_digit()
                || c.is_whitespace()
                || ".,'&-".contains(c)
        });
        allowed && line.chars().filter(|c| c.is_alphabetic()).count() >= 3
    }

    fn looks_like_title(&self, line: &str) -> bool {
        tokens(line).any(|t| {
            let t = t.to_lowercase();
            self.header_words.iter().any(|w| w.to_lowercase() == t)
        })
    }
}

impl SupplierMatcher for HeaderLineMatcher {
    fn name(&self) -> &'static str {
        "header"
    }

    fn find(&self, doc: &Document<'_>) -> Option<String> {
        doc.text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .take(self.max_lines)
            .find(|line| {
                contains_any_phrase(line, &self.legal_suffixes)
                    || contains_any_phrase(line, &self.known_suppliers)
                    || (Self::is_uppercase_line(line) && !self.looks_like_title(line))
            })
            .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
    }
}
