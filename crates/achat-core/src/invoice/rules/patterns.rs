//! Common regex patterns for purchase invoice extraction.
//!
//! Amount captures use `[0-9][0-9 \t\u{00a0}\u{202f}.,]*`: a digit followed by
//! digits, horizontal spaces and separators. Gaps between a label and its
//! amount never cross a line break.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Web domains and the domain part of e-mail addresses
    pub static ref DOMAIN: Regex = Regex::new(
        r"(?i)\b([a-z0-9][a-z0-9-]*(?:\.[a-z0-9-]+)*\.[a-z]{2,})\b"
    ).unwrap();

    // Invoice number after "FACTURE N°", "FACTURE No", "FACTURE #"
    pub static ref INVOICE_NUMBER: Regex = Regex::new(
        r"(?i)\bFACTURE\s*(?:N\s*[°ºo]?\.?|#)\s*[:#-]?\s*([A-Z0-9][A-Z0-9/-]*)"
    ).unwrap();

    // Purchase document codes (ACH-2025-001, FAC 1234, FACT/00123)
    pub static ref DOCUMENT_CODE: Regex = Regex::new(
        r"(?i)\b(?:ACH|FACT|FAC)\s*[-:/#]?\s*[A-Z]*\s*[-/]?\s*[0-9]{3,}(?:[-/][0-9]+)*\b"
    ).unwrap();

    // Tax-inclusive total
    pub static ref TOTAL_TTC: Regex = Regex::new(
        r"(?i)\b(?:TOTAL\s+T\.?T\.?C\.?|T\.?T\.?C\.?|NET\s+(?:[àa]\s+)?PAYER|TOTAL\s*(?:[àa]\s*)?PAYER)[^0-9%\n]{0,40}([0-9][0-9 \t\u{00a0}\u{202f}.,]*)"
    ).unwrap();

    // Tax-exclusive total introduced by "Hors Taxes"
    pub static ref HORS_TAXES: Regex = Regex::new(
        r"(?i)\bHors\s*Taxes?[^0-9\n]{0,30}([0-9][0-9 \t\u{00a0}\u{202f}.,]*)"
    ).unwrap();

    // Amount immediately followed by "HT" (optionally with the currency in between)
    pub static ref AMOUNT_HT: Regex = Regex::new(
        r"(?i)([0-9][0-9 \t\u{00a0}\u{202f}.,]*?)[ \t\u{00a0}]*(?:F?CFA|XOF)?[ \t\u{00a0}]*H\.?T\b"
    ).unwrap();

    // "Total HT" / "Montant HT" label followed by the amount
    pub static ref TOTAL_HT: Regex = Regex::new(
        r"(?i)\b(?:TOTAL|MONTANT)\s+H\.?T\.?[^0-9%\n]{0,20}([0-9][0-9 \t\u{00a0}\u{202f}.,]*)"
    ).unwrap();

    // VAT amount. Group 1 is the gap after "TVA" (may hold the rate, e.g. "18% :"),
    // group 2 the amount, which must not itself be a percentage.
    pub static ref VAT_AMOUNT: Regex = Regex::new(
        r"(?i)\bTVA([^0-9%\n]{0,30}|[^0-9%\n]{0,10}[0-9]{1,2}(?:[.,][0-9]+)?[ \t]*%[ \t\u{00a0}:=)\]]{0,8})([0-9][0-9 \t\u{00a0}\u{202f}.,]*)(?:[^0-9 \t\u{00a0}\u{202f}.,%]|$)"
    ).unwrap();

    // VAT rate ("TVA 18 %", "TVA (18%)", "TVA 5,5%")
    pub static ref VAT_RATE: Regex = Regex::new(
        r"(?i)\bTVA[^0-9%\n]{0,10}([0-9]{1,2}(?:[.,][0-9]+)?)[ \t]*%"
    ).unwrap();
}
