//! Flat CSV export of journal entries, one row per line.

use std::io::Write;

use rust_decimal::Decimal;

use crate::error::Result;
use crate::models::JournalEntry;
use crate::money::round_cents;

/// Column headers of the journal export.
pub const CSV_HEADER: [&str; 7] = ["Date", "Réf", "Libellé", "Compte", "Intitulé", "Débit", "Crédit"];

fn text(s: &str) -> String {
    s.replace(',', " ")
}

fn amount(value: Decimal) -> String {
    format!("{:.2}", round_cents(value))
}

/// Write `entries` as CSV to `writer`.
pub fn write_journal_csv<'a, W, I>(entries: I, writer: W) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a JournalEntry>,
{
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;

    for entry in entries {
        let date = entry.date.format("%Y-%m-%d").to_string();
        let reference = text(&entry.reference);
        let label = text(&entry.label);

        for line in &entry.lines {
            wtr.write_record([
                date.as_str(),
                reference.as_str(),
                label.as_str(),
                line.account.as_str(),
                text(&line.label).as_str(),
                amount(line.debit).as_str(),
                amount(line.credit).as_str(),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Render `entries` as a CSV string.
pub fn journal_to_csv<'a, I>(entries: I) -> Result<String>
where
    I: IntoIterator<Item = &'a JournalEntry>,
{
    let mut buf = Vec::new();
    write_journal_csv(entries, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::generate;
    use crate::models::{ChartOfAccounts, PaymentMode, PaymentStatus, PurchaseRecord};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn record() -> PurchaseRecord {
        PurchaseRecord {
            id: Some(1),
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            supplier: "Garage Moderne, Dakar".to_string(),
            reference: "FAC-2024-015".to_string(),
            amount_ht: Some(Decimal::from(320000)),
            amount_tva: Some(Decimal::from(57600)),
            amount_ttc: Some(Decimal::from(377600)),
            payment_mode: PaymentMode::Transfer,
            payment_status: PaymentStatus::Paid,
            partial_amount_paid: None,
            due_date: None,
        }
    }

    #[test]
    fn test_csv_rows() {
        let entries = generate(&[record()], &ChartOfAccounts::default());
        let csv = journal_to_csv(&entries).unwrap();
        let rows: Vec<&str> = csv.lines().collect();

        assert_eq!(
            rows,
            vec![
                "Date,Réf,Libellé,Compte,Intitulé,Débit,Crédit",
                "2025-03-14,FAC-2024-015,Achat FAC-2024-015 - Garage Moderne  Dakar,601,Achat - Garage Moderne  Dakar,320000.00,0.00",
                "2025-03-14,FAC-2024-015,Achat FAC-2024-015 - Garage Moderne  Dakar,44562,TVA déductible,57600.00,0.00",
                "2025-03-14,FAC-2024-015,Achat FAC-2024-015 - Garage Moderne  Dakar,512,Règlement virement,0.00,377600.00",
            ]
        );
    }

    #[test]
    fn test_csv_of_nothing_is_header_only() {
        let csv = journal_to_csv(&Vec::<JournalEntry>::new()).unwrap();
        assert_eq!(csv.trim_end(), "Date,Réf,Libellé,Compte,Intitulé,Débit,Crédit");
    }

    #[test]
    fn test_fractional_amounts_use_two_decimals() {
        assert_eq!(amount(Decimal::new(12345, 1)), "1234.50");
        assert_eq!(amount(Decimal::new(1, 3)), "0.00");
    }
}
