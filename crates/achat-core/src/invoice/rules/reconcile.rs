//! Reconciliation of the HT / TVA / TTC triad.
//!
//! Derives the missing members of the triad from the ones found in the text,
//! using `TTC = HT + TVA` or the VAT rate. HT and TVA are rounded to whole
//! units independently; TTC is passed through as read.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::money::round_unit;

use super::vat::{ht_from_ttc, vat_from_rate};

/// Which rule produced the reconciled amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ReconcileRule {
    /// HT read directly; TVA read directly or absent.
    Direct,
    /// HT = TTC - TVA.
    HtFromTtcAndVat,
    /// TTC without any VAT signal: HT = TTC, TVA = 0.
    TtcWithoutVat,
    /// HT = TTC / (1 + rate), TVA = TTC - HT.
    HtFromTtcAndRate,
    /// HT read, TVA = TTC - HT.
    VatFromTtc,
    /// HT read, TVA = HT x rate.
    VatFromRate,
    /// HT read without TTC or any VAT signal: TVA = 0.
    HtWithoutVat,
    /// Not enough signals to derive HT.
    Insufficient,
}

impl ReconcileRule {
    /// Whether the rule assumed a zero VAT instead of reading one.
    pub fn assumes_zero_vat(&self) -> bool {
        matches!(self, ReconcileRule::TtcWithoutVat | ReconcileRule::HtWithoutVat)
    }
}

/// Reconciled triad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciled {
    pub ht: Option<Decimal>,
    pub tva: Option<Decimal>,
    pub ttc: Option<Decimal>,
    pub rule: ReconcileRule,
}

/// Reconcile the amounts found in a document.
///
/// `rate` is the VAT rate in percent. A derived negative HT (VAT read larger
/// than the total) is discarded rather than returned, and so is any derived
/// amount that overflows.
pub fn reconcile(
    ht: Option<Decimal>,
    tva: Option<Decimal>,
    ttc: Option<Decimal>,
    rate: Option<Decimal>,
) -> Reconciled {
    let (ht, tva, rule) = match ht {
        None => match (ttc, tva, rate) {
            (Some(ttc), Some(tva), _) => match ttc.checked_sub(tva) {
                Some(ht) if !ht.is_sign_negative() => {
                    (Some(ht), Some(tva), ReconcileRule::HtFromTtcAndVat)
                }
                _ => (None, Some(tva), ReconcileRule::Insufficient),
            },
            (Some(ttc), None, None) => (Some(ttc), Some(Decimal::ZERO), ReconcileRule::TtcWithoutVat),
            (Some(ttc), None, Some(rate)) => {
                match ht_from_ttc(ttc, rate).and_then(|ht| Some((ht, ttc.checked_sub(ht)?))) {
                    Some((ht, tva)) => (Some(ht), Some(tva), ReconcileRule::HtFromTtcAndRate),
                    None => (None, None, ReconcileRule::Insufficient),
                }
            }
            (None, tva, _) => (None, tva, ReconcileRule::Insufficient),
        },
        Some(ht) => match (tva, ttc, rate) {
            (Some(tva), _, _) => (Some(ht), Some(tva), ReconcileRule::Direct),
            (None, Some(ttc), _) if ttc >= ht => {
                (Some(ht), ttc.checked_sub(ht), ReconcileRule::VatFromTtc)
            }
            (None, _, Some(rate)) => match vat_from_rate(ht, rate) {
                Some(tva) => (Some(ht), Some(tva), ReconcileRule::VatFromRate),
                None => (Some(ht), None, ReconcileRule::Insufficient),
            },
            (None, None, None) => (Some(ht), Some(Decimal::ZERO), ReconcileRule::HtWithoutVat),
            (None, Some(_), None) => (Some(ht), None, ReconcileRule::Direct),
        },
    };

    Reconciled {
        ht: ht.map(round_unit),
        tva: tva.map(round_unit),
        ttc,
        rule,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(n: i64) -> Option<Decimal> {
        Some(Decimal::from(n))
    }

    #[test]
    fn test_ht_from_ttc_and_vat() {
        let r = reconcile(None, d(57600), d(377600), None);
        assert_eq!((r.ht, r.tva, r.ttc), (d(320000), d(57600), d(377600)));
        assert_eq!(r.rule, ReconcileRule::HtFromTtcAndVat);
    }

    #[test]
    fn test_vat_amount_wins_over_rate() {
        let r = reconcile(None, d(18000), d(118000), d(20));
        assert_eq!((r.ht, r.tva), (d(100000), d(18000)));
    }

    #[test]
    fn test_ttc_without_vat_signal() {
        let r = reconcile(None, None, d(50000), None);
        assert_eq!((r.ht, r.tva), (d(50000), d(0)));
        assert!(r.rule.assumes_zero_vat());
    }

    #[test]
    fn test_ht_from_rate() {
        let r = reconcile(None, None, d(118000), d(18));
        assert_eq!((r.ht, r.tva), (d(100000), d(18000)));
        assert_eq!(r.rule, ReconcileRule::HtFromTtcAndRate);
    }

    #[test]
    fn test_rate_rounding_stays_within_one_unit() {
        let r = reconcile(None, None, d(100001), d(18));
        let (ht, tva, ttc) = (r.ht.unwrap(), r.tva.unwrap(), r.ttc.unwrap());
        assert!((ttc - (ht + tva)).abs() <= Decimal::ONE);
    }

    #[test]
    fn test_nothing_to_reconcile() {
        let r = reconcile(None, None, None, d(18));
        assert_eq!((r.ht, r.tva, r.ttc), (None, None, None));
        assert_eq!(r.rule, ReconcileRule::Insufficient);

        let r = reconcile(None, d(500), None, None);
        assert_eq!((r.ht, r.tva), (None, d(500)));
    }

    #[test]
    fn test_negative_ht_is_discarded() {
        let r = reconcile(None, d(200), d(100), None);
        assert_eq!(r.ht, None);
        assert_eq!(r.rule, ReconcileRule::Insufficient);
    }

    #[test]
    fn test_vat_from_ttc() {
        let r = reconcile(d(100000), None, d(118000), d(5));
        assert_eq!(r.tva, d(18000));
        assert_eq!(r.rule, ReconcileRule::VatFromTtc);
    }

    #[test]
    fn test_vat_from_rate_when_ttc_below_ht() {
        let r = reconcile(d(100000), None, d(90000), d(18));
        assert_eq!(r.tva, d(18000));
        assert_eq!(r.rule, ReconcileRule::VatFromRate);

        let r = reconcile(d(100000), None, d(90000), None);
        assert_eq!(r.tva, None);
    }

    #[test]
    fn test_ht_without_vat() {
        let r = reconcile(d(150000), None, None, None);
        assert_eq!((r.ht, r.tva, r.ttc), (d(150000), d(0), None));
        assert_eq!(r.rule, ReconcileRule::HtWithoutVat);
    }

    #[test]
    fn test_overflowing_rate_leaves_vat_absent() {
        let r = reconcile(Some(Decimal::MAX), None, None, d(18));
        assert_eq!((r.ht, r.tva), (Some(Decimal::MAX), None));
        assert_eq!(r.rule, ReconcileRule::Insufficient);

        let r = reconcile(None, None, Some(Decimal::MAX), d(-50));
        assert_eq!((r.ht, r.tva), (None, None));
        assert_eq!(r.rule, ReconcileRule::Insufficient);
    }

    #[test]
    fn test_halves_round_up() {
        let r = reconcile(Some(Decimal::new(10005, 1)), Some(Decimal::new(1805, 1)), None, None);
        assert_eq!((r.ht, r.tva), (d(1001), d(181)));
    }
}
