//! UPI payment matching.
//!
//! A bank SMS (or an admin entry) yields a UTR and an amount. A customer submits
//! the UTR, often only its last digits, against an order. The two sides match when
//! the amounts are equal to the paisa and the shorter reference is a suffix of the
//! longer one.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::orders::order::Order;
use crate::domain::payments::transaction::Transaction;

pub const MIN_REFERENCE_DIGITS: usize = 4;
pub const MAX_REFERENCE_DIGITS: usize = 22;

/// First run of 4+ digits after any reference keyword, glued or not.
static UTR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:ref|utr|txn|no)[:\s-]*(\d{4,})").expect("valid regex"));
static AMOUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:\brs\.?|\binr)\s*(\d[\d,]*(?:\.\d{1,2})?)").expect("valid regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSms {
    pub utr: String,
    /// Paise.
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProofError {
    #[error("Payment reference is required")]
    Empty,
    #[error("Payment reference must contain only digits")]
    NotNumeric,
    #[error("Payment reference must be between 4 and 22 digits")]
    BadLength,
}

/// Extracts the UTR and credited amount from a bank notification.
pub fn parse_payment_sms(body: &str) -> Option<ParsedSms> {
    let utr = UTR_RE
        .captures(body)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())?;
    let amount = AMOUNT_RE
        .captures(body)
        .and_then(|c| c.get(1))
        .and_then(|m| parse_amount_paise(m.as_str()))?;
    Some(ParsedSms { utr, amount })
}

/// `"1,250.5"` -> `125050`. Grouping commas are ignored; at most two decimals.
pub fn parse_amount_paise(raw: &str) -> Option<i64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    let (whole, frac) = match cleaned.split_once('.') {
        Some((w, f)) => (w, f),
        None => (cleaned.as_str(), ""),
    };
    if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if frac.len() > 2 || !frac.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let rupees: i64 = whole.parse().ok()?;
    let paise: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().ok()? * 10,
        _ => frac.parse().ok()?,
    };
    rupees.checked_mul(100)?.checked_add(paise)
}

pub fn normalize_utr(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Normalizes a customer-entered reference and checks its shape.
pub fn validate_payment_proof(raw: &str) -> Result<String, ProofError> {
    let proof = normalize_utr(raw);
    if proof.is_empty() {
        return Err(ProofError::Empty);
    }
    if !proof.chars().all(|c| c.is_ascii_digit()) {
        return Err(ProofError::NotNumeric);
    }
    if !(MIN_REFERENCE_DIGITS..=MAX_REFERENCE_DIGITS).contains(&proof.len()) {
        return Err(ProofError::BadLength);
    }
    Ok(proof)
}

pub fn utr_matches(utr: &str, proof: &str) -> bool {
    let utr = normalize_utr(utr);
    let proof = normalize_utr(proof);
    let (short, long) = if proof.len() <= utr.len() {
        (&proof, &utr)
    } else {
        (&utr, &proof)
    };
    short.len() >= MIN_REFERENCE_DIGITS && long.ends_with(short.as_str())
}

/// Oldest unpaid order that the transaction can settle.
pub fn pick_order_for_transaction<'a>(txn: &Transaction, orders: &'a [Order]) -> Option<&'a Order> {
    if txn.is_used {
        return None;
    }
    orders
        .iter()
        .filter(|o| !o.is_paid && o.total_price == txn.amount)
        .filter(|o| utr_matches(&txn.utr, &o.payment_proof))
        .min_by_key(|o| o.created_at)
}

/// Oldest unused transaction that settles the order.
pub fn pick_transaction_for_order<'a>(
    order: &Order,
    txns: &'a [Transaction],
) -> Option<&'a Transaction> {
    if order.is_paid || order.payment_proof.is_empty() {
        return None;
    }
    txns.iter()
        .filter(|t| !t.is_used && t.amount == order.total_price)
        .filter(|t| utr_matches(&t.utr, &order.payment_proof))
        .min_by_key(|t| t.created_at)
}
