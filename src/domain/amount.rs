//! Monetary amount value object and its English rendering for printed invoices.

use serde::{Deserialize, Serialize};

use super::error::AmountError;

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// Scale words for successive base-1000 groups, least significant first.
const SCALES: [&str; 4] = ["", "Thousand", "Million", "Billion"];

/// Smallest amount whose integer part would need a scale word above Billion.
const UNSUPPORTED_FROM: f64 = 1_000_000_000_000.0;

const ZERO_PHRASE: &str = "Zero Only";

/// Non-negative, finite amount in major currency units.
///
/// DDD: Value object - validated on construction, compared by value.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct MonetaryAmount(f64);

impl MonetaryAmount {
    /// Validate a raw amount.
    ///
    /// # Errors
    /// `InvalidArgument` for negative or non-finite input, `Unsupported` for
    /// amounts of one trillion or more, counting the cents carry.
    pub fn new(value: f64) -> Result<Self, AmountError> {
        if !value.is_finite() || value < 0.0 {
            return Err(AmountError::InvalidArgument(value));
        }
        if value >= UNSUPPORTED_FROM || split(value).0 >= UNSUPPORTED_FROM as u64 {
            return Err(AmountError::Unsupported(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Render the amount as printed on an invoice, e.g.
    /// `"One Thousand Two Hundred Thirty Four and Fifty Six Cents Only"`.
    pub fn in_words(&self) -> String {
        let (whole, cents) = split(self.0);

        let mut words: Vec<&'static str> = Vec::new();
        push_whole(&mut words, whole);

        if cents > 0 {
            if !words.is_empty() {
                words.push("and");
            }
            push_group(&mut words, cents);
            words.push("Cents");
        }

        if words.is_empty() {
            return ZERO_PHRASE.to_string();
        }

        words.push("Only");
        words.join(" ")
    }
}

impl TryFrom<f64> for MonetaryAmount {
    type Error = AmountError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MonetaryAmount> for f64 {
    fn from(amount: MonetaryAmount) -> Self {
        amount.0
    }
}

/// Convert a raw amount into invoice words.
///
/// ```
/// use invoice_portal::domain::amount_in_words;
///
/// assert_eq!(amount_in_words(100.0).unwrap(), "One Hundred Only");
/// ```
pub fn amount_in_words(amount: f64) -> Result<String, AmountError> {
    Ok(MonetaryAmount::new(amount)?.in_words())
}

/// Split into whole units and cents, carrying a cents value that rounds to 100.
fn split(value: f64) -> (u64, u64) {
    let whole = value.floor();
    let cents = ((value - whole) * 100.0).round() as u64;
    let whole = whole as u64;
    if cents >= 100 {
        (whole + 1, 0)
    } else {
        (whole, cents)
    }
}

/// Push the words of the integer part, most significant group first.
fn push_whole(words: &mut Vec<&'static str>, whole: u64) {
    let mut groups = Vec::with_capacity(SCALES.len());
    let mut rest = whole;
    while rest > 0 {
        groups.push(rest % 1000);
        rest /= 1000;
    }

    for (scale, &group) in groups.iter().enumerate().rev() {
        if group == 0 {
            continue;
        }
        push_group(words, group);
        if !SCALES[scale].is_empty() {
            words.push(SCALES[scale]);
        }
    }
}

/// Push the words of a single group in 1..=999.
fn push_group(words: &mut Vec<&'static str>, group: u64) {
    let hundreds = (group / 100) as usize;
    let mut rest = (group % 100) as usize;

    if hundreds > 0 {
        words.push(ONES[hundreds]);
        words.push("Hundred");
    }
    if rest >= 20 {
        words.push(TENS[rest / 10]);
        rest %= 10;
    }
    if rest > 0 {
        words.push(ONES[rest]);
    }
}
