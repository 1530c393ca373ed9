//! Portuguese verbalization of amounts.
//!
//! Renders a whole number as Brazilian Portuguese cardinal words, so the UI
//! can echo an entered limit back as text for confirmation. The number is
//! split into base-1000 groups; each non-zero group is written from lookup
//! tables and followed by the scale word for its position.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::Money;

const UNITS: [&str; 10] = [
    "", "um", "dois", "três", "quatro", "cinco", "seis", "sete", "oito", "nove",
];

const TEENS: [&str; 10] = [
    "dez",
    "onze",
    "doze",
    "treze",
    "quatorze",
    "quinze",
    "dezesseis",
    "dezessete",
    "dezoito",
    "dezenove",
];

const TENS: [&str; 10] = [
    "", "", "vinte", "trinta", "quarenta", "cinquenta", "sessenta", "setenta", "oitenta",
    "noventa",
];

const HUNDREDS: [&str; 10] = [
    "",
    "cento",
    "duzentos",
    "trezentos",
    "quatrocentos",
    "quinhentos",
    "seiscentos",
    "setecentos",
    "oitocentos",
    "novecentos",
];

/// `(singular, plural)` scale words per base-1000 position.
///
/// Seven positions cover every `u64`.
const SCALES: [(&str, &str); 7] = [
    ("", ""),
    ("mil", "mil"),
    ("milhão", "milhões"),
    ("bilhão", "bilhões"),
    ("trilhão", "trilhões"),
    ("quatrilhão", "quatrilhões"),
    ("quintilhão", "quintilhões"),
];

const ZERO: &str = "zero";

/// Converts a non-negative integer to Portuguese cardinal words.
///
/// Empty groups contribute nothing, so the output never carries stray
/// spaces. A lone thousand reads "mil" rather than "um mil".
///
/// # Examples
///
/// ```
/// use benefits_engine::calculation::to_words;
///
/// assert_eq!(to_words(0), "zero");
/// assert_eq!(to_words(21), "vinte e um");
/// assert_eq!(to_words(1_000), "mil");
/// assert_eq!(to_words(2_000_000), "dois milhões");
/// assert_eq!(to_words(5_321), "cinco mil trezentos e vinte e um");
/// ```
pub fn to_words(n: u64) -> String {
    if n == 0 {
        return ZERO.to_string();
    }

    let mut phrases: Vec<String> = Vec::with_capacity(SCALES.len());
    let mut remaining = n;
    let mut scale_index = 0;

    while remaining > 0 {
        let group = (remaining % 1000) as u16;
        if group != 0 {
            phrases.push(group_phrase(group, scale_index));
        }
        remaining /= 1000;
        scale_index += 1;
    }

    phrases.reverse();
    phrases.join(" ")
}

/// Signed entry point for callers holding a raw integer.
///
/// Negative input is rejected, never negated.
pub fn to_words_signed(n: i64) -> EngineResult<String> {
    let n = u64::try_from(n).map_err(|_| {
        EngineError::invalid_input("amount", format!("cannot verbalize negative amount {}", n))
    })?;
    Ok(to_words(n))
}

fn group_phrase(group: u16, scale_index: usize) -> String {
    let (singular, plural) = SCALES[scale_index];
    match scale_index {
        0 => below_thousand(group),
        1 if group == 1 => singular.to_string(),
        _ => {
            let scale = if group > 1 { plural } else { singular };
            format!("{} {}", below_thousand(group), scale)
        }
    }
}

fn below_thousand(n: u16) -> String {
    if n == 100 {
        return "cem".to_string();
    }

    let hundreds = usize::from(n / 100);
    let rest = n % 100;

    match (hundreds, rest) {
        (0, _) => below_hundred(rest),
        (_, 0) => HUNDREDS[hundreds].to_string(),
        _ => format!("{} e {}", HUNDREDS[hundreds], below_hundred(rest)),
    }
}

fn below_hundred(n: u16) -> String {
    let n = usize::from(n);
    match n {
        0..=9 => UNITS[n].to_string(),
        10..=19 => TEENS[n - 10].to_string(),
        _ => {
            let (ten, unit) = (n / 10, n % 10);
            if unit == 0 {
                TENS[ten].to_string()
            } else {
                format!("{} e {}", TENS[ten], UNITS[unit])
            }
        }
    }
}

/// Names of the major and minor currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyNames {
    /// ISO 4217 code (e.g. "BRL").
    pub code: String,
    /// Major unit, singular ("real").
    pub major_singular: String,
    /// Major unit, plural ("reais").
    pub major_plural: String,
    /// Minor unit, singular ("centavo").
    pub minor_singular: String,
    /// Minor unit, plural ("centavos").
    pub minor_plural: String,
}

impl Default for CurrencyNames {
    fn default() -> Self {
        Self {
            code: "BRL".to_string(),
            major_singular: "real".to_string(),
            major_plural: "reais".to_string(),
            minor_singular: "centavo".to_string(),
            minor_plural: "centavos".to_string(),
        }
    }
}

/// Writes out a monetary amount with its currency names.
///
/// Whole amounts of a million or more take "de" before the currency
/// ("um milhão de reais"). Cents follow the major part joined by "e" and
/// are omitted when zero; a zero major part is omitted when cents are
/// present.
///
/// # Examples
///
/// ```
/// use benefits_engine::calculation::{CurrencyNames, describe_amount};
/// use benefits_engine::models::Money;
///
/// let brl = CurrencyNames::default();
/// assert_eq!(describe_amount(Money::from_minor_units(500_000), &brl), "cinco mil reais");
/// assert_eq!(
///     describe_amount(Money::from_minor_units(150), &brl),
///     "um real e cinquenta centavos"
/// );
/// assert_eq!(describe_amount(Money::ZERO, &brl), "zero reais");
/// ```
pub fn describe_amount(amount: Money, currency: &CurrencyNames) -> String {
    let major = amount.major_units();
    let cents = amount.cents();

    let major_phrase = {
        let name = if major == 1 {
            &currency.major_singular
        } else {
            &currency.major_plural
        };
        let connector = if major >= 1_000_000 && major % 1_000_000 == 0 {
            " de "
        } else {
            " "
        };
        format!("{}{}{}", to_words(major), connector, name)
    };

    if cents == 0 {
        return major_phrase;
    }

    let minor_name = if cents == 1 {
        &currency.minor_singular
    } else {
        &currency.minor_plural
    };
    let minor_phrase = format!("{} {}", to_words(cents), minor_name);

    if major == 0 {
        minor_phrase
    } else {
        format!("{} e {}", major_phrase, minor_phrase)
    }
}
