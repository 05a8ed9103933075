//! # Currency Formatting
//!
//! Locale-aware rendering of money amounts.
//!
//! ## Supported Conventions
//! ```text
//! ┌──────────┬──────┬────────────────┬──────────────┐
//! │ Locale   │ Code │ 1234.5 renders │ Digits       │
//! ├──────────┼──────┼────────────────┼──────────────┤
//! │ en-US    │ USD  │ $1,234.50      │ 2            │
//! │ en-GB    │ GBP  │ £1,234.50      │ 2            │
//! │ en-IN    │ INR  │ ₹1,234.50      │ 2 (lakh)     │
//! │ de-DE    │ EUR  │ 1.234,50 €     │ 2            │
//! │ fr-FR    │ EUR  │ 1 234,50 €     │ 2            │
//! │ es-ES    │ EUR  │ 1.234,50 €     │ 2            │
//! │ it-IT    │ EUR  │ 1.234,50 €     │ 2            │
//! │ ja-JP    │ JPY  │ ¥1,234         │ 0            │
//! │ pt-BR    │ BRL  │ R$ 1.234,50    │ 2            │
//! └──────────┴──────┴────────────────┴──────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tiptime_core::currency::CurrencyFormat;
//!
//! let us = CurrencyFormat::for_locale("en_US.UTF-8").unwrap();
//! assert_eq!(us.format_amount(10.0), "$10.00");
//!
//! let de = CurrencyFormat::for_locale("de").unwrap();
//! assert_eq!(de.format_amount(7.5), "7,50 €");
//! ```

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Symbol Placement & Grouping
// =============================================================================

/// Where the currency symbol goes relative to the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPlacement {
    /// `$10.00`
    Prefix,
    /// `R$ 10,00`
    PrefixSpaced,
    /// `10,00 €`
    SuffixSpaced,
}

/// How integer digits are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// Groups of three: `1,234,567`
    Thousands,
    /// Last three, then twos: `12,34,567`
    Indian,
}

// =============================================================================
// Currency Format
// =============================================================================

/// One locale's currency convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyFormat {
    /// Canonical BCP 47 tag (`en-US`).
    pub locale: &'static str,
    /// ISO 4217 currency code.
    pub code: &'static str,
    /// Currency symbol shown to the user.
    pub symbol: &'static str,
    pub placement: SymbolPlacement,
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub grouping: Grouping,
    /// Minor-unit exponent (2 for cents, 0 for yen).
    pub fraction_digits: u8,
}

impl CurrencyFormat {
    pub const EN_US: CurrencyFormat = CurrencyFormat {
        locale: "en-US",
        code: "USD",
        symbol: "$",
        placement: SymbolPlacement::Prefix,
        decimal_separator: '.',
        grouping_separator: ',',
        grouping: Grouping::Thousands,
        fraction_digits: 2,
    };

    pub const EN_GB: CurrencyFormat = CurrencyFormat {
        locale: "en-GB",
        code: "GBP",
        symbol: "£",
        ..CurrencyFormat::EN_US
    };

    pub const EN_IN: CurrencyFormat = CurrencyFormat {
        locale: "en-IN",
        code: "INR",
        symbol: "₹",
        grouping: Grouping::Indian,
        ..CurrencyFormat::EN_US
    };

    pub const DE_DE: CurrencyFormat = CurrencyFormat {
        locale: "de-DE",
        code: "EUR",
        symbol: "€",
        placement: SymbolPlacement::SuffixSpaced,
        decimal_separator: ',',
        grouping_separator: '.',
        grouping: Grouping::Thousands,
        fraction_digits: 2,
    };

    pub const FR_FR: CurrencyFormat = CurrencyFormat {
        locale: "fr-FR",
        // Narrow no-break space
        grouping_separator: '\u{202F}',
        ..CurrencyFormat::DE_DE
    };

    pub const ES_ES: CurrencyFormat = CurrencyFormat {
        locale: "es-ES",
        ..CurrencyFormat::DE_DE
    };

    pub const IT_IT: CurrencyFormat = CurrencyFormat {
        locale: "it-IT",
        ..CurrencyFormat::DE_DE
    };

    pub const JA_JP: CurrencyFormat = CurrencyFormat {
        locale: "ja-JP",
        code: "JPY",
        symbol: "¥",
        fraction_digits: 0,
        ..CurrencyFormat::EN_US
    };

    pub const PT_BR: CurrencyFormat = CurrencyFormat {
        locale: "pt-BR",
        code: "BRL",
        symbol: "R$",
        placement: SymbolPlacement::PrefixSpaced,
        ..CurrencyFormat::DE_DE
    };

    /// Every built-in convention. The first entry for a language is its
    /// fallback when only the language (or an unknown region) is given.
    pub const ALL: [CurrencyFormat; 9] = [
        CurrencyFormat::EN_US,
        CurrencyFormat::EN_GB,
        CurrencyFormat::EN_IN,
        CurrencyFormat::DE_DE,
        CurrencyFormat::FR_FR,
        CurrencyFormat::ES_ES,
        CurrencyFormat::IT_IT,
        CurrencyFormat::JA_JP,
        CurrencyFormat::PT_BR,
    ];

    /// Resolves a locale tag to a currency convention.
    ///
    /// ## Accepted Forms
    /// - `en-US`, `en_US`, `en_US.UTF-8`, `de_DE@euro`
    /// - bare language: `de` → `de-DE`
    /// - unknown region of a known language: `en-AU` → `en-US`
    /// - `C` / `POSIX` → `en-US`
    pub fn for_locale(tag: &str) -> CoreResult<CurrencyFormat> {
        let normalized = normalize_tag(tag);

        if normalized.is_empty() || normalized == "c" || normalized == "posix" {
            return Ok(CurrencyFormat::EN_US);
        }

        if let Some(format) = CurrencyFormat::ALL
            .iter()
            .find(|format| format.locale.eq_ignore_ascii_case(&normalized))
        {
            return Ok(*format);
        }

        let language = normalized.split('-').next().unwrap_or_default();
        CurrencyFormat::ALL
            .iter()
            .find(|format| format.language() == language)
            .copied()
            .ok_or_else(|| CoreError::UnsupportedLocale {
                tag: tag.to_string(),
            })
    }

    /// Language subtag of this convention (`en` for `en-US`).
    pub fn language(&self) -> &'static str {
        self.locale.split('-').next().unwrap_or(self.locale)
    }

    /// Formats a decimal amount, rounding half-to-even to the currency's
    /// fraction digits.
    ///
    /// Amounts too large for [`Money`] are printed from the float's exact
    /// decimal expansion instead. Non-finite amounts render as zero.
    pub fn format_amount(&self, amount: f64) -> String {
        match Money::try_from_amount(amount, self.fraction_digits) {
            Some(money) => self.format_money(money),
            None if amount.is_finite() => self.format_wide(amount),
            None => self.format_money(Money::zero()),
        }
    }

    /// Formats an amount already expressed in this currency's minor units.
    pub fn format_money(&self, money: Money) -> String {
        let (major, minor) = money.split(self.fraction_digits);
        let minor = format!(
            "{:0width$}",
            minor,
            width = usize::from(self.fraction_digits)
        );
        self.compose(&major.to_string(), &minor, money.is_negative())
    }

    fn format_wide(&self, amount: f64) -> String {
        let text = format!(
            "{:.*}",
            usize::from(self.fraction_digits),
            amount.abs()
        );
        let (major, minor) = text.split_once('.').unwrap_or((text.as_str(), ""));
        self.compose(major, minor, amount < 0.0)
    }

    fn compose(&self, major: &str, minor: &str, negative: bool) -> String {
        let mut number = self.group_digits(major);
        if self.fraction_digits > 0 {
            number.push(self.decimal_separator);
            number.push_str(minor);
        }

        let body = match self.placement {
            SymbolPlacement::Prefix => format!("{}{}", self.symbol, number),
            SymbolPlacement::PrefixSpaced => format!("{} {}", self.symbol, number),
            SymbolPlacement::SuffixSpaced => format!("{} {}", number, self.symbol),
        };

        if negative {
            format!("-{}", body)
        } else {
            body
        }
    }

    fn group_digits(&self, digits: &str) -> String {
        let len = digits.len();
        if len <= 3 {
            return digits.to_string();
        }

        // Positions (from the left) before which a separator goes
        let (head, tail) = digits.split_at(len - 3);
        let group = match self.grouping {
            Grouping::Thousands => 3,
            Grouping::Indian => 2,
        };

        let mut out = String::with_capacity(len + len / 2);
        for (i, ch) in head.chars().enumerate() {
            if i > 0 && (head.len() - i) % group == 0 {
                out.push(self.grouping_separator);
            }
            out.push(ch);
        }
        out.push(self.grouping_separator);
        out.push_str(tail);
        out
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        CurrencyFormat::EN_US
    }
}

/// `en_US.UTF-8@euro` → `en-us`
fn normalize_tag(tag: &str) -> String {
    tag.trim()
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .replace('_', "-")
        .to_ascii_lowercase()
}

// =============================================================================
// Unit Tests
// =============================================================================
