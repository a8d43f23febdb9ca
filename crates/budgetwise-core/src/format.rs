use chrono::NaiveDate;

/// Formats currency amounts for presentation.
pub trait CurrencyFormatter: Send + Sync {
    fn format_amount(&self, amount: f64, currency: &str) -> String;
}

/// Formats dates for presentation.
pub trait DateFormatter: Send + Sync {
    fn format_date(&self, date: NaiveDate) -> String;
}

/// Separator conventions derived from a language tag.
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleFormatter {
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl Default for LocaleFormatter {
    fn default() -> Self {
        Self::for_locale("en-US")
    }
}

impl LocaleFormatter {
    pub fn for_locale(tag: &str) -> Self {
        let language = tag.split(['-', '_']).next().unwrap_or_default();
        let (decimal_separator, grouping_separator) = match language.to_ascii_lowercase().as_str() {
            "de" | "es" | "it" | "nl" | "pt" | "id" | "tr" => (',', '.'),
            "fr" | "sv" | "nb" | "fi" | "pl" | "cs" | "ru" => (',', ' '),
            _ => ('.', ','),
        };
        Self {
            language_tag: tag.to_string(),
            decimal_separator,
            grouping_separator,
        }
    }

    fn group_digits(&self, digits: &str) -> String {
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (index, ch) in digits.chars().enumerate() {
            if index > 0 && (digits.len() - index) % 3 == 0 {
                grouped.push(self.grouping_separator);
            }
            grouped.push(ch);
        }
        grouped
    }
}

impl CurrencyFormatter for LocaleFormatter {
    fn format_amount(&self, amount: f64, currency: &str) -> String {
        let fixed = format!("{:.2}", amount.abs());
        let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
        let number = format!(
            "{}{}{}",
            self.group_digits(whole),
            self.decimal_separator,
            fraction
        );
        let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
        match currency_symbol(currency) {
            Some(symbol) => format!("{sign}{symbol}{number}"),
            None => format!("{sign}{} {number}", currency.to_uppercase()),
        }
    }
}

impl DateFormatter for LocaleFormatter {
    fn format_date(&self, date: NaiveDate) -> String {
        date.format("%b %-d, %Y").to_string()
    }
}

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code.to_ascii_uppercase().as_str() {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        "INR" => Some("₹"),
        _ => None,
    }
}

/// Percentage with two decimals, e.g. `25.17%`.
pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_us_dollars_with_grouping() {
        let formatter = LocaleFormatter::default();
        assert_eq!(formatter.format_amount(1724.5, "USD"), "$1,724.50");
        assert_eq!(formatter.format_amount(-1234567.891, "usd"), "-$1,234,567.89");
        assert_eq!(formatter.format_amount(0.0, "USD"), "$0.00");
    }

    #[test]
    fn unknown_currency_falls_back_to_code() {
        let formatter = LocaleFormatter::for_locale("de-DE");
        assert_eq!(formatter.format_amount(1200.0, "chf"), "CHF 1.200,00");
    }

    #[test]
    fn formats_dates_and_percentages() {
        let formatter = LocaleFormatter::default();
        let date = NaiveDate::from_ymd_opt(2024, 7, 2).unwrap();
        assert_eq!(formatter.format_date(date), "Jul 2, 2024");
        assert_eq!(format_percent(75.5 / 300.0 * 100.0), "25.17%");
    }
}
