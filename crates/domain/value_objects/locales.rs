use serde::Serialize;

use crate::domain::value_objects::enums::languages::Language;

pub const DEFAULT_COUNTRY_CODE: &str = "us";

/// Formatting rules for one country. Amounts are stored in USD and converted by `rate`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CountryConfig {
    pub code: &'static str,
    pub label: &'static str,
    pub flag: &'static str,
    pub currency: &'static str,
    pub currency_symbol: &'static str,
    pub rate: f64,
    pub lang: Language,
}

const fn country(
    code: &'static str,
    label: &'static str,
    flag: &'static str,
    currency: &'static str,
    currency_symbol: &'static str,
    rate: f64,
    lang: Language,
) -> CountryConfig {
    CountryConfig {
        code,
        label,
        flag,
        currency,
        currency_symbol,
        rate,
        lang,
    }
}

pub static COUNTRIES: [CountryConfig; 30] = [
    country("us", "United States", "🇺🇸", "USD", "$", 1.0, Language::En),
    country("in", "India", "🇮🇳", "INR", "₹", 83.5, Language::Hi),
    country("gb", "United Kingdom", "🇬🇧", "GBP", "£", 0.79, Language::En),
    country("eu", "Eurozone", "🇪🇺", "EUR", "€", 0.92, Language::En),
    country("ca", "Canada", "🇨🇦", "CAD", "C$", 1.36, Language::En),
    country("au", "Australia", "🇦🇺", "AUD", "A$", 1.53, Language::En),
    country("jp", "Japan", "🇯🇵", "JPY", "¥", 149.5, Language::En),
    country("kr", "South Korea", "🇰🇷", "KRW", "₩", 1320.0, Language::En),
    country("cn", "China", "🇨🇳", "CNY", "¥", 7.24, Language::En),
    country("br", "Brazil", "🇧🇷", "BRL", "R$", 4.97, Language::En),
    country("mx", "Mexico", "🇲🇽", "MXN", "$", 17.1, Language::En),
    country("de", "Germany", "🇩🇪", "EUR", "€", 0.92, Language::En),
    country("fr", "France", "🇫🇷", "EUR", "€", 0.92, Language::En),
    country("sg", "Singapore", "🇸🇬", "SGD", "S$", 1.34, Language::En),
    country("ae", "UAE", "🇦🇪", "AED", "د.إ", 3.67, Language::En),
    country("sa", "Saudi Arabia", "🇸🇦", "SAR", "﷼", 3.75, Language::En),
    country("za", "South Africa", "🇿🇦", "ZAR", "R", 18.6, Language::En),
    country("ng", "Nigeria", "🇳🇬", "NGN", "₦", 1550.0, Language::En),
    country("eg", "Egypt", "🇪🇬", "EGP", "E£", 30.9, Language::En),
    country("se", "Sweden", "🇸🇪", "SEK", "kr", 10.5, Language::En),
    country("ch", "Switzerland", "🇨🇭", "CHF", "CHF", 0.88, Language::En),
    country("nz", "New Zealand", "🇳🇿", "NZD", "NZ$", 1.64, Language::En),
    country("th", "Thailand", "🇹🇭", "THB", "฿", 35.5, Language::En),
    country("id", "Indonesia", "🇮🇩", "IDR", "Rp", 15700.0, Language::En),
    country("my", "Malaysia", "🇲🇾", "MYR", "RM", 4.72, Language::En),
    country("ph", "Philippines", "🇵🇭", "PHP", "₱", 56.2, Language::En),
    country("pk", "Pakistan", "🇵🇰", "PKR", "₨", 278.0, Language::En),
    country("bd", "Bangladesh", "🇧🇩", "BDT", "৳", 110.0, Language::En),
    country("tr", "Turkey", "🇹🇷", "TRY", "₺", 32.3, Language::En),
    country("pl", "Poland", "🇵🇱", "PLN", "zł", 4.02, Language::En),
];

pub fn find_country(code: &str) -> Option<&'static CountryConfig> {
    let code = code.trim().to_ascii_lowercase();
    COUNTRIES.iter().find(|country| country.code == code)
}

pub fn default_country() -> &'static CountryConfig {
    &COUNTRIES[0]
}

pub fn country_or_default(code: &str) -> &'static CountryConfig {
    find_country(code).unwrap_or_else(default_country)
}

/// Picks India for Hindi speakers or an Indian time zone, the US otherwise.
pub fn detect_country(language_tag: Option<&str>, time_zone: Option<&str>) -> &'static CountryConfig {
    let hindi = language_tag
        .map(|tag| tag.trim().to_ascii_lowercase().starts_with("hi"))
        .unwrap_or(false);
    let indian_zone = time_zone
        .map(|zone| zone.contains("Kolkata") || zone.contains("Calcutta"))
        .unwrap_or(false);

    if hindi || indian_zone {
        return country_or_default("in");
    }
    default_country()
}

impl CountryConfig {
    fn fraction_digits(&self) -> usize {
        match self.currency {
            "INR" | "JPY" | "KRW" | "IDR" => 0,
            _ => 2,
        }
    }

    /// Converts a USD amount into this country's currency and renders it with its symbol.
    pub fn format_currency(&self, amount_usd: f64) -> String {
        let converted = amount_usd * self.rate;
        let fixed = format!("{:.*}", self.fraction_digits(), converted.abs());
        let negative = converted < 0.0 && fixed.chars().any(|ch| ch.is_ascii_digit() && ch != '0');
        let sign = if negative { "-" } else { "" };

        let (whole, fraction) = match fixed.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (fixed.as_str(), None),
        };

        let grouped = if self.currency == "INR" {
            group_indian(whole)
        } else {
            group_thousands(whole)
        };

        match fraction {
            Some(fraction) => format!("{}{}{}.{}", sign, self.currency_symbol, grouped, fraction),
            None => format!("{}{}{}", sign, self.currency_symbol, grouped),
        }
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Lakh/crore grouping: last three digits, then pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut out = String::new();
    for (index, ch) in head.chars().enumerate() {
        if index > 0 && (head.len() - index) % 2 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push(',');
    out.push_str(tail);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_unique_codes() {
        let mut codes: Vec<&str> = COUNTRIES.iter().map(|country| country.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), COUNTRIES.len());
    }

    #[test]
    fn usd_uses_two_decimals() {
        assert_eq!(default_country().format_currency(15.99), "$15.99");
        assert_eq!(default_country().format_currency(1234.5), "$1,234.50");
    }

    #[test]
    fn inr_uses_indian_grouping_without_decimals() {
        let india = country_or_default("in");
        // 1500 * 83.5 = 125250
        assert_eq!(india.format_currency(1500.0), "₹1,25,250");
        assert_eq!(india.format_currency(2.0), "₹167");
    }

    #[test]
    fn yen_has_no_decimals() {
        let japan = country_or_default("JP");
        assert_eq!(japan.format_currency(10.0), "¥1,495");
    }

    #[test]
    fn unknown_code_falls_back_to_us() {
        assert_eq!(country_or_default("zz").code, "us");
    }

    #[test]
    fn detection_prefers_india_for_hindi_or_kolkata() {
        assert_eq!(detect_country(Some("hi-IN"), None).code, "in");
        assert_eq!(detect_country(Some("en-US"), Some("Asia/Kolkata")).code, "in");
        assert_eq!(detect_country(Some("en_GB.UTF-8"), Some("Europe/London")).code, "us");
        assert_eq!(detect_country(None, None).code, "us");
    }
}
