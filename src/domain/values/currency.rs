use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    Usd,
    Inr,
}

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Inr => "₹",
        }
    }

    /// Formats an amount with the currency symbol and two decimals (`$20.00`).
    pub fn format_amount(&self, amount: f64) -> String {
        format!("{}{:.2}", self.symbol(), amount)
    }

    /// Parses listing price text such as `$1,299.99` or `₹4,500.00`.
    ///
    /// Only this currency's symbol and thousands separators are stripped, so
    /// text priced in another currency does not parse. Zero, negative and
    /// non-finite amounts count as absent.
    pub fn parse_price(&self, text: &str) -> Option<f64> {
        let cleaned: String = text
            .replace(self.symbol(), "")
            .replace(',', "")
            .trim()
            .to_string();
        if cleaned.is_empty() {
            return None;
        }
        cleaned
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v > 0.0)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::Usd => write!(f, "usd"),
            Currency::Inr => write!(f, "inr"),
        }
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "usd" => Ok(Currency::Usd),
            "inr" => Ok(Currency::Inr),
            _ => Err(format!("Unknown currency: {s}")),
        }
    }
}
