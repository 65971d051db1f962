//! On-screen stat lines derived from the ledger.

use crate::market::LiquidityLedger;
use crate::utils::format::commify;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum StatValue {
    Number(f64),
    Text(String),
}

/// One `Label: value` row. Numbers render with thousands separators.
#[derive(Debug, Clone, PartialEq)]
pub struct StatLine {
    pub label: &'static str,
    pub value: StatValue,
}

impl StatLine {
    pub fn number(label: &'static str, value: f64) -> Self {
        Self {
            label,
            value: StatValue::Number(value),
        }
    }

    pub fn text(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: StatValue::Text(value.into()),
        }
    }
}

impl fmt::Display for StatLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            StatValue::Number(n) => write!(f, "{}: {}", self.label, commify(*n)),
            StatValue::Text(s) => write!(f, "{}: {}", self.label, s),
        }
    }
}

/// Current ledger readings in display order.
pub fn snapshot(ledger: &LiquidityLedger) -> Vec<StatLine> {
    vec![
        StatLine::number("Score", ledger.score() as f64),
        StatLine::number("Liquidity", ledger.liquidity()),
        StatLine::number("Longs", ledger.longs_volume()),
        StatLine::number("Shorts", ledger.shorts_volume()),
        StatLine::number("Volume", ledger.total_volume()),
        StatLine::text("Top Speed", format!("{:.1}", ledger.top_speed())),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_stat_is_commified() {
        assert_eq!(
            StatLine::number("Liquidity", 100_000.0).to_string(),
            "Liquidity: 100,000"
        );
    }

    #[test]
    fn test_text_stat() {
        assert_eq!(StatLine::text("Mode", "Master").to_string(), "Mode: Master");
    }

    #[test]
    fn test_snapshot_of_fresh_ledger() {
        let lines: Vec<String> = snapshot(&LiquidityLedger::new())
            .iter()
            .map(|l| l.to_string())
            .collect();
        assert_eq!(
            lines,
            vec![
                "Score: 0",
                "Liquidity: 100,000",
                "Longs: 0",
                "Shorts: 0",
                "Volume: 0",
                "Top Speed: 0.0",
            ]
        );
    }
}
