//! Signal engine types.

use serde::{Deserialize, Serialize};

/// Risk appetite for the signal engine. Selects how extreme the RSI
/// has to be before it contributes to a buy or sell case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskProfile {
    Low,
    #[default]
    Medium,
    High,
}

impl RiskProfile {
    /// (buy_threshold, sell_threshold): RSI below the first supports a
    /// buy, above the second supports a sell.
    pub fn rsi_thresholds(&self) -> (f64, f64) {
        match self {
            RiskProfile::Low => (25.0, 65.0),
            RiskProfile::Medium => (30.0, 70.0),
            RiskProfile::High => (40.0, 80.0),
        }
    }
}

/// Recommended action for one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalAction {
    Buy,
    Sell,
    Hold,
    /// Not enough data to say anything
    Wait,
}

impl std::fmt::Display for SignalAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalAction::Buy => write!(f, "BUY"),
            SignalAction::Sell => write!(f, "SELL"),
            SignalAction::Hold => write!(f, "HOLD"),
            SignalAction::Wait => write!(f, "WAIT"),
        }
    }
}

/// Short-vs-long moving average relationship.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Bullish,
    Bearish,
    #[default]
    Neutral,
}

/// Tuning for one signal evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    pub risk_profile: RiskProfile,
    /// Bucket width of the history being evaluated, informational only
    pub interval_minutes: u32,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            risk_profile: RiskProfile::Medium,
            interval_minutes: 5,
        }
    }
}

/// Indicator values behind a signal, surfaced for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub rsi: f64,
    pub trend: Trend,
    pub volatility: f64,
}

impl Default for IndicatorSnapshot {
    fn default() -> Self {
        Self {
            rsi: 50.0,
            trend: Trend::Neutral,
            volatility: 0.0,
        }
    }
}

/// Outcome of evaluating one item's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalResult {
    pub action: SignalAction,
    /// Composite score, 0-100, 50 is neutral
    pub score: f64,
    /// Distance from neutral, 0-100
    pub confidence: f64,
    pub reasoning: Vec<String>,
    pub indicators: IndicatorSnapshot,
}

impl SignalResult {
    /// The fixed result returned when history is too thin to evaluate.
    pub fn insufficient_data() -> Self {
        Self {
            action: SignalAction::Wait,
            score: 0.0,
            confidence: 0.0,
            reasoning: vec!["insufficient data".to_string()],
            indicators: IndicatorSnapshot::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_thresholds_widen_with_risk() {
        assert_eq!(RiskProfile::Low.rsi_thresholds(), (25.0, 65.0));
        assert_eq!(RiskProfile::Medium.rsi_thresholds(), (30.0, 70.0));
        assert_eq!(RiskProfile::High.rsi_thresholds(), (40.0, 80.0));
    }

    #[test]
    fn test_insufficient_data_result() {
        let r = SignalResult::insufficient_data();
        assert_eq!(r.action, SignalAction::Wait);
        assert_eq!(r.score, 0.0);
        assert_eq!(r.confidence, 0.0);
        assert_eq!(r.reasoning, vec!["insufficient data".to_string()]);
        assert_eq!(r.indicators.rsi, 50.0);
        assert_eq!(r.indicators.trend, Trend::Neutral);
    }

    #[test]
    fn test_action_display() {
        assert_eq!(SignalAction::Buy.to_string(), "BUY");
        assert_eq!(SignalAction::Wait.to_string(), "WAIT");
    }
}
