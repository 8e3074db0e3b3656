//! Feature-name dispatch.
//!
//! The stored matrix was built from a table with price columns, a handful of
//! same-day derived columns and history-dependent columns (moving averages,
//! momentum, gap). A single-point query only knows one day, so the
//! history-dependent columns are zero-filled.

use crate::config::PADDING_PREFIX;

/// One day's open/high/low/close prices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ohlc {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Ohlc {
    pub fn new(open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            open,
            high,
            low,
            close,
        }
    }

    /// `true` when every price is a finite number.
    pub fn is_finite(&self) -> bool {
        [self.open, self.high, self.low, self.close]
            .iter()
            .all(|p| p.is_finite())
    }

    /// `(close - open) / open`, or 0 when `open` is zero.
    pub fn returns(&self) -> f64 {
        if self.open != 0.0 {
            (self.close - self.open) / self.open
        } else {
            0.0
        }
    }

    /// `high - low`.
    pub fn price_range(&self) -> f64 {
        self.high - self.low
    }

    /// `(high - low) / close * 100`, or 0 when `close` is zero.
    pub fn volatility(&self) -> f64 {
        if self.close != 0.0 {
            (self.high - self.low) / self.close * 100.0
        } else {
            0.0
        }
    }

    /// `close - open`.
    pub fn daily_change(&self) -> f64 {
        self.close - self.open
    }
}

/// How a named feature column is derived from a single OHLC quartet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    Open,
    High,
    Low,
    Close,
    /// `padding_*` columns, always 0.
    Padding,
    Returns,
    PriceRange,
    Volatility,
    DailyChange,
    /// Needs history a single day cannot provide; zero-filled.
    Unavailable,
}

impl FeatureKind {
    /// Maps a stored feature name to its derivation. Unknown names map to
    /// [`FeatureKind::Unavailable`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "Open" => FeatureKind::Open,
            "High" => FeatureKind::High,
            "Low" => FeatureKind::Low,
            "Close" => FeatureKind::Close,
            n if n.starts_with(PADDING_PREFIX) => FeatureKind::Padding,
            "Returns" => FeatureKind::Returns,
            "Price_Range" => FeatureKind::PriceRange,
            "Volatility" => FeatureKind::Volatility,
            "Daily_Change" => FeatureKind::DailyChange,
            _ => FeatureKind::Unavailable,
        }
    }

    /// Raw (unscaled) value of this feature for one day.
    pub fn value(self, p: &Ohlc) -> f64 {
        match self {
            FeatureKind::Open => p.open,
            FeatureKind::High => p.high,
            FeatureKind::Low => p.low,
            FeatureKind::Close => p.close,
            FeatureKind::Padding | FeatureKind::Unavailable => 0.0,
            FeatureKind::Returns => p.returns(),
            FeatureKind::PriceRange => p.price_range(),
            FeatureKind::Volatility => p.volatility(),
            FeatureKind::DailyChange => p.daily_change(),
        }
    }
}

/// Builds the raw feature vector in `kinds` order.
pub fn raw_features(kinds: &[FeatureKind], prices: &Ohlc) -> Vec<f64> {
    kinds.iter().map(|k| k.value(prices)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(names: &[&str]) -> Vec<FeatureKind> {
        names.iter().map(|n| FeatureKind::from_name(n)).collect()
    }

    #[test]
    fn test_flat_day_has_zero_derived_features() {
        for p in [1.0, 100.0, -3.5, 1e6] {
            let day = Ohlc::new(p, p, p, p);
            assert_eq!(day.returns(), 0.0);
            assert_eq!(day.price_range(), 0.0);
            assert_eq!(day.volatility(), 0.0);
            assert_eq!(day.daily_change(), 0.0);
        }
    }

    #[test]
    fn test_zero_open_and_close_guarded() {
        let day = Ohlc::new(0.0, 2.0, 1.0, 0.0);
        assert_eq!(day.returns(), 0.0);
        assert_eq!(day.volatility(), 0.0);
        assert_eq!(day.price_range(), 1.0);
    }

    #[test]
    fn test_derived_values() {
        let day = Ohlc::new(100.0, 105.0, 99.0, 103.0);
        assert!((day.returns() - 0.03).abs() < 1e-12);
        assert_eq!(day.price_range(), 6.0);
        assert!((day.volatility() - 600.0 / 103.0).abs() < 1e-12);
        assert_eq!(day.daily_change(), 3.0);
    }

    #[test]
    fn test_name_dispatch() {
        let k = kinds(&[
            "Open",
            "High",
            "Low",
            "Close",
            "padding_0",
            "Returns",
            "Price_Range",
            "Volatility",
            "Daily_Change",
            "MA_5",
            "Momentum",
            "Gap",
        ]);
        let raw = raw_features(&k, &Ohlc::new(100.0, 105.0, 99.0, 103.0));
        assert_eq!(&raw[..5], &[100.0, 105.0, 99.0, 103.0, 0.0]);
        assert_eq!(raw[6], 6.0);
        assert_eq!(raw[8], 3.0);
        assert_eq!(&raw[9..], &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_price_names_win_over_padding_prefix() {
        assert_eq!(FeatureKind::from_name("padding_Open"), FeatureKind::Padding);
        assert_eq!(FeatureKind::from_name("open"), FeatureKind::Unavailable);
    }
}
