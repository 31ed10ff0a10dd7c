// File: crates/capture-core/src/series.rs
// Summary: Series model for line and candlestick data.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeriesType {
    Line,
    Candlestick,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candle {
    pub t: f64,  // time/index (displayed on X)
    pub o: f64,
    pub h: f64,
    pub l: f64,
    pub c: f64,
}

impl Candle {
    /// Try to construct a candle enforcing OHLC invariants:
    /// l <= min(o,c) and h >= max(o,c), and l <= h.
    pub fn try_new(t: f64, o: f64, h: f64, l: f64, c: f64) -> Result<Self, &'static str> {
        let lo = o.min(c);
        let hi = o.max(c);
        if l > lo { return Err("low above min(open,close)"); }
        if h < hi { return Err("high below max(open,close)"); }
        if l > h { return Err("low above high"); }
        Ok(Self { t, o, h, l, c })
    }
}

#[derive(Clone, Debug)]
pub struct Series {
    pub series_type: SeriesType,
    pub data_xy: Vec<(f64, f64)>,     // used by Line
    pub data_ohlc: Vec<Candle>,       // used by Candlestick
}

impl Series {
    pub fn with_data(series_type: SeriesType, data: Vec<(f64, f64)>) -> Self {
        Self { series_type, data_xy: data, data_ohlc: Vec::new() }
    }

    pub fn line(data: Vec<(f64, f64)>) -> Self {
        Self::with_data(SeriesType::Line, data)
    }

    pub fn from_candles(candles: Vec<Candle>) -> Self {
        Self { series_type: SeriesType::Candlestick, data_xy: Vec::new(), data_ohlc: candles }
    }

    /// Data bounds as `(x_min, x_max, y_min, y_max)`, or `None` when empty.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let mut b = (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY);
        match self.series_type {
            SeriesType::Line => {
                for &(x, y) in &self.data_xy {
                    b = (b.0.min(x), b.1.max(x), b.2.min(y), b.3.max(y));
                }
            }
            SeriesType::Candlestick => {
                for c in &self.data_ohlc {
                    b = (b.0.min(c.t), b.1.max(c.t), b.2.min(c.l), b.3.max(c.h));
                }
            }
        }
        if b.0.is_finite() && b.1.is_finite() && b.2.is_finite() && b.3.is_finite() { Some(b) } else { None }
    }
}
