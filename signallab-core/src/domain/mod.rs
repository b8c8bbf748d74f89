//! Domain types: candles, validated series, and the f64 price frame the
//! indicators run on.

pub mod candle;
pub mod frame;
pub mod ids;

pub use candle::{Candle, CandleSeries, SeriesError};
pub use frame::PriceFrame;
pub use ids::{ConfigHash, DatasetHash};
