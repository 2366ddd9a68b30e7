//! Technical indicators over market price series.
//!
//! Implementations of the common indicators used by the signal engine:
//! - Moving averages (SMA, EMA)
//! - Momentum indicators (RSI, MACD)
//! - Volatility indicators (Bollinger Bands)
//!
//! Apart from the SMA, every indicator here produces one output per input
//! point: warm-up positions are filled with a documented neutral value
//! (50 for RSI, the raw price for Bollinger Bands) so outputs stay
//! aligned with their input series. Input shorter than the minimum period
//! yields an empty vector, never an error.

pub mod momentum;
pub mod moving_average;
pub mod volatility;

pub use momentum::{Macd, MacdOutput, Rsi};
pub use moving_average::{Ema, Sma};
pub use volatility::{BollingerBands, BollingerOutput};
