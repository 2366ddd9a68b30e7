//! Trade accounting: FIFO flip matching and the portfolio ledger.

pub mod matcher;
pub mod portfolio;

pub use matcher::match_trades;
pub use portfolio::{PortfolioLedger, PortfolioSummary};
