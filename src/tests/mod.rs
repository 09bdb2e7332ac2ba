//! integrated tests
pub mod toolkit;

mod timeframe;
