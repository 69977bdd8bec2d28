#![forbid(unsafe_code)]

//! Ticker demo
//!
//! A terminal host for [`ticker_runtime::Marquee`]: argument parsing, file
//! logging, and a crossterm renderer that draws both lanes on one row.

pub mod cli;
pub mod logging;
pub mod terminal;
