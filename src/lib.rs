//! speedcheck analyzes web pages with the PageSpeed Insights API and
//! renders the results as plain-text reports.
//!
//! The library is organized around a small pipeline: [`client`] fetches
//! raw analyses, [`runner`] drives a batch of URLs over a worker pool
//! with retries, [`report`] turns raw responses into display-ready
//! reports, and [`output`] renders them.

pub mod cli;
pub mod client;
pub mod config;
pub mod core;
pub mod logging;
pub mod output;
pub mod progress;
pub mod report;
pub mod runner;
pub mod table;
pub mod textutil;

pub use crate::core::error::{Result, SpeedcheckError};
pub use report::{Audit, Category, Report};
