//! xyplot: declarative figure documents applied through binding tables.
//!
//! This module exports the core components for testing and integration.

pub mod backend;
pub mod builder;
pub mod cli;
pub mod config;
pub mod director;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod logging;
pub mod scene;
pub mod setters;
