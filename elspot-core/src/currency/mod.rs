//! Currency handling: conversion through the EUR pivot, snapshot
//! harmonization, and the per-day rate cache.
//!
//! Modules include:
//! - `convert`: scalar conversion and per-point series preparation
//! - `rates`: rate-feed traits, harmonization, and the cache

/// Scalar conversion and per-point series preparation.
pub mod convert;
/// Rate-feed traits, snapshot harmonization, and the per-day cache.
pub mod rates;

pub use convert::{convert, prepare_points};
pub use rates::{RateCache, RateFeed, RateLookup, harmonize};

/// Currency every conversion is routed through.
pub const PIVOT: &str = "EUR";

/// Round to twelve decimal places, bounding drift in rebased rates.
pub(crate) fn round12(value: f64) -> f64 {
    (value * 1e12).round() / 1e12
}
