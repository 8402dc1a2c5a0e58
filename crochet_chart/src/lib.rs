// THEORY:
// This file is the main entry point for the `crochet_chart` library crate.
// It exposes the `ChartPipeline` and its associated data structures
// (`ChartConfig`, `ChartReport`, etc.) as the high-level interface for turning
// a bitmap into a charted crochet pattern.
//
// The leaf components (`core_modules`) stay public so that callers can drive a
// single stage on its own: average one region, pixelate an image, or walk the
// spiral over a raster they already have. Image decoding and encoding live in
// `core_modules::utils::image_helper` and are the only place that touches a
// concrete file format.

pub mod core_modules;
pub mod error;
pub mod parallel_pipeline;
pub mod pipeline;

pub use error::ChartError;
