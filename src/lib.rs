//! Minisector comparison of the two fastest laps of a timed session.
//!
//! The track is cut into equal-length minisectors, each one is awarded to the
//! driver with the higher mean speed through it, and the result is drawn onto
//! the physical shape of the circuit as a color-coded SVG map.
//!
//! # Features
//!
//! - **Segment comparison**: pure, deterministic, tie-aware
//! - **Track maps**: equal-aspect SVG rendering with legend, stats, and a
//!   direction arrow
//! - **Swappable data sources**: a narrow async [`SessionProvider`] trait with
//!   archive and in-memory implementations
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use minisector::{AnalysisConfig, ArchiveProvider, SessionKey, analyze};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = ArchiveProvider::new("/path/to/archive");
//!     let session = SessionKey::qualifying(2023, "Bahrain Grand Prix");
//!
//!     let analysis = analyze(&provider, &session, &AnalysisConfig::default()).await?;
//!     std::fs::write("minisectors.svg", analysis.image.as_svg())?;
//!     Ok(())
//! }
//! ```

// Core types and error handling
mod error;
#[cfg_attr(any(test, feature = "benchmark"), path = "test_utils.rs")]
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod types;

// Analysis
pub mod analysis;
pub mod comparator;
pub mod config;
pub mod render;

// Data sources
pub mod provider;
pub mod providers;

// Core exports
pub use error::*;
pub use types::*;

pub use analysis::{Analysis, analyze};
pub use comparator::{
    AnnotatedSample, ComparisonResult, Competitor, CompetitorSummary, DEFAULT_MINISECTORS,
    MAX_MINISECTORS, MinisectorResult, Minisectors, SegmentComparator, SegmentStats, Winner,
    compare,
};
pub use config::AnalysisConfig;
pub use render::{HexColor, RenderOptions, TrackImage, TrackRenderer};

// Data source exports
pub use provider::SessionProvider;
pub use providers::{ArchiveProvider, MemoryProvider};
