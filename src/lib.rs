//! Coffer core library.
//!
//! This crate exposes the corporate Bitcoin treasury allocation engine.
//! The binary (`src/main.rs`) is just a thin CLI / export harness around
//! these components.
//!
//! # Architecture
//!
//! The codebase follows a clean separation between allocation logic and I/O:
//!
//! - **Engine** (`engine`): Pure, deterministic function that maps a
//!   company profile to an allocation report. No I/O.
//!
//! - **Config** (`config`): The `Profile` input struct and its
//!   CLI > env > default resolution.
//!
//! - **Report** (`report`): Data-transfer object returned by the engine,
//!   consumed by rendering/export collaborators.
//!
//! - **Export** (`export`): Report document, JSON export, and shareable
//!   link. Swappable presentation plumbing; the engine never depends on it.
//!
//! - **Telemetry** (`telemetry`): Env-controlled JSONL sink for
//!   per-evaluation records.

pub mod config;
pub mod engine;
pub mod export;
pub mod report;
pub mod telemetry;
pub mod types;

// --- Re-exports for ergonomic external use ---------------------------------

pub use config::{resolve_effective_profile, EffectiveProfile, Profile, ProfileSource};

pub use engine::evaluate;

pub use report::Report;

pub use export::{
    format_pct, format_usd, parse_share_link, render_report_doc, share_link, write_report_doc,
    ExportBundle, ExportFields,
};

pub use telemetry::{TelemetryMode, TelemetrySink};

pub use types::{AccountingStandard, AllocationTier, RevenueVolatility, TreasuryObjective};
