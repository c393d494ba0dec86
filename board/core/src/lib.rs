//! Stockboard Core - Match Telemetry to Pixels
//!
//! This crate turns a stream of line-delimited JSON match telemetry into
//! 64x64 frames for an LED matrix, completely independent of any panel
//! driver. It can feed real matrix hardware, a terminal preview, or an
//! in-memory display for tests.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   JSON lines    ┌──────────────┐   mutations   ┌──────────────┐
//! │   Telemetry  ├────────────────►│    Ingest    ├──────────────►│  MatchStore  │
//! │   producer   │   (TCP)         │  (validate,  │               │ (shared rw)  │
//! └──────────────┘                 │   resolve)   │               └──────┬───────┘
//!                                  └──────────────┘                      │
//!                                                               snapshot │ per tick
//!                                                                        ▼
//! ┌──────────────┐    frames     ┌──────────────┐   scenes    ┌──────────────────┐
//! │ DisplayTarget│◄──────────────┤ RenderMachine│◄────────────┤  MatchState      │
//! │ (panel, tty, │  commit/      │ (phase per   │             │  snapshot        │
//! │  memory)     │  present      │  tick)       │             └──────────────────┘
//! └──────────────┘               └──────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`MatchStore`]: Shared match state, one writer side (ingest) and one
//!   reader side (render)
//! - [`TelemetryEvent`]: The wire messages the ingest accepts
//! - [`RenderMachine`]: The tick driver that owns the display
//! - [`DisplayTarget`]: The commit/present boundary in front of the panel
//! - [`Frame`]: A 64x64 RGB pixel grid
//!
//! # Module Overview
//!
//! - [`color`]: Palette tables, identity resolution, icon keys
//! - [`config`]: TOML configuration with defaults
//! - [`display`]: The display boundary and the in-memory implementation
//! - [`events`]: Wire message types
//! - [`font`]: The built-in 4x6 glyph face
//! - [`frame`]: Pixel grid and drawing primitives
//! - [`icons`]: Character icon assets and the missing-asset stand-in
//! - [`ingest`]: Event application and the TCP line server
//! - [`layout`]: Fixed panel geometry per player count
//! - [`render`]: The phase machine and scene drawing
//! - [`state`]: Match state, the shared store, mutation rules

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod color;
pub mod config;
pub mod display;
pub mod events;
pub mod font;
pub mod frame;
pub mod icons;
pub mod ingest;
pub mod layout;
pub mod render;
pub mod state;

// Re-exports for convenience
pub use color::{IconKey, ResolvedIdentity, Resolver, Rgb};
pub use config::{Config, ConfigError};
pub use display::{DisplayError, DisplayTarget, MemoryDisplay};
pub use events::TelemetryEvent;
pub use frame::Frame;
pub use icons::{Icon, IconSource, NoIcons};
pub use ingest::{Ingest, IngestError};
pub use render::{RenderError, RenderMachine, RenderPhase};
pub use state::{MatchPhase, MatchState, MatchStore};
