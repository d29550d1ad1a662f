#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cast_precision_loss
)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Drawing-session engine for a freehand circle game.
//!
//! This crate is device-agnostic. Pointer input arrives through
//! `circle_traits::PointerSource`, already mapped to surface coordinates by a
//! `circle_traits::SurfaceTransform`; the engine only sees timestamped points.
//!
//! ## Architecture
//!
//! - **Geometry**: distance, angle, quadrant and turn-angle helpers (`geometry`)
//! - **Scoring**: per-sample fit and whole-trace roundness (`accuracy`)
//! - **Completion**: four-quadrant return-to-start test (`completion`)
//! - **Validation**: too small / not circle / too slow rules (`validator`)
//! - **Session**: the Idle → Drawing → Finished state machine (`session`)
//! - **Runtime**: idle ticker and the single-writer event loop (`ticker`, `runner`)

pub mod accuracy;
pub mod builder;
pub mod completion;
pub mod config;
#[cfg(feature = "config")]
pub mod conversions;
pub mod error;
pub mod event;
pub mod geometry;
pub mod mocks;
pub mod runner;
pub mod session;
pub mod status;
pub mod synth;
pub mod ticker;
pub mod types;
pub mod util;
pub mod validator;

pub use accuracy::{AccuracySummary, aggregate_accuracy, point_accuracy};
pub use builder::CircleSessionBuilder;
pub use completion::{QuadrantCoverage, is_complete};
pub use config::SessionCfg;
pub use error::{BuildError, CircleError, Rejection};
pub use event::SessionEvent;
pub use geometry::{QuadrantBoundary, angle_degrees, distance, quadrant, quadrant_with, turn_angle_delta};
pub use session::{CircleSession, SessionSnapshot};
pub use status::{Phase, TraceStatus};
pub use types::{AnalyzedSample, Point, Sample};
pub use validator::{Validator, Verdict};
