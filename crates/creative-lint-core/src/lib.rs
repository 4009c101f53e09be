//! # creative-lint-core
//!
//! Core framework for retail creative compliance checking.
//!
//! This crate provides the foundational model and traits for building
//! creative linters. It includes:
//!
//! - [`Document`] and friends, the validated design model
//! - geometry, color and zone primitives shared by every rule
//! - [`Rule`] trait for compliance checks with attached fixes
//! - [`Validator`] for orchestrating a validation pass
//! - [`LayoutEngine`] for scoring-based placement of new elements
//! - [`Violation`] and [`ValidationReport`] for representing findings
//!
//! ## Example
//!
//! ```ignore
//! use creative_lint_core::{snapshot, Validator};
//!
//! let document = snapshot::load_document(&json)?;
//! let validator = Validator::builder()
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let report = validator.validate(&document);
//! println!("{}", report.format_report());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod context;
mod rule;
mod types;
mod validator;

pub mod color;
pub mod detect;
pub mod element;
pub mod fix;
pub mod format;
pub mod geometry;
pub mod imaging;
pub mod layout;
pub mod snapshot;
pub mod zones;

pub use config::{Config, ConfigError, RuleConfig, ValidationConfig};
pub use context::{CheckContext, FixContext};
pub use detect::{DetectorError, FaceDetector, NoopFaceDetector};
pub use element::{
    CanvasElement, CanvasSize, Document, ElementKind, ElementRole, ElementTags, Geometry, Page,
    Shadow, Size, TextStyle, ValueTile, ValueTileKind,
};
pub use format::{Density, FormatType, SafeZoneSpec, ValidationOptions};
pub use geometry::{BoundingBox, Point};
pub use layout::{LayoutEngine, LayoutTuning, PlacementReport, ScoredCandidate};
pub use rule::{handles, Rule, RuleBox};
pub use types::{
    compliance_score, AutoFix, Label, Measurement, Property, PropertyValue, RuleKind, Severity,
    Summary, SyntheticKind, ValidationReport, Violation, ViolationDiagnostic,
};
pub use validator::{Validator, ValidatorBuilder, ValidatorError};
pub use zones::{Zone, ZoneKind, Zones};
