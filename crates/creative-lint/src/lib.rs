//! # creative-lint
//!
//! Compliance validation and auto-remediation for retail ad creatives.
//!
//! This is the main facade crate that re-exports the core model, the
//! built-in rules, and the four entry points used by an editing surface:
//!
//! - [`validate_canvas`] checks a design snapshot against the rulebook
//! - [`apply_auto_fixes`] remediates what can be fixed mechanically
//! - [`find_optimal_position`] picks a spot for a new element
//! - [`validate_placement`] re-checks a proposed spot
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use creative_lint::{snapshot, validate_canvas, ValidationOptions};
//!
//! let document = snapshot::load_document(&json)?;
//! let report = validate_canvas(&document, ValidationOptions::default())?;
//! println!("{}", report.format_report());
//! ```
//!
//! ## Programmatic Usage
//!
//! ```rust,ignore
//! use creative_lint::{Corrector, Validator};
//! use creative_lint::rules::Preset;
//!
//! let validator = Validator::builder()
//!     .rules(Preset::Strict.rules())
//!     .config(config)
//!     .build()?;
//! let report = validator.validate(&document);
//! let outcome = Corrector::new(validator).apply(&document, &report.violations);
//! ```

#![forbid(unsafe_code)]

// Re-export core types and traits
pub use creative_lint_core::*;

/// Built-in rules and presets.
pub mod rules {
    pub use creative_lint_rules::*;
}

mod corrector;
mod entry;

pub use corrector::{AppliedFix, Corrector, FixOutcome};
pub use entry::{
    apply_auto_fixes, default_validator, find_optimal_position, preset_validator,
    suggest_text_placement, validate_canvas, validate_canvas_async, validate_canvas_with_preset,
    validate_placement,
};
