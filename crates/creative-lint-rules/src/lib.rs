//! # creative-lint-rules
//!
//! Built-in compliance rules for creative-lint.
//!
//! This crate provides the retailer rulebook as a set of independent rules
//! that plug into [`creative_lint_core::Validator`].
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | CL001 | `safe-zone` | Keeps elements out of the top/bottom no-go bands on 9:16 canvases |
//! | CL002 | `element-overlap` | Flags overlap with logos, CTAs, packshots and value tiles |
//! | CL003 | `min-font-size` | Enforces the per-format minimum font size |
//! | CL004 | `cta-not-allowed` | Forbids call-to-action buttons |
//! | CL005 | `packshot-safe-zone` | Enforces clearance around packshots |
//! | CL006 | `contrast` | Enforces WCAG contrast of text and icons against the page |
//! | CL007 | `drinkaware-missing` | Requires the responsible-drinking lock-up on alcohol creatives |
//! | CL008 | `drinkaware-size` | Enforces the lock-up's minimum height |
//! | CL009-CL012 | `*-required` | Requires a brand tag, headline, logo and background |
//! | CL013 | `blocked-keyword` | Forbids competition, price, claim and similar copy |
//! | CL014 | `value-tile-end-date` | Requires a `DD/MM` end date on Clubcard tiles |
//!
//! `PEOPLE_DETECTED` (CL015) is produced by the validator's asynchronous pass
//! and `OUT_OF_BOUNDS` (CL016) by placement validation; neither is a
//! registry rule.
//!
//! ## Usage
//!
//! ```ignore
//! use creative_lint_core::Validator;
//! use creative_lint_rules::{MinFontSize, SafeZone};
//!
//! let validator = Validator::builder()
//!     .rule(SafeZone::new())
//!     .rule(MinFontSize::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod blocked_keywords;
mod contrast;
mod cta_not_allowed;
mod drinkaware;
mod element_overlap;
mod min_font_size;
mod packshot_gap;
mod presets;
mod required_elements;
mod safe_zone;
mod value_tile_end_date;

pub use blocked_keywords::{BlockedKeywords, Category};
pub use contrast::Contrast;
pub use cta_not_allowed::CtaNotAllowed;
pub use drinkaware::Drinkaware;
pub use element_overlap::ElementOverlap;
pub use min_font_size::MinFontSize;
pub use packshot_gap::PackshotGap;
pub use presets::{
    all_rules, minimal_rules, recommended_rules, rule_by_name, rules_from_config, strict_rules,
    Preset, UnknownPreset,
};
pub use required_elements::RequiredElements;
pub use safe_zone::SafeZone;
pub use value_tile_end_date::ValueTileEndDate;

/// Re-export core types for convenience.
pub use creative_lint_core::{Rule, Severity, Violation};
