//! Rule requiring an end date on Clubcard value tiles.

use std::sync::OnceLock;

use creative_lint_core::{
    CheckContext, ElementKind, Rule, RuleKind, Severity, ValueTileKind, Violation,
};
use regex::Regex;

/// Rule kind reported by this rule.
pub const KIND: RuleKind = RuleKind::ValueTileEndDate;

fn date_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^(0[1-9]|[12][0-9]|3[01])/(0[1-9]|1[0-2])$").ok())
        .as_ref()
}

/// Whether `date` is a valid `DD/MM` end date.
#[must_use]
pub fn is_valid_end_date(date: &str) -> bool {
    date_pattern().is_some_and(|re| re.is_match(date.trim()))
}

/// Reports Clubcard tiles without a `DD/MM` end date.
#[derive(Debug, Clone, Default)]
pub struct ValueTileEndDate;

impl ValueTileEndDate {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ValueTileEndDate {
    fn kind(&self) -> RuleKind {
        KIND
    }

    fn description(&self) -> &'static str {
        "Requires a DD/MM end date on Clubcard value tiles"
    }

    fn check(&self, ctx: &CheckContext) -> Vec<Violation> {
        ctx.elements()
            .filter_map(|(_, e)| match &e.kind {
                ElementKind::ValueTile(tile) if tile.tile == ValueTileKind::Clubcard => {
                    let message = match tile.end_date.as_deref() {
                        None => format!("Clubcard tile '{}' has no end date", e.id),
                        Some(date) if !is_valid_end_date(date) => format!(
                            "Clubcard tile '{}' end date '{date}' is not in DD/MM form",
                            e.id
                        ),
                        Some(_) => return None,
                    };
                    Some(Violation::new(KIND, Severity::Hard, message).on_element(&e.id))
                }
                _ => None,
            })
            .collect()
    }
}
