//! Rule to forbid copy the retailer does not allow on creatives.
//!
//! Copy is matched case-insensitively against fixed pattern categories with
//! word boundaries, so "win" matches "Win a trip" but not "window". Value
//! tiles carry the only permitted price copy and are skipped. Each offending
//! element is reported once, naming every category it hit.

use std::fmt;
use std::sync::OnceLock;

use creative_lint_core::{
    CanvasElement, CheckContext, ElementRole, Rule, RuleKind, Severity, Violation,
};
use regex::Regex;

/// Rule kind reported by this rule.
pub const KIND: RuleKind = RuleKind::BlockedKeyword;

/// Category of blocked copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Terms and conditions references.
    TermsAndConditions,
    /// Competitions and prize draws.
    Competition,
    /// Unverified sustainability or "green" claims.
    Sustainability,
    /// Charity partnerships.
    Charity,
    /// Price call-outs and discounts outside a value tile.
    Price,
    /// Money-back guarantees.
    MoneyBack,
    /// Unverifiable claims, including asterisked ones.
    Claim,
    /// Comparisons against competitors.
    Comparison,
    /// Terms added through configuration.
    Custom,
}

impl Category {
    /// Short human-readable name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TermsAndConditions => "terms and conditions",
            Self::Competition => "competition",
            Self::Sustainability => "sustainability claim",
            Self::Charity => "charity partnership",
            Self::Price => "price call-out",
            Self::MoneyBack => "money-back guarantee",
            Self::Claim => "unverifiable claim",
            Self::Comparison => "competitive comparison",
            Self::Custom => "blocked term",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const PATTERNS: [(Category, &str); 8] = [
    (
        Category::TermsAndConditions,
        r"(?i)\bt\s*&\s*cs?\b|\bterms\s+(?:and|&)\s+conditions\b",
    ),
    (
        Category::Competition,
        r"(?i)\b(?:win|winners?|prizes?|competitions?|giveaways?|sweepstakes?|contests?)\b",
    ),
    (
        Category::Sustainability,
        r"(?i)\b(?:sustainab(?:le|ility)|eco[- ]?friendly|environmentally friendly|carbon (?:neutral|footprint)|recyclable|recycled|biodegradable|organic|green)\b",
    ),
    (
        Category::Charity,
        r"(?i)\b(?:charit(?:y|ies|able)|donat(?:e|es|ion|ions)|fundrais(?:ing|er))\b",
    ),
    (
        Category::Price,
        r"(?i)\d+\s*%\s*off\b|\bpercent off\b|\bhalf[- ]price\b|\bbuy one,? get one\b|\bbogof\b|\b[23]\s+for\b|\b(?:deals?|offers?|discounts?)\b|\b(?:save|was|now)\s*£",
    ),
    (
        Category::MoneyBack,
        r"(?i)\bmoney[- ]back\b|\bguarantee(?:s|d)?\b|\brefunds?\b",
    ),
    (
        Category::Claim,
        r"(?i)[a-z]\*|\b(?:clinically|scientifically) proven\b|\bdermatologically tested\b|\bsurvey says\b|\baccording to (?:a |the )?survey\b|\bstudies show\b",
    ),
    (
        Category::Comparison,
        r"(?i)\b(?:better|cheaper|healthier|tastier) than\b|\bnumber one\b|\bno\.?\s?1\b|#1\b|\bunbeatable\b",
    ),
];

fn builtin() -> &'static [(Category, Regex)] {
    static COMPILED: OnceLock<Vec<(Category, Regex)>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        PATTERNS
            .iter()
            .filter_map(|(category, pattern)| Regex::new(pattern).ok().map(|re| (*category, re)))
            .collect()
    })
}

/// Reports elements whose copy falls in a blocked category.
#[derive(Debug, Clone, Default)]
pub struct BlockedKeywords {
    extra: Option<Regex>,
}

impl BlockedKeywords {
    /// Creates the rule with the built-in categories.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds literal terms matched as whole words.
    #[must_use]
    pub fn extra_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let alternation = terms
            .into_iter()
            .map(|t| regex::escape(t.as_ref().trim()))
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("|");
        self.extra = if alternation.is_empty() {
            None
        } else {
            Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).ok()
        };
        self
    }

    fn categories(&self, text: &str) -> Vec<Category> {
        let mut hits: Vec<Category> = builtin()
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .map(|(category, _)| *category)
            .collect();
        if self.extra.as_ref().is_some_and(|re| re.is_match(text)) {
            hits.push(Category::Custom);
        }
        hits
    }
}

fn copy_of(element: &CanvasElement) -> Option<&str> {
    if element.role() == ElementRole::ValueTile {
        return None;
    }
    element.visible_text().filter(|t| !t.trim().is_empty())
}

impl Rule for BlockedKeywords {
    fn kind(&self) -> RuleKind {
        KIND
    }

    fn description(&self) -> &'static str {
        "Forbids competition, price, claim and similar copy"
    }

    fn check(&self, ctx: &CheckContext) -> Vec<Violation> {
        ctx.elements()
            .filter_map(|(_, e)| {
                let text = copy_of(e)?;
                let hits = self.categories(text);
                if hits.is_empty() {
                    return None;
                }
                let names: Vec<&str> = hits.iter().map(|c| c.as_str()).collect();
                Some(
                    Violation::new(
                        KIND,
                        Severity::Hard,
                        format!("'{}' contains blocked copy: {}", e.id, names.join(", ")),
                    )
                    .on_element(&e.id),
                )
            })
            .collect()
    }
}
