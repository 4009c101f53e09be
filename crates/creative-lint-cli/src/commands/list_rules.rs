//! List rules command implementation.

use creative_lint_rules::{all_rules, Preset};

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<8} {:<22} {:<9} Description", "Code", "Name", "Severity");
    println!("{}", "-".repeat(88));

    for rule in all_rules() {
        println!(
            "{:<8} {:<22} {:<9} {}",
            rule.code(),
            rule.name(),
            rule.default_severity().to_string(),
            rule.description()
        );
    }

    println!("\nPresets:");
    for preset in [Preset::Recommended, Preset::Strict, Preset::Minimal] {
        let codes: Vec<_> = preset.rules().iter().map(|r| r.code()).collect();
        let marker = if preset == Preset::default() {
            " (default)"
        } else {
            ""
        };
        println!("  {:<12} {}{marker}", preset.as_str(), codes.join(", "));
    }

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  creative-lint check --rules safe-zone,min-font-size ads/");
    println!("  creative-lint check --rules CL001,CL003 ads/");
}
