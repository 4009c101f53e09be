//! Place command implementation.

use anyhow::{bail, Context, Result};
use creative_lint_core::layout::image_grid::{self, PlacementSource};
use creative_lint_core::{ElementRole, FormatType, LayoutEngine, Size};
use std::path::Path;
use std::time::Duration;

use crate::config_resolver::ConfigSource;
use crate::TargetArgs;

/// Time allowed for loading `--over-image`.
const IMAGE_BUDGET: Duration = Duration::from_secs(5);

/// Runs the place command.
pub fn run(
    file: &Path,
    role: ElementRole,
    (width, height): (f64, f64),
    format_type: Option<FormatType>,
    over_image: Option<&str>,
    source: &ConfigSource,
) -> Result<()> {
    if !(width > 0.0 && height > 0.0) {
        bail!("Element size must be positive, got {width}x{height}");
    }

    let config = source.load()?;
    let target = TargetArgs {
        format_type,
        alcohol: false,
    };
    let options = super::options(&config, &target)?;
    let document = super::read_snapshot(file)?;

    let size = Size::new(width, height);

    if let Some(src) = over_image {
        let existing: Vec<_> = document
            .pages
            .first()
            .into_iter()
            .flat_map(|p| p.iter().cloned())
            .collect();
        let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
        let placement = runtime.block_on(image_grid::suggest_text_placement(
            src,
            size,
            document.canvas_size,
            &existing,
            &options,
            IMAGE_BUDGET,
        ));
        let origin = match placement.source {
            PlacementSource::Analyzed => "image analysis",
            PlacementSource::Fallback => "default placement",
        };
        println!(
            "{role} at ({:.0}, {:.0}) fill {} [{origin}]",
            placement.x, placement.y, placement.fill
        );
        return Ok(());
    }

    let engine = LayoutEngine::new(document.canvas_size, &options);
    let existing = document.pages.first().into_iter().flat_map(|p| p.iter());
    let spot = engine.find_optimal_position(role, size, existing);

    if spot.is_vetoed() {
        println!(
            "\x1b[31mno valid position\x1b[0m for {role} ({width}x{height}); fallback {} at ({}, {})",
            spot.anchor.as_str(),
            spot.x,
            spot.y
        );
        std::process::exit(1);
    }

    println!(
        "{role} at ({:.0}, {:.0}) [{}] score {:.1}",
        spot.x,
        spot.y,
        spot.anchor.as_str(),
        spot.score
    );
    println!("  = {}", spot.reason);
    Ok(())
}
