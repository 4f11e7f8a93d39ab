//! Markdown summary generation
//!
//! Renders [`RunStats`] as a human-readable report written next to the
//! dataset.

use crate::output::stats::RunStats;
use crate::output::traits::OutputResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes the markdown summary of a run to `output_path`
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown summary
/// * `Err(OutputError)` - Failed to write summary
pub fn generate_markdown_summary(stats: &RunStats, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_summary(stats);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats run statistics as markdown
pub fn format_markdown_summary(stats: &RunStats) -> String {
    let mut md = String::new();

    md.push_str("# Product Scrape Summary\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Start URL**: {}\n", stats.start_url));
    md.push_str(&format!("- **Started**: {}\n", stats.started_at.to_rfc3339()));
    if let Some(finished) = &stats.finished_at {
        md.push_str(&format!("- **Finished**: {}\n", finished.to_rfc3339()));
    }
    if let Some(duration) = stats.duration_seconds() {
        md.push_str(&format!(
            "- **Duration**: {} seconds ({:.2} minutes)\n",
            duration,
            duration as f64 / 60.0
        ));
    }
    if let Some(hash) = &stats.config_hash {
        md.push_str(&format!("- **Config Hash**: {}\n", hash));
    }
    if let Some(path) = &stats.dataset_path {
        md.push_str(&format!("- **Dataset**: {}\n", path));
    }
    md.push('\n');

    // Listing
    md.push_str("## Listing\n\n");
    md.push_str(&format!("- **Pages Crawled**: {}\n", stats.pages_crawled()));
    md.push_str(&format!("- **Product Links**: {}\n", stats.total_links));
    md.push_str(&format!("- **Records**: {}\n\n", stats.records));

    if !stats.links_per_page.is_empty() {
        md.push_str("| Page | Links |\n");
        md.push_str("|------|-------|\n");
        for (index, count) in stats.links_per_page.iter().enumerate() {
            md.push_str(&format!("| {} | {} |\n", index + 1, count));
        }
        md.push('\n');
    }

    // Field coverage
    md.push_str("## Field Coverage\n\n");
    if stats.unavailable.is_empty() {
        md.push_str("Every field was found on every product page.\n");
    } else {
        md.push_str("| Field | Unavailable | Coverage |\n");
        md.push_str("|-------|-------------|----------|\n");
        for (field, count) in &stats.unavailable {
            md.push_str(&format!(
                "| {} | {} | {:.1}% |\n",
                field,
                count,
                stats.coverage(*field)
            ));
        }
    }

    md
}
