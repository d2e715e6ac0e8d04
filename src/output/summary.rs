//! End-of-phase console summaries.

use std::fmt::Write;

use yansi::Paint;

use crate::duplicates::{PercentageMode, ScanPhase, ScanSummary};

/// Render the summary printed after a scan phase.
///
/// The search phase reports duplicates with a percentage; the base phase
/// reports unique files and internal duplicates.
#[must_use]
pub fn format_summary(summary: &ScanSummary, mode: PercentageMode) -> String {
    let c = &summary.counters;
    let mut out = String::new();

    let title = match summary.phase {
        ScanPhase::Base => "Base Folder Processed",
        ScanPhase::Search => "Search Folder Processed",
    };
    let _ = writeln!(out, "{}", title.bold());
    let _ = writeln!(out, "  -Total files processed: {}", c.files_processed);
    let _ = writeln!(out, "  -Total Gb processed: {:.2}", c.gigabytes_processed());
    let _ = writeln!(
        out,
        "  -Elapsed time: {:.2}s [{:.2}gb/s]",
        summary.elapsed.as_secs_f64(),
        summary.throughput_gb_per_sec()
    );

    match summary.phase {
        ScanPhase::Base => {
            let _ = writeln!(out, "  -Base folder, Unique Files: {}", c.base_unique_count);
            let _ = writeln!(out, "  -Base folder, Duplicates: {}", c.base_duplicate_count);
        }
        ScanPhase::Search => {
            let _ = writeln!(
                out,
                "  -Duplicates: {} [{:.1}%]",
                c.base_duplicate_count,
                summary.duplicate_percentage(mode)
            );
        }
    }

    let _ = writeln!(out, "  -Sub folders Processed: {}", c.subfolders_visited);
    let _ = writeln!(out, "  -Empty files, Skipped: {}", c.empty_or_oversized_skipped);
    if c.unreadable_skipped > 0 {
        let _ = writeln!(out, "  -Unreadable files, Skipped: {}", c.unreadable_skipped);
    }
    out
}

/// Render the banner confirming a folder argument.
#[must_use]
pub fn format_folder_banner(phase: ScanPhase, folder: &std::path::Path, recursive: bool) -> String {
    let label = match phase {
        ScanPhase::Base => "main/base",
        ScanPhase::Search => "search",
    };
    format!(
        "{} Using {} folder: {} Recursive: {}",
        "OK:".green(),
        label,
        folder.display(),
        recursive
    )
}
