use owo_colors::OwoColorize;

use crate::fs_ops::MoveOutcome;
use crate::stats::{Histogram, SizeBucket, Summary};
use crate::utils::{format_size, format_size_f64};

/// Small wrapper around stdout/stderr printing to provide consistent, colored
/// user-facing messages. Colors are enabled only when output is a TTY.
fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

pub fn print_info(msg: &str) {
    if is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if is_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

fn heading(title: &str) {
    if is_tty() {
        println!("\n{}", title.bold().underline());
    } else {
        println!("\n{}", title);
    }
}

/// Headline scan figures.
pub fn summary_lines(s: &Summary) -> Vec<String> {
    vec![
        format!("Total Files: {}", s.total_files),
        format!("Total Folders (With Files): {}", s.total_folders),
        format!("Total Size: {}", format_size(s.total_size)),
        format!("Average Size: {}", format_size_f64(s.average_size)),
        format!(
            "Most Occurring File Type: {}",
            s.most_common_extension.as_deref().unwrap_or("-")
        ),
    ]
}

pub fn print_summary(s: &Summary) {
    heading("Summary Stats");
    for line in summary_lines(s) {
        println!("{line}");
    }
}

pub fn print_type_distribution(h: &Histogram<String>) {
    heading("File Types Distribution");
    for (ext, count) in h.sorted_by_count() {
        let label = if ext.is_empty() { "(none)" } else { ext.as_str() };
        println!("{label} --> {count}");
    }
}

pub fn print_size_distribution(buckets: &[(SizeBucket, u64)]) {
    heading("File Size Distribution");
    for (bucket, count) in buckets {
        println!("{}: {}", bucket.label, count);
    }
}

pub fn print_folder_sizes(h: &Histogram<std::path::PathBuf>) {
    heading("Folders Size Distribution");
    for (folder, bytes) in h.iter() {
        println!("{} --> {}", folder.display(), format_size(bytes));
    }
    println!("Across {} folders: {}", h.len(), format_size(h.total()));
}

/// Totals for a move run; failures are always shown so nothing is silently undercounted.
pub fn print_move_outcome(o: &MoveOutcome) {
    heading(if o.dry_run { "Move Plan (dry-run)" } else { "Moved Stats" });
    println!("Total Moved Files: {}", o.moved);
    println!(
        "Total Size of Moved Files: {} bytes ({})",
        o.moved_bytes,
        format_size(o.moved_bytes)
    );
    if o.skipped > 0 {
        println!("Already in place: {}", o.skipped);
    }
    if o.failed > 0 {
        print_warn(&format!("{} of {} files could not be moved; see log for details", o.failed, o.attempted));
    }
}
