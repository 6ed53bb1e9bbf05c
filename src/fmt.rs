//! Shared formatting utilities for size display and console output

use console::Emoji;

/// Scissors emoji for minification runs
pub const SCISSORS: Emoji = Emoji("✂️ ", ">");

/// Broom emoji for artifact clean-up
pub const BROOM: Emoji = Emoji("🧹", ">");

/// Checkmark emoji for success
pub const CHECKMARK: Emoji = Emoji("✅", "[OK]");

/// Crossmark emoji for failure
pub const CROSSMARK: Emoji = Emoji("❌", "[FAIL]");

/// Sparkles emoji for completion/success
pub const SPARKLES: Emoji = Emoji("✨", "*");

/// Info emoji for informational messages
pub const INFO: Emoji = Emoji("ℹ️", "i");

/// Chart emoji for metrics/statistics
pub const CHART: Emoji = Emoji("📊", "~");

/// Warning emoji for caution/alerts
pub const WARNING: Emoji = Emoji("⚠️", "!");

/// Stop emoji for cancelled runs
pub const STOP: Emoji = Emoji("🛑", "[STOP]");

/// Format bytes as human-readable size string
///
/// # Examples
///
/// ```
/// use src_slim::fmt::format_bytes;
///
/// assert_eq!(format_bytes(512), "512 B");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(1_048_576), "1.00 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Format a size reduction as `"-1.50 KB (-37.5%)"`.
///
/// Zero-byte inputs report `0.0%`.
pub fn format_reduction(before: u64, after: u64) -> String {
    let saved = before.saturating_sub(after);
    let percent = if before == 0 {
        0.0
    } else {
        saved as f64 / before as f64 * 100.0
    };
    format!("-{} (-{:.1}%)", format_bytes(saved), percent)
}
