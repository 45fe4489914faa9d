//! Human-readable per-file report.
//!
//! Renders into a `String` buffer; tags are colored when requested:
//! - `[INFO]` bold
//! - `[WARN]` yellow bold
//! - `[DRY]` cyan
//! - `[OK]` green

use std::fmt::Write;
use std::path::Path;

use owo_colors::{OwoColorize, Style};
use serde_json::Value;

use crate::sorter::SortStats;

const MIB: f64 = 1024.0 * 1024.0;

/// Report tag preceding a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Info,
    Warn,
    Dry,
    Ok,
}

impl Tag {
    const fn text(self) -> &'static str {
        match self {
            Self::Info => "[INFO]",
            Self::Warn => "[WARN]",
            Self::Dry => "[DRY]",
            Self::Ok => "[OK]",
        }
    }

    const fn style(self) -> Style {
        match self {
            Self::Info => Style::new().bold(),
            Self::Warn => Style::new().yellow().bold(),
            Self::Dry => Style::new().cyan(),
            Self::Ok => Style::new().green(),
        }
    }

    fn write(self, out: &mut String, use_color: bool) {
        if use_color {
            let _ = write!(out, "{}", self.text().style(self.style()));
        } else {
            out.push_str(self.text());
        }
    }
}

/// Warning for a document that is neither an array nor an object.
pub fn write_unsupported(out: &mut String, path: &Path, type_name: &str, use_color: bool) {
    Tag::Warn.write(out, use_color);
    let _ = writeln!(
        out,
        " {}: unsupported JSON structure (type={type_name})",
        path.display()
    );
}

/// Header plus one statistics block per list.
pub fn write_stats(
    out: &mut String,
    path: &Path,
    stats: &[SortStats],
    original_size: u64,
    use_color: bool,
) {
    out.push('\n');
    Tag::Info.write(out, use_color);
    let _ = writeln!(out, " {}", path.display());

    if stats.is_empty() {
        out.push_str("  No detection-like lists found.\n");
        return;
    }

    for st in stats {
        if st.count == 0 {
            let _ = writeln!(out, "  {}: empty list, nothing to sort.", st.label);
            continue;
        }
        let _ = writeln!(out, "  {}: {} records", st.label, st.count);
        let _ = writeln!(out, "    Count before    : {}", st.count_before);
        let _ = writeln!(out, "    Count after     : {}", st.count_after);
        let _ = writeln!(out, "    Requires sorting: {}", st.changed);
        let _ = writeln!(out, "    Out of order    : {}", st.out_of_order);
        let _ = writeln!(out, "    First before    : {}", format_value(st.first_before.as_ref()));
        let _ = writeln!(out, "    First after     : {}", format_value(st.first_after.as_ref()));
        let _ = writeln!(out, "    Last  before    : {}", format_value(st.last_before.as_ref()));
        let _ = writeln!(out, "    Last  after     : {}", format_value(st.last_after.as_ref()));
        let _ = writeln!(out, "    Original size   : {} MB", format_mb(original_size));
    }
}

/// Dry-run footer.
pub fn write_dry(out: &mut String, use_color: bool) {
    out.push_str("  ");
    Tag::Dry.write(out, use_color);
    out.push_str(" No changes written.\n");
}

/// Footer when every list was already in order.
pub fn write_unchanged(out: &mut String, use_color: bool) {
    out.push_str("  ");
    Tag::Ok.write(out, use_color);
    out.push_str(" Already in order, nothing written.\n");
}

/// Footer after a successful write.
pub fn write_written(out: &mut String, destination: &Path, new_size: u64, use_color: bool) {
    out.push_str("  ");
    Tag::Ok.write(out, use_color);
    let _ = writeln!(out, " Written to {}", destination.display());
    let _ = writeln!(out, "  New file size     : {} MB", format_mb(new_size));
}

/// Display form of a raw timestamp field value.
///
/// Strings are shown unquoted, absent and `null` values as `None`, booleans
/// as `True`/`False`, anything else as compact JSON.
pub fn format_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "None".to_string(),
        Some(Value::Bool(true)) => "True".to_string(),
        Some(Value::Bool(false)) => "False".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Size in mebibytes with two decimals.
#[allow(clippy::cast_precision_loss)]
pub fn format_mb(bytes: u64) -> String {
    format!("{:.2}", bytes as f64 / MIB)
}
