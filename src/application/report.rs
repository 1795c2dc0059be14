use colored::Colorize;

use crate::paths::ResolvedPaths;

/// Renders the listing printed by `resolve`: a header with the start path
/// index, one `index<TAB>path<TAB>size` line per entry and a summary.
///
/// Indexes saturate at `u64::MAX`.
pub fn render_resolved(resolved: &ResolvedPaths, color: bool) -> String {
    let header = format!("start path index: {}", resolved.start_path_index);
    let summary = format!(
        "{} paths, {} bytes",
        resolved.paths.len(),
        resolved.paths.total_size()
    );

    let entries = resolved.paths.iter().zip(0u64..).map(|(entry, position)| {
        let index = resolved.start_path_index.saturating_add(position);
        let path = paint(entry.path.clone(), color, |s| s.green().to_string());
        format!("{index}\t{path}\t{}", entry.size)
    });

    std::iter::once(paint(header, color, |s| s.bold().to_string()))
        .chain(entries)
        .chain(std::iter::once(paint(summary, color, |s| s.dimmed().to_string())))
        .map(|line| line + "\n")
        .collect()
}

fn paint(text: String, color: bool, style: impl FnOnce(&str) -> String) -> String {
    if color { style(&text) } else { text }
}
