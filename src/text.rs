//! Inline text flattening for JSX text children and string attributes.

/// Collapses JSX text the way inline markup renders it.
///
/// Tabs become spaces, whitespace touching a line break is trimmed, blank
/// lines disappear and the surviving lines are joined by single spaces.
pub fn flatten_text(text: &str) -> String {
    let lines: Vec<&str> = text.split("\r\n").flat_map(|l| l.split(['\n', '\r'])).collect();

    let last_non_empty = lines
        .iter()
        .rposition(|line| line.chars().any(|c| c != ' ' && c != '\t'))
        .unwrap_or(0);

    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        let mut trimmed = line.replace('\t', " ");
        if i != 0 {
            trimmed = trimmed.trim_start_matches(' ').to_string();
        }
        if i != lines.len() - 1 {
            trimmed = trimmed.trim_end_matches(' ').to_string();
        }
        if trimmed.is_empty() {
            continue;
        }
        out.push_str(&trimmed);
        if i != last_non_empty {
            out.push(' ');
        }
    }
    out
}
