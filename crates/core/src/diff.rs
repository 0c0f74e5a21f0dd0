//! Line-level diff between two version snapshots.
//!
//! Backs the version-comparison endpoint. Content is treated as opaque text;
//! a plain LCS over lines is enough for "what changed between v3 and v7".

/// The type of a line in a diff result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffLineType {
    Added,
    Removed,
    Unchanged,
}

/// A single line in a diff result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub line_type: DiffLineType,
    pub content: String,
}

/// Compute a line-level diff between two texts using LCS.
///
/// Returns a list of [`DiffLine`] entries indicating which lines were added,
/// removed, or left unchanged, in document order.
pub fn compute_line_diff(old: &str, new: &str) -> Vec<DiffLine> {
    let old_lines: Vec<&str> = old.lines().collect();
    let new_lines: Vec<&str> = new.lines().collect();
    let m = old_lines.len();
    let n = new_lines.len();

    // Build LCS table.
    let mut lcs = vec![vec![0u32; n + 1]; m + 1];
    for i in 1..=m {
        for j in 1..=n {
            if old_lines[i - 1] == new_lines[j - 1] {
                lcs[i][j] = lcs[i - 1][j - 1] + 1;
            } else {
                lcs[i][j] = lcs[i - 1][j].max(lcs[i][j - 1]);
            }
        }
    }

    // Backtrack to produce the diff.
    let mut result = Vec::new();
    let mut i = m;
    let mut j = n;
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && old_lines[i - 1] == new_lines[j - 1] {
            result.push(DiffLine {
                line_type: DiffLineType::Unchanged,
                content: old_lines[i - 1].to_string(),
            });
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || lcs[i][j - 1] >= lcs[i - 1][j]) {
            result.push(DiffLine {
                line_type: DiffLineType::Added,
                content: new_lines[j - 1].to_string(),
            });
            j -= 1;
        } else {
            result.push(DiffLine {
                line_type: DiffLineType::Removed,
                content: old_lines[i - 1].to_string(),
            });
            i -= 1;
        }
    }

    result.reverse();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_texts() {
        let diff = compute_line_diff("line1\nline2", "line1\nline2");
        assert_eq!(diff.len(), 2);
        assert!(diff.iter().all(|d| d.line_type == DiffLineType::Unchanged));
    }

    #[test]
    fn added_line() {
        let diff = compute_line_diff("line1", "line1\nline2");
        assert_eq!(diff.len(), 2);
        assert_eq!(diff[0].line_type, DiffLineType::Unchanged);
        assert_eq!(diff[1].line_type, DiffLineType::Added);
        assert_eq!(diff[1].content, "line2");
    }

    #[test]
    fn removed_line() {
        let diff = compute_line_diff("line1\nline2", "line1");
        assert_eq!(diff.len(), 2);
        assert_eq!(diff[0].line_type, DiffLineType::Unchanged);
        assert_eq!(diff[1].line_type, DiffLineType::Removed);
        assert_eq!(diff[1].content, "line2");
    }

    #[test]
    fn changed_line() {
        let diff = compute_line_diff("hello", "world");
        assert_eq!(diff.len(), 2);
        let types: Vec<_> = diff.iter().map(|d| d.line_type).collect();
        assert!(types.contains(&DiffLineType::Removed));
        assert!(types.contains(&DiffLineType::Added));
    }

    #[test]
    fn both_empty() {
        assert!(compute_line_diff("", "").is_empty());
    }
}
