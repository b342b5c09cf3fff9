//! Line/hunk diff: LCS over pretty-printed JSON, assembled into unified-diff
//! style hunks.

use serde::Serialize;
use serde_json::Value;

/// Symmetric context window around changed lines.
pub const DEFAULT_CONTEXT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffLineKind {
    Add,
    Remove,
    Context,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffLine {
    #[serde(rename = "type")]
    pub kind: DiffLineKind,
    pub content: String,
    /// 1-based line number in the local text; absent for added lines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_line_number: Option<usize>,
    /// 1-based line number in the production text; absent for removed lines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_line_number: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffHunk {
    pub old_start: usize,
    pub old_lines: usize,
    pub new_start: usize,
    pub new_lines: usize,
    pub lines: Vec<DiffLine>,
}

/// Hunks plus both full pretty-printed texts, retained for side-by-side
/// rendering by the reporting sink.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineDiff {
    pub hunks: Vec<DiffHunk>,
    pub local_json: String,
    pub production_json: String,
}

fn to_pretty(value: &Value) -> String {
    // serde_json pretty-printing is 2-space indented. The fallback coerces to
    // the compact Display form instead of aborting the comparison.
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Pretty-print both values and diff them line by line.
pub fn line_diff(local: &Value, production: &Value, context: usize) -> LineDiff {
    let local_json = to_pretty(local);
    let production_json = to_pretty(production);
    let old_lines: Vec<&str> = local_json.lines().collect();
    let new_lines: Vec<&str> = production_json.lines().collect();

    let all_lines = backtrack(&old_lines, &new_lines);
    let hunks = build_hunks(&all_lines, context);

    LineDiff {
        hunks,
        local_json,
        production_json,
    }
}

/// Classic O(m·n) LCS length table: `dp[i][j]` is the LCS of the first `i`
/// old lines and the first `j` new lines.
fn lcs_table(old: &[&str], new: &[&str]) -> Vec<Vec<usize>> {
    let (m, n) = (old.len(), new.len());
    let mut dp = vec![vec![0usize; n + 1]; m + 1];
    for i in 1..=m {
        for j in 1..=n {
            dp[i][j] = if old[i - 1] == new[j - 1] {
                dp[i - 1][j - 1] + 1
            } else {
                dp[i - 1][j].max(dp[i][j - 1])
            };
        }
    }
    dp
}

/// Walk the table from `dp[m][n]` back to the origin, emitting one entry per
/// line. Ties between viable directions prefer insertion.
fn backtrack(old: &[&str], new: &[&str]) -> Vec<DiffLine> {
    let dp = lcs_table(old, new);
    let mut out = Vec::with_capacity(old.len().max(new.len()));
    let (mut i, mut j) = (old.len(), new.len());

    while i > 0 || j > 0 {
        if i > 0 && j > 0 && old[i - 1] == new[j - 1] {
            out.push(DiffLine {
                kind: DiffLineKind::Context,
                content: old[i - 1].to_string(),
                old_line_number: Some(i),
                new_line_number: Some(j),
            });
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || dp[i][j - 1] >= dp[i - 1][j]) {
            out.push(DiffLine {
                kind: DiffLineKind::Add,
                content: new[j - 1].to_string(),
                old_line_number: None,
                new_line_number: Some(j),
            });
            j -= 1;
        } else {
            out.push(DiffLine {
                kind: DiffLineKind::Remove,
                content: old[i - 1].to_string(),
                old_line_number: Some(i),
                new_line_number: None,
            });
            i -= 1;
        }
    }

    out.reverse();
    out
}

/// Group the flat line list into hunks. Consecutive changes whose gap is at
/// most `2 × context` share a hunk; each hunk carries up to `context` leading
/// and trailing context lines.
fn build_hunks(lines: &[DiffLine], context: usize) -> Vec<DiffHunk> {
    let changed: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, l)| l.kind != DiffLineKind::Context)
        .map(|(idx, _)| idx)
        .collect();

    let mut hunks = Vec::new();
    let mut i = 0;
    while i < changed.len() {
        let first = changed[i];
        let mut last = first;
        let mut j = i;
        while j + 1 < changed.len() && changed[j + 1] - last <= 2 * context {
            j += 1;
            last = changed[j];
        }
        let lo = first.saturating_sub(context);
        let hi = (last + context + 1).min(lines.len());
        hunks.push(make_hunk(&lines[lo..hi]));
        i = j + 1;
    }
    hunks
}

fn make_hunk(slice: &[DiffLine]) -> DiffHunk {
    let old_start = slice
        .iter()
        .filter_map(|l| l.old_line_number)
        .min()
        .unwrap_or(0);
    let new_start = slice
        .iter()
        .filter_map(|l| l.new_line_number)
        .min()
        .unwrap_or(0);
    // Context counts on both sides, removes only on old, adds only on new.
    let old_lines = slice
        .iter()
        .filter(|l| l.kind != DiffLineKind::Add)
        .count();
    let new_lines = slice
        .iter()
        .filter(|l| l.kind != DiffLineKind::Remove)
        .count();
    DiffHunk {
        old_start,
        old_lines,
        new_start,
        new_lines,
        lines: slice.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn lcs_len(old: &[&str], new: &[&str]) -> usize {
        lcs_table(old, new)[old.len()][new.len()]
    }

    #[test]
    fn lcs_table_basics() {
        assert_eq!(lcs_len(&["a", "b", "c"], &["a", "c"]), 2);
        assert_eq!(lcs_len(&["a", "b"], &["c", "d"]), 0);
        assert_eq!(lcs_len(&[], &["a"]), 0);
    }

    #[test]
    fn backtrack_edit_count_matches_lcs() {
        // Non-context lines must number m + n - 2*LCS.
        let cases: &[(&[&str], &[&str])] = &[
            (&["a", "b", "c", "d"], &["a", "x", "c", "y"]),
            (&["1", "2", "3"], &["3", "2", "1"]),
            (&["same"], &["same"]),
            (&[], &["only", "new"]),
            (&["only", "old"], &[]),
        ];
        for &(old, new) in cases {
            let lines = backtrack(old, new);
            let edits = lines
                .iter()
                .filter(|l| l.kind != DiffLineKind::Context)
                .count();
            assert_eq!(edits, old.len() + new.len() - 2 * lcs_len(old, new));
        }
    }

    #[test]
    fn backtrack_line_numbers_are_one_based_and_monotonic() {
        let lines = backtrack(&["a", "b", "c"], &["a", "x", "c"]);
        let old_nums: Vec<usize> = lines.iter().filter_map(|l| l.old_line_number).collect();
        let new_nums: Vec<usize> = lines.iter().filter_map(|l| l.new_line_number).collect();
        assert_eq!(old_nums, vec![1, 2, 3]);
        assert_eq!(new_nums, vec![1, 2, 3]);
    }

    #[test]
    fn hunks_cover_every_change_exactly_once() {
        let old: Vec<String> = (0..40).map(|i| format!("line {i}")).collect();
        let mut new = old.clone();
        new[5] = "changed 5".to_string();
        new[30] = "changed 30".to_string();
        let old_refs: Vec<&str> = old.iter().map(String::as_str).collect();
        let new_refs: Vec<&str> = new.iter().map(String::as_str).collect();

        let lines = backtrack(&old_refs, &new_refs);
        let hunks = build_hunks(&lines, DEFAULT_CONTEXT);

        // Far-apart changes land in separate hunks.
        assert_eq!(hunks.len(), 2);

        let expected: Vec<&DiffLine> = lines
            .iter()
            .filter(|l| l.kind != DiffLineKind::Context)
            .collect();
        let collected: Vec<&DiffLine> = hunks
            .iter()
            .flat_map(|h| h.lines.iter())
            .filter(|l| l.kind != DiffLineKind::Context)
            .collect();
        assert_eq!(collected, expected);
    }

    #[test]
    fn nearby_changes_merge_into_one_hunk() {
        let old: Vec<String> = (0..20).map(|i| format!("line {i}")).collect();
        let mut new = old.clone();
        new[8] = "changed 8".to_string();
        new[12] = "changed 12".to_string();
        let old_refs: Vec<&str> = old.iter().map(String::as_str).collect();
        let new_refs: Vec<&str> = new.iter().map(String::as_str).collect();

        let lines = backtrack(&old_refs, &new_refs);
        let hunks = build_hunks(&lines, DEFAULT_CONTEXT);
        assert_eq!(hunks.len(), 1);
    }

    #[test]
    fn hunk_line_counts_split_by_side() {
        let lines = backtrack(&["a", "b", "c"], &["a", "x", "c"]);
        let hunks = build_hunks(&lines, DEFAULT_CONTEXT);
        assert_eq!(hunks.len(), 1);
        let h = &hunks[0];
        assert_eq!(h.old_start, 1);
        assert_eq!(h.new_start, 1);
        // 2 context + 1 remove on the old side, 2 context + 1 add on the new.
        assert_eq!(h.old_lines, 3);
        assert_eq!(h.new_lines, 3);
    }

    #[test]
    fn identical_texts_produce_no_hunks() {
        let d = line_diff(&json!({"a": 1}), &json!({"a": 1}), DEFAULT_CONTEXT);
        assert!(d.hunks.is_empty());
        assert_eq!(d.local_json, d.production_json);
    }

    #[test]
    fn end_to_end_name_change() {
        let local = json!({"data": {"user": {"id": 1, "name": "Ann"}}});
        let production = json!({"data": {"user": {"id": 1, "name": "Anne"}}});
        let d = line_diff(&local, &production, DEFAULT_CONTEXT);

        assert_eq!(d.hunks.len(), 1);
        let h = &d.hunks[0];

        let removes: Vec<&DiffLine> = h
            .lines
            .iter()
            .filter(|l| l.kind == DiffLineKind::Remove)
            .collect();
        let adds: Vec<&DiffLine> = h
            .lines
            .iter()
            .filter(|l| l.kind == DiffLineKind::Add)
            .collect();
        assert_eq!(removes.len(), 1);
        assert_eq!(adds.len(), 1);
        assert!(removes[0].content.contains("\"name\": \"Ann\""));
        assert!(adds[0].content.contains("\"name\": \"Anne\""));

        let context: Vec<&str> = h
            .lines
            .iter()
            .filter(|l| l.kind == DiffLineKind::Context)
            .map(|l| l.content.as_str())
            .collect();
        assert!(context.iter().any(|c| c.contains('{')));
        assert!(context.iter().any(|c| c.contains("\"user\": {")));
        assert!(context.iter().any(|c| c.contains("\"id\": 1,")));
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let d = line_diff(&json!({"a": 1}), &json!({"a": 2}), DEFAULT_CONTEXT);
        let v = serde_json::to_value(&d).unwrap();
        assert!(v["localJson"].is_string());
        assert!(v["productionJson"].is_string());
        let line = &v["hunks"][0]["lines"][0];
        assert!(line["type"].is_string());
        assert_eq!(v["hunks"][0]["oldStart"], json!(1));
    }
}
