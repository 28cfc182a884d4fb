//! Line-oriented unified diff between two document versions.

const CONTEXT_LINES: usize = 3;
const OLD_LABEL: &str = "old";
const NEW_LABEL: &str = "new";

#[derive(Debug, Clone, PartialEq)]
enum DiffLine {
    Context(String),
    Removed(String),
    Added(String),
}

impl DiffLine {
    fn is_change(&self) -> bool {
        !matches!(self, DiffLine::Context(_))
    }
}

/// Return a unified diff between two strings, with fixed `old`/`new` file
/// labels and up to three lines of context per hunk. Identical inputs produce
/// an empty string.
pub fn diff_texts(old: &str, new: &str) -> String {
    let old_lines: Vec<&str> = old.lines().collect();
    let new_lines: Vec<&str> = new.lines().collect();

    let ops = diff_ops(&old_lines, &new_lines);
    if !ops.iter().any(DiffLine::is_change) {
        return String::new();
    }

    format_unified(&ops)
}

/// LCS walk over both line lists, longest common subsequence kept as context.
fn diff_ops(old: &[&str], new: &[&str]) -> Vec<DiffLine> {
    let n = old.len();
    let m = new.len();
    let idx = |i: usize, j: usize| i * (m + 1) + j;

    let mut lcs = vec![0u32; (n + 1) * (m + 1)];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[idx(i, j)] = if old[i] == new[j] {
                lcs[idx(i + 1, j + 1)] + 1
            } else {
                lcs[idx(i + 1, j)].max(lcs[idx(i, j + 1)])
            };
        }
    }

    let mut ops = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if old[i] == new[j] {
            ops.push(DiffLine::Context(old[i].to_string()));
            i += 1;
            j += 1;
        } else if lcs[idx(i + 1, j)] >= lcs[idx(i, j + 1)] {
            ops.push(DiffLine::Removed(old[i].to_string()));
            i += 1;
        } else {
            ops.push(DiffLine::Added(new[j].to_string()));
            j += 1;
        }
    }
    while i < n {
        ops.push(DiffLine::Removed(old[i].to_string()));
        i += 1;
    }
    while j < m {
        ops.push(DiffLine::Added(new[j].to_string()));
        j += 1;
    }

    ops
}

fn format_unified(ops: &[DiffLine]) -> String {
    let changed: Vec<usize> = ops
        .iter()
        .enumerate()
        .filter(|(_, op)| op.is_change())
        .map(|(i, _)| i)
        .collect();

    // Changes separated by more than two context windows get their own hunk.
    let mut groups: Vec<(usize, usize)> = Vec::new();
    for &c in &changed {
        match groups.last_mut() {
            Some((_, last)) if c - *last <= 2 * CONTEXT_LINES => *last = c,
            _ => groups.push((c, c)),
        }
    }

    let mut output = format!("--- {}\n+++ {}\n", OLD_LABEL, NEW_LABEL);
    let mut old_no = 1usize;
    let mut new_no = 1usize;
    let mut cursor = 0usize;

    for (first, last) in groups {
        let start = first.saturating_sub(CONTEXT_LINES);
        let end = (last + CONTEXT_LINES + 1).min(ops.len());

        for op in &ops[cursor..start] {
            match op {
                DiffLine::Context(_) => {
                    old_no += 1;
                    new_no += 1;
                }
                DiffLine::Removed(_) => old_no += 1,
                DiffLine::Added(_) => new_no += 1,
            }
        }

        let old_count = ops[start..end]
            .iter()
            .filter(|op| matches!(op, DiffLine::Context(_) | DiffLine::Removed(_)))
            .count();
        let new_count = ops[start..end]
            .iter()
            .filter(|op| matches!(op, DiffLine::Context(_) | DiffLine::Added(_)))
            .count();

        output.push_str(&format!(
            "@@ -{},{} +{},{} @@\n",
            old_no, old_count, new_no, new_count
        ));

        for op in &ops[start..end] {
            match op {
                DiffLine::Context(line) => {
                    output.push(' ');
                    output.push_str(line);
                    old_no += 1;
                    new_no += 1;
                }
                DiffLine::Removed(line) => {
                    output.push('-');
                    output.push_str(line);
                    old_no += 1;
                }
                DiffLine::Added(line) => {
                    output.push('+');
                    output.push_str(line);
                    new_no += 1;
                }
            }
            output.push('\n');
        }

        cursor = end;
    }

    output
}
