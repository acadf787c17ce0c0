//! Line-level, side-by-side diff between the original resume and a version.

use serde::Serialize;
use similar::{DiffTag, TextDiff};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    Equal,
    Removed,
    Added,
    Changed,
}

/// One side of a row. `number` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffLine {
    pub number: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffRow {
    pub kind: RowKind,
    pub left: Option<DiffLine>,
    pub right: Option<DiffLine>,
}

pub fn side_by_side_diff(original: &str, tailored: &str) -> Vec<DiffRow> {
    let diff = TextDiff::from_lines(original, tailored);
    let old = diff.old_slices();
    let new = diff.new_slices();

    let line = |slices: &[&str], index: usize| DiffLine {
        number: index + 1,
        text: slices[index].trim_end_matches(['\n', '\r']).to_string(),
    };

    let mut rows = Vec::new();
    for op in diff.ops() {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        match tag {
            DiffTag::Equal => {
                for (o, n) in old_range.zip(new_range) {
                    rows.push(DiffRow {
                        kind: RowKind::Equal,
                        left: Some(line(old, o)),
                        right: Some(line(new, n)),
                    });
                }
            }
            DiffTag::Delete => {
                for o in old_range {
                    rows.push(DiffRow {
                        kind: RowKind::Removed,
                        left: Some(line(old, o)),
                        right: None,
                    });
                }
            }
            DiffTag::Insert => {
                for n in new_range {
                    rows.push(DiffRow {
                        kind: RowKind::Added,
                        left: None,
                        right: Some(line(new, n)),
                    });
                }
            }
            DiffTag::Replace => {
                let span = old_range.len().max(new_range.len());
                for i in 0..span {
                    let left = old_range.clone().nth(i).map(|o| line(old, o));
                    let right = new_range.clone().nth(i).map(|n| line(new, n));
                    let kind = match (&left, &right) {
                        (Some(_), Some(_)) => RowKind::Changed,
                        (Some(_), None) => RowKind::Removed,
                        _ => RowKind::Added,
                    };
                    rows.push(DiffRow { kind, left, right });
                }
            }
        }
    }
    rows
}
