//! Structural diff: JSON-path-addressed additions, removals and changes.

use std::collections::BTreeSet;
use std::mem::discriminant;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

/// Hard cap on collected changes to keep pathological payloads bounded.
pub const MAX_CHANGES: usize = 500;

lazy_static! {
    static ref BARE_IDENT: Regex = Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffChangeKind {
    Added,
    Removed,
    Changed,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffChange {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: DiffChangeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production_value: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralDiff {
    pub changes: Vec<DiffChange>,
    pub total_changes: usize,
    pub truncated: bool,
}

#[derive(Debug, Clone, Copy)]
enum Seg<'a> {
    Key(&'a str),
    Index(usize),
}

/// Root is the literal `(root)`; bare-identifier keys use dot notation,
/// everything else bracket notation. The first segment carries no leading
/// separator.
fn format_path(segments: &[Seg]) -> String {
    if segments.is_empty() {
        return "(root)".to_string();
    }
    let mut out = String::new();
    for (idx, seg) in segments.iter().enumerate() {
        match seg {
            Seg::Index(i) => {
                out.push_str(&format!("[{i}]"));
            }
            Seg::Key(k) if BARE_IDENT.is_match(k) => {
                if idx > 0 {
                    out.push('.');
                }
                out.push_str(k);
            }
            Seg::Key(k) => {
                out.push_str(&format!("[\"{k}\"]"));
            }
        }
    }
    out
}

/// Recursively compare two values by structural position, emitting one
/// [`DiffChange`] per divergence, up to `max_changes`.
///
/// Object keys are visited in serde_json's sorted map order, so traversal is
/// deterministic and truncation always drops the same trailing changes.
pub fn structural_diff(local: &Value, production: &Value, max_changes: usize) -> StructuralDiff {
    let mut changes = Vec::new();
    let mut path = Vec::new();
    collect_changes(local, production, &mut path, &mut changes, max_changes);
    let truncated = changes.len() >= max_changes;
    StructuralDiff {
        total_changes: changes.len(),
        truncated,
        changes,
    }
}

fn push_change(
    changes: &mut Vec<DiffChange>,
    path: &[Seg],
    kind: DiffChangeKind,
    local: Option<&Value>,
    production: Option<&Value>,
) {
    changes.push(DiffChange {
        path: format_path(path),
        kind,
        local_value: local.cloned(),
        production_value: production.cloned(),
    });
}

fn collect_changes<'a>(
    local: &'a Value,
    production: &'a Value,
    path: &mut Vec<Seg<'a>>,
    changes: &mut Vec<DiffChange>,
    max_changes: usize,
) {
    if changes.len() >= max_changes {
        return;
    }
    if local == production {
        return;
    }

    // Type mismatch (array-vs-object included): a single change, no recursion.
    if discriminant(local) != discriminant(production) {
        push_change(
            changes,
            path,
            DiffChangeKind::Changed,
            Some(local),
            Some(production),
        );
        return;
    }

    match (local, production) {
        (Value::Array(l), Value::Array(p)) => {
            let max_len = l.len().max(p.len());
            for i in 0..max_len {
                if changes.len() >= max_changes {
                    break;
                }
                path.push(Seg::Index(i));
                if i >= l.len() {
                    push_change(changes, path, DiffChangeKind::Added, None, Some(&p[i]));
                } else if i >= p.len() {
                    push_change(changes, path, DiffChangeKind::Removed, Some(&l[i]), None);
                } else {
                    collect_changes(&l[i], &p[i], path, changes, max_changes);
                }
                path.pop();
            }
        }
        (Value::Object(l), Value::Object(p)) => {
            let keys: BTreeSet<&str> = l.keys().chain(p.keys()).map(String::as_str).collect();
            for key in keys {
                if changes.len() >= max_changes {
                    break;
                }
                path.push(Seg::Key(key));
                match (l.get(key), p.get(key)) {
                    (Some(lv), None) => {
                        push_change(changes, path, DiffChangeKind::Removed, Some(lv), None);
                    }
                    (None, Some(pv)) => {
                        push_change(changes, path, DiffChangeKind::Added, None, Some(pv));
                    }
                    (Some(lv), Some(pv)) => {
                        collect_changes(lv, pv, path, changes, max_changes);
                    }
                    (None, None) => {}
                }
                path.pop();
            }
        }
        // Primitives of the same type that are not equal.
        _ => {
            push_change(
                changes,
                path,
                DiffChangeKind::Changed,
                Some(local),
                Some(production),
            );
        }
    }
}
