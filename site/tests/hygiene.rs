//! Hygiene: source-scan budgets for the site crate.
//!
//! Production code under `src/` (sibling `*_test.rs` files excluded) must not
//! panic or silently discard results. Budgets only ever go down.
#![allow(clippy::absurd_extreme_comparisons)]

use std::fs;
use std::path::Path;

const MAX_UNWRAP: usize = 0;
const MAX_EXPECT: usize = 0;
const MAX_PANIC: usize = 0;
const MAX_UNREACHABLE: usize = 0;
const MAX_TODO: usize = 0;
const MAX_SILENT_DISCARD: usize = 0;
const MAX_ALLOW_DEAD_CODE: usize = 0;

/// `.ok()` is how the DOM layer turns failed casts and lookups into "markup
/// not present"; the pure modules have no such excuse.
const MAX_DOT_OK_OUTSIDE_DOM: usize = 0;

struct SourceFile {
    path: String,
    content: String,
}

fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect(Path::new("src"), &mut files);
    assert!(!files.is_empty(), "no sources found; run from the site crate root");
    files
}

fn collect(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect(&path, out);
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if !path_str.ends_with(".rs") || path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

fn hits<'a>(files: impl IntoIterator<Item = &'a SourceFile>, pattern: &str) -> Vec<(String, usize)> {
    files
        .into_iter()
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

fn check(pattern: &str, max: usize, found: &[(String, usize)]) {
    let count: usize = found.iter().map(|(_, c)| c).sum();
    let listing = found
        .iter()
        .map(|(path, c)| format!("  {path}: {c}"))
        .collect::<Vec<_>>()
        .join("\n");
    assert!(count <= max, "{pattern} budget exceeded: found {count}, max {max}.\n{listing}");
}

fn budget(pattern: &str, max: usize) {
    check(pattern, max, &hits(&source_files(), pattern));
}

#[test]
fn unwrap_budget() {
    budget(".unwrap()", MAX_UNWRAP);
}

#[test]
fn expect_budget() {
    budget(".expect(", MAX_EXPECT);
}

#[test]
fn panic_budget() {
    budget("panic!(", MAX_PANIC);
}

#[test]
fn unreachable_budget() {
    budget("unreachable!(", MAX_UNREACHABLE);
}

#[test]
fn todo_budget() {
    budget("todo!(", MAX_TODO);
}

#[test]
fn silent_discard_budget() {
    budget("let _ =", MAX_SILENT_DISCARD);
}

#[test]
fn allow_dead_code_budget() {
    budget("#[allow(dead_code)]", MAX_ALLOW_DEAD_CODE);
}

#[test]
fn dot_ok_budget_outside_dom() {
    let files = source_files();
    let pure = files.iter().filter(|f| !Path::new(&f.path).starts_with("src/dom"));
    check(".ok()", MAX_DOT_OK_OUTSIDE_DOM, &hits(pure, ".ok()"));
}
