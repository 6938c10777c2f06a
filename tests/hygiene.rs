//! Hygiene: scans the production sources for patterns that crash or hide failures.
//!
//! Every pattern has a budget of zero. `*_test.rs` files are exempt.

use std::fs;
use std::path::Path;

struct SourceFile {
    path: String,
    content: String,
}

fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect(Path::new(env!("CARGO_MANIFEST_DIR")).join("src").as_path(), &mut files);
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
            out.push(SourceFile {
                path: path_str,
                content,
            });
        }
    }
}

/// Lines containing `pattern`, outside `//` comments, as `path:line`.
fn hits(files: &[SourceFile], pattern: &str) -> Vec<String> {
    files
        .iter()
        .flat_map(|file| {
            file.content
                .lines()
                .enumerate()
                .filter(|(_, line)| {
                    let code = line.split("//").next().unwrap_or_default();
                    code.contains(pattern)
                })
                .map(|(n, _)| format!("  {}:{}", file.path, n + 1))
                .collect::<Vec<_>>()
        })
        .collect()
}

fn assert_absent(pattern: &str) {
    let files = source_files();
    assert!(!files.is_empty(), "no sources found");
    let found = hits(&files, pattern);
    assert!(
        found.is_empty(),
        "`{pattern}` is not allowed in production code, found {}:\n{}",
        found.len(),
        found.join("\n")
    );
}

#[test]
fn no_unwrap() {
    assert_absent(".unwrap()");
}

#[test]
fn no_expect() {
    assert_absent(".expect(");
}

#[test]
fn no_panic() {
    assert_absent("panic!(");
}

#[test]
fn no_unreachable() {
    assert_absent("unreachable!(");
}

#[test]
fn no_todo_or_unimplemented() {
    assert_absent("todo!(");
    assert_absent("unimplemented!(");
}

#[test]
fn no_dbg() {
    assert_absent("dbg!(");
}

#[test]
fn no_silent_discard() {
    assert_absent("let _ = ");
}

#[test]
fn no_dead_code_allowance() {
    assert_absent("allow(dead_code)");
}
