//! Hygiene: source-pattern budgets for the canvas crate.
//!
//! Production files under `src/` (everything except `*_test.rs`) are scanned
//! line by line. Each pattern has a budget, currently zero everywhere; lowering
//! a budget is fine, raising one is not.

use std::fs;
use std::path::{Path, PathBuf};

struct Budget {
    pattern: &'static str,
    max: usize,
    hint: &'static str,
}

const BUDGETS: &[Budget] = &[
    // Panics.
    Budget { pattern: ".unwrap()", max: 0, hint: "propagate with ? or handle the None/Err arm" },
    Budget { pattern: ".expect(", max: 0, hint: "propagate with ? or handle the None/Err arm" },
    Budget { pattern: "panic!(", max: 0, hint: "return an error" },
    Budget { pattern: "unreachable!(", max: 0, hint: "make the state unrepresentable" },
    Budget { pattern: "todo!(", max: 0, hint: "finish the stub" },
    Budget { pattern: "unimplemented!(", max: 0, hint: "finish the stub" },
    // Silently dropped errors.
    Budget { pattern: "let _ =", max: 0, hint: "log or return the error" },
    Budget { pattern: ".ok()", max: 0, hint: "match on the Result" },
    // Structure.
    Budget { pattern: "#[allow(dead_code)]", max: 0, hint: "delete the unused item" },
    Budget { pattern: "println!(", max: 0, hint: "use `log`" },
    Budget { pattern: "dbg!(", max: 0, hint: "use `log`" },
];

fn production_files(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            production_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs")
            && !path.to_string_lossy().ends_with("_test.rs")
        {
            out.push(path);
        }
    }
}

/// `(path, line number)` of every line containing `pattern`.
fn offenders(sources: &[(PathBuf, String)], pattern: &str) -> Vec<String> {
    sources
        .iter()
        .flat_map(|(path, content)| {
            content
                .lines()
                .enumerate()
                .filter(move |(_, line)| line.contains(pattern))
                .map(move |(n, _)| format!("  {}:{}", path.display(), n + 1))
        })
        .collect()
}

#[test]
fn source_pattern_budgets() {
    let mut paths = Vec::new();
    production_files(Path::new("src"), &mut paths);
    assert!(!paths.is_empty(), "no sources found; run from the crate root");

    let sources: Vec<(PathBuf, String)> = paths
        .into_iter()
        .filter_map(|p| fs::read_to_string(&p).ok().map(|c| (p, c)))
        .collect();

    let mut failures = Vec::new();
    for budget in BUDGETS {
        let hits = offenders(&sources, budget.pattern);
        if hits.len() > budget.max {
            failures.push(format!(
                "{} budget exceeded: found {}, max {} ({})\n{}",
                budget.pattern,
                hits.len(),
                budget.max,
                budget.hint,
                hits.join("\n")
            ));
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n\n"));
}
