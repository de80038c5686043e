//! Integration tests for the `patterndex` CLI binary.

use serde_json::Value;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn write_file(path: &Path, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

fn patterndex_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_patterndex"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn check(root: &Path) -> Result<Output, Box<dyn std::error::Error>> {
    Ok(patterndex_cmd().arg("--root").arg(root).arg("check").output()?)
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(ToString::to_string)
        .collect()
}

/// Skeleton-complete pattern file with one Go example and an empty
/// Related Patterns table.
fn pattern_file(title: &str) -> String {
    format!(
        "# {title}\n\n> One-line intent of {title}.\n\n\
## Principle\n\nHow it works.\n\n\
```text\n+---+\n| A |\n+---+\n```\n\n\
## Problem Solved\n\n- A force\n\n\
## Solution\n\n```go\npackage main\n\nfunc main() {{}}\n```\n\n\
## When to Use\n\n- Often\n\n\
## When Not to Use\n\n- Rarely\n\n\
## Advantages / Disadvantages\n\n| Advantages | Disadvantages |\n|---|---|\n| Simple | Rigid |\n\n\
## Anti-patterns\n\n| Problem | Solution |\n|---|---|\n| Overuse | Restraint |\n\n\
## Related Patterns\n\n| Pattern | Relation |\n|---------|----------|\n\n\
## Sources\n\n- [Reference](https://example.com/patterns)\n"
    )
}

/// Consistent corpus: root README, category READMEs and one pattern file
/// per `(stem, title)`.
fn write_corpus(
    root: &Path,
    categories: &[(&str, Vec<(&str, &str)>)],
) -> Result<(), Box<dyn std::error::Error>> {
    let mut readme = String::from(
        "# Pattern Library\n\n| Category | Files | Description |\n|---|---|---|\n",
    );
    let mut alphabetical = String::new();
    let mut total = 0;
    for (name, patterns) in categories {
        let _ = writeln!(
            readme,
            "| [{name}/](./{name}/README.md) | {} | {name} |",
            patterns.len()
        );
        total += patterns.len();

        let mut category = format!(
            "# {name}\n\nThis category holds {} patterns.\n\n\
             | File | Content | Usage |\n|---|---|---|\n",
            patterns.len()
        );
        for (stem, title) in patterns {
            let _ = writeln!(category, "| [{stem}.md](./{stem}.md) | {title} | Often |");
            let _ = writeln!(alphabetical, "- [{title}](./{name}/{stem}.md) — {name}");
            write_file(&root.join(name).join(format!("{stem}.md")), &pattern_file(title))?;
        }
        write_file(&root.join(name).join("README.md"), &category)?;
    }
    let _ = writeln!(readme, "| **Total** | **{total}** | |");
    readme.push_str("\n## Alphabetical Index\n\n");
    readme.push_str(&alphabetical);
    write_file(&root.join("README.md"), &readme)?;
    Ok(())
}

fn replace_in(path: &Path, from: &str, to: &str) -> Result<(), Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    assert!(content.contains(from), "{from:?} not in {}", path.display());
    fs::write(path, content.replacen(from, to, 1))?;
    Ok(())
}

#[test]
fn test_clean_tree_prints_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = TempDir::new()?;
    write_corpus(
        tmp.path(),
        &[
            ("structural", vec![("adapter", "Adapter"), ("facade", "Facade")]),
            ("concurrency", vec![("actor", "Actor")]),
        ],
    )?;

    let output = check(tmp.path())?;
    assert_eq!(
        output.status.code(),
        Some(0),
        "stdout: {}\nstderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(output.stdout.is_empty());
    Ok(())
}

#[test]
fn test_dangling_related_pattern() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = TempDir::new()?;
    write_corpus(tmp.path(), &[("structural", vec![("adapter", "Adapter")])])?;
    replace_in(
        &tmp.path().join("structural/adapter.md"),
        "|---------|----------|\n",
        "|---------|----------|\n| [Widget Wrapper](./widget-wrapper.md) | Wraps |\n",
    )?;

    let output = check(tmp.path())?;
    assert_eq!(output.status.code(), Some(1));
    assert!(
        stdout_lines(&output)
            .contains(&"structural/adapter.md: V3: broken relative link ./widget-wrapper.md".to_string())
    );
    Ok(())
}

#[test]
fn test_count_mismatch() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = TempDir::new()?;
    let owned: Vec<(String, String)> = (1..=8)
        .map(|n| (format!("shape-{n}"), format!("Shape {n}")))
        .collect();
    let patterns: Vec<(&str, &str)> = owned
        .iter()
        .map(|(stem, title)| (stem.as_str(), title.as_str()))
        .collect();
    write_corpus(tmp.path(), &[("structural", patterns)])?;
    replace_in(
        &tmp.path().join("README.md"),
        "(./structural/README.md) | 8 |",
        "(./structural/README.md) | 7 |",
    )?;

    let output = check(tmp.path())?;
    assert_eq!(output.status.code(), Some(1));
    let lines = stdout_lines(&output);
    assert!(lines.contains(&"README.md: V1: category 'structural' declared 7, found 8".to_string()));
    Ok(())
}

#[test]
fn test_slug_collision() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = TempDir::new()?;
    write_corpus(
        tmp.path(),
        &[
            ("cloud", vec![("cache", "Cache Aside")]),
            ("performance", vec![("cache", "Cache")]),
        ],
    )?;

    let output = check(tmp.path())?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout_lines(&output),
        vec![
            "cloud/cache.md: V5: slug 'cache' also used by performance/cache.md",
            "performance/cache.md: V5: slug 'cache' also used by cloud/cache.md",
        ]
    );
    Ok(())
}

#[test]
fn test_bad_dto_tag() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = TempDir::new()?;
    write_corpus(tmp.path(), &[("enterprise", vec![("dto", "Data Transfer Object")])])?;
    replace_in(
        &tmp.path().join("enterprise/dto.md"),
        "func main() {}",
        "type UserDTO struct {\n\tEmail string `json:\"email\" dto:\"input,api,public\"`\n}\n\nfunc main() {}",
    )?;

    let output = check(tmp.path())?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout_lines(&output),
        vec![
            "enterprise/dto.md: V7: invalid token 'input' in position 1 (allowed: in,out,inout); \
             invalid token 'public' in position 3 (allowed: pub,priv,pii,secret)"
        ]
    );
    Ok(())
}

#[test]
fn test_missing_section() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = TempDir::new()?;
    write_corpus(tmp.path(), &[("concurrency", vec![("actor", "Actor")])])?;
    replace_in(
        &tmp.path().join("concurrency/actor.md"),
        "## When to Use\n\n- Often\n\n",
        "",
    )?;

    let output = check(tmp.path())?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout_lines(&output),
        vec!["concurrency/actor.md: V6: required section 'When to Use' missing"]
    );
    Ok(())
}

#[test]
fn test_json_format_prints_one_object_per_line() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = TempDir::new()?;
    write_corpus(tmp.path(), &[("concurrency", vec![("actor", "Actor")])])?;
    replace_in(
        &tmp.path().join("concurrency/actor.md"),
        "## When to Use\n\n- Often\n\n",
        "",
    )?;

    let output = patterndex_cmd()
        .arg("--root")
        .arg(tmp.path())
        .arg("check")
        .arg("--format")
        .arg("json")
        .output()?;
    assert_eq!(output.status.code(), Some(1));
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 1);
    let payload: Value = serde_json::from_str(&lines[0])?;
    assert_eq!(payload.get("path").and_then(Value::as_str), Some("concurrency/actor.md"));
    assert_eq!(payload.get("rule").and_then(Value::as_str), Some("V6"));
    assert_eq!(
        payload.get("reason").and_then(Value::as_str),
        Some("required section 'When to Use' missing")
    );
    Ok(())
}

#[test]
fn test_missing_root_and_config_exit_two() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = TempDir::new()?;
    let output = check(&tmp.path().join("absent"))?;
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(!output.stderr.is_empty());

    write_corpus(tmp.path(), &[("concurrency", vec![("actor", "Actor")])])?;
    let output = patterndex_cmd()
        .arg("--root")
        .arg(tmp.path())
        .arg("--conf")
        .arg(tmp.path().join("missing.yaml"))
        .arg("check")
        .output()?;
    assert_eq!(output.status.code(), Some(2));

    write_file(&tmp.path().join(".patterndex.yaml"), "exemplar_langauge: go\n")?;
    assert_eq!(check(tmp.path())?.status.code(), Some(2));
    Ok(())
}

#[test]
fn test_schema_describes_findings() -> Result<(), Box<dyn std::error::Error>> {
    let output = patterndex_cmd().arg("check").arg("--schema").output()?;
    assert!(output.status.success());
    let schema: Value = serde_json::from_slice(&output.stdout)?;
    let properties = schema
        .get("properties")
        .and_then(Value::as_object)
        .ok_or("schema has no properties")?;
    for field in ["path", "rule", "reason"] {
        assert!(properties.contains_key(field), "{field}");
    }
    Ok(())
}

#[test]
fn test_scaffold_then_index_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = TempDir::new()?;
    write_file(
        &tmp.path().join("README.md"),
        "# Pattern Library\n\n\
         <!-- patterndex:categories -->\n<!-- /patterndex:categories -->\n\n\
         ## Alphabetical Index\n\n\
         <!-- patterndex:alphabetical -->\n<!-- /patterndex:alphabetical -->\n",
    )?;

    let output = patterndex_cmd()
        .arg("--root")
        .arg(tmp.path())
        .args(["new", "category", "--name", "concurrency", "--description", "Threads and tasks."])
        .output()?;
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(stdout_lines(&output), vec!["concurrency/README.md"]);

    let output = patterndex_cmd()
        .arg("--root")
        .arg(tmp.path())
        .args(["new", "pattern", "--category", "concurrency", "--name", "Foo Bar"])
        .output()?;
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(stdout_lines(&output), vec!["concurrency/foo-bar.md"]);
    let content = fs::read_to_string(tmp.path().join("concurrency/foo-bar.md"))?;
    assert!(content.starts_with("# Foo Bar\n"));

    let again = patterndex_cmd()
        .arg("--root")
        .arg(tmp.path())
        .args(["new", "pattern", "--category", "concurrency", "--name", "Foo Bar"])
        .output()?;
    assert_eq!(again.status.code(), Some(2));
    assert_eq!(fs::read_to_string(tmp.path().join("concurrency/foo-bar.md"))?, content);

    let output = patterndex_cmd()
        .arg("--root")
        .arg(tmp.path())
        .args(["index", "--write"])
        .output()?;
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        stdout_lines(&output),
        vec!["README.md", "concurrency/README.md"]
    );

    let output = check(tmp.path())?;
    let structural: Vec<String> = stdout_lines(&output)
        .into_iter()
        .filter(|line| line.contains(": V1: ") || line.contains(": V2: ") || line.contains(": V6: "))
        .collect();
    assert!(structural.is_empty(), "{structural:?}");

    let output = patterndex_cmd()
        .arg("--root")
        .arg(tmp.path())
        .args(["index", "--write"])
        .output()?;
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    Ok(())
}

#[test]
fn test_index_prints_blocks_without_writing() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = TempDir::new()?;
    write_corpus(tmp.path(), &[("concurrency", vec![("actor", "Actor")])])?;
    let before = fs::read_to_string(tmp.path().join("README.md"))?;

    let output = patterndex_cmd().arg("--root").arg(tmp.path()).arg("index").output()?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("<!-- patterndex:categories -->"));
    assert!(stdout.contains("| [concurrency/](./concurrency/README.md) | 1 |"));
    assert!(stdout.contains("- [Actor](./concurrency/actor.md) — concurrency"));
    assert_eq!(fs::read_to_string(tmp.path().join("README.md"))?, before);
    Ok(())
}
