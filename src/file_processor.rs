//! File discovery and per-file validation for `mdguard check`

use anyhow::{Context, Result, bail};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use mdguard_lib::output::FileReport;
use mdguard_lib::validator::Validator;
use std::fs;
use std::path::Path;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Expands directory-style patterns to also match files within them.
/// Pattern "vendor" matches `vendor` itself and everything below it, at any depth.
///
/// Patterns containing glob characters (*, ?, [) are returned unchanged.
fn expand_directory_pattern(pattern: &str) -> Vec<String> {
    if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
        return vec![pattern.to_string()];
    }

    let base = pattern.trim_end_matches('/');
    vec![base.to_string(), format!("{base}/**"), format!("**/{base}"), format!("**/{base}/**")]
}

fn build_exclude_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns.iter().flat_map(|p| expand_directory_pattern(p)) {
        let glob = Glob::new(&pattern).with_context(|| format!("Invalid exclude pattern '{pattern}'"))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| MARKDOWN_EXTENSIONS.iter().any(|m| ext.eq_ignore_ascii_case(m)))
}

fn clean_path(path: &Path) -> String {
    let path = path.to_string_lossy();
    path.strip_prefix("./").unwrap_or(&*path).to_string()
}

/// Collect the Markdown files to check.
///
/// Explicit file arguments are always kept unless an exclude pattern matches.
/// Directories are walked with `ignore`, honouring `.gitignore` when `respect_gitignore` is set.
pub fn find_markdown_files(paths: &[String], exclude: &[String], respect_gitignore: bool) -> Result<Vec<String>> {
    let exclude_set = build_exclude_set(exclude)?;
    let roots: Vec<&str> = if paths.is_empty() {
        vec!["."]
    } else {
        paths.iter().map(String::as_str).collect()
    };

    let mut file_paths = Vec::new();

    for root in roots {
        let root_path = Path::new(root);
        if !root_path.exists() {
            bail!("File not found: {root}");
        }

        if root_path.is_file() {
            let cleaned = clean_path(root_path);
            if exclude_set.is_match(&cleaned) {
                eprintln!("warning: {cleaned} ignored because of an exclude pattern");
            } else {
                file_paths.push(cleaned);
            }
            continue;
        }

        let mut walk_builder = WalkBuilder::new(root_path);
        walk_builder
            .hidden(false)
            .ignore(respect_gitignore)
            .git_ignore(respect_gitignore)
            .git_global(respect_gitignore)
            .git_exclude(respect_gitignore)
            .parents(respect_gitignore)
            .require_git(false);

        for result in walk_builder.build() {
            match result {
                Ok(entry) => {
                    let path = entry.path();
                    if !path.is_file() || !is_markdown(path) {
                        continue;
                    }
                    let cleaned = clean_path(path);
                    let relative = path
                        .strip_prefix(root_path)
                        .map(clean_path)
                        .unwrap_or_else(|_| cleaned.clone());
                    if exclude_set.is_match(&cleaned) || exclude_set.is_match(&relative) {
                        log::debug!("Excluded {cleaned}");
                        continue;
                    }
                    file_paths.push(cleaned);
                }
                Err(err) => eprintln!("Error walking directory: {err}"),
            }
        }
    }

    file_paths.sort();
    file_paths.dedup();
    Ok(file_paths)
}

/// Validate one document held in memory. Empty documents are linted, not rejected.
pub fn process_content(name: &str, content: &str, validator: &Validator, strict: bool) -> Result<FileReport> {
    match validator.validate_file_content(content, strict) {
        Ok(result) => Ok(FileReport::new(name, result)),
        Err(e) => {
            log::debug!("{name}: {e}");
            bail!("{name}: {}", e.user_message())
        }
    }
}

pub fn process_file(path: &str, validator: &Validator, strict: bool) -> Result<FileReport> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
    process_content(path, &content, validator, strict)
}

/// Validate every file, preserving the input order in the output
pub fn process_files(files: &[String], validator: &Validator, strict: bool) -> Vec<Result<FileReport>> {
    #[cfg(feature = "parallel")]
    let results = files
        .par_iter()
        .map(|path| process_file(path, validator, strict))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let results = files.iter().map(|path| process_file(path, validator, strict)).collect();

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_expand_directory_pattern() {
        assert_eq!(expand_directory_pattern("*.md"), vec!["*.md"]);
        assert_eq!(
            expand_directory_pattern("vendor/"),
            vec!["vendor", "vendor/**", "**/vendor", "**/vendor/**"]
        );
    }

    #[test]
    fn test_find_markdown_files_walks_and_excludes() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("docs/vendor")).unwrap();
        fs::write(root.join("README.md"), "# R").unwrap();
        fs::write(root.join("docs/guide.markdown"), "# G").unwrap();
        fs::write(root.join("docs/notes.txt"), "not markdown").unwrap();
        fs::write(root.join("docs/vendor/skip.md"), "# S").unwrap();

        let root_str = root.to_string_lossy().to_string();
        let files = find_markdown_files(&[root_str], &["vendor".to_string()], true).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|f| Path::new(f).file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["README.md", "guide.markdown"]);
    }

    #[test]
    fn test_missing_path_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.md").to_string_lossy().to_string();
        assert!(find_markdown_files(&[missing], &[], true).is_err());
    }

    #[test]
    fn test_process_files_keeps_order() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.md");
        let bad = dir.path().join("bad.md");
        fs::write(&good, "# Good\n").unwrap();
        fs::write(&bad, "####### Bad\n").unwrap();
        let files = vec![good.to_string_lossy().to_string(), bad.to_string_lossy().to_string()];

        let results = process_files(&files, &Validator::default(), false);
        assert!(results[0].as_ref().unwrap().result.valid);
        assert!(!results[1].as_ref().unwrap().result.valid);
    }

    #[test]
    fn test_rejected_content_reports_file_name() {
        let err = process_content("a.md", "<iframe src=x>", &Validator::default(), false).unwrap_err();
        assert!(err.to_string().starts_with("a.md: "));
    }

    #[test]
    fn test_empty_content_is_linted() {
        let report = process_content("empty.md", "", &Validator::default(), false).unwrap();
        assert!(report.result.valid);
        assert_eq!(report.result.warnings[0].rule, "no-headings");
    }
}
