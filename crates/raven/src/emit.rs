//! Source discovery and output writing.

use anyhow::{Context, Result};
use raven_transpile::{OUTPUT_EXTENSION, SOURCE_EXTENSION, SourceUnit, Transpiler};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Whether `path` names a Raven entry file.
pub fn is_source(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
}

/// Where the JavaScript for `source` goes: beside it, or under `dist_dir`
/// inside the source's directory.
pub fn output_path(source: &Path, dist_dir: Option<&str>) -> PathBuf {
    let dir = source.parent().unwrap_or(Path::new(""));
    let dir = match dist_dir {
        Some(dist) => dir.join(dist),
        None => dir.to_path_buf(),
    };
    let mut name = source
        .file_stem()
        .unwrap_or(source.as_os_str())
        .to_os_string();
    name.push(".");
    name.push(OUTPUT_EXTENSION);
    dir.join(name)
}

/// Every `.rn` file under `root`, sorted. Hidden directories are skipped.
pub fn discover_sources(root: &Path) -> Vec<PathBuf> {
    let mut sources: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_source(e.path()))
        .map(|e| e.into_path())
        .collect();
    sources.sort();
    sources
}

/// Keep the named files that exist and are Raven sources, reporting the rest.
pub fn select_sources(files: &[PathBuf]) -> Vec<PathBuf> {
    files
        .iter()
        .filter(|path| {
            if !path.is_file() {
                eprintln!("skipping {}: no such file", path.display());
                false
            } else if !is_source(path) {
                eprintln!(
                    "skipping {}: not a .{SOURCE_EXTENSION} file",
                    path.display()
                );
                false
            } else {
                true
            }
        })
        .cloned()
        .collect()
}

/// Transpile one file and write its output. Returns the output path.
pub fn process_file(
    transpiler: &Transpiler<'_>,
    source: &Path,
    dist_dir: Option<&str>,
) -> Result<PathBuf> {
    let unit = SourceUnit::read(source)
        .with_context(|| format!("failed to read {}", source.display()))?;
    let code = transpiler
        .transpile(&unit)
        .with_context(|| format!("failed to transpile {}", source.display()))?;

    let output = output_path(source, dist_dir);
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(&output, code)
        .with_context(|| format!("failed to write {}", output.display()))?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use raven_transpile::{FsLoader, TranspileOptions};
    use tempfile::TempDir;

    #[test]
    fn test_output_beside_source() {
        assert_eq!(
            output_path(Path::new("app/main.rn"), None),
            Path::new("app/main.js")
        );
        assert_eq!(output_path(Path::new("main.rn"), None), Path::new("main.js"));
    }

    #[test]
    fn test_output_in_dist_dir() {
        assert_eq!(
            output_path(Path::new("app/main.rn"), Some("dist")),
            Path::new("app/dist/main.js")
        );
    }

    #[test]
    fn test_discover_sorted_and_skips_hidden() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("b")).unwrap();
        std::fs::create_dir_all(dir.path().join(".cache")).unwrap();
        std::fs::write(dir.path().join("b/z.rn"), "").unwrap();
        std::fs::write(dir.path().join("a.rn"), "").unwrap();
        std::fs::write(dir.path().join("lib.rnm"), "").unwrap();
        std::fs::write(dir.path().join(".cache/old.rn"), "").unwrap();

        let found = discover_sources(dir.path());
        assert_eq!(
            found,
            vec![dir.path().join("a.rn"), dir.path().join("b").join("z.rn")]
        );
    }

    #[test]
    fn test_select_skips_missing_and_foreign() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("ok.rn");
        let other = dir.path().join("notes.txt");
        std::fs::write(&good, "").unwrap();
        std::fs::write(&other, "").unwrap();

        let selected = select_sources(&[dir.path().join("gone.rn"), other, good.clone()]);
        assert_eq!(selected, vec![good]);
    }

    #[test]
    fn test_process_writes_output() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("hello.rn");
        std::fs::write(&source, "say(\"hi\")").unwrap();

        let options = TranspileOptions::new().artifact_dir(dir.path());
        let transpiler = Transpiler::new(&FsLoader, options);
        let output = process_file(&transpiler, &source, Some("dist")).unwrap();

        assert_eq!(output, dir.path().join("dist").join("hello.js"));
        assert_eq!(
            std::fs::read_to_string(output).unwrap(),
            "console.log(\"hi\")"
        );
    }
}
