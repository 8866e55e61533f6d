use std::env;
use std::io;
use std::path::{Path, PathBuf};

use cleanrules_core::{list_rules, render_all_as, Format, RenderOptions};

const GUIDE_PATH: &str = "docs/STYLE_GUIDE.md";

fn main() {
    let args: Vec<String> = env::args().collect();
    let task = args.get(1).map(|s| s.as_str()).unwrap_or("");

    match task {
        "render-guide" => render_guide(),
        "check-guide" => check_guide(),
        _ => {
            eprintln!("Usage: cargo run -p xtask -- <render-guide|check-guide>");
            std::process::exit(1);
        }
    }
}

fn guide() -> String {
    render_all_as(list_rules(), Format::Markdown, &RenderOptions::default())
        .expect("markdown rendering is infallible")
}

fn render_guide() {
    let path = workspace_root().join(GUIDE_PATH);
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).expect("failed to create docs dir");
    }
    std::fs::write(&path, guide())
        .unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));
    println!("Wrote {} ({} rules)", path.display(), list_rules().len());
}

fn check_guide() {
    let path = workspace_root().join(GUIDE_PATH);
    let current = read_existing(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));
    if current != guide() {
        eprintln!(
            "{} is out of date; run `cargo run -p xtask -- render-guide`",
            path.display()
        );
        std::process::exit(1);
    }
    println!("{} is up to date", path.display());
}

/// A missing guide reads as empty so it is reported as stale; other I/O errors surface.
fn read_existing(path: &Path) -> io::Result<String> {
    match std::fs::read_to_string(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
        other => other,
    }
}

fn workspace_root() -> PathBuf {
    // Walk up from current dir to find Cargo.toml with [workspace]
    let mut dir = env::current_dir().expect("no current dir");
    loop {
        let manifest = dir.join("Cargo.toml");
        if manifest.exists() {
            if let Ok(contents) = std::fs::read_to_string(&manifest) {
                if contents.contains("[workspace]") {
                    return dir;
                }
            }
        }
        if !dir.pop() {
            panic!("could not find workspace root");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn committed_guide_is_current() {
        let committed = include_str!("../../../docs/STYLE_GUIDE.md");
        assert!(committed == guide(), "run `cargo run -p xtask -- render-guide`");
    }

    #[test]
    fn missing_guide_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_existing(&dir.path().join("STYLE_GUIDE.md")).unwrap(), "");
    }

    #[test]
    fn unreadable_guide_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory in place of the file cannot be read as text.
        assert!(read_existing(dir.path()).is_err());
    }
}
