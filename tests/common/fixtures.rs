//! Test fixture helpers for creating test projects
//!
//! Provides utilities for setting up realistic source trees in temporary
//! directories.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Re-export anyhow for convenience
pub use anyhow;

/// Python source with a comment, a docstring and a `#` inside a string
pub const PYTHON_SOURCE: &str = r#"#!/usr/bin/env python3
"""Module doc # not a comment"""

def greet(name):  # say hello
    message = "Hello, # " + name


    return message
"#;

/// JavaScript source with line and block comments and a URL in a string
pub const JS_SOURCE: &str = "/* header */\nconst url = \"http://example.com\";  // site\n\nfunction  add(a, b) {\n    return a + b; /* sum */\n}\n";

/// CSS source with a comment and loose spacing
pub const CSS_SOURCE: &str = "/* reset */\nbody {\n    margin : 0 ;\n    content: \"/* kept */\";\n}\n";

/// Write `contents` to `root/relative`, creating parent directories
pub fn write_file(root: &Path, relative: &str, contents: &str) -> anyhow::Result<PathBuf> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, contents)?;
    Ok(path)
}

/// Creates a project with three supported sources and one unsupported file
///
/// # Returns
///
/// A tuple of (TempDir, source paths) - the TempDir must be kept alive
pub fn create_mixed_project() -> anyhow::Result<(TempDir, Vec<PathBuf>)> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    let sources = vec![
        write_file(root, "app.py", PYTHON_SOURCE)?,
        write_file(root, "web/main.js", JS_SOURCE)?,
        write_file(root, "web/style.css", CSS_SOURCE)?,
    ];
    write_file(root, "README.txt", "Not a source file\n")?;

    Ok((temp_dir, sources))
}

/// Creates a project with `count` small Rust files
pub fn create_rust_project(count: usize) -> anyhow::Result<TempDir> {
    let temp_dir = TempDir::new()?;
    for i in 0..count {
        write_file(
            temp_dir.path(),
            &format!("src/mod_{}.rs", i),
            &format!("// module {}\nfn f{}()  {{\n    let s = \"// {}\";\n}}\n", i, i, i),
        )?;
    }
    Ok(temp_dir)
}
