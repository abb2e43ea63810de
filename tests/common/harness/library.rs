//! Throwaway Quiver library on disk.

#![allow(dead_code)]

use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::{QuiverCommand, TestNote};

/// Node of the declared notebook hierarchy.
pub struct Tree {
    id: String,
    children: Vec<Tree>,
}

impl Tree {
    fn to_json(&self) -> Value {
        json!({
            "uuid": self.id,
            "children": self.children.iter().map(Tree::to_json).collect::<Vec<_>>(),
        })
    }
}

/// Builds a leaf in the declared hierarchy.
pub fn leaf(id: &str) -> Tree {
    Tree {
        id: id.to_string(),
        children: Vec::new(),
    }
}

/// Builds a node with children in the declared hierarchy.
pub fn node(id: &str, children: Vec<Tree>) -> Tree {
    Tree {
        id: id.to_string(),
        children,
    }
}

/// A temporary `*.qvlibrary` plus a sibling output location.
///
/// Everything lives under one temp directory that is removed on drop.
pub struct TestLibrary {
    _temp_dir: TempDir,
    root: PathBuf,
    output: PathBuf,
    config: PathBuf,
}

impl TestLibrary {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().join("Test.qvlibrary");
        fs::create_dir_all(&root).expect("Failed to create library root");
        let output = temp_dir.path().join("out");
        let config = temp_dir.path().join("config.toml");
        Self {
            _temp_dir: temp_dir,
            root,
            output,
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Writes the library-level `meta.json` declaring `children` under the root.
    pub fn declare(&self, children: Vec<Tree>) -> &Self {
        let meta = node("root", children).to_json();
        write_json(&self.root.join("meta.json"), &meta);
        self
    }

    /// Creates a notebook directory with the given notes.
    pub fn add_notebook(&self, id: &str, name: &str, notes: &[TestNote]) -> PathBuf {
        let dir = self.root.join(format!("{id}.qvnotebook"));
        write_json(&dir.join("meta.json"), &json!({"uuid": id, "name": name}));
        for note in notes {
            self.add_note(&dir, note);
        }
        dir
    }

    fn add_note(&self, notebook_dir: &Path, note: &TestNote) {
        let dir = notebook_dir.join(format!("{}.qvnote", note.id));
        write_json(&dir.join("meta.json"), &note.meta_json());
        write_json(&dir.join("content.json"), &note.content_json());
        for (name, bytes) in &note.resources {
            let path = dir.join("resources").join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, bytes).expect("Failed to write resource");
        }
    }

    /// Writes the config file passed to every command.
    pub fn write_config(&self, contents: &str) {
        fs::write(&self.config, contents).expect("Failed to write config");
    }

    /// Reads a file relative to the output directory.
    pub fn read_output(&self, relative: &str) -> String {
        let path = self.output.join(relative);
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
    }

    /// Every file under the output directory, relative and sorted.
    pub fn output_files(&self) -> Vec<String> {
        let mut files: Vec<String> = walkdir::WalkDir::new(&self.output)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                e.path()
                    .strip_prefix(&self.output)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        files.sort();
        files
    }

    /// A command isolated from the user's config.
    pub fn cmd(&self) -> QuiverCommand {
        QuiverCommand::new().config(&self.config)
    }

    /// `export <library> -o <output>`.
    pub fn export(&self) -> QuiverCommand {
        self.cmd().args([
            "export".to_string(),
            self.root.to_string_lossy().to_string(),
            "-o".to_string(),
            self.output.to_string_lossy().to_string(),
        ])
    }

    /// `check <library>`.
    pub fn check(&self) -> QuiverCommand {
        self.cmd()
            .args(["check".to_string(), self.root.to_string_lossy().to_string()])
    }
}

impl Default for TestLibrary {
    fn default() -> Self {
        Self::new()
    }
}

fn write_json(path: &Path, value: &Value) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, serde_json::to_vec_pretty(value).unwrap()).expect("Failed to write json");
}
