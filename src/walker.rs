use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::Result;

/// What the input path points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Missing,
    File,
    Directory,
}

impl InputKind {
    pub fn of(path: &Path) -> Self {
        if path.is_dir() {
            InputKind::Directory
        } else if path.exists() {
            InputKind::File
        } else {
            InputKind::Missing
        }
    }
}

/// Every regular file reachable from `root`, depth-first with siblings in name order.
/// A file root yields only itself.
pub fn collect_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// `path` relative to `root` for log output, or the path itself when unrelated
pub fn relative_display(path: &Path, root: &Path) -> String {
    match pathdiff::diff_paths(path, root) {
        Some(relative) if !relative.as_os_str().is_empty() => relative.display().to_string(),
        _ => path.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_every_file_visited_once() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("Drama/Season 1/Drama.S01E01.mp4"));
        touch(&root.join("Drama/Season 1/Drama.S01E01.srt"));
        touch(&root.join("Drama/Season 2/Drama.S02E01.mkv"));
        touch(&root.join("Drama/poster.jpg"));
        touch(&root.join("notes.txt"));
        fs::create_dir_all(root.join("empty")).unwrap();

        let files = collect_files(root).unwrap();

        assert_eq!(
            files,
            vec![
                root.join("Drama/Season 1/Drama.S01E01.mp4"),
                root.join("Drama/Season 1/Drama.S01E01.srt"),
                root.join("Drama/Season 2/Drama.S02E01.mkv"),
                root.join("Drama/poster.jpg"),
                root.join("notes.txt"),
            ]
        );
    }

    #[test]
    fn test_file_root_yields_itself() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("clip.mp4");
        touch(&file);

        assert_eq!(InputKind::of(&file), InputKind::File);
        assert_eq!(collect_files(&file).unwrap(), vec![file]);
    }

    #[test]
    fn test_input_kind() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(InputKind::of(dir.path()), InputKind::Directory);
        assert_eq!(InputKind::of(&dir.path().join("nope")), InputKind::Missing);
    }

    #[test]
    fn test_relative_display() {
        let root = Path::new("/shows/Drama");
        assert_eq!(
            relative_display(Path::new("/shows/Drama/Season 1/a.mp4"), root),
            "Season 1/a.mp4"
        );
        assert_eq!(relative_display(root, root), "/shows/Drama");
    }
}
