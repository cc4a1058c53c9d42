use std::collections::BTreeMap;
use std::fmt;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::layout::{Layout, TreeNode};
use crate::util::fs::{ensure_dir, touch_empty};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FsOperation {
    CreateDirectory,
    CreateFile,
}

impl fmt::Display for FsOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FsOperation::CreateDirectory => f.write_str("create directory"),
            FsOperation::CreateFile => f.write_str("create file"),
        }
    }
}

/// Any failure to write the skeleton: permissions, path type collisions, IO.
#[derive(Debug, Error)]
#[error("failed to {operation} {path}")]
pub struct FilesystemError {
    pub operation: FsOperation,
    pub path: Utf8PathBuf,
    #[source]
    pub source: io::Error,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Options {
    pub dry_run: bool,
}

/// Nodes visited by one run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Summary {
    pub directories: usize,
    pub files: usize,
}

/// Write `layout` under `base`, creating `base` first when missing.
///
/// Directories are created if absent and left alone otherwise; files are
/// created empty or truncated. The first failure stops the walk and whatever
/// was already written stays on disk.
pub fn materialize(
    base: &Utf8Path,
    layout: &Layout,
    options: Options,
) -> Result<Summary, FilesystemError> {
    info!(
        layout = layout.name(),
        base = %base,
        directories = layout.directory_count(),
        files = layout.file_count(),
        dry_run = options.dry_run,
        "materializing"
    );
    if !options.dry_run {
        create_dir(base)?;
    }
    let mut summary = Summary::default();
    walk(base, layout.entries(), options, &mut summary)?;
    debug!(?summary, "walk finished");
    Ok(summary)
}

fn walk(
    base: &Utf8Path,
    children: &BTreeMap<String, TreeNode>,
    options: Options,
    summary: &mut Summary,
) -> Result<(), FilesystemError> {
    for (name, child) in children {
        let path = base.join(name);
        match child {
            TreeNode::File => {
                debug!(path = %path, "create file");
                if !options.dry_run {
                    touch_empty(&path).map_err(|source| FilesystemError {
                        operation: FsOperation::CreateFile,
                        path: path.clone(),
                        source,
                    })?;
                }
                summary.files += 1;
            }
            TreeNode::Directory(grandchildren) => {
                debug!(path = %path, "create directory");
                if !options.dry_run {
                    create_dir(&path)?;
                }
                summary.directories += 1;
                walk(&path, grandchildren, options, summary)?;
            }
        }
    }
    Ok(())
}

fn create_dir(path: &Utf8Path) -> Result<(), FilesystemError> {
    ensure_dir(path).map_err(|source| FilesystemError {
        operation: FsOperation::CreateDirectory,
        path: path.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const EXPECTED_DIRS: [&str; 5] = [
        "src",
        "src/middleware",
        "src/services",
        "src/routes",
        "src/utils",
    ];

    const EXPECTED_FILES: [&str; 12] = [
        "src/index",
        "src/router",
        "src/response",
        "src/middleware/auth",
        "src/services/checkout.service",
        "src/services/payment.service",
        "src/services/order.service",
        "src/routes/checkout.routes",
        "src/routes/payment.routes",
        "src/routes/order.routes",
        "src/utils/paypal",
        "src/utils/money",
    ];

    fn temp_root() -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        (dir, root)
    }

    fn assert_tree(base: &Utf8Path) {
        for dir in EXPECTED_DIRS {
            assert!(base.join(dir).is_dir(), "{dir} is not a directory");
        }
        for file in EXPECTED_FILES {
            let meta = fs::metadata(base.join(file)).unwrap();
            assert!(meta.is_file(), "{file} is not a file");
            assert_eq!(meta.len(), 0, "{file} is not empty");
        }
    }

    #[test]
    fn creates_full_tree_in_empty_base() {
        let (_guard, root) = temp_root();
        let out = root.join("out");
        let layout = Layout::builtin().unwrap();

        let summary = materialize(&out, &layout, Options::default()).unwrap();

        assert_eq!(
            summary,
            Summary {
                directories: 5,
                files: 12
            }
        );
        assert_tree(&out);
    }

    #[test]
    fn second_run_truncates_files_again() {
        let (_guard, root) = temp_root();
        let layout = Layout::builtin().unwrap();
        materialize(&root, &layout, Options::default()).unwrap();
        fs::write(root.join("src/utils/money"), "export const cents = 100;").unwrap();

        materialize(&root, &layout, Options::default()).unwrap();

        assert_tree(&root);
        let entries = fs::read_dir(root.join("src/utils")).unwrap().count();
        assert_eq!(entries, 2);
    }

    #[test]
    fn keeps_unrelated_content() {
        let (_guard, root) = temp_root();
        fs::create_dir_all(root.join("src/legacy")).unwrap();
        fs::write(root.join("src/README"), "keep me").unwrap();
        fs::write(root.join("src/legacy/old"), "keep me too").unwrap();

        materialize(&root, &Layout::builtin().unwrap(), Options::default()).unwrap();

        assert_tree(&root);
        assert_eq!(fs::read_to_string(root.join("src/README")).unwrap(), "keep me");
        assert_eq!(
            fs::read_to_string(root.join("src/legacy/old")).unwrap(),
            "keep me too"
        );
    }

    #[test]
    fn file_in_place_of_directory_fails_before_children() {
        let (_guard, root) = temp_root();
        fs::write(root.join("src"), "not a directory").unwrap();

        let err = materialize(&root, &Layout::builtin().unwrap(), Options::default())
            .unwrap_err();

        assert_eq!(err.operation, FsOperation::CreateDirectory);
        assert_eq!(err.path, root.join("src"));
        assert!(root.join("src").is_file());
        assert_eq!(fs::read_dir(&root).unwrap().count(), 1);
    }

    #[test]
    fn directory_in_place_of_file_fails() {
        let (_guard, root) = temp_root();
        fs::create_dir_all(root.join("src/index")).unwrap();

        let err = materialize(&root, &Layout::builtin().unwrap(), Options::default())
            .unwrap_err();

        assert_eq!(err.operation, FsOperation::CreateFile);
        assert_eq!(err.path, root.join("src/index"));
        assert!(err.to_string().starts_with("failed to create file"));
    }

    #[test]
    fn base_that_is_a_file_fails() {
        let (_guard, root) = temp_root();
        let base = root.join("out");
        fs::write(&base, "").unwrap();

        let err = materialize(&base, &Layout::builtin().unwrap(), Options::default())
            .unwrap_err();

        assert_eq!(err.path, base);
    }

    #[test]
    fn dry_run_counts_without_writing() {
        let (_guard, root) = temp_root();
        let out = root.join("out");

        let summary = materialize(
            &out,
            &Layout::builtin().unwrap(),
            Options { dry_run: true },
        )
        .unwrap();

        assert_eq!(summary.directories, 5);
        assert_eq!(summary.files, 12);
        assert!(!out.exists());
    }
}
