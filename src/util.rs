/// Shared filesystem helpers.
pub mod fs {
    use std::fs;
    use std::io;

    use camino::Utf8Path;

    /// Ensure a directory exists, creating it recursively if needed.
    ///
    /// An existing non-directory at `path` is an error, never a silent success.
    pub fn ensure_dir(path: &Utf8Path) -> io::Result<()> {
        if path.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(path)
    }

    /// Create an empty file, truncating any existing contents.
    pub fn touch_empty(path: &Utf8Path) -> io::Result<()> {
        fs::File::create(path).map(drop)
    }

}
