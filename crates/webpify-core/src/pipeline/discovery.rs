//! Input expansion: turns files and directories into an ordered path list.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::ProcessingConfig;

/// Expands input arguments into the paths handed to the enumerator.
pub struct FileDiscovery {
    config: ProcessingConfig,
}

impl FileDiscovery {
    /// Create a new file discovery instance.
    pub fn new(config: ProcessingConfig) -> Self {
        Self { config }
    }

    /// Expand each input in order.
    ///
    /// Directories are walked recursively and contribute their supported
    /// files sorted by path. Anything else is kept as given, even if it does
    /// not exist: the enumerator reports unreadable inputs itself.
    pub fn expand(&self, inputs: &[PathBuf]) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        for input in inputs {
            if input.is_dir() {
                paths.extend(self.discover_dir(input));
            } else {
                paths.push(input.clone());
            }
        }
        paths
    }

    /// Recursively find all supported files under `dir`.
    fn discover_dir(&self, dir: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && self.is_supported(e.path()))
            .map(|e| e.into_path())
            .collect();

        // Sort by path for deterministic ordering
        files.sort();
        files
    }

    /// Check if a file has a supported extension.
    fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext_lower = ext.to_lowercase();
                self.config
                    .supported_formats
                    .iter()
                    .any(|fmt| fmt.to_lowercase() == ext_lower)
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_supported() {
        let discovery = FileDiscovery::new(ProcessingConfig::default());

        assert!(discovery.is_supported(Path::new("test.jpg")));
        assert!(discovery.is_supported(Path::new("test.JPG")));
        assert!(discovery.is_supported(Path::new("test.jpeg")));
        assert!(discovery.is_supported(Path::new("test.png")));
        assert!(!discovery.is_supported(Path::new("test.txt")));
        assert!(!discovery.is_supported(Path::new("test")));
    }

    #[test]
    fn test_expand_walks_directories_and_keeps_files() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(dir.path().join("b.png"), b"").unwrap();
        std::fs::write(nested.join("a.jpg"), b"").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"").unwrap();

        let discovery = FileDiscovery::new(ProcessingConfig::default());
        let explicit = PathBuf::from("missing.gif");
        let paths = discovery.expand(&[explicit.clone(), dir.path().to_path_buf()]);

        assert_eq!(
            paths,
            vec![
                explicit,
                dir.path().join("b.png"),
                dir.path().join("nested").join("a.jpg"),
            ]
        );
    }
}
