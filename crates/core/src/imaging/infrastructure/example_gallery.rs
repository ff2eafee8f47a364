use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::constants::IMAGE_EXTENSIONS;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("example directory '{0}' was not found")]
    MissingDirectory(PathBuf),
    #[error("failed to list example directory '{path}': {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("'{0}' is not one of the example images")]
    UnknownExample(String),
}

/// The fixed set of example images shipped next to the application.
///
/// Only regular files with a png/jpg/jpeg extension (any case) are listed,
/// sorted by file name. An empty gallery is valid; callers decide how to
/// present it.
#[derive(Clone, Debug)]
pub struct ExampleGallery {
    dir: PathBuf,
    names: Vec<String>,
}

impl ExampleGallery {
    pub fn scan(dir: &Path) -> Result<Self, GalleryError> {
        if !dir.is_dir() {
            return Err(GalleryError::MissingDirectory(dir.to_path_buf()));
        }

        let entries = fs::read_dir(dir).map_err(|source| GalleryError::Unreadable {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| is_supported_image(Path::new(name)))
            .collect();
        names.sort();

        log::debug!("Found {} example images in {}", names.len(), dir.display());
        Ok(Self {
            dir: dir.to_path_buf(),
            names,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn first(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }

    /// Full path of a listed example. Names outside the listing are rejected.
    pub fn path_of(&self, name: &str) -> Result<PathBuf, GalleryError> {
        if self.names.iter().any(|n| n == name) {
            Ok(self.dir.join(name))
        } else {
            Err(GalleryError::UnknownExample(name.to_string()))
        }
    }
}

/// Whether the path carries one of the accepted image extensions.
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"x").unwrap();
    }

    #[test]
    fn test_missing_directory_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = ExampleGallery::scan(&tmp.path().join("imagens"));
        assert!(matches!(result, Err(GalleryError::MissingDirectory(_))));
    }

    #[test]
    fn test_file_instead_of_directory_is_missing() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "imagens");
        let result = ExampleGallery::scan(&tmp.path().join("imagens"));
        assert!(matches!(result, Err(GalleryError::MissingDirectory(_))));
    }

    #[test]
    fn test_empty_directory_is_empty_gallery() {
        let tmp = TempDir::new().unwrap();
        let gallery = ExampleGallery::scan(tmp.path()).unwrap();
        assert!(gallery.is_empty());
        assert!(gallery.first().is_none());
    }

    #[test]
    fn test_only_image_extensions_are_listed_sorted() {
        let tmp = TempDir::new().unwrap();
        for name in ["b.JPG", "a.png", "notes.txt", "c.jpeg", "d.gif", "noext"] {
            touch(tmp.path(), name);
        }
        fs::create_dir(tmp.path().join("sub.png")).unwrap();

        let gallery = ExampleGallery::scan(tmp.path()).unwrap();
        assert_eq!(gallery.names(), &["a.png", "b.JPG", "c.jpeg"]);
        assert_eq!(gallery.first(), Some("a.png"));
    }

    #[test]
    fn test_directory_with_only_other_files_is_empty() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "readme.md");
        assert!(ExampleGallery::scan(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn test_path_of_listed_and_unlisted() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "face.png");
        let gallery = ExampleGallery::scan(tmp.path()).unwrap();

        assert_eq!(gallery.path_of("face.png").unwrap(), tmp.path().join("face.png"));
        assert!(matches!(
            gallery.path_of("../secret.png"),
            Err(GalleryError::UnknownExample(_))
        ));
    }

    #[rstest]
    #[case("photo.png", true)]
    #[case("photo.PNG", true)]
    #[case("photo.Jpg", true)]
    #[case("photo.jpeg", true)]
    #[case("photo.webp", false)]
    #[case("photo", false)]
    #[case("png", false)]
    fn test_is_supported_image(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_supported_image(Path::new(name)), expected);
    }
}
