use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelResolveError {
    #[error("cascade file not found: {0}")]
    ExplicitMissing(PathBuf),
    #[error("failed to create cache directory: {0}")]
    CacheDir(#[source] std::io::Error),
    #[error("download failed for {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to write cascade to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not determine cache directory")]
    NoCacheDir,
}

/// Progress callback: `(bytes_downloaded, total_bytes)`.
/// `total_bytes` is 0 if the server didn't provide Content-Length.
pub type ProgressFn = Box<dyn Fn(u64, u64) + Send>;

/// Where to look for a cascade file before falling back to a download.
#[derive(Clone, Debug, Default)]
pub struct ResolveOptions {
    /// User-supplied file. When set, no other location is tried.
    pub explicit_path: Option<PathBuf>,
    /// Directory shipped alongside the binary (development / packaged installs).
    pub bundled_dir: Option<PathBuf>,
}

/// Resolve a cascade file by name.
///
/// Resolution order:
/// 1. Explicit path (must exist)
/// 2. User cache directory (platform-specific)
/// 3. Bundled directory
/// 4. Download from URL to cache
pub fn resolve(
    name: &str,
    url: &str,
    options: &ResolveOptions,
    progress: Option<ProgressFn>,
) -> Result<PathBuf, ModelResolveError> {
    if let Some(path) = &options.explicit_path {
        return explicit(path);
    }
    resolve_in(&model_cache_dir()?, name, url, options.bundled_dir.as_deref(), progress)
}

fn explicit(path: &Path) -> Result<PathBuf, ModelResolveError> {
    if path.is_file() {
        Ok(path.to_path_buf())
    } else {
        Err(ModelResolveError::ExplicitMissing(path.to_path_buf()))
    }
}

fn resolve_in(
    cache_dir: &Path,
    name: &str,
    url: &str,
    bundled_dir: Option<&Path>,
    progress: Option<ProgressFn>,
) -> Result<PathBuf, ModelResolveError> {
    let cached_path = cache_dir.join(name);
    if cached_path.exists() {
        log::debug!("Cascade found in cache: {}", cached_path.display());
        return Ok(cached_path);
    }

    if let Some(dir) = bundled_dir {
        let bundled_path = dir.join(name);
        if bundled_path.exists() {
            log::debug!("Cascade found in bundle: {}", bundled_path.display());
            return Ok(bundled_path);
        }
    }

    fs::create_dir_all(cache_dir).map_err(ModelResolveError::CacheDir)?;
    log::info!("Downloading {name} from {url}");
    download(url, &cached_path, progress)?;
    Ok(cached_path)
}

/// Platform-specific model cache directory.
///
/// - macOS: `~/Library/Application Support/FaceScan/models/`
/// - Linux: `$XDG_CACHE_HOME/FaceScan/models/` or `~/.cache/FaceScan/models/`
/// - Windows: `%LOCALAPPDATA%/FaceScan/models/`
pub fn model_cache_dir() -> Result<PathBuf, ModelResolveError> {
    #[cfg(target_os = "macos")]
    {
        dirs::data_dir()
            .map(|d| d.join("FaceScan").join("models"))
            .ok_or(ModelResolveError::NoCacheDir)
    }
    #[cfg(not(target_os = "macos"))]
    {
        dirs::cache_dir()
            .map(|d| d.join("FaceScan").join("models"))
            .ok_or(ModelResolveError::NoCacheDir)
    }
}

fn download(url: &str, dest: &Path, progress: Option<ProgressFn>) -> Result<(), ModelResolveError> {
    let temp_path = dest.with_extension("part");

    let result = download_inner(url, dest, &temp_path, progress);

    // Clean up .part file on any error
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }

    result
}

fn download_inner(
    url: &str,
    dest: &Path,
    temp_path: &Path,
    progress: Option<ProgressFn>,
) -> Result<(), ModelResolveError> {
    let mut response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(|e| ModelResolveError::Download {
            url: url.to_string(),
            source: e,
        })?;

    let total = response.content_length().unwrap_or(0);
    let mut downloaded: u64 = 0;

    let write_err = |path: &Path, source: std::io::Error| ModelResolveError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = fs::File::create(temp_path).map_err(|e| write_err(temp_path, e))?;

    let mut buf = vec![0u8; 64 * 1024];
    loop {
        let n = response
            .read(&mut buf)
            .map_err(|e| write_err(temp_path, e))?;
        if n == 0 {
            break;
        }
        file.write_all(&buf[..n])
            .map_err(|e| write_err(temp_path, e))?;
        downloaded += n as u64;
        if let Some(ref cb) = progress {
            cb(downloaded, total);
        }
    }

    file.flush().map_err(|e| write_err(temp_path, e))?;
    drop(file);

    fs::rename(temp_path, dest).map_err(|e| write_err(dest, e))?;
    log::info!("Saved cascade to {} ({downloaded} bytes)", dest.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const UNREACHABLE_URL: &str = "http://invalid.nonexistent.example.com/cascade.xml";

    #[test]
    fn test_explicit_path_wins() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("my_cascade.xml");
        fs::write(&path, b"<opencv_storage/>").unwrap();

        let options = ResolveOptions {
            explicit_path: Some(path.clone()),
            bundled_dir: None,
        };
        let resolved = resolve("ignored.xml", UNREACHABLE_URL, &options, None).unwrap();
        assert_eq!(resolved, path);
    }

    #[test]
    fn test_missing_explicit_path_is_error_without_fallback() {
        let tmp = TempDir::new().unwrap();
        let options = ResolveOptions {
            explicit_path: Some(tmp.path().join("absent.xml")),
            bundled_dir: None,
        };
        let result = resolve("absent.xml", UNREACHABLE_URL, &options, None);
        assert!(matches!(result, Err(ModelResolveError::ExplicitMissing(_))));
    }

    #[test]
    fn test_resolve_prefers_cache_over_bundle() {
        let tmp = TempDir::new().unwrap();
        let cache = tmp.path().join("cache");
        let bundle = tmp.path().join("bundle");
        fs::create_dir_all(&cache).unwrap();
        fs::create_dir_all(&bundle).unwrap();
        fs::write(cache.join("c.xml"), b"cached").unwrap();
        fs::write(bundle.join("c.xml"), b"bundled").unwrap();

        let resolved = resolve_in(&cache, "c.xml", UNREACHABLE_URL, Some(&bundle), None).unwrap();
        assert_eq!(resolved, cache.join("c.xml"));
    }

    #[test]
    fn test_resolve_finds_bundled_file() {
        let tmp = TempDir::new().unwrap();
        let cache = tmp.path().join("cache");
        let bundle = tmp.path().join("bundle");
        fs::create_dir_all(&bundle).unwrap();
        fs::write(bundle.join("c.xml"), b"bundled").unwrap();

        let resolved = resolve_in(&cache, "c.xml", UNREACHABLE_URL, Some(&bundle), None).unwrap();
        assert_eq!(resolved, bundle.join("c.xml"));
    }

    #[test]
    fn test_resolve_download_failure_leaves_no_files() {
        let tmp = TempDir::new().unwrap();
        let cache = tmp.path().join("cache");

        let result = resolve_in(&cache, "c.xml", UNREACHABLE_URL, None, None);
        assert!(matches!(result, Err(ModelResolveError::Download { .. })));
        assert!(!cache.join("c.xml").exists());
        assert!(!cache.join("c.part").exists());
    }

    #[test]
    fn test_model_cache_dir_returns_path() {
        let path = model_cache_dir().unwrap();
        assert!(path.to_string_lossy().contains("FaceScan"));
        assert!(path.to_string_lossy().contains("models"));
    }
}
