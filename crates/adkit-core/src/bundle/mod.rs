//! Bundle packaging: fetch resolved URLs and produce one ZIP archive.
//!
//! All or nothing: the first failed fetch aborts the whole bundle and no
//! partial archive is ever handed out. Entries are keyed by each URL's last
//! path segment, in resolution order. Archives land on disk via a `.part`
//! temp file and an atomic rename.

mod fetch;

pub use fetch::{FetchError, Fetcher, HttpFetcher};

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::resolve::ResolvedUrl;
use crate::store;

/// Packaging failure, naming the URL that sank the bundle.
#[derive(Debug, Error)]
pub enum BundleError {
    #[error("file not found: {url}")]
    FileNotFound { url: String },
    #[error("HTTP {status} fetching {url}")]
    Fetch { status: u32, url: String },
    #[error("network failure fetching {url}: {message} (check the store prefix URL and connectivity)")]
    Network { url: String, message: String },
    #[error("archive write failed: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("archive write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Fetches every URL in order and packages the bodies into a ZIP in memory.
pub fn package(urls: &[ResolvedUrl], fetcher: &dyn Fetcher) -> Result<Vec<u8>, BundleError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for resolved in urls {
        let url = &resolved.url;
        let body = fetcher.fetch(url).map_err(|e| match e {
            FetchError::NotFound => BundleError::FileNotFound { url: url.clone() },
            FetchError::Status(status) => BundleError::Fetch {
                status,
                url: url.clone(),
            },
            FetchError::Network(message) => BundleError::Network {
                url: url.clone(),
                message,
            },
        })?;
        let name = store::filename_of(url);
        tracing::debug!(bytes = body.len(), entry = %name, "packaged");
        zip.start_file(name, options)?;
        zip.write_all(&body)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

/// SHA-256 of a finished archive, lowercase hex.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Bundle filename for a device.
pub fn bundle_filename(device_id: &str) -> String {
    format!("{device_id}.zip")
}

/// Writes an archive to `dir/{deviceId}.zip` via temp file + atomic rename,
/// so a crash mid-write never leaves a readable half-bundle behind.
pub fn write_bundle(dir: &Path, device_id: &str, bytes: &[u8]) -> Result<PathBuf> {
    let final_path = dir.join(bundle_filename(device_id));
    let temp = temp_path(&final_path);
    fs::write(&temp, bytes).with_context(|| format!("write {}", temp.display()))?;
    fs::rename(&temp, &final_path)
        .with_context(|| format!("finalize {}", final_path.display()))?;
    Ok(final_path)
}

fn temp_path(final_path: &Path) -> PathBuf {
    let mut s = final_path.as_os_str().to_owned();
    s.push(".part");
    PathBuf::from(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::Provenance;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::io::Read;

    struct ScriptedFetcher {
        files: HashMap<String, Result<Vec<u8>, FetchError>>,
        log: RefCell<Vec<String>>,
    }

    impl ScriptedFetcher {
        fn new() -> Self {
            Self {
                files: HashMap::new(),
                log: RefCell::new(Vec::new()),
            }
        }

        fn with(mut self, url: &str, result: Result<Vec<u8>, FetchError>) -> Self {
            self.files.insert(url.to_string(), result);
            self
        }

        fn fetched(&self) -> Vec<String> {
            self.log.borrow().clone()
        }
    }

    impl Fetcher for ScriptedFetcher {
        fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            self.log.borrow_mut().push(url.to_string());
            match self.files.get(url) {
                Some(r) => r.clone(),
                None => Err(FetchError::NotFound),
            }
        }
    }

    fn resolved(url: &str) -> ResolvedUrl {
        ResolvedUrl {
            url: url.to_string(),
            provenance: Provenance::Exact,
        }
    }

    #[test]
    fn packages_entries_in_order() {
        let fetcher = ScriptedFetcher::new()
            .with("http://s/d/a.stl", Ok(b"solid a".to_vec()))
            .with("http://s/d/b.stl", Ok(b"solid b".to_vec()))
            .with("http://s/d/instructions.txt", Ok(b"print hot".to_vec()));
        let urls = vec![
            resolved("http://s/d/a.stl"),
            resolved("http://s/d/b.stl"),
            resolved("http://s/d/instructions.txt"),
        ];
        let bytes = package(&urls, &fetcher).unwrap();

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(names, vec!["a.stl", "b.stl", "instructions.txt"]);

        let mut contents = String::new();
        archive
            .by_name("instructions.txt")
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "print hot");
    }

    #[test]
    fn missing_file_aborts_everything() {
        let fetcher = ScriptedFetcher::new()
            .with("http://s/d/a.stl", Ok(b"solid a".to_vec()))
            .with("http://s/d/c.stl", Ok(b"solid c".to_vec()));
        let urls = vec![
            resolved("http://s/d/a.stl"),
            resolved("http://s/d/b.stl"),
            resolved("http://s/d/c.stl"),
        ];
        let err = package(&urls, &fetcher).unwrap_err();
        assert_eq!(err.to_string(), "file not found: http://s/d/b.stl");
        // Fail-fast: the third file is never requested.
        assert_eq!(
            fetcher.fetched(),
            vec!["http://s/d/a.stl", "http://s/d/b.stl"]
        );
    }

    #[test]
    fn http_error_names_status_and_url() {
        let fetcher =
            ScriptedFetcher::new().with("http://s/d/a.stl", Err(FetchError::Status(403)));
        let err = package(&[resolved("http://s/d/a.stl")], &fetcher).unwrap_err();
        assert_eq!(err.to_string(), "HTTP 403 fetching http://s/d/a.stl");
    }

    #[test]
    fn network_error_hints_at_reachability() {
        let fetcher = ScriptedFetcher::new()
            .with("http://s/d/a.stl", Err(FetchError::Network("dns".into())));
        let err = package(&[resolved("http://s/d/a.stl")], &fetcher).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("http://s/d/a.stl"), "{msg}");
        assert!(msg.contains("prefix URL"), "{msg}");
    }

    #[test]
    fn empty_url_list_yields_empty_archive() {
        let fetcher = ScriptedFetcher::new();
        let bytes = package(&[], &fetcher).unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 0);
    }

    #[test]
    fn digest_is_stable_hex() {
        assert_eq!(
            sha256_hex(b"hello\n"),
            "5891b5b522d5df086d0ff0b110fbd9d21bb4fc7163af34d08286a2e846f6be03"
        );
    }

    #[test]
    fn write_bundle_lands_atomically() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_bundle(dir.path(), "grip", b"zipbytes").unwrap();
        assert_eq!(path, dir.path().join("grip.zip"));
        assert_eq!(fs::read(&path).unwrap(), b"zipbytes");
        // No temp file left behind.
        assert!(!dir.path().join("grip.zip.part").exists());
    }
}
