//! Static asset resolution
//!
//! Assets live in a closed namespace: an [`AssetStore`] whose keys are fixed
//! when the store is built. A request path is decoded, prefixed with the
//! static root and looked up verbatim. Nothing is ever resolved against the
//! filesystem at request time, so `..` segments, absolute paths and their
//! percent-encoded forms can only miss.

use bytes::Bytes;
use percent_encoding::percent_decode_str;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::http::mime;

const INDEX_FILE: &str = "/index.html";

#[derive(Debug, Clone)]
enum Entry {
    /// Bytes compiled or inserted into the binary
    Embedded(Bytes),
    /// A regular file enumerated at startup, read on demand
    File(PathBuf),
    /// Directory marker; never served
    Directory,
}

/// The closed set of resources the resolver may return.
///
/// Keys are `/`-separated relative paths without a leading slash, such as
/// `index.html` or `css/site.css`.
#[derive(Debug, Clone, Default)]
pub struct AssetStore {
    entries: HashMap<String, Entry>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an in-memory asset, e.g. one pulled in with `include_bytes!`.
    /// Parent directories are recorded as directory markers.
    pub fn insert(&mut self, path: &str, contents: impl Into<Bytes>) {
        let key = path.trim_start_matches('/').to_string();
        self.mark_parents(&key);
        self.entries.insert(key, Entry::Embedded(contents.into()));
    }

    /// Enumerates every regular file below `dir` into a new store.
    ///
    /// Symbolic links are skipped rather than followed, as are names that
    /// are not valid UTF-8.
    pub fn from_dir(dir: impl AsRef<Path>) -> io::Result<Self> {
        let dir = dir.as_ref();
        let mut store = Self::new();
        let mut pending = vec![(dir.to_path_buf(), String::new())];

        while let Some((fs_dir, prefix)) = pending.pop() {
            for entry in std::fs::read_dir(&fs_dir)? {
                let entry = entry?;
                let file_type = entry.file_type()?;

                let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                    tracing::warn!(path = %entry.path().display(), "Skipping asset with non UTF-8 name");
                    continue;
                };
                let key = if prefix.is_empty() {
                    name
                } else {
                    format!("{prefix}/{name}")
                };

                if file_type.is_symlink() {
                    tracing::debug!(asset = %key, "Skipping symlinked asset");
                } else if file_type.is_dir() {
                    store.entries.insert(key.clone(), Entry::Directory);
                    pending.push((entry.path(), key));
                } else if file_type.is_file() {
                    store.entries.insert(key, Entry::File(entry.path()));
                }
            }
        }

        tracing::info!(
            dir = %dir.display(),
            assets = store.file_count(),
            "Static asset namespace loaded"
        );
        Ok(store)
    }

    /// Number of servable (non-directory) entries.
    pub fn file_count(&self) -> usize {
        self.entries
            .values()
            .filter(|e| !matches!(e, Entry::Directory))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.file_count() == 0
    }

    pub fn contains(&self, key: &str) -> bool {
        matches!(
            self.entries.get(key),
            Some(Entry::Embedded(_) | Entry::File(_))
        )
    }

    /// Returns the contents stored under `key`, or `None` when the key is
    /// unknown, names a directory, or its file is no longer a regular file.
    pub async fn load(&self, key: &str) -> io::Result<Option<Bytes>> {
        match self.entries.get(key) {
            Some(Entry::Embedded(bytes)) => Ok(Some(bytes.clone())),
            Some(Entry::File(path)) => {
                let meta = tokio::fs::symlink_metadata(path).await?;
                if !meta.file_type().is_file() {
                    tracing::warn!(asset = key, "Asset is no longer a regular file");
                    return Ok(None);
                }
                tokio::fs::read(path).await.map(|b| Some(Bytes::from(b)))
            }
            Some(Entry::Directory) | None => Ok(None),
        }
    }

    fn mark_parents(&mut self, key: &str) {
        let mut end = 0;
        while let Some(idx) = key[end..].find('/') {
            end += idx;
            self.entries
                .entry(key[..end].to_string())
                .or_insert(Entry::Directory);
            end += 1;
        }
    }
}

/// A resolved static asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticAsset {
    pub key: String,
    pub content_type: &'static str,
    pub body: Bytes,
}

/// Maps request paths onto an [`AssetStore`] below a configurable root.
#[derive(Debug, Clone, Default)]
pub struct StaticFiles {
    root: String,
    assets: AssetStore,
}

impl StaticFiles {
    pub fn new(assets: AssetStore) -> Self {
        Self {
            root: String::new(),
            assets,
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// Sets the static root. See [`normalize_root`].
    pub fn set_root(&mut self, dir: &str) {
        self.root = normalize_root(dir);
    }

    /// Computes the namespace key for a raw (still percent-encoded) request
    /// path.
    pub fn resource_key(&self, request_path: &str) -> String {
        let decoded = percent_decode_str(request_path).decode_utf8_lossy();
        let decoded = if decoded.is_empty() || decoded == "/" {
            INDEX_FILE
        } else {
            decoded.as_ref()
        };

        let joined = format!("{}{}", self.root, decoded);
        match joined.strip_prefix('/') {
            Some(rest) => rest.to_string(),
            None => joined,
        }
    }

    pub async fn resolve(&self, request_path: &str) -> io::Result<Option<StaticAsset>> {
        let key = self.resource_key(request_path);
        let Some(body) = self.assets.load(&key).await? else {
            tracing::debug!(path = request_path, key = %key, "No static asset");
            return Ok(None);
        };

        Ok(Some(StaticAsset {
            content_type: mime::content_type_for(&key),
            key,
            body,
        }))
    }
}

/// Normalizes a static root: blank means no prefix, otherwise the result
/// starts with `/` and never ends with one.
///
/// ```
/// # use microserve::routing::static_files::normalize_root;
/// assert_eq!(normalize_root("public/"), "/public");
/// assert_eq!(normalize_root("/"), "");
/// assert_eq!(normalize_root("/a//"), "/a");
/// assert_eq!(normalize_root("  "), "");
/// ```
pub fn normalize_root(dir: &str) -> String {
    if dir.trim().is_empty() {
        return String::new();
    }

    let root = if dir.starts_with('/') {
        dir.to_string()
    } else {
        format!("/{dir}")
    };
    root.trim_end_matches('/').to_string()
}
