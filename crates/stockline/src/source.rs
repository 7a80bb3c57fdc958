//! Sources for raw height streams.
//!
//! A [`ByteSource`] resolves a key from the configuration to the bytes of a
//! height stream. Transport, retries and timeouts are up to the
//! implementation; the pipeline only sees the bytes or an error.
//!
//! # Implementations
//!
//! - [`MemorySource`]: In-memory map, shared between clones
//! - [`FileSource`]: Files below a root directory

use std::{
    collections::HashMap,
    future::Future,
    path::PathBuf,
    pin::Pin,
    sync::{Arc, PoisonError, RwLock},
};

use crate::error::{Error, Result};

/// Future type for fetch operations.
pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + 'a>>;

/// Something that can produce the bytes of a height stream.
pub trait ByteSource: Send + Sync {
    /// Fetch the stream stored under `key`.
    ///
    /// A missing key is an error ([`Error::Source`]), not an empty stream.
    fn fetch(&self, key: &str) -> FetchFuture<'_>;
}

/// An in-memory byte source.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    data: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `bytes` under `key`, replacing any previous stream.
    pub fn insert(&self, key: impl Into<String>, bytes: Vec<u8>) {
        self.data
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), bytes);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ByteSource for MemorySource {
    fn fetch(&self, key: &str) -> FetchFuture<'_> {
        let result = self
            .data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
            .ok_or_else(|| Error::Source {
                key: key.to_string(),
                message: "no such stream".to_string(),
            });
        Box::pin(async move { result })
    }
}

/// A byte source reading files below a root directory.
///
/// Reads are blocking; the returned future completes on first poll.
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

impl ByteSource for FileSource {
    fn fetch(&self, key: &str) -> FetchFuture<'_> {
        let path = self.root.join(key);
        let key = key.to_string();
        Box::pin(async move {
            std::fs::read(&path).map_err(|e| Error::Source {
                key,
                message: format!("{}: {e}", path.display()),
            })
        })
    }
}
