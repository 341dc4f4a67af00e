use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::AssetError;

/// Extensions tried, in order, for names given without one.
const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Resolves named assets to raw bytes.
pub trait AssetSource {
    /// Read the asset called `name`.
    fn read(&self, name: &str) -> Result<Vec<u8>, AssetError>;
}

/// Assets stored as files under a root directory.
///
/// Bundle-style names without an extension ("marker_image") resolve to the
/// first existing `name.png`, `name.jpg` or `name.jpeg`.
#[derive(Debug, Clone)]
pub struct DirAssetSource {
    root: PathBuf,
}

impl DirAssetSource {
    /// Serve assets from `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory assets are read from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> Option<PathBuf> {
        let direct = self.root.join(name);
        if direct.is_file() {
            return Some(direct);
        }
        if Path::new(name).extension().is_some() {
            return None;
        }
        IMAGE_EXTENSIONS
            .iter()
            .map(|ext| self.root.join(format!("{name}.{ext}")))
            .find(|candidate| candidate.is_file())
    }
}

impl AssetSource for DirAssetSource {
    fn read(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        let path = self.resolve(name).ok_or_else(|| AssetError::NotFound {
            name: name.to_string(),
        })?;
        fs::read(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => AssetError::NotFound {
                name: name.to_string(),
            },
            _ => AssetError::Io {
                name: name.to_string(),
                source,
            },
        })
    }
}

/// In-memory assets, keyed by exact name.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetSource {
    assets: HashMap<String, Vec<u8>>,
}

impl MemoryAssetSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `bytes` under `name`, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        self.assets.insert(name.into(), bytes);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.insert(name, bytes);
        self
    }
}

impl AssetSource for MemoryAssetSource {
    fn read(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        self.assets
            .get(name)
            .cloned()
            .ok_or_else(|| AssetError::NotFound {
                name: name.to_string(),
            })
    }
}
