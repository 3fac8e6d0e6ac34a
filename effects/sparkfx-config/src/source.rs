//! Named configuration sources and the resolvers that load them
//!
//! An emitter configuration is identified by a name and a type tag, the same
//! way a game bundle names its resources (`"portal"` + `"json"`). The
//! [`AssetResolver`] trait turns such a pair into raw bytes, so hosts can back
//! it with the file system, an archive or an in-memory table.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{ConfigError, Result};

/// Document format of a configuration source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// JSON document
    Json,
    /// YAML document
    Yaml,
}

impl SourceKind {
    /// Canonical file extension for this kind
    pub fn extension(self) -> &'static str {
        match self {
            SourceKind::Json => "json",
            SourceKind::Yaml => "yaml",
        }
    }

    /// Determine the kind from a path's extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        extension.parse()
    }
}

impl FromStr for SourceKind {
    type Err = ConfigError;

    fn from_str(tag: &str) -> Result<Self> {
        match tag.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "json" => Ok(SourceKind::Json),
            "yaml" | "yml" => Ok(SourceKind::Yaml),
            _ => Err(ConfigError::UnsupportedFormat(tag.to_string())),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A named configuration resource
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigSource {
    /// Resource name without extension
    pub name: String,
    /// Document format
    pub kind: SourceKind,
}

impl ConfigSource {
    /// Create a source from a name and an already parsed kind
    pub fn new<S: Into<String>>(name: S, kind: SourceKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Create a source from a name and a type tag such as `"json"` or `"yml"`
    pub fn parse<S: Into<String>>(name: S, tag: &str) -> Result<Self> {
        Ok(Self::new(name, tag.parse()?))
    }

    fn not_found(&self) -> ConfigError {
        ConfigError::NotFound {
            name: self.name.clone(),
            extension: self.kind.extension(),
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.name, self.kind)
    }
}

/// Trait for loading configuration sources by name
pub trait AssetResolver {
    /// Load the raw bytes of a configuration source
    fn load(&self, source: &ConfigSource) -> Result<Vec<u8>>;
}

impl<T: AssetResolver + ?Sized> AssetResolver for &T {
    fn load(&self, source: &ConfigSource) -> Result<Vec<u8>> {
        (**self).load(source)
    }
}

/// Resolves sources to `<base>/<name>.<extension>` on disk
///
/// YAML sources are also looked up with the short `.yml` extension.
#[derive(Debug, Clone)]
pub struct DirectoryResolver {
    base_path: PathBuf,
}

impl DirectoryResolver {
    /// Create a resolver rooted at a base directory
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Base directory of this resolver
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn candidates(&self, source: &ConfigSource) -> Vec<PathBuf> {
        let mut paths = vec![
            self.base_path
                .join(format!("{}.{}", source.name, source.kind.extension())),
        ];
        if source.kind == SourceKind::Yaml {
            paths.push(self.base_path.join(format!("{}.yml", source.name)));
        }
        paths
    }
}

impl AssetResolver for DirectoryResolver {
    fn load(&self, source: &ConfigSource) -> Result<Vec<u8>> {
        for path in self.candidates(source) {
            match fs::read(&path) {
                Ok(bytes) => {
                    log::debug!("Loaded {} ({} bytes)", path.display(), bytes.len());
                    return Ok(bytes);
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(ConfigError::Io(e)),
            }
        }
        Err(source.not_found())
    }
}

/// In-memory resolver, useful for embedded effects and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryResolver {
    entries: HashMap<ConfigSource, Vec<u8>>,
}

impl MemoryResolver {
    /// Create an empty resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document under a name and kind
    pub fn insert<S: Into<String>, B: Into<Vec<u8>>>(
        &mut self,
        name: S,
        kind: SourceKind,
        contents: B,
    ) {
        self.entries
            .insert(ConfigSource::new(name, kind), contents.into());
    }

    /// Builder-style variant of [`MemoryResolver::insert`]
    pub fn with<S: Into<String>, B: Into<Vec<u8>>>(
        mut self,
        name: S,
        kind: SourceKind,
        contents: B,
    ) -> Self {
        self.insert(name, kind, contents);
        self
    }

    /// Number of registered documents
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the resolver is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AssetResolver for MemoryResolver {
    fn load(&self, source: &ConfigSource) -> Result<Vec<u8>> {
        self.entries
            .get(source)
            .cloned()
            .ok_or_else(|| source.not_found())
    }
}
