//! Platform → artifact mapping, and the cache holding the active platform's context.
//!
//! The built-in registry expects `<id>_classifier.json` and
//! `<id>_vectorizer.json` per platform in one directory. A manifest can
//! point each platform at arbitrary files and override its label schema:
//!
//! ```json
//! {
//!   "platforms": {
//!     "roblox": {
//!       "classifier": "models/roblox_classifier.json",
//!       "vectorizer": "models/roblox_vectorizer.json",
//!       "labels": ["Adult (18+)", "Teen (13–17)", "Child (0–12)"]
//!     }
//!   }
//! }
//! ```
//!
//! Relative paths in a manifest resolve against the manifest's directory.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use agelens_core::{LabelSchema, Platform};
use serde::Deserialize;
use tracing::{info, warn};

use crate::artifacts::load_context;
use crate::{ArtifactError, InferenceContext};

/// Where one platform's artifacts live and how its classes are named.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformConfig {
    pub classifier: PathBuf,
    pub vectorizer: PathBuf,
    pub labels: LabelSchema,
}

impl PlatformConfig {
    /// Conventional file names for `platform` inside `dir`, with its stock labels.
    pub fn builtin(dir: &Path, platform: Platform) -> Self {
        let id = platform.as_str();
        Self {
            classifier: dir.join(format!("{id}_classifier.json")),
            vectorizer: dir.join(format!("{id}_vectorizer.json")),
            labels: platform.default_schema(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: BTreeMap<Platform, PlatformConfig>,
}

#[derive(Deserialize)]
struct Manifest {
    platforms: BTreeMap<String, ManifestEntry>,
}

#[derive(Deserialize)]
struct ManifestEntry {
    classifier: PathBuf,
    vectorizer: PathBuf,
    #[serde(default)]
    labels: Option<LabelSchema>,
}

impl Registry {
    /// Every known platform, using the conventional file names in `dir`.
    pub fn builtin(dir: &Path) -> Self {
        let entries = Platform::ALL
            .into_iter()
            .map(|p| (p, PlatformConfig::builtin(dir, p)))
            .collect();
        Self { entries }
    }

    /// Read a JSON manifest. Unknown platform names are a configuration error.
    pub fn from_manifest(path: &Path) -> Result<Self, ArtifactError> {
        if !path.exists() {
            return Err(ArtifactError::NotFound(path.to_path_buf()));
        }
        let file = File::open(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest: Manifest =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| {
                ArtifactError::Parse {
                    path: path.to_path_buf(),
                    source,
                }
            })?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        let mut entries = BTreeMap::new();
        for (name, entry) in manifest.platforms {
            let platform: Platform = name.parse().map_err(|e| {
                ArtifactError::Config(format!("manifest {}: {e}", path.display()))
            })?;
            let config = PlatformConfig {
                classifier: base.join(entry.classifier),
                vectorizer: base.join(entry.vectorizer),
                labels: entry.labels.unwrap_or_else(|| platform.default_schema()),
            };
            if entries.insert(platform, config).is_some() {
                return Err(ArtifactError::Config(format!(
                    "manifest {} lists {platform} more than once",
                    path.display()
                )));
            }
        }

        info!(path = %path.display(), platforms = entries.len(), "loaded manifest");
        Ok(Self { entries })
    }

    /// Config for `platform`, or a configuration error if it is not registered.
    pub fn get(&self, platform: Platform) -> Result<&PlatformConfig, ArtifactError> {
        self.entries.get(&platform).ok_or_else(|| {
            ArtifactError::Config(format!("platform {platform} is not configured"))
        })
    }

    pub fn platforms(&self) -> impl Iterator<Item = (Platform, &PlatformConfig)> {
        self.entries.iter().map(|(p, c)| (*p, c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Holds the loaded context for the selected platform.
///
/// Selecting the same platform again reuses the loaded context; selecting a
/// different one loads its artifacts eagerly and replaces the old context
/// wholesale. There is no eviction and no fallback: if loading fails the
/// cache is left empty.
#[derive(Debug)]
pub struct ArtifactCache {
    registry: Registry,
    active: Option<(Platform, Arc<InferenceContext>)>,
}

impl ArtifactCache {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            active: None,
        }
    }

    pub fn select(&mut self, platform: Platform) -> Result<Arc<InferenceContext>, ArtifactError> {
        if let Some((active, ctx)) = &self.active
            && *active == platform
        {
            return Ok(Arc::clone(ctx));
        }

        self.active = None;
        let config = self.registry.get(platform)?;
        let ctx = match load_context(config) {
            Ok(ctx) => Arc::new(ctx),
            Err(e) => {
                warn!(%platform, error = %e, "failed to load artifacts");
                return Err(e);
            }
        };
        info!(%platform, classes = ctx.schema().len(), "selected platform");
        self.active = Some((platform, Arc::clone(&ctx)));
        Ok(ctx)
    }

    /// Currently loaded platform, if any.
    pub fn active(&self) -> Option<Platform> {
        self.active.as_ref().map(|(p, _)| *p)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}
