use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::exports::CssModuleExports;
use crate::provider::{ConfiguredExports, InlineExports, SidecarJsonExports};
use crate::state::TransformState;

/// Plugin options, as passed in the swc plugin config:
///
/// ```json
/// ["css-module-imports", {
///   "absoluteRootDirPath": "/home/me/app",
///   "exports": { "inline": { "/home/me/app/src/App.module.css": { "foo": "wT-Mma_foo" } } }
/// }]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PluginConfig {
    /// Path of the root directory, passed through to the exports provider.
    #[serde(default)]
    pub absolute_root_dir_path: Option<PathBuf>,
    #[serde(default)]
    pub exports: ExportsSource,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExportsSource {
    /// `<stylesheet>.json` files on disk.
    #[default]
    Sidecar,
    /// Absolute stylesheet path -> exports.
    Inline(HashMap<PathBuf, CssModuleExports>),
}

impl PluginConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(raw)?)
    }

    /// The configured root, or the host cwd when none was configured.
    pub fn root_dir<'a>(&'a self, state: &'a TransformState) -> Option<&'a Path> {
        self.absolute_root_dir_path
            .as_deref()
            .or(state.cwd.as_deref())
    }

    pub fn provider(&self) -> ConfiguredExports {
        match &self.exports {
            ExportsSource::Sidecar => ConfiguredExports::Sidecar(SidecarJsonExports),
            ExportsSource::Inline(by_path) => {
                ConfiguredExports::Inline(InlineExports::new(by_path.clone()))
            }
        }
    }
}
