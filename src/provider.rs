use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ExportsError;
use crate::exports::CssModuleExports;
use crate::state::TransformState;

/// Supplies the compiled exports of a CSS module.
///
/// The rewriter calls this once per matching import and never caches the
/// result; any caching is up to the implementation.
pub trait CssModuleExportsProvider {
    type Error: std::error::Error + 'static;

    /// `stylesheet` is the absolute path of the CSS module file.
    fn get_css_module_exports(
        &self,
        root_dir: &Path,
        state: &TransformState,
        stylesheet: &Path,
    ) -> Result<CssModuleExports, Self::Error>;
}

impl<F, E> CssModuleExportsProvider for F
where
    F: Fn(&Path, &TransformState, &Path) -> Result<CssModuleExports, E>,
    E: std::error::Error + 'static,
{
    type Error = E;

    fn get_css_module_exports(
        &self,
        root_dir: &Path,
        state: &TransformState,
        stylesheet: &Path,
    ) -> Result<CssModuleExports, E> {
        self(root_dir, state, stylesheet)
    }
}

// -----------------------------------------------------------------------------
// Built-in providers
// -----------------------------------------------------------------------------

/// Exports handed over up-front, keyed by absolute stylesheet path.
#[derive(Debug, Clone, Default)]
pub struct InlineExports {
    by_path: HashMap<PathBuf, CssModuleExports>,
}

impl InlineExports {
    pub fn new(by_path: HashMap<PathBuf, CssModuleExports>) -> Self {
        Self { by_path }
    }
}

impl CssModuleExportsProvider for InlineExports {
    type Error = ExportsError;

    fn get_css_module_exports(
        &self,
        _root_dir: &Path,
        _state: &TransformState,
        stylesheet: &Path,
    ) -> Result<CssModuleExports, ExportsError> {
        self.by_path
            .get(stylesheet)
            .cloned()
            .ok_or_else(|| ExportsError::NotFound {
                path: stylesheet.to_path_buf(),
            })
    }
}

/// Reads `<stylesheet>.json` next to the stylesheet, the file `postcss-modules`
/// writes by default.
#[derive(Debug, Clone, Copy, Default)]
pub struct SidecarJsonExports;

impl SidecarJsonExports {
    pub fn sidecar_path(stylesheet: &Path) -> PathBuf {
        let mut name = stylesheet.as_os_str().to_owned();
        name.push(".json");
        PathBuf::from(name)
    }
}

impl CssModuleExportsProvider for SidecarJsonExports {
    type Error = ExportsError;

    fn get_css_module_exports(
        &self,
        _root_dir: &Path,
        _state: &TransformState,
        stylesheet: &Path,
    ) -> Result<CssModuleExports, ExportsError> {
        let path = Self::sidecar_path(stylesheet);
        let text = fs::read_to_string(&path).map_err(|source| ExportsError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ExportsError::InvalidJson { path, source })
    }
}

/// The provider selected by the plugin config.
#[derive(Debug, Clone)]
pub enum ConfiguredExports {
    Inline(InlineExports),
    Sidecar(SidecarJsonExports),
}

impl CssModuleExportsProvider for ConfiguredExports {
    type Error = ExportsError;

    fn get_css_module_exports(
        &self,
        root_dir: &Path,
        state: &TransformState,
        stylesheet: &Path,
    ) -> Result<CssModuleExports, ExportsError> {
        match self {
            ConfiguredExports::Inline(p) => p.get_css_module_exports(root_dir, state, stylesheet),
            ConfiguredExports::Sidecar(p) => p.get_css_module_exports(root_dir, state, stylesheet),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn state() -> TransformState {
        TransformState::for_file("/proj/src/App.jsx")
    }

    #[test]
    fn inline_returns_configured_exports() {
        let exports: CssModuleExports = [("foo", "x_foo")].into_iter().collect();
        let provider = InlineExports::new(HashMap::from([(
            PathBuf::from("/proj/src/App.module.css"),
            exports.clone(),
        )]));
        let got = provider
            .get_css_module_exports(
                Path::new("/proj"),
                &state(),
                Path::new("/proj/src/App.module.css"),
            )
            .unwrap();
        assert_eq!(got, exports);
    }

    #[test]
    fn inline_missing_path_is_not_found() {
        let provider = InlineExports::default();
        let err = provider
            .get_css_module_exports(Path::new("/proj"), &state(), Path::new("/proj/a.module.css"))
            .unwrap_err();
        assert!(matches!(err, ExportsError::NotFound { ref path } if path == Path::new("/proj/a.module.css")));
        assert_eq!(
            err.to_string(),
            "no CSS module exports configured for /proj/a.module.css"
        );
    }

    #[test]
    fn sidecar_path_appends_json() {
        assert_eq!(
            SidecarJsonExports::sidecar_path(Path::new("/p/App.module.css")),
            PathBuf::from("/p/App.module.css.json")
        );
    }

    #[test]
    fn sidecar_reads_json_next_to_stylesheet() {
        let dir = tempfile::tempdir().unwrap();
        let css = dir.path().join("App.module.css");
        fs::write(
            dir.path().join("App.module.css.json"),
            r#"{"title": "App_title_1x", "foo": "App_foo_9q"}"#,
        )
        .unwrap();

        let got = SidecarJsonExports
            .get_css_module_exports(dir.path(), &state(), &css)
            .unwrap();
        let pairs: Vec<_> = got.iter().collect();
        assert_eq!(pairs, vec![("title", "App_title_1x"), ("foo", "App_foo_9q")]);
    }

    #[test]
    fn sidecar_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let css = dir.path().join("Missing.module.css");
        let err = SidecarJsonExports
            .get_css_module_exports(dir.path(), &state(), &css)
            .unwrap_err();
        match err {
            ExportsError::Io { path, source } => {
                assert_eq!(path, dir.path().join("Missing.module.css.json"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn sidecar_bad_json_is_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let css = dir.path().join("Bad.module.css");
        fs::write(dir.path().join("Bad.module.css.json"), "{not json").unwrap();
        let err = SidecarJsonExports
            .get_css_module_exports(dir.path(), &state(), &css)
            .unwrap_err();
        assert!(matches!(err, ExportsError::InvalidJson { .. }));
    }

    #[test]
    fn closures_are_providers() {
        let provider = |root: &Path, _: &TransformState, css: &Path| {
            Ok::<CssModuleExports, ExportsError>(
                [(
                    "root".to_string(),
                    format!("{}|{}", root.display(), css.display()),
                )]
                .into_iter()
                .collect(),
            )
        };
        let got = provider
            .get_css_module_exports(Path::new("/r"), &state(), Path::new("/r/a.module.css"))
            .unwrap();
        assert_eq!(got.get("root"), Some("/r|/r/a.module.css"));
    }
}
