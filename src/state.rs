use std::path::PathBuf;

use swc_core::plugin::metadata::TransformPluginMetadataContextKind;
use swc_core::plugin::proxies::TransformPluginProgramMetadata;

/// Per-file context handed over by the host for one compilation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformState {
    /// Absolute path of the file being compiled.
    pub filename: Option<PathBuf>,
    /// Working directory of the host process.
    pub cwd: Option<PathBuf>,
}

impl TransformState {
    pub fn for_file(filename: impl Into<PathBuf>) -> Self {
        Self {
            filename: Some(filename.into()),
            cwd: None,
        }
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Build from the raw context strings the host reports.
    ///
    /// swc reports `"unknown"` when the caller did not pass a filename; that
    /// and empty strings count as absent.
    pub fn from_context(filename: Option<String>, cwd: Option<String>) -> Self {
        let filename = filename
            .filter(|f| !f.is_empty() && f != "unknown")
            .map(PathBuf::from);
        let cwd = cwd.filter(|c| !c.is_empty()).map(PathBuf::from);
        Self { filename, cwd }
    }

    pub fn from_metadata(metadata: &TransformPluginProgramMetadata) -> Self {
        Self::from_context(
            metadata.get_context(&TransformPluginMetadataContextKind::Filename),
            metadata.get_context(&TransformPluginMetadataContextKind::Cwd),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn absent_filename_stays_absent() {
        let state = TransformState::from_context(None, None);
        assert_eq!(state, TransformState::default());
    }

    #[test]
    fn empty_and_unknown_filenames_count_as_absent() {
        for raw in ["", "unknown"] {
            let state = TransformState::from_context(Some(raw.to_string()), Some("/work".into()));
            assert_eq!(state.filename, None, "filename {raw:?}");
            assert_eq!(state.cwd, Some(PathBuf::from("/work")));
        }
    }

    #[test]
    fn real_paths_are_kept() {
        let state = TransformState::from_context(
            Some("/proj/src/App.jsx".to_string()),
            Some("/proj".to_string()),
        );
        assert_eq!(
            state,
            TransformState::for_file("/proj/src/App.jsx").with_cwd("/proj")
        );
    }

    #[test]
    fn empty_cwd_counts_as_absent() {
        let state = TransformState::from_context(Some("/proj/a.jsx".into()), Some(String::new()));
        assert_eq!(state.cwd, None);
        assert_eq!(state.filename, Some(PathBuf::from("/proj/a.jsx")));
    }
}
