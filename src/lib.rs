//! SWC plugin that inlines CSS module imports.
//!
//! ```jsx
//! // App.jsx
//! import styles from "./App.module.css";
//! ```
//!
//! becomes
//!
//! ```jsx
//! const styles = {
//!     "foo": "wT-Mma_foo"
//! };
//! ```
//!
//! The plugin does not compile CSS itself: the class-name mapping comes from
//! a [`CssModuleExportsProvider`].

use swc_core::{
    common::{errors::HANDLER, Span, DUMMY_SP},
    ecma::{ast::Program, visit::VisitMutWith},
    plugin::{plugin_transform, proxies::TransformPluginProgramMetadata},
};

pub mod config;
pub mod error;
pub mod exports;
pub mod path;
pub mod provider;
pub mod rewrite;
pub mod state;
#[cfg(test)]
mod test_utils;

pub use config::{ExportsSource, PluginConfig};
pub use error::{ConfigError, ExportsError, FailedImport, RewriteError};
pub use exports::CssModuleExports;
pub use provider::{ConfiguredExports, CssModuleExportsProvider, InlineExports, SidecarJsonExports};
pub use rewrite::{process_import, rewrite_module, CssModuleImports};
pub use state::TransformState;

// -----------------------------------------------------------------------------
// Entrypoint
// -----------------------------------------------------------------------------

/// An error the host should report against the file being compiled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginDiagnostic {
    pub span: Span,
    pub message: String,
}

/// Run the plugin over `program` with the raw JSON plugin config.
///
/// On failure the program is left as it was and the returned diagnostic
/// describes why.
pub fn transform_program(
    program: &mut Program,
    raw_config: &str,
    state: TransformState,
) -> Option<PluginDiagnostic> {
    let config = match PluginConfig::from_json(raw_config) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(%err, "ignoring css module imports: bad plugin config");
            return Some(PluginDiagnostic {
                span: DUMMY_SP,
                message: err.to_string(),
            });
        }
    };

    let mut transform = CssModuleImports::from_config(&config, state);
    program.visit_mut_with(&mut transform);
    transform.into_result().err().map(|failure| PluginDiagnostic {
        span: failure.span,
        message: failure.to_string(),
    })
}

#[plugin_transform]
pub fn process_transform(mut program: Program, metadata: TransformPluginProgramMetadata) -> Program {
    let raw = metadata.get_transform_plugin_config().unwrap_or_default();
    let state = TransformState::from_metadata(&metadata);

    // The host turns the error into a failed compilation of this file.
    if let Some(diagnostic) = transform_program(&mut program, &raw, state) {
        HANDLER.with(|handler| {
            handler
                .struct_span_err(diagnostic.span, &diagnostic.message)
                .emit()
        });
    }

    program
}
