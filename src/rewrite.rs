use std::path::{Path, PathBuf};

use swc_core::{
    common::{SyntaxContext, DUMMY_SP},
    ecma::{ast::*, visit::VisitMut},
};

use crate::config::PluginConfig;
use crate::error::{FailedImport, RewriteError};
use crate::exports::CssModuleExports;
use crate::path::{is_css_module_source, resolve_stylesheet_path};
use crate::provider::{ConfiguredExports, CssModuleExportsProvider};
use crate::state::TransformState;

// -----------------------------------------------------------------------------
// Single import
// -----------------------------------------------------------------------------

/// Turn `import X from "./Foo.module.css"` into `const X = { ... }`.
///
/// Returns `Ok(None)` when the import is not a default import of a CSS
/// module. Lookup errors are returned unchanged in [`RewriteError::Lookup`].
pub fn process_import<P: CssModuleExportsProvider>(
    decl: &ImportDecl,
    state: &TransformState,
    root_dir: Option<&Path>,
    provider: &P,
) -> Result<Option<VarDecl>, RewriteError<P::Error>> {
    let Some((local, source)) = css_module_default_import(decl) else {
        return Ok(None);
    };

    let filename = state
        .filename
        .as_deref()
        .ok_or(RewriteError::MissingFilename)?;
    let root_dir = root_dir.ok_or(RewriteError::MissingRootDir)?;

    let stylesheet = resolve_stylesheet_path(filename, source);
    let exports = provider
        .get_css_module_exports(root_dir, state, &stylesheet)
        .map_err(RewriteError::Lookup)?;

    tracing::debug!(
        local = %local.sym,
        stylesheet = %stylesheet.display(),
        selectors = exports.len(),
        "inlining CSS module import"
    );

    Ok(Some(const_decl(local.clone(), &exports)))
}

/// The local binding and source of `import X from "<...>.module.css"`.
fn css_module_default_import(decl: &ImportDecl) -> Option<(&Ident, &str)> {
    let [ImportSpecifier::Default(specifier)] = decl.specifiers.as_slice() else {
        return None;
    };
    let source: &str = &decl.src.value;
    if !is_css_module_source(source) {
        tracing::trace!(source, "import is not a CSS module, skipping");
        return None;
    }
    Some((&specifier.local, source))
}

fn str_lit(value: &str) -> Str {
    Str {
        span: DUMMY_SP,
        value: value.into(),
        raw: None,
    }
}

/// `{ "selector": "scoped", ... }` in export order.
pub fn exports_object(exports: &CssModuleExports) -> ObjectLit {
    ObjectLit {
        span: DUMMY_SP,
        props: exports
            .iter()
            .map(|(selector, scoped)| {
                PropOrSpread::Prop(Box::new(Prop::KeyValue(KeyValueProp {
                    key: PropName::Str(str_lit(selector)),
                    value: Box::new(Expr::Lit(Lit::Str(str_lit(scoped)))),
                })))
            })
            .collect(),
    }
}

fn const_decl(local: Ident, exports: &CssModuleExports) -> VarDecl {
    VarDecl {
        span: DUMMY_SP,
        ctxt: SyntaxContext::empty(),
        kind: VarDeclKind::Const,
        declare: false,
        decls: vec![VarDeclarator {
            span: DUMMY_SP,
            name: Pat::Ident(BindingIdent::from(local)),
            init: Some(Box::new(Expr::Object(exports_object(exports)))),
            definite: false,
        }],
    }
}

// -----------------------------------------------------------------------------
// Whole module
// -----------------------------------------------------------------------------

/// Rewrite every CSS module import of `module` in place.
///
/// Top-level imports and imports inside `declare module "x" { ... }` /
/// namespace blocks are handled. Either all matching imports are replaced
/// or, on the first failure, none are. Returns how many imports were
/// rewritten.
pub fn rewrite_module<P: CssModuleExportsProvider>(
    module: &mut Module,
    state: &TransformState,
    root_dir: Option<&Path>,
    provider: &P,
) -> Result<usize, FailedImport<P::Error>> {
    let mut planned = Vec::new();
    plan_items(&module.body, state, root_dir, provider, &mut planned)?;

    let count = planned.len();
    apply_items(&mut module.body, &mut planned.into_iter());
    Ok(count)
}

fn plan_items<P: CssModuleExportsProvider>(
    items: &[ModuleItem],
    state: &TransformState,
    root_dir: Option<&Path>,
    provider: &P,
    out: &mut Vec<VarDecl>,
) -> Result<(), FailedImport<P::Error>> {
    for item in items {
        if let Some(block) = ts_module_block(item) {
            plan_items(&block.body, state, root_dir, provider, out)?;
            continue;
        }
        let ModuleItem::ModuleDecl(ModuleDecl::Import(decl)) = item else {
            continue;
        };
        match process_import(decl, state, root_dir, provider) {
            Ok(Some(var)) => out.push(var),
            Ok(None) => {}
            Err(error) => {
                return Err(FailedImport {
                    span: decl.span,
                    specifier: decl.src.value.to_string(),
                    error,
                })
            }
        }
    }
    Ok(())
}

// Walks the items in the same order as `plan_items`, so the n-th matching
// import takes the n-th planned declaration.
fn apply_items(items: &mut [ModuleItem], planned: &mut impl Iterator<Item = VarDecl>) {
    for item in items.iter_mut() {
        if let Some(block) = ts_module_block_mut(item) {
            apply_items(&mut block.body, planned);
            continue;
        }
        let ModuleItem::ModuleDecl(ModuleDecl::Import(decl)) = &*item else {
            continue;
        };
        if css_module_default_import(decl).is_none() {
            continue;
        }
        if let Some(var) = planned.next() {
            *item = ModuleItem::Stmt(Stmt::Decl(Decl::Var(Box::new(var))));
        }
    }
}

fn ts_module_decl(item: &ModuleItem) -> Option<&TsModuleDecl> {
    match item {
        ModuleItem::Stmt(Stmt::Decl(Decl::TsModule(m)))
        | ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(ExportDecl {
            decl: Decl::TsModule(m),
            ..
        })) => Some(&**m),
        _ => None,
    }
}

fn ts_module_decl_mut(item: &mut ModuleItem) -> Option<&mut TsModuleDecl> {
    match item {
        ModuleItem::Stmt(Stmt::Decl(Decl::TsModule(m)))
        | ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(ExportDecl {
            decl: Decl::TsModule(m),
            ..
        })) => Some(&mut **m),
        _ => None,
    }
}

fn ts_module_block(item: &ModuleItem) -> Option<&TsModuleBlock> {
    fn block(body: &TsNamespaceBody) -> &TsModuleBlock {
        match body {
            TsNamespaceBody::TsModuleBlock(b) => b,
            TsNamespaceBody::TsNamespaceDecl(ns) => block(&ns.body),
        }
    }
    ts_module_decl(item)?.body.as_ref().map(block)
}

fn ts_module_block_mut(item: &mut ModuleItem) -> Option<&mut TsModuleBlock> {
    fn block(body: &mut TsNamespaceBody) -> &mut TsModuleBlock {
        match body {
            TsNamespaceBody::TsModuleBlock(b) => b,
            TsNamespaceBody::TsNamespaceDecl(ns) => block(&mut ns.body),
        }
    }
    ts_module_decl_mut(item)?.body.as_mut().map(block)
}

// -----------------------------------------------------------------------------
// Visitor
// -----------------------------------------------------------------------------

/// `VisitMut` wrapper around [`rewrite_module`] for swc hosts.
///
/// Failures cannot escape a visitor, so the first one is kept and the
/// module it happened in is left untouched.
pub struct CssModuleImports<P: CssModuleExportsProvider> {
    root_dir: Option<PathBuf>,
    state: TransformState,
    provider: P,
    rewritten: usize,
    failure: Option<FailedImport<P::Error>>,
}

impl CssModuleImports<ConfiguredExports> {
    pub fn from_config(config: &PluginConfig, state: TransformState) -> Self {
        let root_dir = config.root_dir(&state).map(Path::to_path_buf);
        Self::new(root_dir, state, config.provider())
    }
}

impl<P: CssModuleExportsProvider> CssModuleImports<P> {
    pub fn new(root_dir: Option<PathBuf>, state: TransformState, provider: P) -> Self {
        Self {
            root_dir,
            state,
            provider,
            rewritten: 0,
            failure: None,
        }
    }

    pub fn rewritten(&self) -> usize {
        self.rewritten
    }

    pub fn failure(&self) -> Option<&FailedImport<P::Error>> {
        self.failure.as_ref()
    }

    pub fn into_result(self) -> Result<usize, FailedImport<P::Error>> {
        match self.failure {
            Some(failure) => Err(failure),
            None => Ok(self.rewritten),
        }
    }
}

impl<P: CssModuleExportsProvider> VisitMut for CssModuleImports<P> {
    // `rewrite_module` finds the imports itself, including those in TS module
    // blocks, so children are not visited.
    fn visit_mut_module(&mut self, m: &mut Module) {
        if self.failure.is_some() {
            return;
        }
        match rewrite_module(m, &self.state, self.root_dir.as_deref(), &self.provider) {
            Ok(n) => self.rewritten += n,
            Err(failure) => self.failure = Some(failure),
        }
    }

    fn visit_mut_script(&mut self, _: &mut Script) {}
}
