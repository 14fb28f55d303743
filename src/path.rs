use std::path::{Component, Path, PathBuf};

/// Check if an import source matches the pattern of a CSS module.
///
/// The source is split on `.` and the last two segments must be exactly
/// `module` and `css`. A bare `module.css` matches.
pub fn is_css_module_source(source: &str) -> bool {
    let mut parts = source.rsplit('.');
    matches!((parts.next(), parts.next()), (Some("css"), Some("module")))
}

/// Resolve an import source against the directory of the importing file.
///
/// Joins the way Node's `path.join` does: `.` is dropped, `..` pops, and a
/// leading separator in `source` does not reset to the root. No file-system
/// access happens here.
pub fn resolve_stylesheet_path(file: &Path, source: &str) -> PathBuf {
    let dir = file.parent().unwrap_or_else(|| Path::new(""));
    let mut out = PathBuf::new();
    push_normalized(&mut out, dir, true);
    push_normalized(&mut out, Path::new(source), false);
    out
}

fn push_normalized(out: &mut PathBuf, path: &Path, keep_root: bool) {
    for comp in path.components() {
        match comp {
            Component::Prefix(p) if keep_root => out.push(p.as_os_str()),
            Component::RootDir if keep_root => out.push(Component::RootDir.as_os_str()),
            Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
            Component::ParentDir => {
                let at_root = out.parent().is_none() && out.has_root();
                if at_root {
                    continue;
                }
                if out.file_name().is_some() {
                    out.pop();
                } else {
                    // relative path already above its start, keep climbing
                    out.push("..");
                }
            }
            Component::Normal(seg) => out.push(seg),
        }
    }
}
