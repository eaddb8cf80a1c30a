use crate::context::Context;
use crate::error::ErrorKind;
use crate::object_value::PlorthObject;
use crate::parser::Parser;
use crate::position::Position;
use crate::value::Value;
use crate::word::Word;
use std::path::{Path, PathBuf};

fn is_absolute_path(path: &str) -> bool {
    if path.starts_with('/') || path.starts_with('\\') {
        return true;
    }
    if path.starts_with("./") || path.starts_with("../") {
        return true;
    }
    // Windows drive letter, e.g. "C:\..." or "C:/...".
    let mut chars = path.chars();
    if let (Some(letter), Some(':')) = (chars.next(), chars.next()) {
        if letter.is_ascii_alphabetic() {
            return true;
        }
    }
    false
}

/// Tries `candidate` as given, then with the module extension appended if
/// missing, then (if it is a directory) `index<ext>` inside it. Returns the
/// first form that names an existing regular file.
fn probe_candidate(candidate: &Path, extension: &str) -> Option<PathBuf> {
    if candidate.is_file() {
        return Some(candidate.to_path_buf());
    }
    let with_ext = if candidate.extension().is_some() {
        None
    } else {
        let mut owned = candidate.as_os_str().to_os_string();
        owned.push(extension);
        Some(PathBuf::from(owned))
    };
    if let Some(path) = &with_ext {
        if path.is_file() {
            return Some(path.clone());
        }
    }
    if candidate.is_dir() {
        let index = candidate.join(format!("index{extension}"));
        if index.is_file() {
            return Some(index);
        }
    }
    None
}

/// Resolves an import path to a canonical, existing file on disk. Absolute
/// paths (§4.H rule 1) are resolved against the importing context's
/// filename directory; otherwise every configured module path is tried in
/// order.
fn resolve_path(
    module_paths: &[String],
    importing_filename: Option<&str>,
    extension: &str,
    path: &str,
) -> Result<PathBuf, String> {
    if path.is_empty() {
        return Err("Missing module path.".to_string());
    }

    if is_absolute_path(path) {
        let base = importing_filename
            .and_then(|f| Path::new(f).parent())
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let candidate = base.join(path);
        return probe_candidate(&candidate, extension)
            .and_then(|p| p.canonicalize().ok())
            .ok_or_else(|| format!("No such file or directory: `{path}'"));
    }

    for base in module_paths {
        let candidate = Path::new(base).join(path);
        if let Some(found) = probe_candidate(&candidate, extension) {
            if let Ok(canonical) = found.canonicalize() {
                return Ok(canonical);
            }
        }
    }

    Err(format!("No such file or directory: `{path}'"))
}

/// Resolves, reads, compiles and runs the module at `path`, caching the
/// exported object keyed by its canonical path. A placeholder (empty
/// object) is inserted into the cache before the module body runs, so a
/// re-entrant import (a cycle) observes the in-progress partial view
/// instead of recursing without bound.
fn import_module(ctx: &mut Context, path: &str) -> Option<PlorthObject> {
    if path.is_empty() {
        ctx.set_error(ErrorKind::Import, "Missing module path.", None);
        return None;
    }

    let resolved = match resolve_path(
        ctx.runtime.module_paths(),
        ctx.filename.as_deref(),
        ctx.runtime.module_extension(),
        path,
    ) {
        Ok(p) => p,
        Err(message) => {
            ctx.set_error(ErrorKind::Import, message, None);
            return None;
        }
    };
    let key = resolved.to_string_lossy().to_string();
    tracing::debug!(path, resolved = %key, "module resolved");

    if let Some(cached) = ctx.runtime.module_cache_get(&key) {
        tracing::debug!(resolved = %key, "module cache hit");
        return Some(cached);
    }

    tracing::debug!(resolved = %key, "module cache placeholder inserted");
    ctx.runtime.module_cache_insert_placeholder(&key);

    let source = match std::fs::read(&resolved) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(_) => {
                ctx.set_error(
                    ErrorKind::Import,
                    "Unable to decode source code into UTF-8.",
                    None,
                );
                ctx.runtime.module_cache_remove(&key);
                return None;
            }
        },
        Err(e) => {
            ctx.set_error(ErrorKind::Import, format!("Unable to import: {e}"), None);
            ctx.runtime.module_cache_remove(&key);
            return None;
        }
    };

    let start = Position::start(Some(key.clone()));
    let values = match Parser::new(&source, start).parse_program() {
        Ok(values) => values,
        Err(err) => {
            ctx.set_error_value(err);
            ctx.runtime.module_cache_remove(&key);
            return None;
        }
    };

    let quote = crate::quote::Quote::compiled(values, Some(key.clone()));
    let mut sub_ctx = Context::with_filename(ctx.runtime.clone(), key.clone());
    if !quote.call(&mut sub_ctx) {
        if let Some(err) = sub_ctx.clear_error() {
            ctx.set_error_value(err);
        }
        ctx.runtime.module_cache_remove(&key);
        return None;
    }

    let mut properties = indexmap::IndexMap::new();
    for word in sub_ctx.local_dictionary().words() {
        properties.insert(word.id().to_string(), Some(Value::Quote(word.quote.clone())));
    }
    let module = PlorthObject::new(properties);
    ctx.runtime.module_cache_store(&key, module.clone());
    Some(module)
}

/// `import`: resolves and runs the module, then copies every quote-valued
/// property of the resulting object into `ctx`'s local dictionary (the
/// "import all" semantics; selective re-export is a library concern).
pub fn import(ctx: &mut Context, path: &str) -> bool {
    let Some(module) = import_module(ctx, path) else {
        return false;
    };
    for (id, value) in module.iter() {
        if let Some(Value::Quote(quote)) = value {
            ctx.local_dictionary_mut()
                .insert(Word::new(crate::symbol::Symbol::new(id.clone(), None), quote.clone()));
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::Runtime;
    use std::rc::Rc;

    fn write_module(dir: &Path, name: &str, body: &str) -> String {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        path.to_string_lossy().to_string()
    }

    #[test]
    fn import_installs_module_words_into_local_dictionary() {
        let dir = tempfile::tempdir().unwrap();
        let module_path = write_module(dir.path(), "greeter.plorth", r#": greet "hi" ;"#);

        let runtime = Rc::new(Runtime::new());
        let mut ctx = Context::new(runtime);
        assert!(import(&mut ctx, &module_path));
        assert!(ctx.local_dictionary().find("greet").is_some());
    }

    #[test]
    fn repeated_import_returns_cached_object() {
        let dir = tempfile::tempdir().unwrap();
        let module_path = write_module(dir.path(), "once.plorth", r#": x 1 ;"#);

        let runtime = Rc::new(Runtime::new());
        let mut ctx = Context::new(runtime);
        assert!(import(&mut ctx, &module_path));
        let first = ctx.runtime.module_cache_get(&std::fs::canonicalize(&module_path).unwrap().to_string_lossy());
        assert!(import(&mut ctx, &module_path));
        let second = ctx.runtime.module_cache_get(&std::fs::canonicalize(&module_path).unwrap().to_string_lossy());
        assert!(first.is_some() && second.is_some());
    }

    #[test]
    fn missing_module_is_import_error() {
        let runtime = Rc::new(Runtime::new());
        let mut ctx = Context::new(runtime);
        assert!(!import(&mut ctx, "does/not/exist.plorth"));
        assert_eq!(ctx.error().unwrap().kind, ErrorKind::Import);
    }

    #[test]
    fn self_importing_module_terminates_instead_of_recursing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cyclic.plorth");
        std::fs::write(&path, format!(r#"{:?} import"#, path.to_string_lossy())).unwrap();

        let runtime = Rc::new(Runtime::new());
        let mut ctx = Context::new(runtime);
        // Importing a module that (transitively) imports itself must return
        // rather than recurse without bound; whether it succeeds or fails
        // depends on what the partial module exposes, but it must terminate.
        let _ = import(&mut ctx, &path.to_string_lossy());
    }
}
