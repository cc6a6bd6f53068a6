//! Tera rendering engine loading templates from a source directory.
//!
//! # Naming convention
//!
//! The template for an output file `X` is `X.tera` in the templates
//! directory — `CMakeLists.txt` is rendered from `CMakeLists.txt.tera`,
//! `main.cpp` from `main.cpp.tera`. Files without a `.tera` extension are
//! static support sources and are ignored here (the copier handles them).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tera::Tera;

use crate::context::{BuildDescriptorContext, EntryPointContext};
use crate::error::RenderError;

/// Output file name of the rendered build descriptor.
pub const BUILD_DESCRIPTOR_FILE: &str = "CMakeLists.txt";

// ---------------------------------------------------------------------------
// Template loading helpers
// ---------------------------------------------------------------------------

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io { path: path.into(), source }
}

fn normalize_template_name(path: &Path) -> String {
    path.to_string_lossy()
        .replace('\\', "/")
        .to_lowercase()
}

fn collect_template_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), RenderError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        let meta = entry.metadata().map_err(|e| io_err(&path, e))?;
        if meta.is_dir() {
            collect_template_files(&path, out)?;
        } else if meta.is_file() {
            out.push(path);
        }
    }
    Ok(())
}

fn load_templates(dir: &Path) -> Result<Vec<(String, String)>, RenderError> {
    let mut files = Vec::new();
    collect_template_files(dir, &mut files)?;
    let mut templates = Vec::new();
    for path in files {
        if path.extension().and_then(|s| s.to_str()) != Some("tera") {
            continue;
        }
        let rel = path
            .strip_prefix(dir)
            .unwrap_or(path.as_path());
        let name = normalize_template_name(rel);
        let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        templates.push((name, contents));
    }
    Ok(templates)
}

fn build_tera(dir: &Path) -> Result<Tera, RenderError> {
    let mut templates: HashMap<String, String> = HashMap::new();
    for (name, content) in load_templates(dir)? {
        templates.insert(name, content);
    }

    let mut tera = Tera::default();
    let items: Vec<(String, String)> = templates.into_iter().collect();
    tera.add_raw_templates(items)?;
    Ok(tera)
}

/// Template name for an output file: `<output>.tera`, lowercased.
fn template_name_for(output_file: &str) -> String {
    normalize_template_name(Path::new(&format!("{output_file}.tera")))
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// Tera-based engine over one templates directory.
///
/// Loading happens once in [`TemplateEngine::new`]; rendering is a pure
/// function of (loaded template content, context) afterwards.
#[derive(Debug)]
pub struct TemplateEngine {
    tera: Tera,
    templates_dir: PathBuf,
}

impl TemplateEngine {
    /// Construct a [`TemplateEngine`], loading every `.tera` file under
    /// `templates_dir`.
    pub fn new(templates_dir: &Path) -> Result<Self, RenderError> {
        if !templates_dir.is_dir() {
            return Err(RenderError::TemplatesDirMissing {
                path: templates_dir.to_path_buf(),
            });
        }
        let tera = build_tera(templates_dir)?;
        Ok(TemplateEngine {
            tera,
            templates_dir: templates_dir.to_path_buf(),
        })
    }

    /// Render the template backing `output_file` with a prepared context.
    ///
    /// An unknown template name fails with [`RenderError::TemplateNotFound`];
    /// an undefined variable reference fails inside Tera. No output is
    /// produced in either case.
    pub fn render(
        &self,
        output_file: &str,
        ctx: &tera::Context,
    ) -> Result<String, RenderError> {
        let name = template_name_for(output_file);
        if !self.tera.get_template_names().any(|n| n == name) {
            return Err(RenderError::TemplateNotFound {
                name,
                dir: self.templates_dir.clone(),
            });
        }
        Ok(self.tera.render(&name, ctx)?)
    }

    /// Render the build descriptor (`CMakeLists.txt`).
    pub fn render_build_descriptor(
        &self,
        ctx: &BuildDescriptorContext,
    ) -> Result<String, RenderError> {
        self.render(BUILD_DESCRIPTOR_FILE, &ctx.to_tera_context()?)
    }

    /// Render the generated entry point (`file_name` from its
    /// `<file_name>.tera` template).
    pub fn render_entry_point(
        &self,
        file_name: &str,
        ctx: &EntryPointContext,
    ) -> Result<String, RenderError> {
        self.render(file_name, &ctx.to_tera_context()?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const DESCRIPTOR_TPL: &str = "\
cmake_minimum_required(VERSION 3.16)
project({{ project }})
add_executable({{ project }} {{ main }}{% for file in files %} {{ file }}{% endfor %})
";

    fn templates_dir(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().expect("tempdir");
        for (name, content) in files {
            fs::write(dir.path().join(name), content).expect("write template");
        }
        dir
    }

    fn descriptor_ctx() -> BuildDescriptorContext {
        BuildDescriptorContext {
            project: "drone".to_string(),
            files: vec!["calc.hpp".to_string(), "calc.cpp".to_string()],
            main: "main.cpp".to_string(),
        }
    }

    #[test]
    fn missing_templates_dir_fails_construction() {
        let err = TemplateEngine::new(Path::new("/nonexistent/templates")).unwrap_err();
        assert!(matches!(err, RenderError::TemplatesDirMissing { .. }));
    }

    #[test]
    fn renders_build_descriptor() {
        let dir = templates_dir(&[("CMakeLists.txt.tera", DESCRIPTOR_TPL)]);
        let engine = TemplateEngine::new(dir.path()).expect("engine");
        let out = engine
            .render_build_descriptor(&descriptor_ctx())
            .expect("render");
        assert!(out.contains("project(drone)"));
        assert!(out.contains("add_executable(drone main.cpp calc.hpp calc.cpp)"));
    }

    #[test]
    fn renders_entry_point_with_return_code() {
        let dir = templates_dir(&[(
            "main.cpp.tera",
            "int main() { return {{ return_code }}; }\n",
        )]);
        let engine = TemplateEngine::new(dir.path()).expect("engine");
        let ctx = EntryPointContext { return_code: "2".to_string() };
        let out = engine.render_entry_point("main.cpp", &ctx).expect("render");
        assert_eq!(out, "int main() { return 2; }\n");
    }

    #[test]
    fn rendering_is_deterministic() {
        let dir = templates_dir(&[("CMakeLists.txt.tera", DESCRIPTOR_TPL)]);
        let engine = TemplateEngine::new(dir.path()).expect("engine");
        let a = engine.render_build_descriptor(&descriptor_ctx()).unwrap();
        let b = engine.render_build_descriptor(&descriptor_ctx()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn unknown_template_is_template_not_found() {
        let dir = templates_dir(&[("main.cpp.tera", "int main() {}\n")]);
        let engine = TemplateEngine::new(dir.path()).expect("engine");
        let err = engine
            .render_build_descriptor(&descriptor_ctx())
            .unwrap_err();
        assert!(matches!(err, RenderError::TemplateNotFound { .. }));
    }

    #[test]
    fn undefined_variable_is_a_tera_error() {
        let dir = templates_dir(&[("main.cpp.tera", "return {{ nope }};\n")]);
        let engine = TemplateEngine::new(dir.path()).expect("engine");
        let ctx = EntryPointContext { return_code: "0".to_string() };
        let err = engine.render_entry_point("main.cpp", &ctx).unwrap_err();
        assert!(matches!(err, RenderError::Tera(_)));
    }

    #[test]
    fn template_names_are_case_insensitive() {
        let dir = templates_dir(&[("cmakelists.txt.tera", DESCRIPTOR_TPL)]);
        let engine = TemplateEngine::new(dir.path()).expect("engine");
        engine
            .render_build_descriptor(&descriptor_ctx())
            .expect("lowercased template file still resolves");
    }

    #[test]
    fn non_tera_files_are_not_loaded() {
        let dir = templates_dir(&[
            ("main.cpp.tera", "int main() { return {{ return_code }}; }\n"),
            ("calc.cpp", "int add(int a, int b) { return a + b; }\n"),
        ]);
        let engine = TemplateEngine::new(dir.path()).expect("engine");
        let ctx = EntryPointContext { return_code: "0".to_string() };
        let err = engine.render("calc.cpp", &ctx.to_tera_context().unwrap());
        assert!(matches!(err, Err(RenderError::TemplateNotFound { .. })));
    }
}
