//! # simforge-renderer
//!
//! Tera-based template engine that renders the build descriptor and the
//! generated entry point from the workspace's `templates/` directory.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use simforge_renderer::{BuildDescriptorContext, TemplateEngine};
//!
//! fn render_descriptor(templates: &Path) {
//!     if let Ok(engine) = TemplateEngine::new(templates) {
//!         let ctx = BuildDescriptorContext {
//!             project: "drone".into(),
//!             files: vec!["calc.hpp".into(), "calc.cpp".into()],
//!             main: "main.cpp".into(),
//!         };
//!         if let Ok(content) = engine.render_build_descriptor(&ctx) {
//!             println!("{} bytes", content.len());
//!         }
//!     }
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;

pub use context::{BuildDescriptorContext, EntryPointContext};
pub use engine::{TemplateEngine, BUILD_DESCRIPTOR_FILE};
pub use error::RenderError;
