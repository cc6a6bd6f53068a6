//! Typed rendering contexts — one schema per template kind.
//!
//! Variable maps are deliberately not stringly-typed: each template has a
//! fixed schema, so a missing field is a compile error here instead of a
//! runtime rendering error later.

use serde::{Deserialize, Serialize};

use simforge_core::types::RunPlan;

use crate::error::RenderError;

/// Variables consumed by the build-descriptor template
/// (`CMakeLists.txt.tera`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildDescriptorContext {
    /// CMake project / target name.
    pub project: String,
    /// Static support sources listed in the target, staged order.
    pub files: Vec<String>,
    /// Generated entry-point file name.
    pub main: String,
}

/// Variables consumed by the entry-point template (`<main>.tera`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryPointContext {
    /// Exit code the generated program returns, as template text.
    pub return_code: String,
}

impl BuildDescriptorContext {
    /// Build the descriptor context from an assembled [`RunPlan`].
    pub fn from_plan(plan: &RunPlan) -> Self {
        BuildDescriptorContext {
            project: plan.workspace.project.0.clone(),
            files: plan.static_files.clone(),
            main: plan.entry_point.file_name.clone(),
        }
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        tera::Context::from_serialize(self).map_err(RenderError::from)
    }
}

impl EntryPointContext {
    /// Build the entry-point context from an assembled [`RunPlan`].
    pub fn from_plan(plan: &RunPlan) -> Self {
        EntryPointContext {
            return_code: plan.entry_point.return_code.clone(),
        }
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        tera::Context::from_serialize(self).map_err(RenderError::from)
    }
}
