use serde::{Deserialize, Serialize};

use super::check::{Check, CheckStatus};

/// Project context as saved by the BEP form (ISO 19650-2 project sheet).
///
/// Only part of the sheet feeds verification; the remaining fields are kept
/// so that stored records round-trip. Code-valued fields stay raw strings
/// here and are parsed during requirement extraction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProjectContext {
    // Identification
    pub project_name: Option<String>,
    pub project_code: Option<String>,
    pub project_type: Option<String>,
    pub client_name: Option<String>,
    pub current_phase: Option<String>,
    pub bep_version: Option<String>,

    // EIR and standards
    pub has_eir: bool,
    pub iso_19650_1: bool,
    pub iso_19650_2: bool,
    pub iso_19650_3: bool,
    pub national_standards: Vec<String>,

    // CDE
    pub cde_platform: Option<String>,
    pub document_naming_convention: Option<String>,

    // Disciplines and models
    pub disciplines: Vec<String>,
    pub uses_federated_models: bool,
    pub main_exchange_format: Option<String>,

    // LOD
    pub lod_scale: Option<String>,
    pub lod_target_pt: Option<String>,
    pub lod_target_dde: Option<String>,
    pub lod_target_execution: Option<String>,

    // Coordination
    pub clash_detection_tool: Option<String>,
}

impl Default for ProjectContext {
    fn default() -> Self {
        Self {
            project_name: None,
            project_code: None,
            project_type: None,
            client_name: None,
            current_phase: None,
            bep_version: None,
            has_eir: false,
            iso_19650_1: true,
            iso_19650_2: true,
            iso_19650_3: false,
            national_standards: Vec::new(),
            cde_platform: None,
            document_naming_convention: None,
            disciplines: Vec::new(),
            uses_federated_models: true,
            main_exchange_format: None,
            lod_scale: None,
            lod_target_pt: None,
            lod_target_dde: None,
            lod_target_execution: None,
            clash_detection_tool: None,
        }
    }
}

/// Lifecycle status of a project.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    New,
    ContextDefined,
    BepGenerated,
    /// Verified with at least one failing check
    BepVerifiedPartial,
    BepVerifiedOk,
}

impl ProjectStatus {
    /// Status after a verification run: any `fail` makes it partial.
    ///
    /// Warnings do not block, unlike the report's overall status.
    pub fn after_verification(checks: &[Check]) -> Self {
        if checks.iter().any(|c| c.status == CheckStatus::Fail) {
            ProjectStatus::BepVerifiedPartial
        } else {
            ProjectStatus::BepVerifiedOk
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::New => "New project",
            ProjectStatus::ContextDefined => "Context defined",
            ProjectStatus::BepGenerated => "BEP generated",
            ProjectStatus::BepVerifiedPartial => "Partially verified",
            ProjectStatus::BepVerifiedOk => "Verified OK",
        }
    }
}
