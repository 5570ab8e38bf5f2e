//! BEP requirement extraction.
//!
//! Reads the stored project record and exposes the facts the rules compare
//! against. Extraction never mutates the record.

use std::collections::BTreeSet;

use crate::error::VerifyError;
use crate::models::{Coded, DisciplineCode, ExchangeFormatCode, ProjectContext, ProjectStatus};

/// A stored project: its form context and the latest generated BEP, if any.
#[derive(Debug, Clone)]
pub struct BepRecord {
    pub project_code: String,
    /// `None` when the project sheet was never saved
    pub context: Option<ProjectContext>,
    /// Markdown body of the latest generated BEP
    pub bep_markdown: Option<String>,
}

impl BepRecord {
    pub fn has_bep(&self) -> bool {
        self.bep_markdown
            .as_deref()
            .is_some_and(|md| !md.trim().is_empty())
    }

    /// Status implied by what has been stored so far.
    pub fn status(&self) -> ProjectStatus {
        if self.has_bep() {
            ProjectStatus::BepGenerated
        } else if self.context.is_some() {
            ProjectStatus::ContextDefined
        } else {
            ProjectStatus::New
        }
    }

    pub fn display_name(&self) -> String {
        match self.context.as_ref().and_then(|c| c.project_name.as_deref()) {
            Some(name) if !name.trim().is_empty() => {
                format!("{} ({})", name.trim(), self.project_code)
            }
            _ => self.project_code.clone(),
        }
    }
}

/// Declared LOD target for one project phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LodTarget {
    /// Phase key: "pt", "dde" or "execution"
    pub phase: &'static str,
    pub value: String,
}

/// Read-only requirement facts declared by a BEP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BepFacts {
    pub disciplines: BTreeSet<Coded<DisciplineCode>>,
    pub main_exchange_format: Option<Coded<ExchangeFormatCode>>,
    pub uses_federated_models: bool,
    pub lod_scale: Option<String>,
    pub lod_target_pt: Option<String>,
    pub lod_target_dde: Option<String>,
    pub lod_target_execution: Option<String>,
    pub has_eir: bool,
    pub iso_19650_1: bool,
    pub iso_19650_2: bool,
    pub iso_19650_3: bool,
}

impl BepFacts {
    /// Extract facts for `project_code` from its stored record.
    ///
    /// Fails with [`VerifyError::NotFound`] when the project is unknown or no
    /// BEP has been generated for it. A record without a saved context yields
    /// empty facts; the rules then report what they cannot evaluate.
    pub fn extract(record: Option<&BepRecord>, project_code: &str) -> Result<Self, VerifyError> {
        let record = record.ok_or_else(|| {
            VerifyError::NotFound(format!("project '{}' does not exist", project_code))
        })?;

        if !record.has_bep() {
            return Err(VerifyError::NotFound(format!(
                "no BEP has been generated for project '{}'; generate a BEP from the project sheet first",
                record.project_code
            )));
        }

        let fallback = ProjectContext::default();
        Ok(Self::from_context(record.context.as_ref().unwrap_or(&fallback)))
    }

    pub fn from_context(ctx: &ProjectContext) -> Self {
        Self {
            disciplines: ctx
                .disciplines
                .iter()
                .filter(|d| !d.trim().is_empty())
                .map(|d| Coded::parse(d))
                .collect(),
            main_exchange_format: non_blank(&ctx.main_exchange_format).map(|f| Coded::parse(&f)),
            uses_federated_models: ctx.uses_federated_models,
            lod_scale: non_blank(&ctx.lod_scale),
            lod_target_pt: non_blank(&ctx.lod_target_pt),
            lod_target_dde: non_blank(&ctx.lod_target_dde),
            lod_target_execution: non_blank(&ctx.lod_target_execution),
            has_eir: ctx.has_eir,
            iso_19650_1: ctx.iso_19650_1,
            iso_19650_2: ctx.iso_19650_2,
            iso_19650_3: ctx.iso_19650_3,
        }
    }

    /// Declared LOD targets in phase order (PT, DDE, execution).
    pub fn lod_targets(&self) -> Vec<LodTarget> {
        [
            ("pt", &self.lod_target_pt),
            ("dde", &self.lod_target_dde),
            ("execution", &self.lod_target_execution),
        ]
        .into_iter()
        .filter_map(|(phase, value)| {
            value.as_ref().map(|v| LodTarget {
                phase,
                value: v.clone(),
            })
        })
        .collect()
    }

    /// Declared ISO 19650 parts, e.g. ["ISO 19650-1", "ISO 19650-2"]
    pub fn iso_parts(&self) -> Vec<&'static str> {
        [
            (self.iso_19650_1, "ISO 19650-1"),
            (self.iso_19650_2, "ISO 19650-2"),
            (self.iso_19650_3, "ISO 19650-3"),
        ]
        .into_iter()
        .filter_map(|(declared, name)| declared.then_some(name))
        .collect()
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}
