use serde::Serialize;
use std::collections::BTreeSet;

use super::codes::{Coded, DisciplineCode, ExchangeFormatCode, ModelSource};

/// Element count for one model category (Revit/IFC)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryStats {
    /// Category name (e.g. Walls, Floors, Ducts)
    pub name: String,
    pub element_count: u64,
}

/// Canonical technical summary of a BIM model, produced by intake.
///
/// Sets are ordered by domain declaration order so that details and reports
/// enumerate codes deterministically. Categories keep submission order and
/// may repeat names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelSummary {
    pub source: Coded<ModelSource>,
    pub disciplines_present: BTreeSet<Coded<DisciplineCode>>,
    pub categories: Vec<CategoryStats>,
    pub has_georeference: bool,
    pub coordinate_system: Option<String>,
    pub exchange_formats_available: BTreeSet<Coded<ExchangeFormatCode>>,
    /// `None` when the submitter did not state whether LOD/LOI data exists
    pub lod_info_available: Option<bool>,
    /// Free text, echoed into the report and never interpreted
    pub notes: Option<String>,
}

impl ModelSummary {
    pub fn has_discipline(&self, discipline: DisciplineCode) -> bool {
        self.disciplines_present.contains(&Coded::Known(discipline))
    }

    pub fn has_format(&self, format: ExchangeFormatCode) -> bool {
        self.exchange_formats_available
            .contains(&Coded::Known(format))
    }

    pub fn unrecognized_disciplines(&self) -> Vec<&str> {
        self.disciplines_present
            .iter()
            .filter_map(|d| d.unrecognized())
            .collect()
    }

    pub fn unrecognized_formats(&self) -> Vec<&str> {
        self.exchange_formats_available
            .iter()
            .filter_map(|f| f.unrecognized())
            .collect()
    }

    /// Sum of element counts, saturating at `u64::MAX`.
    pub fn total_elements(&self) -> u64 {
        self.categories
            .iter()
            .fold(0u64, |total, c| total.saturating_add(c.element_count))
    }
}
