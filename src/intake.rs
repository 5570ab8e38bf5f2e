//! Model summary intake.
//!
//! Turns a raw JSON payload into a canonical [`ModelSummary`]:
//!
//! 1. legacy field names are migrated to the canonical wire shape,
//! 2. the payload is checked against the JSON Schema of [`ModelSummaryPayload`],
//! 3. domain constraints are applied (non-empty disciplines, non-negative
//!    counts, non-blank names) and codes are parsed.
//!
//! All problems found in steps 2 and 3 are reported together in one
//! [`VerifyError::Validation`]. Unknown code values are not errors; they are
//! kept as [`Coded::Unrecognized`] for the rules to judge.

use once_cell::sync::Lazy;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use tracing::{debug, warn};

use crate::error::VerifyError;
use crate::models::{CategoryStats, Coded, ModelSummary};

/// Separators between entries of the legacy `element_categories` string
static LEGACY_ENTRY_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,;\n]").expect("invalid LEGACY_ENTRY_SEPARATOR regex"));

/// A legacy entry: `Walls: 120` or `Walls=120`
static LEGACY_ENTRY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<name>.+?)\s*[:=]\s*(?P<count>-?\d+)$").expect("invalid LEGACY_ENTRY_PATTERN regex")
});

// ============================================================================
// Wire Types
// ============================================================================

/// Per-category element count as submitted
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoryPayload {
    /// Category name (e.g. Walls, Floors, Ducts)
    pub name: String,
    /// Number of elements in the category; must not be negative
    pub element_count: i64,
}

/// Canonical verification request body.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ModelSummaryPayload {
    /// Model source: revit, ifc or other
    #[serde(default = "default_source")]
    pub source: String,

    /// Disciplines present in the model; at least one is required
    #[serde(default)]
    pub disciplines_present: Vec<String>,

    /// Element counts per category, in display order
    #[serde(default)]
    pub categories: Vec<CategoryPayload>,

    #[serde(default)]
    pub has_georeference: bool,

    /// Coordinate system (e.g. "Stereo 70 / EPSG:31700")
    #[serde(default)]
    pub coordinate_system: Option<String>,

    /// Exchange formats the model can be delivered in
    #[serde(default)]
    pub exchange_formats_available: Vec<String>,

    /// Whether LOD/LOI information exists in the model; omit if unknown
    #[serde(default)]
    pub lod_info_available: Option<bool>,

    #[serde(default)]
    pub notes: Option<String>,
}

fn default_source() -> String {
    "revit".to_string()
}

/// JSON Schema of the canonical request body.
pub fn payload_schema() -> Value {
    schemars::schema_for!(ModelSummaryPayload).to_value()
}

// ============================================================================
// Intake
// ============================================================================

/// Validate and normalize a raw request payload.
pub fn parse_model_summary(raw: &Value) -> Result<ModelSummary, VerifyError> {
    let mut payload = raw.clone();
    migrate_legacy_payload(&mut payload)?;
    validate_structure(&payload)?;

    let payload: ModelSummaryPayload = serde_json::from_value(payload)
        .map_err(|e| VerifyError::Validation(format!("unparsable payload: {}", e)))?;

    normalize(payload)
}

/// Parse a payload from JSON text.
pub fn parse_model_summary_str(json: &str) -> Result<ModelSummary, VerifyError> {
    let raw: Value = serde_json::from_str(json)
        .map_err(|e| VerifyError::Validation(format!("unparsable payload: {}", e)))?;
    parse_model_summary(&raw)
}

fn validate_structure(payload: &Value) -> Result<(), VerifyError> {
    let schema = payload_schema();
    let validator =
        jsonschema::validator_for(&schema).map_err(|e| VerifyError::Schema(e.to_string()))?;

    let problems: Vec<String> = validator
        .iter_errors(payload)
        .map(|e| {
            let path = e.instance_path.to_string();
            if path.is_empty() {
                format!("payload: {}", e)
            } else {
                format!("{}: {}", path, e)
            }
        })
        .collect();

    if problems.is_empty() {
        Ok(())
    } else {
        Err(VerifyError::Validation(problems.join("; ")))
    }
}

fn normalize(payload: ModelSummaryPayload) -> Result<ModelSummary, VerifyError> {
    let mut problems = Vec::new();

    let mut disciplines_present = BTreeSet::new();
    for raw in &payload.disciplines_present {
        if raw.trim().is_empty() {
            problems.push("disciplines_present contains a blank value".to_string());
        } else {
            disciplines_present.insert(Coded::parse(raw));
        }
    }
    if payload.disciplines_present.is_empty() {
        problems.push("disciplines_present must list at least one discipline".to_string());
    }

    let mut exchange_formats_available = BTreeSet::new();
    for raw in &payload.exchange_formats_available {
        if raw.trim().is_empty() {
            problems.push("exchange_formats_available contains a blank value".to_string());
        } else {
            exchange_formats_available.insert(Coded::parse(raw));
        }
    }

    let mut categories = Vec::with_capacity(payload.categories.len());
    for (idx, category) in payload.categories.iter().enumerate() {
        let name = category.name.trim();
        if name.is_empty() {
            problems.push(format!("categories[{}] has a blank name", idx));
        }
        match u64::try_from(category.element_count) {
            Ok(element_count) => categories.push(CategoryStats {
                name: name.to_string(),
                element_count,
            }),
            Err(_) => problems.push(format!(
                "categories[{}] ({}) has negative element_count {}",
                idx, name, category.element_count
            )),
        }
    }

    if !problems.is_empty() {
        return Err(VerifyError::Validation(problems.join("; ")));
    }

    let summary = ModelSummary {
        source: Coded::parse(&payload.source),
        disciplines_present,
        categories,
        has_georeference: payload.has_georeference,
        coordinate_system: non_blank(payload.coordinate_system),
        exchange_formats_available,
        lod_info_available: payload.lod_info_available,
        notes: non_blank(payload.notes),
    };

    let unrecognized: Vec<&str> = summary
        .unrecognized_disciplines()
        .into_iter()
        .chain(summary.unrecognized_formats())
        .chain(summary.source.unrecognized())
        .collect();
    if !unrecognized.is_empty() {
        warn!("Model summary carries unrecognized codes: {}", unrecognized.join(", "));
    }

    debug!(
        "Model summary accepted: {} disciplines, {} categories, {} formats",
        summary.disciplines_present.len(),
        summary.categories.len(),
        summary.exchange_formats_available.len()
    );

    Ok(summary)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ============================================================================
// Legacy Migration
// ============================================================================

/// Rewrite legacy field names into the canonical wire shape.
///
/// - `has_georeferencing` becomes `has_georeference`
/// - `element_categories` ("Walls: 120, Floors: 14") becomes `categories`
///
/// Supplying a legacy field together with its canonical replacement is
/// rejected rather than guessed.
pub fn migrate_legacy_payload(payload: &mut Value) -> Result<(), VerifyError> {
    let Some(obj) = payload.as_object_mut() else {
        return Ok(());
    };

    if let Some(value) = take_legacy(obj, "has_georeferencing", "has_georeference")? {
        warn!("Migrating legacy field has_georeferencing -> has_georeference");
        obj.insert("has_georeference".to_string(), value);
    }

    if let Some(value) = take_legacy(obj, "element_categories", "categories")? {
        warn!("Migrating legacy field element_categories -> categories");
        let categories = match value {
            Value::Null => Vec::new(),
            Value::String(text) => parse_legacy_categories(&text)?,
            other => {
                return Err(VerifyError::Validation(format!(
                    "element_categories must be a string, got {}",
                    other
                )));
            }
        };
        obj.insert("categories".to_string(), Value::Array(categories));
    }

    Ok(())
}

fn take_legacy(
    obj: &mut Map<String, Value>,
    legacy: &str,
    canonical: &str,
) -> Result<Option<Value>, VerifyError> {
    if !obj.contains_key(legacy) {
        return Ok(None);
    }
    if obj.contains_key(canonical) {
        return Err(VerifyError::Validation(format!(
            "payload contains both legacy field {} and {}; send only {}",
            legacy, canonical, canonical
        )));
    }
    Ok(obj.remove(legacy))
}

fn parse_legacy_categories(text: &str) -> Result<Vec<Value>, VerifyError> {
    let mut categories = Vec::new();
    for entry in LEGACY_ENTRY_SEPARATOR.split(text) {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let caps = LEGACY_ENTRY_PATTERN.captures(entry).ok_or_else(|| {
            VerifyError::Validation(format!(
                "legacy element_categories entry '{}' has no element count (expected 'Name: count')",
                entry
            ))
        })?;
        let count: i64 = caps["count"].parse().map_err(|_| {
            VerifyError::Validation(format!(
                "legacy element_categories entry '{}' has an out-of-range count",
                entry
            ))
        })?;
        categories.push(serde_json::json!({
            "name": caps["name"].trim(),
            "element_count": count,
        }));
    }
    Ok(categories)
}
