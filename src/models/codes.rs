//! Closed code domains shared by the BEP context and the model summary.
//!
//! Incoming values are parsed into [`Coded`]: either a known code or the raw
//! string that did not match. Unrecognized values are carried through to the
//! rules, which degrade to `warning` instead of rejecting the payload.

use serde::{Serialize, Serializer};
use std::fmt;

/// A closed enumeration with a stable wire spelling.
pub trait CodeDomain: Copy + Ord + Sized + 'static {
    /// Every member of the domain, in declaration order
    const ALL: &'static [Self];

    /// Wire spelling (e.g. "ifc4_3")
    fn as_str(&self) -> &'static str;

    /// Human-readable label
    fn label(&self) -> &'static str;

    /// Parse a wire value; matching ignores surrounding whitespace and case.
    fn from_code(raw: &str) -> Option<Self> {
        let needle = raw.trim().to_lowercase();
        Self::ALL.iter().copied().find(|c| c.as_str() == needle)
    }
}

// ============================================================================
// Disciplines
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DisciplineCode {
    Architecture,
    Structure,
    Mep,
    Civil,
    Roads,
    Infrastructure,
    Other,
}

impl CodeDomain for DisciplineCode {
    const ALL: &'static [Self] = &[
        DisciplineCode::Architecture,
        DisciplineCode::Structure,
        DisciplineCode::Mep,
        DisciplineCode::Civil,
        DisciplineCode::Roads,
        DisciplineCode::Infrastructure,
        DisciplineCode::Other,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            DisciplineCode::Architecture => "architecture",
            DisciplineCode::Structure => "structure",
            DisciplineCode::Mep => "mep",
            DisciplineCode::Civil => "civil",
            DisciplineCode::Roads => "roads",
            DisciplineCode::Infrastructure => "infrastructure",
            DisciplineCode::Other => "other",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            DisciplineCode::Architecture => "Architecture",
            DisciplineCode::Structure => "Structure",
            DisciplineCode::Mep => "MEP (HVAC/Electrical/Plumbing)",
            DisciplineCode::Civil => "Civil",
            DisciplineCode::Roads => "Roads",
            DisciplineCode::Infrastructure => "Infrastructure",
            DisciplineCode::Other => "Other",
        }
    }
}

// ============================================================================
// Exchange formats
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExchangeFormatCode {
    Ifc4_3,
    Ifc2x3,
    Nwd,
    Nwc,
    Dwg,
    Other,
}

/// Formats that carry the same content in a different version or packaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatFamily {
    Ifc,
    Navisworks,
}

impl ExchangeFormatCode {
    /// Family this format belongs to; `None` for standalone formats.
    pub fn family(&self) -> Option<FormatFamily> {
        match self {
            ExchangeFormatCode::Ifc4_3 | ExchangeFormatCode::Ifc2x3 => Some(FormatFamily::Ifc),
            ExchangeFormatCode::Nwd | ExchangeFormatCode::Nwc => Some(FormatFamily::Navisworks),
            ExchangeFormatCode::Dwg | ExchangeFormatCode::Other => None,
        }
    }

    /// True when both formats are distinct members of the same family.
    pub fn is_family_of(&self, other: &ExchangeFormatCode) -> bool {
        self != other && self.family().is_some() && self.family() == other.family()
    }
}

impl CodeDomain for ExchangeFormatCode {
    const ALL: &'static [Self] = &[
        ExchangeFormatCode::Ifc4_3,
        ExchangeFormatCode::Ifc2x3,
        ExchangeFormatCode::Nwd,
        ExchangeFormatCode::Nwc,
        ExchangeFormatCode::Dwg,
        ExchangeFormatCode::Other,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            ExchangeFormatCode::Ifc4_3 => "ifc4_3",
            ExchangeFormatCode::Ifc2x3 => "ifc2x3",
            ExchangeFormatCode::Nwd => "nwd",
            ExchangeFormatCode::Nwc => "nwc",
            ExchangeFormatCode::Dwg => "dwg",
            ExchangeFormatCode::Other => "other",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ExchangeFormatCode::Ifc4_3 => "IFC 4.3",
            ExchangeFormatCode::Ifc2x3 => "IFC 2x3",
            ExchangeFormatCode::Nwd => "NWD",
            ExchangeFormatCode::Nwc => "NWC",
            ExchangeFormatCode::Dwg => "DWG",
            ExchangeFormatCode::Other => "Other",
        }
    }
}

// ============================================================================
// Model source
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ModelSource {
    Revit,
    Ifc,
    Other,
}

impl CodeDomain for ModelSource {
    const ALL: &'static [Self] = &[ModelSource::Revit, ModelSource::Ifc, ModelSource::Other];

    fn as_str(&self) -> &'static str {
        match self {
            ModelSource::Revit => "revit",
            ModelSource::Ifc => "ifc",
            ModelSource::Other => "other",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ModelSource::Revit => "Revit",
            ModelSource::Ifc => "IFC",
            ModelSource::Other => "Other",
        }
    }
}

// ============================================================================
// Coded values
// ============================================================================

/// A value from a closed domain, or the raw input that matched no member.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Coded<T: CodeDomain> {
    Known(T),
    Unrecognized(String),
}

impl<T: CodeDomain> Coded<T> {
    pub fn parse(raw: &str) -> Self {
        match T::from_code(raw) {
            Some(code) => Coded::Known(code),
            None => Coded::Unrecognized(raw.trim().to_string()),
        }
    }

    pub fn known(&self) -> Option<T> {
        match self {
            Coded::Known(code) => Some(*code),
            Coded::Unrecognized(_) => None,
        }
    }

    pub fn unrecognized(&self) -> Option<&str> {
        match self {
            Coded::Known(_) => None,
            Coded::Unrecognized(raw) => Some(raw),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Coded::Known(code) => code.as_str(),
            Coded::Unrecognized(raw) => raw,
        }
    }
}

impl<T: CodeDomain> From<T> for Coded<T> {
    fn from(code: T) -> Self {
        Coded::Known(code)
    }
}

impl<T: CodeDomain> fmt::Display for Coded<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<T: CodeDomain> Serialize for Coded<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discipline_domain_is_closed() {
        let wire: Vec<_> = DisciplineCode::ALL.iter().map(|d| d.as_str()).collect();
        assert_eq!(
            wire,
            vec!["architecture", "structure", "mep", "civil", "roads", "infrastructure", "other"]
        );
    }

    #[test]
    fn test_exchange_format_domain_is_closed() {
        let wire: Vec<_> = ExchangeFormatCode::ALL.iter().map(|f| f.as_str()).collect();
        assert_eq!(wire, vec!["ifc4_3", "ifc2x3", "nwd", "nwc", "dwg", "other"]);
    }

    #[test]
    fn test_parse_is_case_and_whitespace_insensitive() {
        assert_eq!(
            Coded::<DisciplineCode>::parse(" MEP "),
            Coded::Known(DisciplineCode::Mep)
        );
        assert_eq!(
            Coded::<ExchangeFormatCode>::parse("IFC4_3"),
            Coded::Known(ExchangeFormatCode::Ifc4_3)
        );
    }

    #[test]
    fn test_unknown_values_are_preserved() {
        let coded = Coded::<ExchangeFormatCode>::parse("ifc5");
        assert_eq!(coded.unrecognized(), Some("ifc5"));
        assert_eq!(coded.known(), None);
        assert_eq!(coded.to_string(), "ifc5");
    }

    #[test]
    fn test_format_families() {
        assert!(ExchangeFormatCode::Ifc4_3.is_family_of(&ExchangeFormatCode::Ifc2x3));
        assert!(ExchangeFormatCode::Nwc.is_family_of(&ExchangeFormatCode::Nwd));
        assert!(!ExchangeFormatCode::Ifc4_3.is_family_of(&ExchangeFormatCode::Ifc4_3));
        assert!(!ExchangeFormatCode::Dwg.is_family_of(&ExchangeFormatCode::Other));
        assert!(!ExchangeFormatCode::Ifc2x3.is_family_of(&ExchangeFormatCode::Nwd));
    }

    #[test]
    fn test_coded_serializes_as_wire_string() {
        let known: Coded<ModelSource> = ModelSource::Ifc.into();
        let unknown = Coded::<ModelSource>::parse("archicad");
        assert_eq!(serde_json::to_string(&known).unwrap(), "\"ifc\"");
        assert_eq!(serde_json::to_string(&unknown).unwrap(), "\"archicad\"");
    }
}
