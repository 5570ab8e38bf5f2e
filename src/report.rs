//! Markdown rendering of verification results.
//!
//! Rendering is plain string assembly over already-decided statuses; it never
//! changes a status and contains no timestamps, so identical input always
//! renders byte-identical output.

use crate::models::{Check, Summary};

/// Descriptive context printed above the checks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportHeader {
    /// Project display name, e.g. "Spital Judetean (SJ-01)"
    pub project: Option<String>,
    /// Model source as submitted
    pub source: Option<String>,
    /// Declared standards line, e.g. "ISO 19650-1, ISO 19650-2; EIR: yes"
    pub standards: Option<String>,
    /// Submitter's free-text notes, echoed verbatim
    pub notes: Option<String>,
}

pub const REPORT_TITLE: &str = "BEP verification report";

/// Render the report for an ordered check list and its summary.
pub fn render_report(header: &ReportHeader, checks: &[Check], summary: &Summary) -> String {
    let mut md = String::new();

    // =========================================================================
    // Header
    // =========================================================================
    md.push_str(&format!("# {}\n\n", REPORT_TITLE));
    if let Some(project) = &header.project {
        md.push_str(&format!("**Project**: {}\n", project));
    }
    if let Some(source) = &header.source {
        md.push_str(&format!("**Model source**: {}\n", source));
    }
    if let Some(standards) = &header.standards {
        md.push_str(&format!("**BEP standards**: {}\n", standards));
    }
    if header.project.is_some() || header.source.is_some() || header.standards.is_some() {
        md.push('\n');
    }

    // =========================================================================
    // Overall status banner
    // =========================================================================
    let overall = summary.overall_status;
    md.push_str(&format!(
        "> {} **Overall status: {}** ({}): {} pass, {} warning, {} fail out of {} checks\n\n",
        overall.glyph(),
        overall.as_str().to_uppercase(),
        overall.label(),
        summary.pass_count,
        summary.warning_count,
        summary.fail_count,
        summary.total_checks
    ));

    // =========================================================================
    // Checks, in input order
    // =========================================================================
    md.push_str("## Checks\n\n");
    for (i, check) in checks.iter().enumerate() {
        md.push_str(&format!("### {}. {}\n\n", i + 1, check.label));
        md.push_str(&format!(
            "{} **{}** ({}) `{}`\n\n",
            check.status.glyph(),
            check.status.as_str(),
            check.status.label(),
            check.id
        ));
        md.push_str(&format!("{}\n\n", check.details));
    }

    if let Some(notes) = &header.notes {
        md.push_str("## Model notes\n\n");
        md.push_str(notes);
        md.push_str("\n\n");
    }

    // Single trailing newline
    while md.ends_with("\n\n") {
        md.pop();
    }
    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CheckStatus;

    fn sample() -> (Vec<Check>, Summary) {
        let checks = vec![
            Check {
                id: "disciplines_coverage".into(),
                label: "Discipline coverage".into(),
                status: CheckStatus::Pass,
                details: "All 2 declared disciplines are present in the model: architecture, structure.".into(),
            },
            Check {
                id: "exchange_format_match".into(),
                label: "Main exchange format".into(),
                status: CheckStatus::Fail,
                details: "Declared exchange format ifc4_3 (IFC 4.3) is missing; available formats: dwg.".into(),
            },
        ];
        let summary = Summary::from_checks(&checks);
        (checks, summary)
    }

    #[test]
    fn test_render_is_byte_identical() {
        let (checks, summary) = sample();
        let header = ReportHeader {
            project: Some("Spital Judetean (SJ-01)".into()),
            notes: Some("Exported from the central model.".into()),
            ..Default::default()
        };
        assert_eq!(
            render_report(&header, &checks, &summary),
            render_report(&header, &checks, &summary)
        );
    }

    #[test]
    fn test_render_golden() {
        let (checks, summary) = sample();
        let header = ReportHeader {
            project: Some("Spital Judetean (SJ-01)".into()),
            source: Some("revit".into()),
            standards: None,
            notes: Some("Exported from the central model.".into()),
        };
        let expected = "\
# BEP verification report

**Project**: Spital Judetean (SJ-01)
**Model source**: revit

> ❌ **Overall status: FAIL** (Non-compliant): 1 pass, 0 warning, 1 fail out of 2 checks

## Checks

### 1. Discipline coverage

✅ **pass** (Compliant) `disciplines_coverage`

All 2 declared disciplines are present in the model: architecture, structure.

### 2. Main exchange format

❌ **fail** (Non-compliant) `exchange_format_match`

Declared exchange format ifc4_3 (IFC 4.3) is missing; available formats: dwg.

## Model notes

Exported from the central model.
";
        assert_eq!(render_report(&header, &checks, &summary), expected);
    }

    #[test]
    fn test_checks_keep_input_order() {
        let (mut checks, _) = sample();
        checks.reverse();
        let summary = Summary::from_checks(&checks);
        let md = render_report(&ReportHeader::default(), &checks, &summary);

        let first = md.find("exchange_format_match").unwrap();
        let second = md.find("disciplines_coverage").unwrap();
        assert!(first < second);
        assert!(!md.contains("## Model notes"));
    }
}
