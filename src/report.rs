//! Validation issues and reports.

use serde::Serialize;

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

/// A single finding about a unit's configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_name: Option<String>,
    /// Property the issue is about (dot path for nested fields).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ValidationIssue {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            unit_id: None,
            unit_name: None,
            property: None,
            message: message.into(),
            code: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }

    /// Attach the unit's identity.
    pub fn for_unit(mut self, id: Option<&str>, name: &str) -> Self {
        self.unit_id = id.map(String::from);
        self.unit_name = Some(name.to_string());
        self
    }

    /// Copy of this issue at a different severity.
    pub fn with_severity(&self, severity: Severity) -> Self {
        Self {
            severity,
            ..self.clone()
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.severity.as_str())?;
        if let Some(code) = &self.code {
            write!(f, "[{}]", code)?;
        }
        if let Some(property) = &self.property {
            write!(f, " {}", property)?;
        }
        write!(f, ": {}", self.message)
    }
}

/// Result of validating one unit.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: usize,
    pub warnings: usize,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Build a report from collected issues.
    pub fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        let errors = count(&issues, Severity::Error);
        let warnings = count(&issues, Severity::Warning);
        Self {
            valid: errors == 0,
            errors,
            warnings,
            issues,
        }
    }

    /// Returns true if no issue is an error.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Issues of one severity.
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(move |i| i.severity == severity)
    }
}

fn count(issues: &[ValidationIssue], severity: Severity) -> usize {
    issues.iter().filter(|i| i.severity == severity).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_display() {
        let issue = ValidationIssue::error("URL is required")
            .with_code("MISSING_URL")
            .with_property("url");
        assert_eq!(issue.to_string(), "error[MISSING_URL] url: URL is required");

        let issue = ValidationIssue::info("consider a timeout");
        assert_eq!(issue.to_string(), "info: consider a timeout");
    }

    #[test]
    fn with_severity_copies() {
        let warning = ValidationIssue::warning("unused").with_code("UNUSED");
        let error = warning.with_severity(Severity::Error);
        assert_eq!(warning.severity, Severity::Warning);
        assert_eq!(error.severity, Severity::Error);
        assert_eq!(error.code.as_deref(), Some("UNUSED"));
    }

    #[test]
    fn report_counts() {
        let report = ValidationReport::from_issues(vec![
            ValidationIssue::error("a"),
            ValidationIssue::warning("b"),
            ValidationIssue::warning("c"),
            ValidationIssue::info("d"),
        ]);
        assert!(!report.is_valid());
        assert_eq!(report.errors, 1);
        assert_eq!(report.warnings, 2);
        assert_eq!(report.with_severity(Severity::Info).count(), 1);
    }

    #[test]
    fn empty_report_is_valid() {
        assert!(ValidationReport::from_issues(Vec::new()).is_valid());
    }

    #[test]
    fn issue_serializes_camel_case_without_empty_fields() {
        let issue = ValidationIssue::warning("short").for_unit(Some("n1"), "Agent");
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["severity"], "warning");
        assert_eq!(json["unitId"], "n1");
        assert_eq!(json["unitName"], "Agent");
        assert!(json.get("code").is_none());
    }
}
