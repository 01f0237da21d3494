//! Unified diagnostics infrastructure for tracking issues during operations.
//!
//! This module provides a common interface for collecting warnings and errors
//! during dataset loading, classification, and export. It supports:
//!
//! - Severity levels (Warning, Error)
//! - Categories for grouping issues (source, sheet, export, etc.)
//! - Optional source-file and sheet references for ingestion issues
//! - Serialization for JSON output
//!
//! # Example
//!
//! ```
//! use dla_core::diagnostics::Diagnostics;
//!
//! let mut diag = Diagnostics::new();
//!
//! // Add a warning about a skipped source
//! diag.add_warning("source", "path does not exist");
//!
//! // Add an error naming the file and sheet that failed
//! diag.add_error_for_sheet("sheet", "header row missing", "regions.xlsx", "Sheet2");
//!
//! // Check results
//! assert_eq!(diag.warning_count(), 1);
//! assert_eq!(diag.error_count(), 1);
//! ```

use serde::Serialize;

/// Severity level for diagnostic issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Unusual but the load continued (e.g., skipped source)
    Warning,
    /// Could not complete a sheet/operation (e.g., malformed data)
    Error,
}

/// A single diagnostic issue encountered during an operation
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticIssue {
    /// Severity of the issue
    pub severity: Severity,
    /// Category for grouping (e.g., "source", "sheet", "export")
    pub category: String,
    /// Human-readable description of the issue
    pub message: String,
    /// Optional source file the issue refers to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Optional sheet within the source file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet: Option<String>,
}

impl DiagnosticIssue {
    /// Create a new diagnostic issue
    pub fn new(
        severity: Severity,
        category: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category: category.into(),
            message: message.into(),
            source: None,
            sheet: None,
        }
    }

    /// Add a source-file reference to the issue
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Add a sheet reference to the issue
    pub fn with_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = Some(sheet.into());
        self
    }
}

impl std::fmt::Display for DiagnosticIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let severity = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };

        write!(f, "[{}:{}] {}", severity, self.category, self.message)?;

        match (&self.source, &self.sheet) {
            (Some(source), Some(sheet)) => write!(f, " ({}, sheet '{}')", source, sheet)?,
            (Some(source), None) => write!(f, " ({})", source)?,
            (None, Some(sheet)) => write!(f, " (sheet '{}')", sheet)?,
            (None, None) => {}
        }

        Ok(())
    }
}

/// Collection of diagnostic issues for an operation
///
/// This is the primary container for tracking warnings and errors during
/// loads, classification, and export. It provides methods for adding
/// issues with various levels of detail.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagnostics {
    /// All collected issues
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<DiagnosticIssue>,
}

impl Diagnostics {
    /// Create new empty diagnostics
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw issue directly
    pub fn add(&mut self, issue: DiagnosticIssue) {
        self.issues.push(issue);
    }

    // =========================================================================
    // Warning Methods
    // =========================================================================

    /// Add a warning with category and message
    pub fn add_warning(&mut self, category: &str, message: &str) {
        self.issues
            .push(DiagnosticIssue::new(Severity::Warning, category, message));
    }

    /// Add a warning naming the source file it refers to
    pub fn add_warning_for_source(&mut self, category: &str, message: &str, source: &str) {
        self.issues
            .push(DiagnosticIssue::new(Severity::Warning, category, message).with_source(source));
    }

    /// Add a warning naming both source file and sheet
    pub fn add_warning_for_sheet(
        &mut self,
        category: &str,
        message: &str,
        source: &str,
        sheet: &str,
    ) {
        self.issues.push(
            DiagnosticIssue::new(Severity::Warning, category, message)
                .with_source(source)
                .with_sheet(sheet),
        );
    }

    // =========================================================================
    // Error Methods
    // =========================================================================

    /// Add an error with category and message
    pub fn add_error(&mut self, category: &str, message: &str) {
        self.issues
            .push(DiagnosticIssue::new(Severity::Error, category, message));
    }

    /// Add an error naming the source file it refers to
    pub fn add_error_for_source(&mut self, category: &str, message: &str, source: &str) {
        self.issues
            .push(DiagnosticIssue::new(Severity::Error, category, message).with_source(source));
    }

    /// Add an error naming both source file and sheet
    pub fn add_error_for_sheet(
        &mut self,
        category: &str,
        message: &str,
        source: &str,
        sheet: &str,
    ) {
        self.issues.push(
            DiagnosticIssue::new(Severity::Error, category, message)
                .with_source(source)
                .with_sheet(sheet),
        );
    }

    // =========================================================================
    // Query Methods
    // =========================================================================

    /// Count warning issues
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    /// Count error issues
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    /// Check if there are any issues
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Warning)
    }

    /// Get issues filtered by category
    pub fn issues_by_category<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a DiagnosticIssue> {
        self.issues.iter().filter(move |i| i.category == category)
    }

    /// Get only error issues
    pub fn errors(&self) -> impl Iterator<Item = &DiagnosticIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    /// Get only warning issues
    pub fn warnings(&self) -> impl Iterator<Item = &DiagnosticIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
    }

    // =========================================================================
    // Utility Methods
    // =========================================================================

    /// Merge another diagnostics into this one
    pub fn merge(&mut self, other: Diagnostics) {
        self.issues.extend(other.issues);
    }

    /// Clear all issues
    pub fn clear(&mut self) {
        self.issues.clear();
    }

    /// Get summary string
    pub fn summary(&self) -> String {
        let warnings = self.warning_count();
        let errors = self.error_count();

        match (warnings, errors) {
            (0, 0) => "No issues".to_string(),
            (w, 0) => format!("{} warning{}", w, if w == 1 { "" } else { "s" }),
            (0, e) => format!("{} error{}", e, if e == 1 { "" } else { "s" }),
            (w, e) => format!(
                "{} warning{}, {} error{}",
                w,
                if w == 1 { "" } else { "s" },
                e,
                if e == 1 { "" } else { "s" }
            ),
        }
    }
}

impl std::fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Diagnostics: {}", self.summary())?;
        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }
        Ok(())
    }
}

// ============================================================================
// Load-Specific Extensions
// ============================================================================

/// Statistics about a load operation
///
/// This struct tracks counts of sources, sheets, and rows handled while
/// building the normalized table. It is kept separate from `Diagnostics`
/// since it contains load-specific counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadStats {
    pub sources_read: usize,
    pub sources_missing: usize,
    pub sources_skipped: usize,
    pub sheets_read: usize,
    pub sheets_failed: usize,
    pub rows_kept: usize,
    pub rows_dropped: usize,
}

/// Complete diagnostics for a load operation
///
/// Combines load statistics with diagnostic issues. This is the primary
/// report type attached to a loaded dataset.
///
/// This struct provides direct field access to `stats` and `issues` so
/// the loader can update counters as it walks sources and sheets.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadDiagnostics {
    /// Source/sheet/row counts for the load
    pub stats: LoadStats,
    /// All collected issues (warnings and errors)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<DiagnosticIssue>,
}

impl LoadDiagnostics {
    /// Create new empty load diagnostics
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a warning
    pub fn add_warning(&mut self, category: &str, message: &str) {
        self.issues
            .push(DiagnosticIssue::new(Severity::Warning, category, message));
    }

    /// Add a warning naming the source file it refers to
    pub fn add_warning_for_source(&mut self, category: &str, message: &str, source: &str) {
        self.issues
            .push(DiagnosticIssue::new(Severity::Warning, category, message).with_source(source));
    }

    /// Record a source whose path does not exist (increments the
    /// sources_missing counter)
    pub fn add_missing_source(&mut self, source: &str) {
        self.issues.push(
            DiagnosticIssue::new(Severity::Warning, "source", "path does not exist")
                .with_source(source),
        );
        self.stats.sources_missing += 1;
    }

    /// Record a source skipped for a reason other than absence, such as an
    /// unrecognized extension (increments the sources_skipped counter)
    pub fn add_skipped_source(&mut self, message: &str, source: &str) {
        self.issues
            .push(DiagnosticIssue::new(Severity::Warning, "source", message).with_source(source));
        self.stats.sources_skipped += 1;
    }

    /// Add an error
    pub fn add_error(&mut self, category: &str, message: &str) {
        self.issues
            .push(DiagnosticIssue::new(Severity::Error, category, message));
    }

    /// Add an error naming the source file it refers to
    pub fn add_error_for_source(&mut self, category: &str, message: &str, source: &str) {
        self.issues
            .push(DiagnosticIssue::new(Severity::Error, category, message).with_source(source));
    }

    /// Record a sheet that failed to read (increments the sheets_failed
    /// counter)
    pub fn add_failed_sheet(&mut self, message: &str, source: &str, sheet: &str) {
        self.issues.push(
            DiagnosticIssue::new(Severity::Error, "sheet", message)
                .with_source(source)
                .with_sheet(sheet),
        );
        self.stats.sheets_failed += 1;
    }

    /// Count warnings
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    /// Count errors
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    /// Check if there are any issues
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    /// Merge another load diagnostics into this one
    pub fn merge(&mut self, other: LoadDiagnostics) {
        self.issues.extend(other.issues);
        // Note: stats are not merged - they are owned by the loader
    }

    /// Get summary string
    pub fn summary(&self) -> String {
        let warnings = self.warning_count();
        let errors = self.error_count();
        let issue_summary = match (warnings, errors) {
            (0, 0) => "No issues".to_string(),
            (w, 0) => format!("{} warning{}", w, if w == 1 { "" } else { "s" }),
            (0, e) => format!("{} error{}", e, if e == 1 { "" } else { "s" }),
            (w, e) => format!(
                "{} warning{}, {} error{}",
                w,
                if w == 1 { "" } else { "s" },
                e,
                if e == 1 { "" } else { "s" }
            ),
        };

        format!(
            "{} sources, {} sheets, {} rows | {}",
            self.stats.sources_read, self.stats.sheets_read, self.stats.rows_kept, issue_summary
        )
    }
}

impl std::fmt::Display for LoadDiagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Load: {}", self.summary())?;
        if self.has_issues() {
            for issue in &self.issues {
                writeln!(f, "  {}", issue)?;
            }
        }
        Ok(())
    }
}
