//! Value types shared by every forge provider.

use std::fmt;

use serde::Serialize;

/// Organisation, repository, and web host matched from a remote URL.
///
/// `org` may contain `/` for forges with nested namespaces (GitLab
/// subgroups, Azure DevOps `<org>/<project>`); URL builders split it back
/// into separate path segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrgRepoInfo {
    /// Owning user, organisation, or namespace path.
    pub org: String,
    /// Repository name without a `.git` suffix.
    pub repo: String,
    /// Normalised web hostname, optionally with a port.
    pub hostname: String,
}

/// One end of a selection, zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectionPoint {
    /// Line index.
    pub line: u32,
    /// Column index, when known.
    pub column: Option<u32>,
}

/// A line selection, zero-based, with optional columns.
///
/// Forges number lines from one; each provider performs the conversion when
/// rendering its fragment or query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectionRange {
    /// First selected line.
    pub start_line: u32,
    /// Last selected line.
    pub end_line: u32,
    /// Column on the first line, when known.
    pub start_column: Option<u32>,
    /// Column on the last line, when known.
    pub end_column: Option<u32>,
}

impl SelectionRange {
    /// Creates a selection covering whole lines.
    #[must_use]
    pub const fn lines(start_line: u32, end_line: u32) -> Self {
        Self {
            start_line,
            end_line,
            start_column: None,
            end_column: None,
        }
    }

    /// Creates a selection spanning two points.
    #[must_use]
    pub const fn between(start: SelectionPoint, end: SelectionPoint) -> Self {
        Self {
            start_line: start.line,
            end_line: end.line,
            start_column: start.column,
            end_column: end.column,
        }
    }

    /// Returns the first selected point.
    #[must_use]
    pub const fn start(&self) -> SelectionPoint {
        SelectionPoint {
            line: self.start_line,
            column: self.start_column,
        }
    }

    /// Returns the last selected point.
    #[must_use]
    pub const fn end(&self) -> SelectionPoint {
        SelectionPoint {
            line: self.end_line,
            column: self.end_column,
        }
    }

    /// Returns the selection with columns attached.
    #[must_use]
    pub const fn with_columns(self, start_column: u32, end_column: u32) -> Self {
        Self {
            start_column: Some(start_column),
            end_column: Some(end_column),
            ..self
        }
    }

    /// Returns true when either endpoint carries a non-zero column.
    #[must_use]
    pub fn has_columns(&self) -> bool {
        self.start_column.unwrap_or(0) != 0 || self.end_column.unwrap_or(0) != 0
    }

    /// One-based first line.
    #[must_use]
    pub const fn start_line_number(&self) -> u32 {
        self.start_line.saturating_add(1)
    }

    /// One-based last line.
    #[must_use]
    pub const fn end_line_number(&self) -> u32 {
        self.end_line.saturating_add(1)
    }

    /// One-based first column, treating a missing column as the line start.
    #[must_use]
    pub fn start_column_number(&self) -> u32 {
        self.start_column.unwrap_or(0).saturating_add(1)
    }

    /// One-based last column, treating a missing column as the line start.
    #[must_use]
    pub fn end_column_number(&self) -> u32 {
        self.end_column.unwrap_or(0).saturating_add(1)
    }
}

/// Which of the generated URLs a caller wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlVariant {
    /// File contents at a revision.
    Blob,
    /// Per-line authorship of a file.
    Blame,
    /// Commits touching a file.
    History,
    /// Comparison of the revision against the default branch.
    Compare,
    /// New pull or merge request from the revision.
    PullRequest,
    /// Repository landing page.
    Repository,
}

impl fmt::Display for UrlVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Blob => "blob",
            Self::Blame => "blame",
            Self::History => "history",
            Self::Compare => "compare",
            Self::PullRequest => "pull request",
            Self::Repository => "repository",
        };
        f.write_str(label)
    }
}

/// The full set of URLs a provider generates for one request.
///
/// File-specific URLs are `None` when no file is open.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UrlBundle {
    /// File contents view.
    pub blob_url: Option<String>,
    /// Blame or annotate view.
    pub blame_url: Option<String>,
    /// File history view.
    pub history_url: Option<String>,
    /// Compare view for the revision.
    pub compare_url: Option<String>,
    /// Pull or merge request creation page.
    pub pr_url: Option<String>,
    /// Repository home page.
    pub repo_url: Option<String>,
}

impl UrlBundle {
    /// Returns the URL for `variant`, if generated.
    #[must_use]
    pub fn get(&self, variant: UrlVariant) -> Option<&str> {
        let url = match variant {
            UrlVariant::Blob => &self.blob_url,
            UrlVariant::Blame => &self.blame_url,
            UrlVariant::History => &self.history_url,
            UrlVariant::Compare => &self.compare_url,
            UrlVariant::PullRequest => &self.pr_url,
            UrlVariant::Repository => &self.repo_url,
        };
        url.as_deref()
    }

    /// Returns the URL for `variant`, falling back to the compare URL and
    /// then the repository URL.
    ///
    /// The returned variant names the URL actually chosen.
    #[must_use]
    pub fn select(&self, variant: UrlVariant) -> Option<(UrlVariant, &str)> {
        [variant, UrlVariant::Compare, UrlVariant::Repository]
            .into_iter()
            .find_map(|candidate| self.get(candidate).map(|url| (candidate, url)))
    }
}
