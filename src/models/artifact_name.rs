use chrono::{DateTime, Local, TimeZone};

/// Literal prefix of every generated document name
pub const NAME_PREFIX: &str = "project_review";

/// `YYYYMMDD_HHMMSS`
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Server-time name of a rendered document.
///
/// Captured once per request. Second resolution means two requests can share
/// a name, so it is only used for the download filename and as the stem of
/// the on-disk artifact, never as its identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactName {
    timestamp: String,
}

impl ArtifactName {
    pub fn now() -> Self {
        Self::at(&Local::now())
    }

    pub fn at<Tz: TimeZone>(time: &DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            timestamp: time.format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    /// `project_review_<timestamp>`
    pub fn stem(&self) -> String {
        format!("{NAME_PREFIX}_{}", self.timestamp)
    }

    /// `project_review_<timestamp>.pdf`
    pub fn download_name(&self) -> String {
        format!("{}.pdf", self.stem())
    }
}

impl std::fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.download_name())
    }
}
