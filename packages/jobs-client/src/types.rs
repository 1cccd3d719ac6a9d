use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Logo shown for postings that don't carry their own.
pub const PLACEHOLDER_LOGO_URL: &str = "https://placehold.co/40x40/CCCCCC/000000?text=Logo";

// ============================================================================
// Enumerations
// ============================================================================

/// Where the work happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    Onsite,
    Remote,
    Hybrid,
}

impl Location {
    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Onsite => "Onsite",
            Location::Remote => "Remote",
            Location::Hybrid => "Hybrid",
        }
    }

    pub fn variants() -> &'static [Location] {
        &[Location::Onsite, Location::Remote, Location::Hybrid]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
    Internship,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "Full-time",
            JobType::PartTime => "Part-time",
            JobType::Contract => "Contract",
            JobType::Internship => "Internship",
        }
    }

    pub fn variants() -> &'static [JobType] {
        &[
            JobType::FullTime,
            JobType::PartTime,
            JobType::Contract,
            JobType::Internship,
        ]
    }
}

/// Returned when text doesn't name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Case-insensitive, and tolerant of the `-`/`_`/space spelling differences
/// users type ("full time", "FULL_TIME", "Full-time").
fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for Location {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Location::variants()
            .iter()
            .copied()
            .find(|v| normalize(v.as_str()) == wanted)
            .ok_or_else(|| UnknownVariant {
                kind: "location",
                value: s.to_string(),
            })
    }
}

impl FromStr for JobType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        JobType::variants()
            .iter()
            .copied()
            .find(|v| normalize(v.as_str()) == wanted)
            .ok_or_else(|| UnknownVariant {
                kind: "job type",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Wire types
// ============================================================================

/// A job posting as the backend returns it from `GET /jobs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    pub job_type: String,
    pub location: String,
    pub description: String,
    pub salary: f64,
    pub experience: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(
        default,
        rename = "companyLogo",
        alias = "companyLogoUrl",
        skip_serializing_if = "Option::is_none"
    )]
    pub company_logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_time: Option<String>,
}

impl Job {
    /// Logo to display, falling back to the shared placeholder.
    pub fn logo_url(&self) -> &str {
        match self.company_logo_url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => PLACEHOLDER_LOGO_URL,
        }
    }
}

/// Body of `POST /jobs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    /// Years of experience; the backend stores this as a string.
    pub experience: String,
    pub job_type: JobType,
    pub location: Location,
    pub description: String,
    pub salary: f64,
    pub is_active: bool,
}

/// Error payload the backend sends with non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_type_uses_backend_spelling() {
        assert_eq!(
            serde_json::to_string(&JobType::FullTime).unwrap(),
            "\"Full-time\""
        );
        assert_eq!(
            serde_json::from_str::<JobType>("\"Part-time\"").unwrap(),
            JobType::PartTime
        );
    }

    #[test]
    fn variants_parse_loosely() {
        assert_eq!("remote".parse::<Location>().unwrap(), Location::Remote);
        assert_eq!(" HYBRID ".parse::<Location>().unwrap(), Location::Hybrid);
        assert_eq!("full time".parse::<JobType>().unwrap(), JobType::FullTime);
        assert_eq!("part_time".parse::<JobType>().unwrap(), JobType::PartTime);
        assert!("office".parse::<Location>().is_err());
        assert!("".parse::<JobType>().is_err());
    }

    #[test]
    fn job_deserializes_from_backend_json() {
        let json = r#"{
            "id": "1",
            "title": "Engineer",
            "jobType": "Full-time",
            "location": "Remote",
            "description": "Build things",
            "salary": 12.5,
            "experience": "3",
            "isActive": true,
            "createdAt": "2025-01-01T00:00:00.000Z",
            "updatedAt": "2025-01-02T00:00:00Z",
            "companyLogo": "https://example.com/logo.png"
        }"#;

        let job: Job = serde_json::from_str(json).unwrap();
        assert_eq!(job.id, "1");
        assert_eq!(job.job_type, "Full-time");
        assert_eq!(job.salary, 12.5);
        assert!(job.is_active);
        assert_eq!(job.logo_url(), "https://example.com/logo.png");
        assert!(job.posted_time.is_none());
    }

    #[test]
    fn logo_falls_back_to_placeholder() {
        let json = r#"{
            "id": "2", "title": "Intern", "jobType": "Internship",
            "location": "Onsite", "description": "", "salary": 1,
            "experience": "0", "isActive": true,
            "createdAt": "2025-01-01T00:00:00Z", "updatedAt": "2025-01-01T00:00:00Z",
            "companyLogoUrl": ""
        }"#;

        let job: Job = serde_json::from_str(json).unwrap();
        assert_eq!(job.logo_url(), PLACEHOLDER_LOGO_URL);
    }

    #[test]
    fn new_job_serializes_in_create_shape() {
        let job = NewJob {
            title: "Engineer".into(),
            experience: "3".into(),
            job_type: JobType::Contract,
            location: Location::Hybrid,
            description: "desc".into(),
            salary: 12.0,
            is_active: true,
        };

        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "title": "Engineer",
                "experience": "3",
                "jobType": "Contract",
                "location": "Hybrid",
                "description": "desc",
                "salary": 12.0,
                "isActive": true,
            })
        );
    }
}
