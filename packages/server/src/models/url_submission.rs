use serde::{Deserialize, Serialize};

use super::shared::{non_blank, require_text, require_text_if_present};
use crate::error::AppError;
use crate::repository::{NewUrlSubmission, UrlSubmissionPatch};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct UrlSubmissionRequest {
    #[schema(example = "https://example.com/highlights/1001")]
    pub url: String,
    #[serde(rename = "type", default)]
    #[schema(example = "video")]
    pub submission_type: Option<String>,
    #[serde(default)]
    pub league_id: Option<String>,
    #[serde(default)]
    pub match_id: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
    /// Must end in `.png`, `.jpg` or `.jpeg` when present.
    #[serde(default)]
    #[schema(example = "goal.png")]
    pub image_file_name: Option<String>,
}

impl UrlSubmissionRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        require_text(&self.url, "url")
    }
}

impl From<UrlSubmissionRequest> for NewUrlSubmission {
    fn from(req: UrlSubmissionRequest) -> Self {
        Self {
            url: req.url.trim().to_string(),
            submission_type: non_blank(req.submission_type),
            league_id: non_blank(req.league_id),
            match_id: req.match_id,
            status: non_blank(req.status),
            image_file_name: non_blank(req.image_file_name),
        }
    }
}

/// Sparse update: absent or null fields are left untouched.
#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct UrlSubmissionUpdateRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "type", default)]
    pub submission_type: Option<String>,
    #[serde(default)]
    pub league_id: Option<String>,
    #[serde(default)]
    pub match_id: Option<i64>,
    #[serde(default)]
    #[schema(example = "approved")]
    pub status: Option<String>,
    #[serde(default)]
    pub image_file_name: Option<String>,
}

impl UrlSubmissionUpdateRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        require_text_if_present(self.url.as_deref(), "url")
    }
}

impl From<UrlSubmissionUpdateRequest> for UrlSubmissionPatch {
    fn from(req: UrlSubmissionUpdateRequest) -> Self {
        Self {
            url: req.url.map(|u| u.trim().to_string()),
            submission_type: non_blank(req.submission_type),
            league_id: non_blank(req.league_id),
            match_id: req.match_id,
            status: non_blank(req.status),
            image_file_name: non_blank(req.image_file_name),
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UrlSubmissionDeleted {
    pub message: String,
    pub submission_id: String,
}
