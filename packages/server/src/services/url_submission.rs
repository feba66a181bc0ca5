use std::sync::Arc;

use super::{LeagueService, MatchService};
use crate::error::AppError;
use crate::models::url_submission::UrlSubmissionDeleted;
use crate::repository::{
    NewUrlSubmission, UrlSubmissionPatch, UrlSubmissionRepository, UrlSubmissionView,
};
use crate::utils::filename::is_allowed_image;

pub struct UrlSubmissionService {
    repo: Arc<dyn UrlSubmissionRepository>,
    leagues: Arc<LeagueService>,
    matches: Arc<MatchService>,
}

fn check_image_name(image_file_name: Option<&str>) -> Result<(), AppError> {
    match image_file_name {
        Some(name) if !is_allowed_image(name) => Err(AppError::Validation(
            "Invalid file type. Only .png, .jpg, and .jpeg files are allowed.".into(),
        )),
        _ => Ok(()),
    }
}

impl UrlSubmissionService {
    pub fn new(
        repo: Arc<dyn UrlSubmissionRepository>,
        leagues: Arc<LeagueService>,
        matches: Arc<MatchService>,
    ) -> Self {
        Self {
            repo,
            leagues,
            matches,
        }
    }

    async fn require(&self, submission_id: &str) -> Result<UrlSubmissionView, AppError> {
        self.repo.get(submission_id).await?.ok_or_else(|| {
            AppError::NotFound(format!("URL submission '{submission_id}' not found"))
        })
    }

    async fn check_references(
        &self,
        league_id: Option<&str>,
        match_id: Option<i64>,
    ) -> Result<(), AppError> {
        if let Some(league_id) = league_id {
            self.leagues.get(league_id).await?;
        }
        if let Some(match_id) = match_id {
            self.matches.get(match_id).await?;
        }
        Ok(())
    }

    async fn check_unique(&self, url: &str, match_id: Option<i64>) -> Result<(), AppError> {
        if let Some(match_id) = match_id
            && self.repo.check_url_exists_in_match(url, match_id).await?
        {
            return Err(AppError::AlreadyExists(
                "URL already exists for this match".into(),
            ));
        }
        Ok(())
    }

    pub async fn add(&self, new: NewUrlSubmission) -> Result<UrlSubmissionView, AppError> {
        check_image_name(new.image_file_name.as_deref())?;
        self.check_references(new.league_id.as_deref(), new.match_id)
            .await?;
        self.check_unique(&new.url, new.match_id).await?;

        let submission_id = self.repo.add(new).await?;
        self.require(&submission_id).await
    }

    pub async fn list(&self) -> Result<Vec<UrlSubmissionView>, AppError> {
        Ok(self.repo.list().await?)
    }

    pub async fn get(&self, submission_id: &str) -> Result<UrlSubmissionView, AppError> {
        self.require(submission_id).await
    }

    /// Apply a sparse patch. An empty patch returns the current record untouched.
    pub async fn update(
        &self,
        submission_id: &str,
        patch: UrlSubmissionPatch,
    ) -> Result<UrlSubmissionView, AppError> {
        let current = self.require(submission_id).await?;
        if patch.is_empty() {
            return Ok(current);
        }

        check_image_name(patch.image_file_name.as_deref())?;
        self.check_references(patch.league_id.as_deref(), patch.match_id)
            .await?;

        let url = patch.url.as_deref().unwrap_or(&current.url);
        let match_id = patch.match_id.or(current.match_id);
        if url != current.url || match_id != current.match_id {
            self.check_unique(url, match_id).await?;
        }

        if self.repo.update(submission_id, patch).await? == 0 {
            return Err(AppError::NotFound(format!(
                "URL submission '{submission_id}' not found"
            )));
        }
        self.require(submission_id).await
    }

    pub async fn delete(&self, submission_id: &str) -> Result<UrlSubmissionDeleted, AppError> {
        self.require(submission_id).await?;
        if self.repo.delete(submission_id).await? == 0 {
            return Err(AppError::NotFound(format!(
                "URL submission '{submission_id}' not found"
            )));
        }
        tracing::info!(submission_id, "URL submission deleted");
        Ok(UrlSubmissionDeleted {
            message: format!("URL submission '{submission_id}' deleted successfully"),
            submission_id: submission_id.to_string(),
        })
    }
}
