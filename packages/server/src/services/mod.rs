//! Business operations over the repositories.
//!
//! Every service turns "row absent" into [`AppError::NotFound`] in exactly one
//! `require` helper. Existence and uniqueness checks run before the write and
//! are not atomic with it: two concurrent adds of the same match id or the
//! same `(url, match_id)` pair can both pass the check.
//!
//! [`AppError::NotFound`]: crate::error::AppError::NotFound

pub mod auth;
pub mod league;
pub mod matches;
pub mod upload;
pub mod url_submission;

pub use auth::AuthService;
pub use league::LeagueService;
pub use matches::MatchService;
pub use upload::FileUploadService;
pub use url_submission::UrlSubmissionService;
