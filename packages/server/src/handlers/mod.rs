pub mod auth;
pub mod health;
pub mod league;
pub mod matches;
pub mod upload;
pub mod url_submission;
