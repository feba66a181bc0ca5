pub mod auth;
pub mod file;
pub mod health;
pub mod league;
pub mod matches;
pub mod shared;
pub mod url_submission;
