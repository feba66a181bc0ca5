pub mod file_info;
pub mod league;
pub mod match_record;
pub mod url_submission;
pub mod user;
