pub mod attempt;
pub mod job_log;
pub mod question;
pub mod quiz;
pub mod system_metric;
pub mod user;
pub mod user_preference;
