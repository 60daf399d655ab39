pub mod attempt_service;
pub mod email_templates;
pub mod grading_service;
pub mod job_log_service;
pub mod mail_transport;
pub mod metrics_service;
pub mod notification_service;
pub mod preference_service;
pub mod quiz_service;
