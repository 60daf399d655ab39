pub mod job_dto;
pub mod preference_dto;
pub mod quiz_dto;
