pub mod config_dto;
pub mod schedule_dto;
