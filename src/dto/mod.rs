//! DTOs de la API

pub mod auth_dto;
pub mod common;
pub mod dashboard_dto;
pub mod document_dto;
pub mod equipment_dto;
pub mod fill_up_dto;
pub mod maintenance_dto;
pub mod vehicle_dto;
