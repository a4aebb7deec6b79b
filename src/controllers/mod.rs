//! Controllers de la API

pub mod auth_controller;
pub mod dashboard_controller;
pub mod document_controller;
pub mod equipment_controller;
pub mod fill_up_controller;
pub mod maintenance_controller;
pub mod vehicle_controller;
