//! Routers de la API

pub mod auth_routes;
pub mod dashboard_routes;
pub mod document_routes;
pub mod equipment_routes;
pub mod fill_up_routes;
pub mod maintenance_routes;
pub mod vehicle_routes;
