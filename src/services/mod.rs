// src/services/mod.rs

pub mod report_service;
pub mod scenario_service;

pub use report_service::ReportService;
pub use scenario_service::ScenarioService;
