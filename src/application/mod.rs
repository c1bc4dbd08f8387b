// Application layer - Use cases and the ports they depend on
pub mod chart_source;
pub mod dashboard_controller;
pub mod dashboard_repository;
pub mod editor;
pub mod snapshot_service;
pub mod snapshot_storage;
pub mod store;
