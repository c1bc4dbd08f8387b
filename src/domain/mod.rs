// Domain layer - Widget records, snapshots and the grid layout projection
pub mod chart_data;
pub mod dashboard;
pub mod error;
pub mod layout;
pub mod widget;
