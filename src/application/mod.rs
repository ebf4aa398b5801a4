// Application layer - Data access contract, aggregation and view services
pub mod bankers_service;
pub mod clients_service;
pub mod dashboard_repository;
pub mod overview_service;
pub mod series_aggregator;
pub mod view_state;
