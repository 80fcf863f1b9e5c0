pub mod db;
pub mod domain;
pub mod forms;
pub mod gateway;
pub mod models;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;
pub mod tracker;

/// Product tracker shared by the HTTP handlers.
pub type AppTracker = tracker::ProductTracker<repository::DieselRepository>;
