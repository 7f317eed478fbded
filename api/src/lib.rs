// Library exports for testing and the server binary

pub mod app;
pub mod cookies;
pub mod dto;
pub mod handlers;
pub mod health;
pub mod middleware;
pub mod routes;
pub mod telemetry;
