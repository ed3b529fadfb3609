pub mod aweber_client;
pub mod configuration;
pub mod domain;
pub mod reconciler;
pub mod routes;
pub mod startup;
pub mod telemetry;
