// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition, read-only flight catalogue and liveness probes.
pub mod auth;
pub mod flight;
pub mod status;
