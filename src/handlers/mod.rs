// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) -> Protected (bearer token resolved by `require_auth`)
pub mod protected;
pub mod public;
