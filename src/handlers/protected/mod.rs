// handlers/protected/mod.rs - Protected handlers (bearer token required)
//
// Every handler here receives the caller as `Extension<AuthUser>`; owned
// resources are always read and written through `caller.scope()`.
pub mod auth;
pub mod booking;
pub mod checklist_item;
pub mod flight;
pub mod owned;
pub mod passenger;
