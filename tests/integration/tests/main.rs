//! End-to-end login provisioning tests.
//!
//! These tests wire the in-memory directory, the provisioning service and a
//! session with the provisioning listener registered, then bind users the
//! way a back-office login does.

mod common;
mod failures;
mod login_flow;
