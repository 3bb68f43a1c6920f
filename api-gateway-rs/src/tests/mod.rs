//! Router-level tests for the gateway

pub mod support;
pub mod vendor_route_tests;
