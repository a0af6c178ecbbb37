//! Unit tests for the notification module.

mod service_tests;
