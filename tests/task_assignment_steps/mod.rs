//! Step definitions for task assignment scenarios.

pub mod world;

mod given;
mod then;
mod when;
