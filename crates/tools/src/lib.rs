//! Registry deployment tools
//!
//! Seed validation, in-process simulation and network deployment for the
//! contract registry.

pub mod config;
pub mod deploy;
pub mod logging;
pub mod sandbox;
pub mod seed;

pub use config::{Config, ConfigError, Network};
pub use deploy::{DeployError, DeployPlan};
pub use sandbox::{simulate, SandboxError, SimulationReport};
pub use seed::{Seed, SeedEntry, SeedError};
