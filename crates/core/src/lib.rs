//! PetCare Core - domain model
//!
//! Contains:
//! - Pet: animals and their kind-specific attributes
//! - CareTask: recurring care with overdue detection
//! - HealthRecord: dated wellness notes
//! - PetRegistry: the in-memory list the app works on
//! - PetCareConfig: YAML + environment configuration

mod care;
mod config;
mod error;
mod health;
mod pet;
mod registry;

pub use care::*;
pub use config::*;
pub use error::*;
pub use health::*;
pub use pet::*;
pub use registry::*;
