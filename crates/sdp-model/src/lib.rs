//! Data model of the master controller's slave table.
//!
//! A slave is a process started and watched by the master controller.
//! Its static description ([`SlaveSpec`]) comes from the slave map, its runtime
//! fields ([`SlaveRuntime`]) appear only after a successful start.

mod domain;
pub use domain::*;

mod kind;
pub use kind::SlaveKind;

mod spec;
pub use spec::{SlaveMap, SlaveSpec};

mod error;
pub use error::ModelError;
