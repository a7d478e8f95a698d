//! Centralized constants for the cluster-autoscaler operator.
//!
//! All operator-wide constant values live here.
//! Change a value in one place and it applies everywhere.

pub mod autoscaler;
pub mod env;
pub mod paths;
