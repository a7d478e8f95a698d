pub mod clusterautoscaler;
pub mod config;
pub mod machineautoscaler;
pub mod manifest;
pub mod meta;
pub mod validate;
