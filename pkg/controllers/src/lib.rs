//! Translation and admission logic for the operator's autoscaling resources.
//!
//! - [`clusterautoscaler`] turns a ClusterAutoscaler into the command line of
//!   the cluster-autoscaler process and checks it before admission.
//! - [`machineautoscaler`] checks the replica bounds of a MachineAutoscaler.
//!
//! Everything here is a pure function of its inputs.

pub mod clusterautoscaler;
pub mod machineautoscaler;
