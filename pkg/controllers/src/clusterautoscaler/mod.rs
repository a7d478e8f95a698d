mod args;
mod validator;

pub use args::{
    AutoscalerArg, LeaderElection, autoscaler_args, autoscaler_args_with, resource_args,
    scale_down_args,
};
pub use validator::Validator;
