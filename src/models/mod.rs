mod motion_model;

pub use motion_model::{ConstantRate, IdentityModel, MeanReverting, MotionModel};
