pub mod scripted_driver;
pub mod spy_model;
pub mod vec_stream;

pub use scripted_driver::ScriptedDriver;
pub use spy_model::{SpyHandle, SpyModel};
pub use vec_stream::VecStream;
