pub mod stubs;

pub use stubs::{ScriptedDriver, SpyHandle, SpyModel, VecStream};
