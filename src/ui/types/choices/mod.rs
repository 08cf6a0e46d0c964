mod model_choice;
mod schema;
mod stream_choice;
mod task_choice;
mod ui_choice;

pub use model_choice::*;
pub use schema::*;
pub use stream_choice::*;
pub use task_choice::*;
pub use ui_choice::UIChoice;
