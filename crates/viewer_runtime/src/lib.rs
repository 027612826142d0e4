pub mod components;
pub mod effects;
pub mod model;
pub mod reducer;

pub use components::{ViewerProvider, ViewerShell};
pub use effects::{ViewerRuntimeContext, ViewerServices};
pub use model::*;
pub use reducer::{
    reduce_viewer, ViewerAction, ViewerEffect, IMAGE_DECODE_MESSAGE, INVALID_DROP_MESSAGE,
    INVALID_PICK_MESSAGE, STORAGE_LOAD_MESSAGE,
};
