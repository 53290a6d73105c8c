//! Canvas state container, tools, and subscriptions for the notes canvas.

pub mod canvas;
pub mod observers;
pub mod store;
pub mod surface;
pub mod tools;

pub use canvas::Canvas;
pub use observers::{Listener, ObserverList, Subscription};
pub use store::ActiveToolStore;
pub use surface::{MemorySurface, NullSurface, Surface};
pub use tools::{FnTool, StampTool, Tool, ToolContext, default_tools};
