pub mod config;
pub mod error;
pub mod id;
pub mod model;
pub mod pointer;
pub mod style;

pub use config::CanvasConfig;
pub use error::CanvasError;
pub use id::{NodeId, ToolId};
pub use model::*;
pub use pointer::{ClickEvent, ElementBox, MouseButton, parse_px};
pub use style::NodeStyle;
