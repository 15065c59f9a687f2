#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod history;
pub mod input;
pub mod loader;
pub mod session;
pub mod style;
pub mod surface;
pub mod tools;

pub use app::EditorApp;
pub use editor::Editor;
pub use error::{EditorError, EditorResult};
pub use geometry::{FitMode, GeometryState};
pub use history::HistoryStack;
pub use input::{InputEvent, InputHandler};
pub use loader::ImageLoader;
pub use session::{PointerPhase, ToolSession};
pub use style::ShapeStyle;
pub use surface::RasterSurface;
pub use tools::{CropTool, PipetteTool, PrimitiveKind, PrimitiveTool, Tool, ToolKind, ToolOutcome};
