//! ccanvas Core Library
//!
//! Interactive capture engine for digitizing polylines on a bounded plane:
//! per-line point capture, session routing, spline feedback and JSON
//! persistence.

pub mod capture;
pub mod config;
pub mod input;
pub mod line;
pub mod session;
pub mod spline;
pub mod storage;
pub mod style;
pub mod viewport;

pub use capture::{CaptureOutcome, LineCapture, LineRender};
pub use config::{CanvasConfig, ConfigError, Domain, MAX_LINES, DEFAULT_OUTPUT};
pub use input::{Key, SessionEvent};
pub use line::{Line, LineId};
pub use session::{CanvasSession, Response, SessionState, QUIT_KEY};
pub use spline::{interpolate, sampling_step, SPLINE_RESOLUTION};
pub use storage::{
    load_document, validate_file, FileSchema, FileStorage, LineRecord, LoadError, MemoryStorage,
    PersistedDocument, SchemaError, Storage, StorageError, StorageResult, COORDINATES_SCHEMA,
};
pub use style::{CanvasStyle, LineColor, LinkShape, PointShape};
pub use viewport::Viewport;
