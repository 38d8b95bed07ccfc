//! Level scripts
//!
//! A level is a text file of obstacle records keyed by world distance.
//! `script` parses it, `scheduler` feeds records into a run as the world
//! scrolls, and `preview` lays a whole script out for inspection.

pub mod preview;
pub mod scheduler;
pub mod script;

pub use preview::{LevelPreview, PreviewItem};
pub use scheduler::Scheduler;
pub use script::{LevelRecord, LevelScript, LineIssue, ScriptDiagnostic};
