//! Recording and replaying of completion exchanges.
//!
//! A cassette is a YAML file holding the ordered prompt/response exchanges of
//! one generation run. Recording a run (`hdlgen run --record`) captures every
//! successful completion; replaying it (`--replay`) re-runs the pipeline
//! deterministically without touching the network.

pub mod format;
pub mod recorder;
pub mod replayer;

pub use format::{Cassette, Exchange};
pub use recorder::CassetteRecorder;
pub use replayer::CassetteReplayer;
