//! One capture-to-result run as an explicit state machine.
//!
//! ```text
//! Idle --capture/pick--> Capturing --ok--> Reviewing --use_photo--> Classifying
//!   ^                        |  \--cancelled--> Idle        |            |
//!   |                        v                 discard      v            v
//!   +----acknowledge---- Failed <----------------------- Failed   ShowingResult
//! ```
//!
//! Every failure lands in `Failed` carrying exactly one `Alert`; nothing is
//! retried and nothing is written to history unless classification and the
//! history append both succeed.

mod alert;
mod clock;
mod scan;
mod state;

pub use alert::Alert;
pub use clock::{Clock, FixedClock, IdGenerator, SystemClock};
pub use scan::ScanSession;
pub use state::ScanState;
