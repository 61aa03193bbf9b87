//! Wire types shared between the ask widget and its host.
//!
//! Everything here is plain data: the question schema the host submits, the
//! canonical [`ask::Selection`] each answered question produces, and the
//! structured payload returned alongside the transcript.

pub mod ask;

pub use ask::AskArgs;
pub use ask::AskArgsError;
pub use ask::AskDetails;
pub use ask::OTHER_LABEL;
pub use ask::Question;
pub use ask::QuestionOption;
pub use ask::QuestionResult;
pub use ask::Selection;
pub use ask::ToolOutput;
