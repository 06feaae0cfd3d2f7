//! Questionnaire domain - catalog, session state, answers and judging.
//!
//! # Key Types
//!
//! - `QuestionCatalog` - Ordered, immutable list of `QuestionRecord`s
//! - `SessionState` - One conversation's position and accepted answers
//! - `AnswerSet` - Persistence key to answer text
//! - `JudgeVerdict` - Binary judgment on a candidate answer
//! - `replies` - Texts shown to the user

pub mod answers;
pub mod catalog;
pub mod judging;
pub mod replies;
pub mod session;

pub use answers::AnswerSet;
pub use catalog::{QuestionCatalog, QuestionRecord, TYPE_SUFFIX};
pub use judging::{judge_request, JudgeVerdict, JUDGE_SYSTEM_PROMPT};
pub use session::{ExchangeTurn, QuestionnaireStatus, SessionState, TurnRole};
