//! Shared fact-checking core.
//!
//! Builds chat-completion requests, interprets model replies into a score and
//! an analysis, and maps scores to rating buckets.

pub mod checker;
pub mod config;
pub mod error;
pub mod interpret;
pub mod markdown;
pub mod model;
pub mod prompt;
pub mod rating;
pub mod request;
pub mod selection;
pub mod session;
pub mod transport;

pub use checker::{CheckOutcome, FactChecker};
pub use config::{ApiToken, ConfigSource, FactCheckConfig};
pub use error::{CheckError, ConfigError, MalformedReply, TransportError};
pub use interpret::{interpret, CheckResult, ExtractionMode, Interpreter, ScorePolicy};
pub use model::ModelId;
pub use prompt::{PromptVariant, ScreenProfile};
pub use rating::{rate, Rating, RatingBucket};
pub use request::{build, ChatMessage, ChatRequest, RequestSpec};
pub use selection::{select_target, Selection};
pub use session::{CheckController, CheckSession, StaleReplyPolicy, Ticket};
pub use transport::{ChatTransport, FakeTransport, HttpTransport};
