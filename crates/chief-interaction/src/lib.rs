//! Outbound side of the assistant: the completion provider abstraction, the
//! Gemini REST client and the dispatch rate limiter.

pub mod completion;
pub mod gemini_api_client;
pub mod rate_limiter;

pub use completion::CompletionProvider;
pub use gemini_api_client::GeminiCompletionClient;
pub use rate_limiter::{MIN_REQUEST_INTERVAL, RateLimiter};
