pub mod gemini;
pub mod replier;

pub use gemini::GeminiReplier;
pub use replier::{RemoteError, Replier};
