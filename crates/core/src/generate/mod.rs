pub mod normalize;
pub mod prompt;
pub mod types;

pub use normalize::{normalize, CODE_PLACEHOLDER};
pub use prompt::build_prompt;
pub use types::{EditorMode, GenerationRequest, NormalizedResult, ResultShape};
