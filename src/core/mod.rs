pub mod analysis;
pub mod captions;
pub mod openai;
pub mod resolver;
pub mod summarizer;
pub mod transcript;
pub mod video_id;
pub mod youtube;

pub use analysis::*;
pub use openai::*;
pub use resolver::*;
pub use summarizer::*;
pub use video_id::*;
pub use youtube::*;
