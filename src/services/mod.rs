pub mod completion;
pub mod lead_generator;
pub mod openai_client;

pub use completion::*;
pub use lead_generator::*;
pub use openai_client::*;
