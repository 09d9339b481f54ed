pub mod export;
pub mod lead;
pub mod session;

pub use export::*;
pub use lead::*;
pub use session::*;
