// Application layer: configuration, the session driven by a presentation
// layer, and the printable summary. Everything here is synchronous and owns
// its state explicitly.

pub mod config;
pub mod error;
pub mod session;
pub mod summary;

pub use config::*;
pub use error::*;
pub use session::*;
pub use summary::*;
