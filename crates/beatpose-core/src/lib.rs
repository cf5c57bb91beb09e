pub mod animator;
pub mod clock;
pub mod color;
pub mod constants;
pub mod error;
pub mod layout;
pub mod motion;
pub mod params;
pub mod runtime;
pub mod scheduler;
pub mod spectrum;

pub use animator::*;
pub use clock::*;
pub use color::*;
pub use constants::*;
pub use error::{CoreError, Result};
pub use layout::*;
pub use motion::*;
pub use params::*;
pub use runtime::*;
pub use scheduler::*;
pub use spectrum::*;
