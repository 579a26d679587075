pub mod messages;
pub mod health;
pub mod documents;
pub mod login;
pub mod diagnostics;
pub mod error;

pub use messages::*;
pub use health::*;
pub use documents::*;
pub use login::*;
pub use diagnostics::*;
pub use error::*;
