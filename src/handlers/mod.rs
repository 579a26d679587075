pub mod health;
pub mod documents;
pub mod login;
pub mod diagnostics;

pub use health::*;
pub use documents::*;
pub use login::*;
pub use diagnostics::*;
