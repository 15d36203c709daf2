//! Authentication domain
//!
//! The client does not sign users in itself. A session is handed to it by the
//! host (CLI flag, environment or an embedding front end) and published
//! through [`SessionStore`] to whichever pages subscribe.

pub mod session;
pub mod token;

pub use session::{Session, SessionProvider, SessionStore, SessionSubscription};
pub use token::AccessToken;
