//! Profile page domain
//!
//! The signed-in user's own profile: view it, edit it, save it. The page is
//! bound to the session and reloads whenever the session changes.

pub mod messages;
pub mod runtime;
pub mod state;
pub mod update;

pub use messages::{ProfileCommand, ProfileMessage};
pub use runtime::{ProfilePageHandle, ProfilePageRuntime};
pub use state::{Notice, NoticeKind, ProfilePageState, ProfileSnapshot};
pub use update::{ProfilePage, SAVE_SUCCESS_MESSAGE};
