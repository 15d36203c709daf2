pub mod api;

pub use api::{StubCall, StubProfileApi};
