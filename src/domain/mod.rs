//! Domain layer: the client record and the pure rules that apply to it.

mod client;
mod error;
pub mod resequence;

pub use client::{Client, ClientId, ClientStatus, Priority};
pub use error::{ClientError, ClientResult};
pub use resequence::{PriorityAssignment, is_contiguous, resequence};
