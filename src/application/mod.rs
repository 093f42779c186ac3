//! Application layer.
//!
//! - **Validation**: raw caller input to domain values
//! - **Queries**: listing and fetching clients
//! - **Workflows**: the update workflow with priority re-sequencing
//!
//! Every operation takes the store as `&dyn ClientRepository` and issues its
//! calls one after another.

mod error;
mod queries;
mod validation;
mod workflows;

pub use error::ServiceError;
pub use queries::{get_client, list_clients};
pub use validation::{
    either_to_result, parse_client_id, parse_status_change, parse_status_filter,
    validate_client_id, validate_priority,
};
pub use workflows::{UpdateClientCommand, update_client};
