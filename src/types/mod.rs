//! Shared response types.

mod response;

pub use response::{Created, FileResponse, MessageResponse, NoContent};
