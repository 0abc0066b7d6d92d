//! Custom request extractors.

mod template_upload;
mod validated_json;

pub use template_upload::RawTemplate;
pub use validated_json::ValidatedJson;
