//! Request extractors.

mod app_json;
mod validated_form;

pub use app_json::AppJson;
pub use validated_form::ValidatedForm;
