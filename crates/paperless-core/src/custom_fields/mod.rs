//! Custom field definitions cache and typed value codec.

mod registry;
mod value;

pub use registry::CustomFieldRegistry;
pub use value::{CustomFieldData, SelectOption, TypedCustomField};
