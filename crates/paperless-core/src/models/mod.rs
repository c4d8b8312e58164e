pub mod correspondent;
pub mod custom_field;
pub mod document;
pub mod filter;
pub mod matching;
pub mod pagination;
pub mod tag;
pub mod task;

pub use correspondent::{Correspondent, CorrespondentCreation};
pub use custom_field::{CustomField, CustomFieldCreation, CustomFieldType, CustomFieldValue};
pub use document::{
    Document, DocumentContent, DocumentCreation, DocumentCreationResult, DocumentMetadata,
    DocumentUpdate, MetadataEntry, TypedDocument,
};
pub use filter::DocumentFilter;
pub use matching::MatchingAlgorithm;
pub use pagination::PaginatedList;
pub use tag::{Tag, TagCreation};
pub use task::{PaperlessTask, TaskStatus};
