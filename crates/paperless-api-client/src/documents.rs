//! Document endpoints, including upload and custom fields.

use std::sync::Arc;

use futures::future;
use futures::stream::{BoxStream, StreamExt, TryStreamExt};
use paperless_core::models::{
    CustomField, CustomFieldCreation, Document, DocumentContent, DocumentCreation,
    DocumentCreationResult, DocumentFilter, DocumentMetadata, DocumentUpdate, TypedDocument,
};
use paperless_core::{CustomFieldRegistry, ServerVersion, TypedCustomField};
use reqwest::multipart::{Form, Part};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::import::{await_import, TaskPolling};
use crate::tasks::TaskLookup;
use crate::{paginate, routes, ApiClient, PaperlessError, Result};

const VERSION_HEADER: &str = "x-version";

/// Client for documents and the custom fields attached to them.
///
/// Typed custom field operations resolve field ids through the registry, loading
/// the server's field definitions first when the registry is still empty.
#[derive(Clone)]
pub struct DocumentClient {
    api: ApiClient,
    tasks: Arc<dyn TaskLookup>,
    registry: CustomFieldRegistry,
    polling: TaskPolling,
}

impl DocumentClient {
    pub fn new(
        api: ApiClient,
        tasks: Arc<dyn TaskLookup>,
        registry: CustomFieldRegistry,
        polling: TaskPolling,
    ) -> Self {
        Self {
            api,
            tasks,
            registry,
            polling,
        }
    }

    pub fn registry(&self) -> &CustomFieldRegistry {
        &self.registry
    }

    pub fn list(
        &self,
        page_size: Option<u32>,
        filter: Option<&DocumentFilter>,
        cancel: CancellationToken,
    ) -> BoxStream<'static, Result<Document>> {
        paginate(
            self.api.clone(),
            routes::document_listing(page_size, filter),
            cancel,
        )
    }

    /// Like [`list`](Self::list), with each document's custom fields decoded.
    pub async fn list_typed(
        &self,
        page_size: Option<u32>,
        filter: Option<&DocumentFilter>,
        cancel: CancellationToken,
    ) -> Result<BoxStream<'static, Result<TypedDocument>>> {
        self.ensure_custom_fields(&cancel).await?;

        let registry = self.registry.clone();
        let documents = self
            .list(page_size, filter, cancel)
            .and_then(move |document| {
                let registry = registry.clone();
                async move {
                    let custom_fields = registry
                        .decode(&document.custom_fields)
                        .await
                        .map_err(PaperlessError::from)?;
                    Ok::<_, PaperlessError>(TypedDocument {
                        document,
                        custom_fields,
                    })
                }
            })
            .boxed();

        Ok(documents)
    }

    pub async fn get(&self, id: u32) -> Result<Option<Document>> {
        self.api
            .get_optional(&routes::entity(routes::DOCUMENTS, id))
            .await
    }

    pub async fn get_typed(&self, id: u32) -> Result<Option<TypedDocument>> {
        self.ensure_custom_fields(&CancellationToken::new()).await?;

        let Some(document) = self.get(id).await? else {
            return Ok(None);
        };
        let custom_fields = self.registry.decode(&document.custom_fields).await?;

        Ok(Some(TypedDocument {
            document,
            custom_fields,
        }))
    }

    pub async fn metadata(&self, id: u32) -> Result<Option<DocumentMetadata>> {
        self.api.get_optional(&routes::document_metadata(id)).await
    }

    /// Archived version of the document, or the original when there is no archive.
    pub async fn download(&self, id: u32) -> Result<DocumentContent> {
        self.api.get_bytes(&routes::document_download(id, false)).await
    }

    pub async fn download_original(&self, id: u32) -> Result<DocumentContent> {
        self.api.get_bytes(&routes::document_download(id, true)).await
    }

    pub async fn download_preview(&self, id: u32) -> Result<DocumentContent> {
        self.api.get_bytes(&routes::document_preview(id, false)).await
    }

    pub async fn download_original_preview(&self, id: u32) -> Result<DocumentContent> {
        self.api.get_bytes(&routes::document_preview(id, true)).await
    }

    pub async fn download_thumbnail(&self, id: u32) -> Result<DocumentContent> {
        self.api.get_bytes(&routes::document_thumbnail(id)).await
    }

    /// Upload a document and wait for the server to import it.
    ///
    /// Servers up to 1.9.2 (or ones that do not report their version) do not hand
    /// out an import task, so the result is then [`DocumentCreationResult::ImportStarted`].
    /// Otherwise the import task is polled until it finishes; a failed import is an
    /// `ImportFailed` result, not an error.
    pub async fn create(
        &self,
        creation: DocumentCreation,
        cancel: &CancellationToken,
    ) -> Result<DocumentCreationResult> {
        let file_name = creation.file_name.clone();
        let size = creation.content.len();

        let response = self
            .api
            .post_multipart(routes::POST_DOCUMENT, upload_form(creation))
            .await?;
        info!(file_name = %file_name, size, "Uploaded document");

        let version = response
            .headers()
            .get(VERSION_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;

        let version = match version.as_deref().map(str::parse::<ServerVersion>) {
            Some(Ok(version)) => version,
            Some(Err(_)) | None => {
                warn!(
                    version = ?version,
                    "Server version unknown, cannot follow the import"
                );
                return Ok(DocumentCreationResult::ImportStarted);
            }
        };

        if !version.returns_task_id() {
            info!(version = %version, "Server does not report import tasks");
            return Ok(DocumentCreationResult::ImportStarted);
        }

        let task_id: Uuid = serde_json::from_str(&body).map_err(|_| {
            PaperlessError::UnexpectedResponse(format!("expected an import task id, got {}", body))
        })?;
        debug!(task_id = %task_id, version = %version, "Import task started");

        await_import(task_id, self.tasks.as_ref(), self.polling, cancel).await
    }

    pub async fn update(&self, id: u32, update: &DocumentUpdate) -> Result<Document> {
        let document: Document = self
            .api
            .patch_json(&routes::entity(routes::DOCUMENTS, id), update)
            .await?;
        info!(id, "Updated document");
        Ok(document)
    }

    /// Replace the document's custom field values with `fields`.
    pub async fn update_custom_fields(
        &self,
        id: u32,
        fields: &[TypedCustomField],
    ) -> Result<Document> {
        self.ensure_custom_fields(&CancellationToken::new()).await?;

        let update = DocumentUpdate {
            custom_fields: Some(self.registry.encode(fields).await?),
            ..Default::default()
        };
        self.update(id, &update).await
    }

    pub async fn delete(&self, id: u32) -> Result<()> {
        self.api
            .delete(&routes::entity(routes::DOCUMENTS, id))
            .await?;
        info!(id, "Deleted document");
        Ok(())
    }

    /// Stream all custom field definitions. Every field seen is stored in the registry.
    pub fn custom_fields(
        &self,
        page_size: Option<u32>,
        cancel: CancellationToken,
    ) -> BoxStream<'static, Result<CustomField>> {
        let registry = self.registry.clone();

        paginate(
            self.api.clone(),
            routes::listing(routes::CUSTOM_FIELDS, page_size),
            cancel,
        )
        .and_then(move |field: CustomField| {
            let registry = registry.clone();
            async move {
                registry.insert(field.clone()).await;
                Ok::<_, PaperlessError>(field)
            }
        })
        .boxed()
    }

    pub async fn create_custom_field(&self, creation: &CustomFieldCreation) -> Result<CustomField> {
        let field: CustomField = self.api.post_json(routes::CUSTOM_FIELDS, creation).await?;
        self.registry.insert(field.clone()).await;
        info!(id = field.id, name = %field.name, data_type = %field.data_type, "Created custom field");
        Ok(field)
    }

    async fn ensure_custom_fields(&self, cancel: &CancellationToken) -> Result<()> {
        if self.registry.is_populated().await {
            return Ok(());
        }

        debug!("Loading custom field definitions");
        self.custom_fields(None, cancel.clone())
            .try_for_each(|_| future::ok(()))
            .await
    }
}

fn upload_form(creation: DocumentCreation) -> Form {
    let document = Part::bytes(creation.content.to_vec()).file_name(creation.file_name);
    let mut form = Form::new().part("document", document);

    if let Some(title) = creation.title {
        form = form.text("title", title);
    }
    if let Some(created) = creation.created {
        form = form.text("created", created.to_rfc3339());
    }
    if let Some(id) = creation.correspondent_id {
        form = form.text("correspondent", id.to_string());
    }
    if let Some(id) = creation.document_type_id {
        form = form.text("document_type", id.to_string());
    }
    if let Some(id) = creation.storage_path_id {
        form = form.text("storage_path", id.to_string());
    }
    for id in creation.tag_ids {
        form = form.text("tags", id.to_string());
    }
    if let Some(asn) = creation.archive_serial_number {
        form = form.text("archive_serial_number", asn.to_string());
    }

    form
}
