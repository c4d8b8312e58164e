//! Paperless CLI, a command-line client for Paperless-ngx.
//!
//! Set PAPERLESS_BASE_URL and either PAPERLESS_TOKEN or PAPERLESS_USERNAME and
//! PAPERLESS_PASSWORD. A `.env` file in the working directory is read as well.

use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, FixedOffset, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use futures::{StreamExt, TryStreamExt};
use paperless_api_client::{CancellationToken, PaperlessClient, TaskLookup};
use paperless_cli::{
    creation_result_json, download_target, init_tracing, truncate_string, typed_document_json,
    write_download,
};
use paperless_core::models::{
    CorrespondentCreation, CustomFieldCreation, CustomFieldType, DocumentCreation, DocumentFilter,
    TagCreation,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "paperless", about = "Paperless-ngx API CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a document and wait for the import to finish
    Upload {
        /// Path to the file to upload
        file: PathBuf,
        #[arg(long)]
        title: Option<String>,
        /// Creation date, RFC 3339 (e.g. 2024-01-19T10:00:00+01:00)
        #[arg(long)]
        created: Option<DateTime<FixedOffset>>,
        /// Correspondent id
        #[arg(long)]
        correspondent: Option<u32>,
        /// Document type id
        #[arg(long)]
        document_type: Option<u32>,
        /// Storage path id
        #[arg(long)]
        storage_path: Option<u32>,
        /// Tag id, may be repeated
        #[arg(long = "tag")]
        tags: Vec<u32>,
        /// Archive serial number
        #[arg(long)]
        asn: Option<u32>,
    },
    /// List documents
    Documents {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        correspondent: Option<u32>,
        /// Only documents carrying all of these tag ids
        #[arg(long = "tag")]
        tags: Vec<u32>,
        /// Created after this date (YYYY-MM-DD)
        #[arg(long)]
        after: Option<NaiveDate>,
        /// Created before this date (YYYY-MM-DD)
        #[arg(long)]
        before: Option<NaiveDate>,
        /// Maximum number of documents to print
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        page_size: Option<u32>,
        /// Print full JSON with decoded custom fields instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Get a single document by id, with decoded custom fields
    Get { id: u32 },
    /// Show the file metadata of a document
    Metadata { id: u32 },
    /// Download a document
    Download {
        id: u32,
        #[arg(long, value_enum, default_value = "archived")]
        kind: DownloadKind,
        /// Output file; defaults to the server's file name
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Delete a document
    Delete { id: u32 },
    /// Look up an import task
    Task { task_id: Uuid },
    /// Tag operations
    Tags {
        #[command(subcommand)]
        sub: EntityCommands,
    },
    /// Correspondent operations
    Correspondents {
        #[command(subcommand)]
        sub: EntityCommands,
    },
    /// Custom field operations
    CustomFields {
        #[command(subcommand)]
        sub: CustomFieldCommands,
    },
}

#[derive(Subcommand)]
enum EntityCommands {
    /// List all entries
    List,
    /// Create a new entry
    Create { name: String },
    /// Delete an entry by id
    Delete { id: u32 },
}

#[derive(Subcommand)]
enum CustomFieldCommands {
    /// List all custom fields
    List,
    /// Create a custom field
    Create {
        name: String,
        /// Data type: string, url, date, boolean, integer, float, monetary, documentlink, select
        #[arg(long = "type")]
        data_type: CustomFieldType,
        /// Select option, may be repeated (select fields only)
        #[arg(long = "option")]
        options: Vec<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DownloadKind {
    Archived,
    Original,
    Preview,
    OriginalPreview,
    Thumbnail,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

/// Cancel outstanding work on Ctrl-C.
fn cancel_on_ctrl_c() -> CancellationToken {
    let cancel = CancellationToken::new();
    let token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted, stopping");
            token.cancel();
        }
    });
    cancel
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let client = PaperlessClient::from_env().context(
        "Failed to create Paperless client. Set PAPERLESS_BASE_URL and PAPERLESS_TOKEN \
         (or PAPERLESS_USERNAME and PAPERLESS_PASSWORD)",
    )?;
    let cancel = cancel_on_ctrl_c();

    match cli.command {
        Commands::Upload {
            file,
            title,
            created,
            correspondent,
            document_type,
            storage_path,
            tags,
            asn,
        } => {
            let content = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read file: {}", file.display()))?;
            let file_name = file
                .file_name()
                .and_then(|name| name.to_str())
                .context("File path has no usable file name")?
                .to_string();

            let creation = DocumentCreation {
                title,
                created,
                correspondent_id: correspondent,
                document_type_id: document_type,
                storage_path_id: storage_path,
                tag_ids: tags,
                archive_serial_number: asn,
                ..DocumentCreation::new(content, file_name)
            };

            let result = client.documents().create(creation, &cancel).await?;
            print_json(&creation_result_json(&result))?;
        }
        Commands::Documents {
            title,
            content,
            correspondent,
            tags,
            after,
            before,
            limit,
            page_size,
            json,
        } => {
            let filter = DocumentFilter {
                title_contains: title,
                content_contains: content,
                correspondent_id: correspondent,
                tags_all: tags,
                created_after: after,
                created_before: before,
                ..Default::default()
            };
            let limit = limit.unwrap_or(usize::MAX);

            if json {
                let documents: Vec<_> = client
                    .documents()
                    .list_typed(page_size, Some(&filter), cancel)
                    .await?
                    .take(limit)
                    .try_collect()
                    .await?;
                let rendered = documents
                    .iter()
                    .map(typed_document_json)
                    .collect::<Result<Vec<_>, _>>()?;
                print_json(&rendered)?;
            } else {
                let mut documents = client
                    .documents()
                    .list(page_size, Some(&filter), cancel)
                    .take(limit);
                while let Some(document) = documents.try_next().await? {
                    println!(
                        "{:>6}  {}  {}",
                        document.id,
                        document.created.format("%Y-%m-%d"),
                        truncate_string(&document.title, 60)
                    );
                }
            }
        }
        Commands::Get { id } => match client.documents().get_typed(id).await? {
            Some(typed) => print_json(&typed_document_json(&typed)?)?,
            None => anyhow::bail!("Document {} not found", id),
        },
        Commands::Metadata { id } => match client.documents().metadata(id).await? {
            Some(metadata) => print_json(&metadata)?,
            None => anyhow::bail!("Document {} not found", id),
        },
        Commands::Download { id, kind, output } => {
            let documents = client.documents();
            let content = match kind {
                DownloadKind::Archived => documents.download(id).await?,
                DownloadKind::Original => documents.download_original(id).await?,
                DownloadKind::Preview => documents.download_preview(id).await?,
                DownloadKind::OriginalPreview => documents.download_original_preview(id).await?,
                DownloadKind::Thumbnail => documents.download_thumbnail(id).await?,
            };

            let target = download_target(output, &content, id);
            let written = write_download(&target, &content)
                .await
                .with_context(|| format!("Failed to write {}", target.display()))?;
            print_json(&serde_json::json!({
                "path": target.display().to_string(),
                "bytes": written,
                "content_type": content.content_type,
            }))?;
        }
        Commands::Delete { id } => {
            client.documents().delete(id).await?;
            print_json(
                &serde_json::json!({ "success": true, "message": format!("Document {} deleted", id) }),
            )?;
        }
        Commands::Task { task_id } => match client.tasks().get_task(task_id).await? {
            Some(task) => print_json(&task)?,
            None => anyhow::bail!("Task {} not found", task_id),
        },
        Commands::Tags { sub } => match sub {
            EntityCommands::List => {
                let tags: Vec<_> = client.tags().list(None, cancel).try_collect().await?;
                print_json(&tags)?;
            }
            EntityCommands::Create { name } => {
                let tag = client.tags().create(&TagCreation::new(name)).await?;
                print_json(&tag)?;
            }
            EntityCommands::Delete { id } => {
                client.tags().delete(id).await?;
                print_json(&serde_json::json!({ "success": true, "message": format!("Tag {} deleted", id) }))?;
            }
        },
        Commands::Correspondents { sub } => match sub {
            EntityCommands::List => {
                let correspondents: Vec<_> = client
                    .correspondents()
                    .list(None, cancel)
                    .try_collect()
                    .await?;
                print_json(&correspondents)?;
            }
            EntityCommands::Create { name } => {
                let correspondent = client
                    .correspondents()
                    .create(&CorrespondentCreation::new(name))
                    .await?;
                print_json(&correspondent)?;
            }
            EntityCommands::Delete { id } => {
                client.correspondents().delete(id).await?;
                print_json(&serde_json::json!({
                    "success": true,
                    "message": format!("Correspondent {} deleted", id)
                }))?;
            }
        },
        Commands::CustomFields { sub } => match sub {
            CustomFieldCommands::List => {
                let fields: Vec<_> = client
                    .documents()
                    .custom_fields(None, cancel)
                    .try_collect()
                    .await?;
                print_json(&fields)?;
            }
            CustomFieldCommands::Create {
                name,
                data_type,
                options,
            } => {
                let creation = if data_type == CustomFieldType::Select {
                    CustomFieldCreation::select(name, options)
                } else {
                    CustomFieldCreation::new(name, data_type)
                };
                let field = client.documents().create_custom_field(&creation).await?;
                print_json(&field)?;
            }
        },
    }

    Ok(())
}
