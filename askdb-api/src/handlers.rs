use crate::config::ApiConfig;
use crate::error::AppError;
use crate::executor::{self, ExecOutcome};
use crate::models::{schema_to_json, QueryRequest, QueryResponse, UploadResponse};
use crate::schema;
use crate::translator;
use crate::uploads::UploadStore;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Result};
use askdb_llm_sdk::client::LlmClient;
use futures_util::{StreamExt, TryStreamExt};
use serde_json::json;
use std::sync::Arc;

pub struct AppState {
    pub config: Arc<ApiConfig>,
    pub llm: Arc<dyn LlmClient>,
    pub uploads: UploadStore,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(crate::pages::landing))
        .route("/query-page", web::get().to(crate::pages::query_page))
        .route("/upload", web::post().to(upload_db))
        .route("/query", web::post().to(query_db));
}

/// `POST /upload`: multipart with the database file in the `database`
/// field. Persists the file and returns its introspected schema.
pub async fn upload_db(
    data: web::Data<AppState>,
    mut payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let mut uploaded: Option<(String, Vec<u8>)> = None;

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| AppError::InvalidRequest(format!("Malformed multipart payload: {e}")))?
    {
        if field.name() != Some("database") {
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string)
            .ok_or_else(|| AppError::InvalidRequest("No file uploaded".to_string()))?;

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk
                .map_err(|e| AppError::InvalidRequest(format!("Failed to read upload: {e}")))?;
            bytes.extend_from_slice(&chunk);
        }
        uploaded = Some((filename, bytes));
    }

    let Some((filename, bytes)) = uploaded else {
        return Err(AppError::InvalidRequest("No file uploaded".to_string()));
    };

    let (db_filename, path) = data.uploads.save(&filename, &bytes)?;
    let schema = schema::introspect(&path)?;

    tracing::info!(
        %db_filename,
        tables = schema.len(),
        size = bytes.len(),
        "database uploaded"
    );

    Ok(HttpResponse::Ok().json(UploadResponse {
        message: format!("Database {db_filename} uploaded successfully!"),
        db_filename,
        schema: schema_to_json(&schema),
    }))
}

/// `POST /query`: translate the question to SQL against the uploaded
/// database's schema, execute it, and return SQL plus results.
pub async fn query_db(
    data: web::Data<AppState>,
    request: web::Json<QueryRequest>,
) -> Result<HttpResponse, AppError> {
    let req = request.into_inner();

    // Validate before touching the database or the translation service
    let (db_filename, question) = match (
        req.db_filename.filter(|s| !s.is_empty()),
        req.question.filter(|s| !s.is_empty()),
    ) {
        (Some(f), Some(q)) => (f, q),
        _ => {
            return Err(AppError::InvalidRequest(
                "db_filename and question are required".to_string(),
            ))
        }
    };

    let path = data.uploads.resolve(&db_filename)?;

    // Schema is re-derived on every request; nothing is cached
    let schema = schema::introspect(&path)?;
    let sql_query = translator::translate(
        data.llm.as_ref(),
        &data.config.llm.model,
        &schema,
        &question,
    )
    .await?;

    let outcome = executor::execute(&path, &sql_query, data.config.executor.read_only)?;
    let (columns, results) = match outcome {
        ExecOutcome::Rows { columns, rows } => (columns, rows),
        // Wire compatibility: execution failures stay HTTP 200, encoded as
        // a single ("Error", message) row
        ExecOutcome::Failed { message } => {
            tracing::warn!(%db_filename, %sql_query, %message, "generated SQL failed");
            (Vec::new(), vec![vec![json!("Error"), json!(message)]])
        }
    };

    tracing::info!(%db_filename, rows = results.len(), "query answered");

    Ok(HttpResponse::Ok().json(QueryResponse {
        sql_query,
        columns,
        results,
    }))
}
