use actix_web::web;
use askdb_api::config::{ApiConfig, ExecutorConfig, LlmConfig, ServerConfig, UploadsConfig};
use askdb_api::handlers::AppState;
use askdb_api::uploads::UploadStore;
use askdb_llm_sdk::client::LlmClient;
use askdb_llm_sdk::error::LlmError;
use askdb_llm_sdk::types::{CompletionRequest, CompletionResponse, ContentBlock, Role, Usage};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Scripted LLM client: returns queued responses in order, records calls.
pub struct MockLlmClient {
    responses: Mutex<Vec<Result<String, LlmError>>>,
    call_count: Mutex<usize>,
}

impl MockLlmClient {
    pub fn new() -> Arc<Self> {
        Arc::new(MockLlmClient {
            responses: Mutex::new(Vec::new()),
            call_count: Mutex::new(0),
        })
    }

    pub fn push_sql(&self, sql: &str) {
        self.responses.lock().unwrap().push(Ok(sql.to_string()));
    }

    pub fn push_error(&self, error: LlmError) {
        self.responses.lock().unwrap().push(Err(error));
    }

    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        *self.call_count.lock().unwrap() += 1;

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(LlmError::internal("MockLlmClient has no scripted response"));
        }
        responses.remove(0).map(|text| CompletionResponse {
            content: vec![ContentBlock::Text { text }],
            role: Role::Assistant,
            usage: Usage {
                input_tokens: 10,
                output_tokens: 20,
            },
            stop_reason: Some("stop".to_string()),
        })
    }

    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// App state backed by a temp upload dir and the mock client.
pub fn test_state(
    llm: Arc<MockLlmClient>,
    read_only: bool,
) -> (tempfile::TempDir, web::Data<AppState>) {
    let dir = tempfile::tempdir().unwrap();
    let uploads = UploadStore::new(dir.path().join("uploads")).unwrap();

    let config = ApiConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        uploads: UploadsConfig {
            dir: uploads.root().to_path_buf(),
        },
        executor: ExecutorConfig { read_only },
        llm: LlmConfig {
            model: "mock-model".to_string(),
            api_key: None,
        },
    };

    let state = web::Data::new(AppState {
        config: Arc::new(config),
        llm,
        uploads,
    });

    (dir, state)
}

/// The sample company database: departments, employees, salaries.
pub fn build_company_db(path: &Path) {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(
        "CREATE TABLE departments (
            dept_id INTEGER PRIMARY KEY,
            dept_name TEXT
        );
        CREATE TABLE employees (
            emp_id INTEGER PRIMARY KEY,
            name TEXT,
            position TEXT,
            dept_id INTEGER,
            FOREIGN KEY(dept_id) REFERENCES departments(dept_id)
        );
        CREATE TABLE salaries (
            emp_id INTEGER,
            amount INTEGER,
            FOREIGN KEY(emp_id) REFERENCES employees(emp_id)
        );
        INSERT INTO departments VALUES
            (1, 'HR'), (2, 'Finance'), (3, 'Engineering'), (4, 'Sales');
        INSERT INTO employees VALUES
            (1, 'Alice', 'Manager', 1),
            (2, 'Bob', 'Clerk', 1),
            (3, 'Charlie', 'Analyst', 2),
            (4, 'David', 'Clerk', 2),
            (5, 'Eva', 'Engineer', 3),
            (6, 'Frank', 'Engineer', 3),
            (7, 'Grace', 'Technician', 3),
            (8, 'Hank', 'Salesperson', 4),
            (9, 'Ivy', 'Salesperson', 4),
            (10, 'Jack', 'Manager', 4);
        INSERT INTO salaries VALUES
            (1, 80000), (2, 35000), (3, 60000), (4, 30000), (5, 90000),
            (6, 85000), (7, 40000), (8, 45000), (9, 47000), (10, 95000);",
    )
    .unwrap();
}

/// Write the company database straight into the upload store.
pub fn seed_company_upload(state: &web::Data<AppState>, name: &str) -> PathBuf {
    let path = state.uploads.root().join(name);
    build_company_db(&path);
    path
}

/// Build a multipart/form-data body with one file field.
pub fn multipart_file(field: &str, filename: &str, bytes: &[u8]) -> (String, Vec<u8>) {
    let boundary = "----askdb-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    (
        format!("multipart/form-data; boundary={boundary}"),
        body,
    )
}
