// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::State as AxumState,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::{Parser, Subcommand};
use roster_api::{InvocationContext, UploadError, UploadResponse, handle_csv_upload};
use roster_persistence::{Persistence, PersistenceError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Header carrying the transport-assigned request id.
const REQUEST_ID_HEADER: &str = "x-request-id";

/// Roster Server - CSV employee import with chain-of-command maintenance
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "ROSTER_DATABASE", global = true)]
    database: Option<PathBuf>,

    /// `MySQL`/`MariaDB` connection URL. Takes precedence over `--database`.
    #[cfg(feature = "mysql")]
    #[arg(long, env = "ROSTER_MYSQL_URL", global = true)]
    mysql_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the upload endpoint over HTTP
    Serve {
        /// Port to bind the server to
        #[arg(short, long, env = "ROSTER_PORT", default_value_t = 3000)]
        port: u16,

        /// Address to bind the server to
        #[arg(short, long, env = "ROSTER_BIND", default_value = "127.0.0.1")]
        bind: String,
    },
    /// Import one CSV file and print the result as JSON
    Import {
        /// The CSV file to import
        file: PathBuf,
    },
}

/// Application state shared across handlers.
///
/// The store holds a single connection, so uploads are serialized through
/// the mutex.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error message.
    error: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    status: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<UploadError<PersistenceError>> for HttpError {
    fn from(err: UploadError<PersistenceError>) -> Self {
        error!(error = %err, "Upload aborted by store failure");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

/// Opens the store selected by the command-line arguments.
fn open_store(args: &Args) -> Result<Persistence, PersistenceError> {
    #[cfg(feature = "mysql")]
    if let Some(url) = &args.mysql_url {
        info!("Using MySQL database");
        return Persistence::new_with_mysql(url);
    }

    if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path.display());
        Persistence::new_with_file(db_path)
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()
    }
}

/// Handler for POST `/csv_upload`.
///
/// The request body is the CSV text. The response status is the upload's
/// status code and the response body is the import summary.
async fn handle_csv_upload_request(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<Response, HttpError> {
    let context: InvocationContext = InvocationContext {
        request_id: headers
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
    };

    info!(
        request_id = context.request_id_or_default(),
        bytes = body.len(),
        "Handling csv_upload request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: UploadResponse = handle_csv_upload(&mut *persistence, &body, &context)?;
    drop(persistence);

    let status: StatusCode =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    Ok((status, Json(response.body)).into_response())
}

/// Handler for GET `/health`.
#[allow(clippy::unused_async)]
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/csv_upload", post(handle_csv_upload_request))
        .route("/health", get(handle_health))
        .with_state(app_state)
}

async fn serve(
    persistence: Persistence,
    bind: &str,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("{bind}:{port}").parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Runs one upload from a file and prints the result.
///
/// Returns a failing exit code when the header was rejected.
fn import_file(
    mut persistence: Persistence,
    file: &std::path::Path,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    info!("Importing {}", file.display());

    let body: String = std::fs::read_to_string(file)?;
    let context: InvocationContext =
        InvocationContext::with_request_id(format!("import:{}", file.display()));

    let response: UploadResponse = handle_csv_upload(&mut persistence, &body, &context)?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    if response.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Initializing Roster Server");

    let persistence: Persistence = open_store(&args)?;

    match &args.command {
        Command::Serve { port, bind } => {
            serve(persistence, bind, *port).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Import { file } => import_file(persistence, file),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use roster::{DirectoryStore, UserUpdate};
    use roster_domain::NormalizedEmail;
    use tower::ServiceExt;

    /// Helper to create test app state with in-memory persistence.
    fn create_test_app_state() -> AppState {
        let persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        AppState {
            persistence: Arc::new(Mutex::new(persistence)),
        }
    }

    fn csv_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/csv_upload")
            .header("content-type", "text/csv")
            .header(REQUEST_ID_HEADER, "test-request")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body_bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_returns_ok() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"status": "ok"})
        );
    }

    #[tokio::test]
    async fn test_csv_upload_creates_users() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state.clone());

        let response = app
            .oneshot(csv_request(
                "Name,Email,Manager,Salary,Hire Date\n\
                 Brad Jones,brad@example.com,,100000,02/10/2010\n\
                 John Doe,john@example.com,brad@example.com,80000,07/16/2018\n",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"numCreated": 2, "numUpdated": 0, "errors": []})
        );

        let mut persistence = app_state.persistence.lock().await;
        assert_eq!(persistence.count_users().unwrap(), 2);
        let john = persistence
            .find_user(&NormalizedEmail::parse("john@example.com").unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(
            persistence.find_chain(john.user_id).unwrap().unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn test_csv_upload_bad_header_returns_400() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(csv_request("Name,Email,Phone\nAmy,amy@example.com,555"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({
                "numCreated": 0,
                "numUpdated": 0,
                "errors": [
                    "Missing Columns: Hire Date, Manager, Salary",
                    "Unexpected Columns: Phone"
                ]
            })
        );
    }

    #[tokio::test]
    async fn test_csv_upload_reports_row_errors_with_200() {
        let app_state: AppState = create_test_app_state();
        {
            let mut persistence = app_state.persistence.lock().await;
            persistence
                .upsert_user(
                    &NormalizedEmail::parse("brad@example.com").unwrap(),
                    &UserUpdate {
                        salary: Some(90_000),
                        ..UserUpdate::default()
                    },
                )
                .unwrap();
        }
        let app: Router = build_router(app_state.clone());

        let response = app
            .oneshot(csv_request(
                "Name,Email,Manager,Salary,Hire Date\n\
                 Bradley Jones,brad@example.com,,NOT A NUMBER,02/10/2010\n",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({
                "numCreated": 0,
                "numUpdated": 1,
                "errors": ["Invalid salary: NOT A NUMBER\nContinuing update"]
            })
        );
    }

    #[tokio::test]
    async fn test_store_failure_maps_to_500() {
        let error: HttpError =
            HttpError::from(UploadError::Store(PersistenceError::DatabaseError(
                String::from("disk I/O error"),
            )));
        let response: Response = error.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "Store failure: Database error: disk I/O error"})
        );
    }

    #[test]
    fn test_args_parse_serve_defaults() {
        let args: Args = Args::try_parse_from(["roster-server", "serve"]).unwrap();

        match args.command {
            Command::Serve { port, bind } => {
                assert_eq!(port, 3000);
                assert_eq!(bind, "127.0.0.1");
            }
            Command::Import { .. } => panic!("expected serve"),
        }
    }

    #[test]
    fn test_args_parse_import() {
        let args: Args =
            Args::try_parse_from(["roster-server", "--database", "roster.db", "import", "staff.csv"])
                .unwrap();

        assert_eq!(args.database, Some(PathBuf::from("roster.db")));
        match args.command {
            Command::Import { file } => assert_eq!(file, PathBuf::from("staff.csv")),
            Command::Serve { .. } => panic!("expected import"),
        }
    }

    #[test]
    fn test_import_file_rejects_bad_header() {
        let path: PathBuf =
            std::env::temp_dir().join(format!("roster_import_test_{}.csv", std::process::id()));
        std::fs::write(&path, "Name,Email\nAmy,amy@example.com\n").unwrap();

        let persistence: Persistence = Persistence::new_in_memory().unwrap();
        let code: ExitCode = import_file(persistence, &path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(code, ExitCode::FAILURE);
    }
}
