// HTTP surface: `POST /analyze` and `GET /health`.
//
// Errors are returned as `{"detail": "<message>"}`, the shape the web client
// reads; only an unclassifiable input is a 400.

use actix_cors::Cors;
use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpResponse, HttpServer, ResponseError};
use serde::Deserialize;
use serde_json::json;
use statlens_core::{AnalysisError, CreatorAnalyzer};
use tracing::{error, info, warn};
use tracing_actix_web::TracingLogger;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub url: String,
}

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] AnalysisError);

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "detail": self.0.to_string(),
        }))
    }
}

async fn analyze(
    analyzer: web::Data<CreatorAnalyzer>,
    request: web::Json<AnalyzeRequest>,
) -> Result<HttpResponse, ApiError> {
    match analyzer.analyze(&request.url).await {
        Ok(result) => Ok(HttpResponse::Ok().json(result)),
        Err(e) => {
            if e.is_client_error() {
                warn!(url = %request.url, "unsupported input");
            } else {
                error!(url = %request.url, code = e.code_str(), error = %e, "analysis failed");
            }
            Err(e.into())
        }
    }
}

async fn health() -> &'static str {
    "OK"
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let detail = err.to_string();
        InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(json!({ "detail": detail })),
        )
        .into()
    })
}

/// Any origin, method and header; there is no auth boundary to protect.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/analyze", web::post().to(analyze))
        .route("/health", web::get().to(health));
}

pub async fn run(analyzer: CreatorAnalyzer, host: &str, port: u16) -> std::io::Result<()> {
    let analyzer = web::Data::new(analyzer);
    info!(host, port, "starting HTTP service");

    HttpServer::new(move || {
        App::new()
            .wrap(cors())
            .wrap(TracingLogger::default())
            .app_data(analyzer.clone())
            .configure(configure)
    })
    .bind((host, port))?
    .run()
    .await
}
