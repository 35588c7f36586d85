//! API request handlers
//!
//! The upload handler persists the posted workbook to a scratch file,
//! dispatches to the matching transform, and returns the record list as
//! the bare response body. Info endpoints wrap their payloads in the
//! standard envelope.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::report;
use crate::types::ReportType;

use super::server::AppState;

/// Standard API response wrapper for the info endpoints.
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Root endpoint response
#[derive(Serialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Serialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

/// GET / - Root info
pub async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = RootResponse {
        name: "Solreport API Server".to_string(),
        version: state.version.clone(),
        description: "Sales-performance spreadsheet extraction".to_string(),
        endpoints: vec![
            EndpointInfo {
                path: "/health".to_string(),
                method: "GET".to_string(),
                description: "Health check endpoint".to_string(),
            },
            EndpointInfo {
                path: "/version".to_string(),
                method: "GET".to_string(),
                description: "Get server version".to_string(),
            },
            EndpointInfo {
                path: "/upload".to_string(),
                method: "POST".to_string(),
                description: "Extract records from an uploaded workbook \
                              (multipart fields: file, type)"
                    .to_string(),
            },
        ],
    };
    Json(ApiResponse::ok(response))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// GET /health - Health check
pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
    }))
}

/// Version response
#[derive(Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub report_types: Vec<String>,
}

/// GET /version - Server version
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(VersionResponse {
        version: state.version.clone(),
        report_types: [
            ReportType::MemberSol,
            ReportType::LeaderSol,
            ReportType::KpiSol,
            ReportType::BusinessDepartment,
        ]
        .iter()
        .map(|ty| ty.as_str().to_string())
        .collect(),
    }))
}

/// POST /upload - Extract records from an uploaded workbook
///
/// Multipart form with a `file` field (workbook bytes) and a `type` field
/// (report discriminator). The response body is the transform's record
/// array, verbatim. An unrecognized discriminator answers 200 with an
/// empty body, the contract callers of the legacy service already
/// depend on.
pub async fn upload(State(state): State<Arc<AppState>>, mut multipart: Multipart) -> Response {
    let mut report_type: Option<String> = None;
    let mut payload: Option<axum::body::Bytes> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(error) => return bad_request(format!("malformed multipart body: {error}")),
        };
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("type") => match field.text().await {
                Ok(text) => report_type = Some(text),
                Err(error) => return bad_request(format!("unreadable type field: {error}")),
            },
            Some("file") => match field.bytes().await {
                Ok(bytes) => payload = Some(bytes),
                Err(error) => return bad_request(format!("unreadable file field: {error}")),
            },
            _ => {}
        }
    }

    let Some(bytes) = payload else {
        return bad_request("missing file field");
    };
    let requested = report_type.unwrap_or_default();
    let Some(ty) = ReportType::parse(&requested) else {
        info!("unrecognized report type {:?}, answering empty", requested);
        return StatusCode::OK.into_response();
    };

    let scratch = match tempfile::Builder::new()
        .prefix("upload-")
        .suffix(".xlsx")
        .tempfile_in(&state.upload_dir)
    {
        Ok(file) => file,
        Err(error) => return server_error(format!("scratch file: {error}")),
    };
    if let Err(error) = std::fs::write(scratch.path(), &bytes) {
        return server_error(format!("scratch file: {error}"));
    }

    match report::extract(ty, scratch.path(), &state.branches) {
        Ok(records) => {
            info!(
                "extracted {} {} record(s) from {} byte upload",
                records.len(),
                ty,
                bytes.len()
            );
            Json(records).into_response()
        }
        Err(error) => server_error(error.to_string()),
    }
}

fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<()>::err(message)),
    )
        .into_response()
}

fn server_error(message: impl Into<String>) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::<()>::err(message)),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== ApiResponse Tests ====================

    #[test]
    fn test_api_response_ok_creates_success_response() {
        let response: ApiResponse<String> = ApiResponse::ok("test data".to_string());

        assert!(response.success);
        assert_eq!(response.data, Some("test data".to_string()));
        assert!(response.error.is_none());
        // UUID format (8-4-4-4-12)
        assert_eq!(response.request_id.len(), 36);
    }

    #[test]
    fn test_api_response_err_creates_error_response() {
        let response: ApiResponse<String> = ApiResponse::err("Something went wrong");

        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.error, Some("Something went wrong".to_string()));
    }

    #[test]
    fn test_api_response_request_id_is_unique() {
        let response1: ApiResponse<String> = ApiResponse::ok("test1".to_string());
        let response2: ApiResponse<String> = ApiResponse::ok("test2".to_string());

        assert_ne!(response1.request_id, response2.request_id);
    }

    #[test]
    fn test_api_response_serializes_without_none_fields() {
        let response: ApiResponse<String> = ApiResponse::ok("data".to_string());
        let json = serde_json::to_string(&response).unwrap();

        assert!(!json.contains("\"error\""));
        assert!(json.contains("\"success\":true"));
        assert!(json.contains("\"data\":\"data\""));
    }

    #[test]
    fn test_api_response_error_serializes_without_data() {
        let response: ApiResponse<String> = ApiResponse::err("error message");
        let json = serde_json::to_string(&response).unwrap();

        assert!(!json.contains("\"data\""));
        assert!(json.contains("\"success\":false"));
        assert!(json.contains("\"error\":\"error message\""));
    }

    // ==================== Response Struct Tests ====================

    #[test]
    fn test_health_response_serialize() {
        let response = HealthResponse {
            status: "healthy".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains("\"status\":\"healthy\""));
    }

    #[test]
    fn test_version_response_lists_report_types() {
        let response = VersionResponse {
            version: "1.2.0".to_string(),
            report_types: vec!["member-sol".to_string(), "business".to_string()],
        };
        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains("\"version\":\"1.2.0\""));
        assert!(json.contains("\"report_types\":[\"member-sol\",\"business\"]"));
    }

    #[test]
    fn test_endpoint_info_serialize() {
        let info = EndpointInfo {
            path: "/upload".to_string(),
            method: "POST".to_string(),
            description: "Extract records".to_string(),
        };
        let json = serde_json::to_string(&info).unwrap();

        assert!(json.contains("\"path\":\"/upload\""));
        assert!(json.contains("\"method\":\"POST\""));
    }
}
