use std::sync::Arc;

use lambda_http::{
    http::StatusCode, request::RequestContext, Body, Error as LambdaError, Request, RequestExt,
    Response,
};
use serde::Serialize;
use serde_json::json;
use tracing::{error, info, warn};

use crate::{
    context::AppContext,
    error::AppError,
    record::{Record, RecordPayload},
};

const SUCCESS_MESSAGE: &str = "Successfully inserted data!";
const FAILURE_MESSAGE: &str = "Internal server error";
const UNKNOWN: &str = "unknown";

/// Per-request entry point invoked by the Lambda runtime.
///
/// Every inbound event results in exactly one `put_item` attempt; the caller
/// sees either a fixed 200 success message or a fixed generic 500. All error
/// detail stays in the log stream.
pub async fn handle_request(
    ctx: Arc<AppContext>,
    event: Request,
) -> Result<Response<Body>, LambdaError> {
    let audit = AuditInfo::from_event(&event);
    info!(
        request_id = %audit.request_id,
        source_ip = %audit.source_ip,
        user_agent = %audit.user_agent,
        request_time = %audit.request_time,
        table = %ctx.table_name(),
        "handling insert request"
    );

    match insert_record(ctx.as_ref(), &event).await {
        Ok(id) => {
            info!(record_id = %id, "successfully inserted item");
            Ok(json_response(
                StatusCode::OK,
                json!({ "message": SUCCESS_MESSAGE }),
            ))
        }
        Err(err) => {
            error!(
                category = err.category(),
                error = %err,
                request_id = %audit.request_id,
                "request failed"
            );
            Ok(json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "message": FAILURE_MESSAGE }),
            ))
        }
    }
}

/// The write path proper. Returns the id of the inserted record.
async fn insert_record(ctx: &AppContext, event: &Request) -> Result<String, AppError> {
    let record = match request_body(event)? {
        Some(raw) => {
            let payload: RecordPayload = serde_json::from_str(raw)
                .map_err(|e| AppError::Validation(format!("undecodable payload: {e}")))?;
            Record::from_payload(payload)?
        }
        None => {
            info!("received request without a payload, inserting fallback record");
            Record::fallback()
        }
    };

    let id = record.id.clone();
    ctx.client()
        .put_item()
        .table_name(ctx.table_name())
        .set_item(Some(record.into_item()))
        .send()
        .await
        .map_err(|e| AppError::Dynamo(e.to_string()))?;
    Ok(id)
}

/// Borrow the request body as text, treating empty or whitespace-only bodies
/// as absent.
fn request_body(event: &Request) -> Result<Option<&str>, AppError> {
    let text = match event.body() {
        Body::Empty => return Ok(None),
        Body::Text(s) => s.as_str(),
        Body::Binary(bytes) => std::str::from_utf8(bytes)
            .map_err(|_| AppError::Validation("request body is not valid UTF-8".into()))?,
    };
    if text.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(text))
    }
}

/// Caller metadata logged for security auditing.
struct AuditInfo {
    request_id: String,
    source_ip: String,
    user_agent: String,
    request_time: String,
}

impl AuditInfo {
    fn from_event(event: &Request) -> Self {
        let request_id = event
            .lambda_context_ref()
            .map(|ctx| ctx.request_id.clone())
            .unwrap_or_else(|| UNKNOWN.to_string());

        let (source_ip, user_agent, request_time) = match event.request_context_ref() {
            Some(RequestContext::ApiGatewayV1(ctx)) => (
                ctx.identity.source_ip.clone(),
                ctx.identity.user_agent.clone(),
                ctx.request_time.clone(),
            ),
            Some(RequestContext::ApiGatewayV2(ctx)) => (
                ctx.http.source_ip.clone(),
                ctx.http.user_agent.clone(),
                ctx.time.clone(),
            ),
            _ => (None, None, None),
        };

        Self {
            request_id,
            source_ip: source_ip.unwrap_or_else(|| UNKNOWN.to_string()),
            user_agent: user_agent.unwrap_or_else(|| UNKNOWN.to_string()),
            request_time: request_time.unwrap_or_else(|| UNKNOWN.to_string()),
        }
    }
}

fn json_response<T: Serialize>(status: StatusCode, value: T) -> Response<Body> {
    let body = serde_json::to_string(&value).unwrap_or_else(|_| "{}".into());

    if status.is_server_error() {
        warn!(
            http_status = status.as_u16(),
            body = %body,
            "returning server error response"
        );
    }

    Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::Text(body))
        .expect("failed to build response")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_response_sets_content_type() {
        let response = json_response(StatusCode::OK, json!({ "ok": true }));
        assert_eq!(response.status(), StatusCode::OK);
        let header = response.headers().get("content-type").unwrap();
        assert_eq!(header, "application/json");
    }

    #[test]
    fn audit_info_defaults_to_unknown() {
        let event = lambda_http::http::Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::Empty)
            .expect("request");
        let audit = AuditInfo::from_event(&event);
        assert_eq!(audit.request_id, "unknown");
        assert_eq!(audit.source_ip, "unknown");
        assert_eq!(audit.user_agent, "unknown");
        assert_eq!(audit.request_time, "unknown");
    }

    #[test]
    fn empty_and_whitespace_bodies_are_absent() {
        let empty = lambda_http::http::Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::Empty)
            .expect("request");
        assert!(request_body(&empty).unwrap().is_none());

        let blank = lambda_http::http::Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::Text("   \n".into()))
            .expect("request");
        assert!(request_body(&blank).unwrap().is_none());

        let payload = lambda_http::http::Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::Text("{}".into()))
            .expect("request");
        assert_eq!(request_body(&payload).unwrap(), Some("{}"));
    }
}
