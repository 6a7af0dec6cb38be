use actix_web::dev::ServiceRequest;
use actix_web::http::header;
use tracing::Span;
use uuid::Uuid;

/// Per-request context captured before the handler runs: a generated request
/// id plus the client details every audit log line carries.
#[derive(Debug, Clone)]
pub struct RequestMeta {
    pub request_id: String,
    pub method: String,
    pub path: String,
    pub client_ip: String,
    pub user_agent: String,
}

impl RequestMeta {
    pub fn from_request(req: &ServiceRequest) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            method: req.method().to_string(),
            path: req.path().to_string(),
            client_ip: client_ip(req),
            user_agent: user_agent(req),
        }
    }

    /// The tracing span handler log lines for this request nest under.
    pub fn span(&self) -> Span {
        tracing::info_span!(
            "request",
            request_id = %self.request_id,
            method = %self.method,
            path = %self.path,
            client_ip = %self.client_ip,
            user_agent = %self.user_agent
        )
    }
}

// realip_remote_addr() honors Forwarded/X-Forwarded-For only when a trusted
// proxy is configured (ACTIX_FORWARDED and friends); spoofed client headers
// are ignored otherwise.
fn client_ip(req: &ServiceRequest) -> String {
    req.connection_info()
        .realip_remote_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn user_agent(req: &ServiceRequest) -> String {
    req.headers()
        .get(header::USER_AGENT)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

/// HTTP status class for log grouping (2xx, 3xx, 4xx, 5xx).
pub fn status_class(status: u16) -> &'static str {
    match status {
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "unknown",
    }
}
