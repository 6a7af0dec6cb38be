use tracing::error;
use uuid::Uuid;

/// Records a tracked event for an unexpected server error and returns its id
/// for correlation with the request log line. Statuses below 500 are the
/// caller's fault and are not tracked.
pub fn track_server_error(path: &str, method: &str, status: u16, request_id: &str) -> Option<Uuid> {
    if status < 500 {
        return None;
    }

    let event_id = Uuid::new_v4();
    error!(
        event_id = %event_id,
        request_id = %request_id,
        method = %method,
        path = %path,
        status = status,
        "unexpected server error"
    );
    Some(event_id)
}
