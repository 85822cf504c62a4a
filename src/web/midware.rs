use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method, Uri},
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::web::{log, Error, REQUEST_ID_HEADER};

/// Turns a server `Error` stashed in the response extensions into the client facing response
/// and logs the request.
pub async fn response_mapper(req_method: Method, uri: Uri, resp: Response) -> Response {
    let req_id = resp
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|id| id.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let web_error = resp.extensions().get::<Arc<Error>>().map(Arc::as_ref);
    let client_status_and_error = web_error.map(Error::status_code_and_client_error);

    log::log_request(
        &req_id,
        req_method,
        uri,
        client_status_and_error
            .map(|(status, _)| status)
            .unwrap_or(resp.status()),
        web_error,
        client_status_and_error.map(|(_, ce)| ce),
    );

    let Some((status, client_error)) = client_status_and_error else {
        return resp;
    };

    let mut err_resp = (status, client_error.to_string()).into_response();
    // The propagated request id has to survive the response swap.
    if let Ok(req_id) = HeaderValue::from_str(&req_id) {
        err_resp.headers_mut().insert(REQUEST_ID_HEADER, req_id);
    }

    err_resp
}
