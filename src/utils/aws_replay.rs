//! Canned AWS responses for adapter tests.

use aws_smithy_runtime::client::http::test_util::{ReplayEvent, StaticReplayClient};
use aws_smithy_runtime_api::http::{Request as HttpRequest, Response as HttpResponse, StatusCode};
use aws_smithy_types::body::SdkBody;

pub fn json_response(status: u16, body: &str) -> HttpResponse {
    let mut response = HttpResponse::new(
        StatusCode::try_from(status).expect("valid status"),
        SdkBody::from(body.to_string()),
    );
    response
        .headers_mut()
        .insert("content-type", "application/x-amz-json-1.1");
    response
}

pub fn replay(responses: Vec<HttpResponse>) -> StaticReplayClient {
    StaticReplayClient::new(
        responses
            .into_iter()
            .map(|response| ReplayEvent::new(HttpRequest::new(SdkBody::empty()), response))
            .collect(),
    )
}

#[derive(Debug)]
pub struct SentRequest {
    pub target: String,
    pub body: serde_json::Value,
}

/// Requests the SDK actually sent, with their operation target and JSON body.
pub fn sent_requests(client: &StaticReplayClient) -> Vec<SentRequest> {
    client
        .actual_requests()
        .map(|req| SentRequest {
            target: req
                .headers()
                .get("x-amz-target")
                .unwrap_or_default()
                .to_string(),
            body: serde_json::from_slice(req.body().bytes().expect("in-memory body"))
                .expect("json request body"),
        })
        .collect()
}
