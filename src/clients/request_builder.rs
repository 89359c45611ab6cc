//! Turns a [`PreparedRequest`] into an [`http::Request`] and a push service's HTTP response back
//! into a `Result`. Generic over the request body type so every transport module can reuse it
//! with its own client's body representation.

use http::{HeaderMap, Request, StatusCode};

use crate::clients::PushResponse;
use crate::error::{ErrorInfo, WebPushError};
use crate::message::PreparedRequest;

/// Builds the request to send to the push service.
pub fn build_request<T>(prepared: PreparedRequest) -> Request<T>
where
    T: From<Vec<u8>>,
{
    let mut builder = Request::builder().method("POST").uri(prepared.endpoint);

    for (name, value) in prepared.headers {
        builder = builder.header(name, value);
    }

    builder.body(prepared.body.into()).expect("prepared request is always well-formed")
}

/// Parses the response from the push service, and returns `Err` if the request was not accepted.
pub fn parse_response(
    response_status: StatusCode,
    response_headers: HeaderMap,
    body: Vec<u8>,
) -> Result<PushResponse, WebPushError> {
    if response_status.is_success() {
        return Ok(PushResponse {
            status: response_status,
            headers: response_headers,
            body,
        });
    }

    let info: ErrorInfo = serde_json::from_slice(&body).unwrap_or_else(|_| ErrorInfo {
        code: response_status.as_u16(),
        errno: 999,
        error: "unknown error".into(),
        message: String::from_utf8(body).unwrap_or_else(|_| "-".into()),
    });

    match response_status {
        StatusCode::UNAUTHORIZED => Err(WebPushError::Unauthorized(info)),
        StatusCode::GONE => Err(WebPushError::EndpointNotValid(info)),
        StatusCode::NOT_FOUND => Err(WebPushError::EndpointNotFound(info)),
        StatusCode::PAYLOAD_TOO_LARGE => Err(WebPushError::PayloadTooLarge),
        StatusCode::BAD_REQUEST => Err(WebPushError::BadRequest(info)),
        status if status.is_server_error() => Err(WebPushError::ServerError {
            retry_after: None,
            info,
        }),
        _ => Err(WebPushError::Other(format!("unexpected response status: {info:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_ece::ContentEncoding;
    use crate::notification::Notification;
    use crate::subscription::Subscription;
    use crate::vapid::VapidCache;

    #[test]
    fn builds_a_request_with_the_prepared_headers_and_body() {
        let subscription = Subscription::new(
            "https://fcm.googleapis.com/fcm/send/abc",
            "BGa4N1PI79lboMR_YrwCiCsgp35DRvedt7opHcf0yM3iOBTSoQYqQLwWxAfRKE6tsDnReWmhsImkhDF_DBdkNSU",
            "EvcWjEgzr4rbvhfi3yds0A",
            ContentEncoding::Aes128Gcm,
        );
        let notification = Notification::new(subscription).with_payload(b"test".to_vec());

        let mut cache = VapidCache::new();
        let prepared = crate::message::prepare(&notification, None, &mut cache, 0).unwrap();

        let request = build_request::<Vec<u8>>(prepared);
        assert_eq!("POST", request.method());
        assert_eq!(
            Some("aes128gcm"),
            request.headers().get("Content-Encoding").and_then(|v| v.to_str().ok())
        );
    }

    #[test]
    fn parses_a_successful_response_correctly() {
        let response = parse_response(StatusCode::OK, HeaderMap::new(), vec![]).unwrap();
        assert_eq!(StatusCode::OK, response.status);
    }

    #[test]
    fn parses_an_unauthorized_response_correctly() {
        assert!(matches!(
            parse_response(StatusCode::UNAUTHORIZED, HeaderMap::new(), vec![]),
            Err(WebPushError::Unauthorized(_))
        ));
    }

    #[test]
    fn parses_a_gone_response_correctly() {
        assert!(matches!(
            parse_response(StatusCode::GONE, HeaderMap::new(), vec![]),
            Err(WebPushError::EndpointNotValid(_))
        ));
    }

    #[test]
    fn parses_a_not_found_response_correctly() {
        assert!(matches!(
            parse_response(StatusCode::NOT_FOUND, HeaderMap::new(), vec![]),
            Err(WebPushError::EndpointNotFound(_))
        ));
    }

    #[test]
    fn parses_a_payload_too_large_response_correctly() {
        assert!(matches!(
            parse_response(StatusCode::PAYLOAD_TOO_LARGE, HeaderMap::new(), vec![]),
            Err(WebPushError::PayloadTooLarge)
        ));
    }

    #[test]
    fn parses_a_server_error_response_correctly() {
        assert!(matches!(
            parse_response(StatusCode::INTERNAL_SERVER_ERROR, HeaderMap::new(), vec![]),
            Err(WebPushError::ServerError { .. })
        ));
    }

    #[test]
    fn parses_a_bad_request_response_with_body_correctly() {
        let json = r#"
            {
                "code": 400,
                "errno": 103,
                "error": "FooBar",
                "message": "No message found"
            }
        "#;

        assert!(matches!(
            parse_response(StatusCode::BAD_REQUEST, HeaderMap::new(), json.as_bytes().to_vec()),
            Err(WebPushError::BadRequest(ErrorInfo {
                code: 400,
                errno: 103,
                error: _,
                message: _,
            })),
        ));
    }
}
