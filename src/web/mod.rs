//! HTTP front end: `GET /<address>` answers with the vendor as JSON.

use actix_web::http::{Method, StatusCode};
use actix_web::middleware::Logger;
use actix_web::web::{self, Data};
use actix_web::{App, HttpRequest, HttpResponse, HttpServer};
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};

use crate::error::LookupError;
use crate::oui::LookupTable;

/// Remote address, request line, status and response size
const ACCESS_LOG_FORMAT: &str = "%a \"%r\" %s %b";

#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LookupResponse {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub mac: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub vendor: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error: String,
}

impl LookupResponse {
    fn found(mac: &str, vendor: &str) -> Self {
        Self {
            mac: mac.to_string(),
            vendor: vendor.to_string(),
            ..Self::default()
        }
    }

    fn failed(err: &LookupError) -> Self {
        Self {
            error: err.to_string(),
            ..Self::default()
        }
    }
}

fn status_for(err: &LookupError) -> StatusCode {
    match err {
        LookupError::InvalidAddress(_) => StatusCode::BAD_REQUEST,
        LookupError::NotFound(_) => StatusCode::NOT_FOUND,
    }
}

/// Resolve the address in the request path against the shared table
pub async fn lookup(req: HttpRequest, table: Data<LookupTable>) -> HttpResponse {
    if req.method() != Method::GET {
        return HttpResponse::MethodNotAllowed().body("method not allowed");
    }

    // Clients may encode the separators (`%3A`); undecodable bytes end up as
    // U+FFFD and are rejected as an invalid address.
    let raw = req.path().strip_prefix('/').unwrap_or(req.path());
    let mac = percent_decode_str(raw).decode_utf8_lossy();
    let (status, response) = match table.lookup(&mac) {
        Ok(vendor) => (StatusCode::OK, LookupResponse::found(&mac, vendor)),
        Err(e) => (status_for(&e), LookupResponse::failed(&e)),
    };

    match serde_json::to_string(&response) {
        Ok(json) => HttpResponse::build(status)
            .content_type("application/json")
            .body(json),
        Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
    }
}

/// Serve lookups until the server is stopped. The table is fully built before
/// it is shared with the workers and is never written afterwards.
pub async fn serve(table: LookupTable, bind: &str, port: u16) -> std::io::Result<()> {
    let table = Data::new(table);
    log::info!("Service listening at {}:{}", bind, port);

    HttpServer::new(move || {
        App::new()
            .app_data(table.clone())
            .wrap(Logger::new(ACCESS_LOG_FORMAT))
            .default_service(web::to(lookup))
    })
    .bind((bind, port))?
    .run()
    .await
}

/// Blocking entry point for callers outside an async runtime
pub fn start(table: LookupTable, bind: &str, port: u16) -> std::io::Result<()> {
    let sys = actix_rt::System::new();
    sys.block_on(serve(table, bind, port))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oui::Oui;
    use actix_web::dev::ServiceResponse;
    use actix_web::test::{self, TestRequest};

    fn table() -> LookupTable {
        [(Oui::new([0x84, 0x38, 0x35]), "Apple, Inc.".to_string())]
            .into_iter()
            .collect()
    }

    async fn call(req: TestRequest) -> ServiceResponse {
        let app = test::init_service(
            App::new()
                .app_data(Data::new(table()))
                .default_service(web::to(lookup)),
        )
        .await;
        test::call_service(&app, req.to_request()).await
    }

    #[actix_web::test]
    async fn test_known_address() {
        let resp = call(TestRequest::get().uri("/84:38:35:77:aa:52")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "application/json"
        );

        let body: LookupResponse = test::read_body_json(resp).await;
        assert_eq!(body, LookupResponse::found("84:38:35:77:aa:52", "Apple, Inc."));
    }

    #[actix_web::test]
    async fn test_other_notations() {
        for uri in ["/84-38-35-77-aa-52", "/84383577AA52"] {
            let resp = call(TestRequest::get().uri(uri)).await;
            assert_eq!(resp.status(), StatusCode::OK, "{}", uri);
        }
    }

    #[actix_web::test]
    async fn test_percent_encoded_address() {
        let resp = call(TestRequest::get().uri("/84%3A38%3A35%3A77%3Aaa%3A52")).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: LookupResponse = test::read_body_json(resp).await;
        assert_eq!(body, LookupResponse::found("84:38:35:77:aa:52", "Apple, Inc."));
    }

    #[actix_web::test]
    async fn test_encoded_invalid_bytes_are_bad_request() {
        let resp = call(TestRequest::get().uri("/84%FF38%3A35%3A77%3Aaa%3A52")).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_unknown_address() {
        let resp = call(TestRequest::get().uri("/ff:ff:ff:ff:ff:ff")).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: LookupResponse = test::read_body_json(resp).await;
        assert!(body.mac.is_empty());
        assert!(body.vendor.is_empty());
        assert!(body.error.contains("ffffff"));
    }

    #[actix_web::test]
    async fn test_invalid_address() {
        let resp = call(TestRequest::get().uri("/not-a-mac")).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: LookupResponse = test::read_body_json(resp).await;
        assert!(body.error.contains("invalid hardware address"));
    }

    #[actix_web::test]
    async fn test_missing_address() {
        let resp = call(TestRequest::get().uri("/")).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_unsupported_method() {
        let resp = call(TestRequest::post().uri("/84:38:35:77:aa:52")).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn test_empty_fields_are_omitted() {
        let json = serde_json::to_string(&LookupResponse::found("aa", "Acme")).unwrap();
        assert_eq!(json, r#"{"mac":"aa","vendor":"Acme"}"#);
    }
}
