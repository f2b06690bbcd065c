//! End-to-end behaviour of the gateway against a stubbed upstream.
//!
//! The app is assembled from the real token service, sign-in service and
//! HTTP provider; only the upstream is a `wiremock` double.

use std::sync::Arc;
use std::time::Duration;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test as actix_test, web};
use admin_gateway::Trace;
use admin_gateway::domain::ports::TokenService;
use admin_gateway::domain::{AdminAccount, AdminAuthService, ProviderRegistry, TRACE_ID_HEADER};
use admin_gateway::inbound::http::state::HttpState;
use admin_gateway::inbound::http::{configure_api, json_config, query_config};
use admin_gateway::outbound::token::{JwtSettings, JwtTokenService};
use admin_gateway::outbound::upstream::{HttpAdminProvider, HttpProviderConfig};
use chrono::TimeDelta;
use mockable::DefaultClock;
use pagination::PageBounds;
use rstest::rstest;
use rstest_bdd_macros::{then, when};
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{body_json, header as header_is, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GATEWAY_HEADER: &str = "X-Gateway-Key";
const GATEWAY_KEY: &str = "gw-secret";
const ADMIN_PASSWORD: &str = "letmein";

fn http_state(upstream: &MockServer, timeout: Duration) -> HttpState {
    let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(
        &JwtSettings {
            secret: "flow-secret".into(),
            access_ttl: TimeDelta::hours(1),
            refresh_ttl: TimeDelta::days(1),
        },
        Arc::new(DefaultClock),
    ));
    let login = Arc::new(AdminAuthService::new(
        AdminAccount::new("admin", "admin@example.com", ADMIN_PASSWORD),
        tokens.clone(),
    ));
    let base_url = Url::parse(&format!("{}/api/v1", upstream.uri())).expect("mock server url");
    let provider = HttpAdminProvider::new(HttpProviderConfig {
        name: "stellar".into(),
        base_url,
        gateway_header: GATEWAY_HEADER.into(),
        gateway_key: GATEWAY_KEY.into(),
        timeout,
    })
    .expect("provider builds");
    let registry = ProviderRegistry::new("stellar");
    registry.register("stellar", Arc::new(provider));

    HttpState::new(login, tokens, Arc::new(registry), PageBounds::default())
}

async fn upstream_with_users() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/users"))
        .and(query_param("page", "2"))
        .and(query_param("pageSize", "100"))
        .and(query_param("keyword", "ada"))
        .and(header_is(GATEWAY_HEADER, GATEWAY_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "msg": "success",
            "data": {
                "total": 101,
                "page": 2,
                "pageSize": 100,
                "totalPages": 2,
                "hasNext": false,
                "hasPrevious": true,
                "subscriberTotal": 7,
                "data": [{"id": 42, "username": "ada", "role": "user", "status": "active"}]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;
    server
}

async fn upstream_rejecting_configs() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/admin/configs/daily_limit"))
        .and(body_json(json!({
            "alias": "Daily limit",
            "configValue": "10",
            "valueType": "number",
            "description": "cap"
        })))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "code": 422,
            "msg": "value out of range"
        })))
        .mount(&server)
        .await;
    server
}

async fn slow_upstream() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/configs"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"code": 200, "data": []}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;
    server
}

#[when("the admin signs in")]
fn login_request() -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri("/api/v1/auth/admin/login")
        .set_json(json!({"password": ADMIN_PASSWORD}))
}

#[then("an access token is issued")]
fn access_token(body: &Value) -> String {
    success_envelope(body);
    body["data"]["accessToken"]
        .as_str()
        .expect("access token in login response")
        .to_owned()
}

#[then("the response is a success envelope")]
fn success_envelope(body: &Value) {
    assert_eq!(body["code"], 200);
    assert_eq!(body["msg"], "success");
    assert!(body["timestamp"].as_i64().is_some_and(|ts| ts > 0));
}

#[then("the response is an error envelope")]
fn error_envelope(body: &Value, status: StatusCode, message: &str) {
    assert_eq!(body["code"], i64::from(status.as_u16()));
    assert_eq!(body["msg"], message);
    assert!(body.get("data").is_none_or(Value::is_null));
}

fn app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .app_data(query_config())
        .wrap(Trace)
        .service(web::scope("/api/v1").configure(configure_api))
}

#[rstest]
#[actix_web::test]
async fn admin_lists_users_through_the_upstream() {
    let upstream = upstream_with_users().await;
    let service =
        actix_test::init_service(app(http_state(&upstream, Duration::from_secs(5)))).await;
    let login: Value =
        actix_test::call_and_read_body_json(&service, login_request().to_request()).await;
    let token = access_token(&login);

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/admin/users?page=2&pageSize=500&keyword=%20ada%20")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .insert_header(("X-App-Key", "stellar"))
        .to_request();
    let response = actix_test::call_service(&service, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(TRACE_ID_HEADER));
    let body: Value = actix_test::read_body_json(response).await;
    success_envelope(&body);
    assert_eq!(body["data"]["subscriberTotal"], 7);
    assert_eq!(body["data"]["data"][0]["username"], "ada");
    assert_eq!(body["data"]["hasPrevious"], true);
}

#[rstest]
#[actix_web::test]
async fn upstream_business_errors_are_relayed() {
    let upstream = upstream_rejecting_configs().await;
    let service =
        actix_test::init_service(app(http_state(&upstream, Duration::from_secs(5)))).await;
    let login: Value =
        actix_test::call_and_read_body_json(&service, login_request().to_request()).await;
    let token = access_token(&login);

    let request = actix_test::TestRequest::put()
        .uri("/api/v1/admin/configs/daily_limit")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .set_json(json!({
            "alias": "Daily limit",
            "configValue": "10",
            "valueType": "number",
            "description": "cap"
        }))
        .to_request();
    let response = actix_test::call_service(&service, request).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = actix_test::read_body_json(response).await;
    error_envelope(&body, StatusCode::UNPROCESSABLE_ENTITY, "value out of range");
}

#[rstest]
#[actix_web::test]
async fn slow_upstreams_surface_as_redacted_failures() {
    let upstream = slow_upstream().await;
    let service =
        actix_test::init_service(app(http_state(&upstream, Duration::from_millis(50)))).await;
    let login: Value =
        actix_test::call_and_read_body_json(&service, login_request().to_request()).await;
    let token = access_token(&login);

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/admin/configs")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let response = actix_test::call_service(&service, request).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = actix_test::read_body_json(response).await;
    error_envelope(
        &body,
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error",
    );
}

#[rstest]
#[actix_web::test]
async fn forged_tokens_are_rejected_before_the_upstream() {
    let upstream = MockServer::start().await;
    let service =
        actix_test::init_service(app(http_state(&upstream, Duration::from_secs(5)))).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/admin/users")
        .insert_header((header::AUTHORIZATION, "Bearer not-a-jwt"))
        .to_request();
    let response = actix_test::call_service(&service, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(response).await;
    error_envelope(&body, StatusCode::UNAUTHORIZED, "Invalid or expired token");
    assert!(
        upstream
            .received_requests()
            .await
            .is_none_or(|requests| requests.is_empty())
    );
}
