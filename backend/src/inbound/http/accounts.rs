//! Account API handlers.
//!
//! ```text
//! POST /api/v1/auth/register {"name":"ada","email":"ada@example.com","password":"..."}
//! POST /api/v1/auth/login {"email":"ada@example.com","password":"..."}
//! GET /api/v1/auth/me
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::LoginResponse;
use crate::domain::{Error, LoginCredentials, Registration, UserProfile};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_credentials_error;

/// Sign-up body for `POST /api/v1/auth/register`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "ada")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "correct horse battery")]
    pub password: String,
}

/// Login body for `POST /api/v1/auth/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub password: String,
}

/// Create an account with an empty pantry.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserProfile),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Name or email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let RegisterRequest {
        name,
        email,
        password,
    } = payload.into_inner();
    let registration =
        Registration::try_from_parts(&name, &email, &password).map_err(map_credentials_error)?;
    let profile = state.accounts.register(registration).await?;
    Ok(HttpResponse::Created().json(profile))
}

/// Exchange email and password for a bearer token.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid email or password", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let LoginRequest { email, password } = payload.into_inner();
    let credentials =
        LoginCredentials::try_from_parts(&email, &password).map_err(map_credentials_error)?;
    let response = state.accounts.login(credentials).await?;
    Ok(web::Json(response))
}

/// Profile of the authenticated caller.
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Current user", body = UserProfile),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 404, description = "Account no longer exists", body = Error)
    ),
    tags = ["auth"],
    operation_id = "currentUser"
)]
#[get("/auth/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<UserProfile>> {
    let profile = state.sessions.profile(user.id()).await?;
    Ok(web::Json(profile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AccessToken, EmailAddress, ErrorCode, UserId, UserName};
    use crate::inbound::http::test_utils::{TestPorts, bearer};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use chrono::{DateTime, Utc};
    use rstest::rstest;
    use serde_json::{Value, json};

    fn profile(id: &UserId) -> UserProfile {
        UserProfile {
            id: id.clone(),
            name: UserName::new("ada").expect("valid name"),
            email: EmailAddress::new("ada@example.com").expect("valid email"),
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn register_returns_created_profile() {
        let id = UserId::random();
        let expected = profile(&id);
        let mut ports = TestPorts::default();
        let returned = expected.clone();
        ports
            .accounts
            .expect_register()
            .withf(|registration| registration.name().as_ref() == "ada")
            .times(1)
            .return_once(move |_| Ok(returned));

        let app = actix_test::init_service(
            App::new()
                .app_data(ports.into_state())
                .service(web::scope("/api/v1").service(register)),
        )
        .await;
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(json!({
                "name": " ada ",
                "email": "ada@example.com",
                "password": "long enough"
            }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body: UserProfile = actix_test::read_body_json(response).await;
        assert_eq!(body, expected);
    }

    #[rstest]
    #[case(json!({ "name": "ada", "email": "nope", "password": "long enough" }), "email")]
    #[case(json!({ "name": "ada", "email": "ada@example.com", "password": "short" }), "password")]
    #[case(json!({ "name": "  ", "email": "ada@example.com", "password": "long enough" }), "name")]
    #[actix_web::test]
    async fn register_rejects_invalid_fields(#[case] body: Value, #[case] field: &str) {
        let mut ports = TestPorts::default();
        ports.accounts.expect_register().never();
        let app = actix_test::init_service(
            App::new()
                .app_data(ports.into_state())
                .service(web::scope("/api/v1").service(register)),
        )
        .await;
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(body)
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let payload: Value = actix_test::read_body_json(response).await;
        assert_eq!(payload["details"]["field"], field);
    }

    #[rstest]
    #[actix_web::test]
    async fn login_returns_token_and_profile() {
        let id = UserId::random();
        let user = profile(&id);
        let expires_at: DateTime<Utc> = DateTime::parse_from_rfc3339("2025-06-01T13:00:00Z")
            .expect("timestamp")
            .with_timezone(&Utc);
        let mut ports = TestPorts::default();
        ports.accounts.expect_login().return_once(move |_| {
            Ok(LoginResponse {
                access_token: AccessToken {
                    token: "signed".to_owned(),
                    expires_at,
                },
                user,
            })
        });
        let app = actix_test::init_service(
            App::new()
                .app_data(ports.into_state())
                .service(web::scope("/api/v1").service(login)),
        )
        .await;
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "email": "ada@example.com", "password": "whatever" }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let payload: Value = actix_test::read_body_json(response).await;
        assert_eq!(payload["accessToken"]["token"], "signed");
        assert_eq!(payload["user"]["email"], "ada@example.com");
    }

    #[rstest]
    #[actix_web::test]
    async fn me_requires_a_bearer_token() {
        let app = actix_test::init_service(
            App::new()
                .app_data(TestPorts::default().into_state())
                .service(web::scope("/api/v1").service(current_user)),
        )
        .await;
        let request = actix_test::TestRequest::get()
            .uri("/api/v1/auth/me")
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let payload: Error = actix_test::read_body_json(response).await;
        assert_eq!(payload.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[actix_web::test]
    async fn me_returns_the_callers_profile() {
        let id = UserId::random();
        let expected = profile(&id);
        let mut ports = TestPorts::default();
        ports.authenticate_as(id.clone());
        let returned = expected.clone();
        ports
            .sessions
            .expect_profile()
            .withf(move |user_id| user_id == &id)
            .return_once(move |_| Ok(returned));
        let app = actix_test::init_service(
            App::new()
                .app_data(ports.into_state())
                .service(web::scope("/api/v1").service(current_user)),
        )
        .await;
        let request = actix_test::TestRequest::get()
            .uri("/api/v1/auth/me")
            .insert_header(bearer())
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: UserProfile = actix_test::read_body_json(response).await;
        assert_eq!(body, expected);
    }
}
