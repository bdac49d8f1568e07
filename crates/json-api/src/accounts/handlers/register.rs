//! Register User Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use tradepost_app::domain::accounts::models::{NewUser, User, UserKind};

use crate::{accounts::errors::into_status_error, extensions::*, state::State};

/// Register User Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterUserRequest {
    /// Email address, also the login
    pub email: String,

    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Company name
    #[serde(default)]
    pub company: String,

    /// Position within the company
    #[serde(default)]
    pub position: String,

    /// Account type: `buyer` or `shop`
    #[serde(rename = "type")]
    pub kind: String,
}

/// User Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    /// The user id
    pub id: i64,

    /// Email address
    pub email: String,

    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Company name
    pub company: String,

    /// Position within the company
    pub position: String,

    /// Account type: `buyer` or `shop`
    #[serde(rename = "type")]
    pub kind: String,

    /// The date and time the account was created
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.into_i64(),
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            company: user.company,
            position: user.position,
            kind: user.kind.as_str().to_string(),
            created_at: user.created_at.to_string(),
        }
    }
}

/// Register User Handler
///
/// Creates a new account. Open to unauthenticated callers; tokens are issued
/// separately by the operator.
#[endpoint(
    tags("accounts"),
    summary = "Register User",
    responses(
        (status_code = StatusCode::CREATED, description = "Account created"),
        (status_code = StatusCode::CONFLICT, description = "Account already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterUserRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let Some(kind) = UserKind::parse(&request.kind) else {
        return Err(StatusError::bad_request().brief("Invalid account type"));
    };

    let user = state
        .app
        .accounts
        .register_user(NewUser {
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            company: request.company,
            position: request.position,
            kind,
        })
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(user.into()))
}
