//! 用户相关的请求处理函数
//!
//! 每个处理函数只负责把解析后的请求转成一次注册表调用，再包装成响应。

use crate::{
    context::RequestContext,
    error::ApiError,
    registry::{User, UserFields, UserRegistry},
    response::Envelope,
};
use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request, State},
    http::{request::Parts, StatusCode},
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use uuid::Uuid;

/// 处理函数共享的注册表句柄
pub type SharedRegistry = Arc<UserRegistry>;

/// JSON 请求体提取器
///
/// 与 `axum::Json` 不同，不要求 `Content-Type` 头，
/// 任何解析失败都会变成 400 和 `{"error": ...}`。
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::MalformedInput(rejection.body_text()))?;
        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|err| ApiError::MalformedInput(err.to_string()))
    }
}

/// 路径中的用户ID，格式不合法时返回 400
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserIdPath(pub Uuid);

impl<S> FromRequestParts<S> for UserIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::MalformedInput(rejection.body_text()))?;
        Uuid::parse_str(&raw)
            .map(UserIdPath)
            .map_err(|err| ApiError::MalformedInput(err.to_string()))
    }
}

/// `POST /users`
pub async fn create_user(
    State(registry): State<SharedRegistry>,
    context: RequestContext,
    JsonBody(fields): JsonBody<UserFields>,
) -> Envelope {
    let user = registry.create(fields);
    tracing::info!(trace_id = %context.trace_id(), user_id = %user.id, "created user");
    Envelope::message(StatusCode::CREATED, "created success")
}

/// `GET /users`
pub async fn list_users(
    State(registry): State<SharedRegistry>,
    context: RequestContext,
) -> Envelope<Vec<User>> {
    let users = registry.list();
    tracing::debug!(trace_id = %context.trace_id(), count = users.len(), "listed users");
    Envelope::with_payload(StatusCode::OK, "get all success", users)
}

/// `PUT /users/{id}`
pub async fn update_user(
    State(registry): State<SharedRegistry>,
    context: RequestContext,
    UserIdPath(id): UserIdPath,
    JsonBody(fields): JsonBody<UserFields>,
) -> Result<Envelope, ApiError> {
    registry.update(&id, fields)?;
    tracing::info!(trace_id = %context.trace_id(), user_id = %id, "updated user");
    Ok(Envelope::message(StatusCode::OK, "update success"))
}

/// `DELETE /users/{id}`
pub async fn delete_user(
    State(registry): State<SharedRegistry>,
    context: RequestContext,
    UserIdPath(id): UserIdPath,
) -> Result<Envelope, ApiError> {
    registry.delete(&id)?;
    tracing::info!(trace_id = %context.trace_id(), user_id = %id, "deleted user");
    Ok(Envelope::message(StatusCode::OK, "delete success"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request(body: &'static str) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .uri("/users")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_json_body_without_content_type() {
        let JsonBody(fields) = JsonBody::<UserFields>::from_request(
            request(r#"{"name":"Ada","email":"ada@x.com","address":"1 Lane"}"#),
            &(),
        )
        .await
        .unwrap();
        assert_eq!(fields, UserFields::new("Ada", "ada@x.com", "1 Lane"));
    }

    #[tokio::test]
    async fn test_json_body_missing_fields_default_to_empty() {
        let JsonBody(fields) = JsonBody::<UserFields>::from_request(request(r#"{"name":"Ada"}"#), &())
            .await
            .unwrap();
        assert_eq!(fields, UserFields::new("Ada", "", ""));
    }

    #[tokio::test]
    async fn test_json_body_malformed() {
        for body in ["", "not json", r#"{"name": 42}"#, "[1, 2, 3]"] {
            let err = JsonBody::<UserFields>::from_request(request(body), &())
                .await
                .unwrap_err();
            assert!(
                matches!(err, ApiError::MalformedInput(ref msg) if !msg.is_empty()),
                "body {body:?} should be rejected, got {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_handlers_against_registry() {
        let registry: SharedRegistry = Arc::new(UserRegistry::new());
        let context = RequestContext::new(crate::TraceId::new());

        let envelope = create_user(
            State(registry.clone()),
            context.clone(),
            JsonBody(UserFields::new("Ada", "ada@x.com", "1 Lane")),
        )
        .await;
        assert_eq!(envelope.status_code, 201);
        assert_eq!(envelope.message, "created success");

        let listed = list_users(State(registry.clone()), context.clone()).await;
        let users = listed.payload.unwrap();
        assert_eq!(users.len(), 1);
        let id = users[0].id;

        let updated = update_user(
            State(registry.clone()),
            context.clone(),
            UserIdPath(id),
            JsonBody(UserFields::new("Ada L.", "ada@x.com", "1 Lane")),
        )
        .await
        .unwrap();
        assert_eq!(updated.message, "update success");
        assert_eq!(registry.get(&id).unwrap().name, "Ada L.");

        let deleted = delete_user(State(registry.clone()), context.clone(), UserIdPath(id))
            .await
            .unwrap();
        assert_eq!(deleted.message, "delete success");

        let again = delete_user(State(registry.clone()), context, UserIdPath(id)).await;
        assert_eq!(again.unwrap_err(), ApiError::NotFound);
    }
}
