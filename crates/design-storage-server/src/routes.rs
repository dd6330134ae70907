//! HTTP routes for the design resource.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequestParts, Path, State};
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::routing::get;
use axum::{Json, Router};
use design_storage_auth::DesignService;
use design_storage_core::error::DesignError;
use design_storage_core::models::design::{CreateDesign, Design, UpdateDesign};
use design_storage_core::repository::DesignRepository;
use serde::Serialize;

use crate::error::ApiError;

type SharedService<R> = Arc<DesignService<R>>;

/// Build the application router.
///
/// - `GET /healthz`: readiness against storage
/// - `GET /designs`, `POST /designs`
/// - `GET /designs/{id}`, `PUT /designs/{id}`, `DELETE /designs/{id}`
pub fn router<R>(service: SharedService<R>) -> Router
where
    R: DesignRepository + 'static,
{
    Router::new()
        .route("/healthz", get(healthz::<R>))
        .route("/designs", get(list_designs::<R>).post(create_design::<R>))
        .route(
            "/designs/{id}",
            get(get_design::<R>)
                .put(update_design::<R>)
                .delete(delete_design::<R>),
        )
        .with_state(service)
}

/// Token from an `Authorization: Bearer <token>` header, if one was sent.
///
/// A header with any other scheme is rejected rather than ignored.
#[derive(Debug)]
pub struct Bearer(pub Option<String>);

impl<S> FromRequestParts<S> for Bearer
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(AUTHORIZATION) else {
            return Ok(Self(None));
        };
        let malformed = || ApiError(DesignError::unauthenticated("malformed Authorization header"));

        let value = value.to_str().map_err(|_| malformed())?;
        match value.trim().split_once(' ') {
            Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => {
                let token = token.trim();
                if token.is_empty() {
                    return Err(malformed());
                }
                Ok(Self(Some(token.to_owned())))
            }
            _ => Err(malformed()),
        }
    }
}

#[derive(Debug, Serialize)]
struct Created {
    id: i64,
}

fn design_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|e| ApiError(DesignError::validation(e.body_text())))
}

fn payload<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|e| ApiError(DesignError::validation(e.body_text())))
}

async fn healthz<R: DesignRepository>(
    State(svc): State<SharedService<R>>,
) -> Result<StatusCode, ApiError> {
    svc.ready().await?;
    Ok(StatusCode::OK)
}

async fn list_designs<R: DesignRepository>(
    State(svc): State<SharedService<R>>,
    Bearer(token): Bearer,
) -> Result<Json<Vec<Design>>, ApiError> {
    let caller = svc.authenticate(token.as_deref())?;
    Ok(Json(svc.list(&caller).await?))
}

async fn get_design<R: DesignRepository>(
    State(svc): State<SharedService<R>>,
    Bearer(token): Bearer,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Design>, ApiError> {
    let caller = svc.authenticate(token.as_deref())?;
    let id = design_id(path)?;
    Ok(Json(svc.get(&caller, id).await?))
}

async fn create_design<R: DesignRepository>(
    State(svc): State<SharedService<R>>,
    Bearer(token): Bearer,
    body: Result<Json<CreateDesign>, JsonRejection>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let caller = svc.authenticate(token.as_deref())?;
    let input = payload(body)?;
    let design = svc.create(&caller, input).await?;
    Ok((StatusCode::CREATED, Json(Created { id: design.id })))
}

async fn update_design<R: DesignRepository>(
    State(svc): State<SharedService<R>>,
    Bearer(token): Bearer,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateDesign>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let caller = svc.authenticate(token.as_deref())?;
    let id = design_id(path)?;
    let input = payload(body)?;
    svc.update(&caller, id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_design<R: DesignRepository>(
    State(svc): State<SharedService<R>>,
    Bearer(token): Bearer,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let caller = svc.authenticate(token.as_deref())?;
    let id = design_id(path)?;
    svc.delete(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
