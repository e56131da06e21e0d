//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use kernel::error::validation::ValidationError;
use std::sync::Arc;

use crate::application::{AddShoeUseCase, ListShoesUseCase};
use crate::domain::entity::shoe::ShoeDict;
use crate::domain::repository::ProductRepository;
use crate::error::{CatalogError, CatalogResult};
use crate::presentation::dto::{CreateShoeRequest, CreateShoeResponse};

/// Shared state for catalog handlers
pub struct CatalogAppState<P>
where
    P: ProductRepository + Send + Sync + 'static,
{
    pub repo: Arc<P>,
}

impl<P> Clone for CatalogAppState<P>
where
    P: ProductRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

/// GET /shoes
pub async fn list_shoes<P>(State(state): State<CatalogAppState<P>>) -> CatalogResult<Json<Vec<ShoeDict>>>
where
    P: ProductRepository + Send + Sync + 'static,
{
    let shoes = ListShoesUseCase::new(state.repo.clone()).execute().await?;
    Ok(Json(shoes.iter().map(|shoe| shoe.to_dict()).collect()))
}

/// POST /shoes, POST /api/shoes
///
/// Runs behind `require_bearer` and `require_admin`.
pub async fn create_shoe<P>(
    State(state): State<CatalogAppState<P>>,
    body: Result<Json<CreateShoeRequest>, JsonRejection>,
) -> CatalogResult<(StatusCode, Json<CreateShoeResponse>)>
where
    P: ProductRepository + Send + Sync + 'static,
{
    let Json(req) = body
        .map_err(|rejection| ValidationError::new("body", rejection.body_text()))
        .map_err(CatalogError::from)?;

    let shoe_id = AddShoeUseCase::new(state.repo.clone())
        .execute(req.into_input()?)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateShoeResponse {
            message: "Shoe added successfully",
            shoe_id: shoe_id.get(),
        }),
    ))
}
