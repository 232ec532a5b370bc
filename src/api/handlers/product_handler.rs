//! Product CRUD handlers.

use axum::{
    extract::State,
    response::Json,
    routing::get,
    Extension, Router,
};
use serde::Deserialize;
use validator::Validate;

use crate::api::extractors::{ValidatedJson, ValidatedPath};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::config::{
    PRODUCT_CATEGORY_MAX_LENGTH, PRODUCT_DESCRIPTION_MAX_LENGTH, PRODUCT_NAME_MAX_LENGTH,
    PRODUCT_PRICE_MIN_VALUE,
};
use crate::domain::{NewProduct, ProductChanges, UpdateProduct};
use crate::errors::AppResult;
use crate::types::{Created, ProductResponse, ProductsResponse};

/// Product creation request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(max = PRODUCT_NAME_MAX_LENGTH))]
    pub name: String,
    #[validate(length(max = PRODUCT_DESCRIPTION_MAX_LENGTH))]
    pub description: String,
    #[validate(length(max = PRODUCT_CATEGORY_MAX_LENGTH))]
    pub category: String,
    #[validate(range(min = PRODUCT_PRICE_MIN_VALUE, message = "Price must be at least 1"))]
    pub price: i32,
}

/// Partial product update request
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[validate(length(max = PRODUCT_NAME_MAX_LENGTH))]
    pub name: Option<String>,
    #[validate(length(max = PRODUCT_DESCRIPTION_MAX_LENGTH))]
    pub description: Option<String>,
    #[validate(length(max = PRODUCT_CATEGORY_MAX_LENGTH))]
    pub category: Option<String>,
    #[validate(range(min = PRODUCT_PRICE_MIN_VALUE, message = "Price must be at least 1"))]
    pub price: Option<i32>,
}

impl From<UpdateProductRequest> for ProductChanges {
    fn from(req: UpdateProductRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            category: req.category,
            price: req.price,
        }
    }
}

/// Create product routes (must be layered with the auth middleware)
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// List all products
pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<ProductsResponse>> {
    let products = state.product_service.find().await?;
    Ok(Json(ProductsResponse::from(products)))
}

/// Get a product by ID
pub async fn get_product(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> AppResult<Json<ProductResponse>> {
    let product = state.product_service.find_by_id(id).await?;
    Ok(Json(ProductResponse::from(product)))
}

/// Create a product owned by the caller
pub async fn create_product(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateProductRequest>,
) -> AppResult<Created<ProductResponse>> {
    let product = state
        .product_service
        .create(NewProduct {
            name: payload.name,
            description: payload.description,
            category: payload.category,
            price: payload.price,
            owner: user,
        })
        .await?;

    Ok(Created(ProductResponse::from(product)))
}

/// Update a product owned by the caller
pub async fn update_product(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ValidatedPath(id): ValidatedPath<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateProductRequest>,
) -> AppResult<Json<ProductResponse>> {
    let product = state
        .product_service
        .update(UpdateProduct {
            id,
            owner: user,
            changes: payload.into(),
        })
        .await?;

    Ok(Json(ProductResponse::from(product)))
}

/// Delete a product owned by the caller; returns the deleted record
pub async fn delete_product(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> AppResult<Json<ProductResponse>> {
    let product = state.product_service.delete(id, &user).await?;
    Ok(Json(ProductResponse::from(product)))
}
