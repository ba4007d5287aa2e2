use axum::extract::{Path, Query, rejection::QueryRejection};
use domain::product::Product;
use lunar_tiles_application::error::AppError;
use validator::Validate;

use crate::incoming::http_axum::{dto::requests::GenerateTilesQuery, error_mapper::HttpError};

/// Raw `/tile/{product}/{zoom}/{row}/{col}` segments. Coordinates are parsed only once
/// the product is known, so an unknown product always wins over a malformed coordinate.
pub type TilePath = Path<(String, String, String, String)>;

pub type GenerateQuery = Result<Query<GenerateTilesQuery>, QueryRejection>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileCoordinates {
    pub zoom: u8,
    pub row: u32,
    pub col: u32,
}

pub fn extract_tile_coordinates(
    product: &Product,
    zoom: &str,
    row: &str,
    col: &str,
) -> Result<TileCoordinates, HttpError> {
    Ok(TileCoordinates {
        zoom: extract_zoom(product, zoom)?,
        row: extract_index("row", row)?,
        col: extract_index("col", col)?,
    })
}

fn extract_zoom(product: &Product, raw: &str) -> Result<u8, HttpError> {
    let requested: i64 = raw.parse().map_err(|_| invalid_segment("zoom", raw))?;
    u8::try_from(requested)
        .ok()
        .filter(|zoom| product.supports_zoom(*zoom))
        .ok_or_else(|| {
            HttpError(AppError::InvalidZoom {
                product: product.id.to_string(),
                zoom: requested,
                max_zoom: product.max_zoom,
            })
        })
}

fn extract_index(name: &str, raw: &str) -> Result<u32, HttpError> {
    raw.parse().map_err(|_| invalid_segment(name, raw))
}

fn invalid_segment(name: &str, raw: &str) -> HttpError {
    HttpError(AppError::ValidationError {
        message: format!("{name} must be a non-negative integer, got '{raw}'"),
    })
}

/// Decodes and validates the prefetch query. Call after the product lookup.
pub fn extract_generate_query(query: GenerateQuery) -> Result<GenerateTilesQuery, HttpError> {
    let Query(query) = query.map_err(|rejection| {
        HttpError(AppError::ValidationError {
            message: rejection.body_text(),
        })
    })?;
    query.validate().map_err(|e| {
        HttpError(AppError::ValidationError {
            message: e.to_string(),
        })
    })?;
    Ok(query)
}
