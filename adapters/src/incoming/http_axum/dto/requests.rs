use domain::prefetch::PrefetchRegion;
use lunar_tiles_application::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
#[cfg(feature = "docs")]
use utoipa::IntoParams;
use validator::{Validate, ValidationError};

const fn default_zoom() -> u8 {
    2
}

const fn default_end() -> u32 {
    4
}

/// Region to prefetch. Omitted parameters fall back to a 5x5 block at zoom 2.
#[cfg_attr(feature = "docs", derive(IntoParams))]
#[cfg_attr(feature = "docs", into_params(parameter_in = Query))]
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_ranges", skip_on_field_errors = false))]
pub struct GenerateTilesQuery {
    #[serde(default = "default_zoom")]
    #[cfg_attr(feature = "docs", param(example = 2, minimum = 0))]
    pub zoom: u8,
    #[serde(default)]
    #[cfg_attr(feature = "docs", param(example = 0, minimum = 0))]
    pub start_row: u32,
    #[serde(default = "default_end")]
    #[cfg_attr(feature = "docs", param(example = 4, minimum = 0))]
    pub end_row: u32,
    #[serde(default)]
    #[cfg_attr(feature = "docs", param(example = 0, minimum = 0))]
    pub start_col: u32,
    #[serde(default = "default_end")]
    #[cfg_attr(feature = "docs", param(example = 4, minimum = 0))]
    pub end_col: u32,
}

impl Default for GenerateTilesQuery {
    fn default() -> Self {
        Self {
            zoom: default_zoom(),
            start_row: 0,
            end_row: default_end(),
            start_col: 0,
            end_col: default_end(),
        }
    }
}

fn validate_ranges(query: &GenerateTilesQuery) -> Result<(), ValidationError> {
    if query.start_row > query.end_row {
        return Err(ValidationError::new("row_range")
            .with_message("start_row must not exceed end_row".into()));
    }
    if query.start_col > query.end_col {
        return Err(ValidationError::new("col_range")
            .with_message("start_col must not exceed end_col".into()));
    }
    Ok(())
}

impl GenerateTilesQuery {
    pub fn to_region(&self) -> AppResult<PrefetchRegion> {
        PrefetchRegion::new(
            self.zoom,
            (self.start_row, self.end_row),
            (self.start_col, self.end_col),
        )
        .map_err(AppError::from)
    }
}
