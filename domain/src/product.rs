use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::{DomainError, DomainResult};

const MAX_PRODUCT_ID_LEN: usize = 64;

/// Identifier of a map product, used in URLs and as the on-disk directory name.
///
/// Only lowercase ASCII letters, digits, `_` and `-` are accepted so an id can never
/// escape the tile directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> DomainResult<Self> {
        let id = id.into();
        if id.is_empty() || id.len() > MAX_PRODUCT_ID_LEN {
            return Err(DomainError::InvalidProductId(format!(
                "'{id}' must be between 1 and {MAX_PRODUCT_ID_LEN} characters"
            )));
        }
        if let Some(bad) = id
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_' || *c == '-'))
        {
            return Err(DomainError::InvalidProductId(format!(
                "'{id}' contains unsupported character '{bad}'"
            )));
        }
        Ok(Self(id))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProductId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProductId> for String {
    fn from(value: ProductId) -> Self {
        value.0
    }
}

impl FromStr for ProductId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Encoded image format a product is published in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileFormat {
    #[serde(rename = "jpg", alias = "jpeg")]
    Jpeg,
    #[serde(rename = "png")]
    Png,
}

impl TileFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }

    #[must_use]
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }
}

impl fmt::Display for TileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for TileFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            other => Err(DomainError::InvalidTileFormat(format!(
                "'{other}' is not one of jpg, png"
            ))),
        }
    }
}

/// Upstream URL prefix with `{zoom}`, `{row}` and `{col}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub struct EndpointTemplate(String);

impl EndpointTemplate {
    pub const PLACEHOLDERS: [&'static str; 3] = ["{zoom}", "{row}", "{col}"];

    pub fn new(template: impl Into<String>) -> DomainResult<Self> {
        let template = template.into();
        let missing: Vec<&str> = Self::PLACEHOLDERS
            .iter()
            .copied()
            .filter(|p| !template.contains(p))
            .collect();
        if !missing.is_empty() {
            return Err(DomainError::InvalidEndpointTemplate(format!(
                "'{template}' is missing {}",
                missing.join(", ")
            )));
        }
        Ok(Self(template))
    }

    #[must_use]
    pub fn render(&self, zoom: u8, row: u32, col: u32) -> String {
        self.0
            .replace("{zoom}", &zoom.to_string())
            .replace("{row}", &row.to_string())
            .replace("{col}", &col.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<EndpointTemplate> for String {
    fn from(value: EndpointTemplate) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub layer: String,
    pub endpoint: EndpointTemplate,
    pub max_zoom: u8,
    pub format: TileFormat,
}

impl Product {
    #[must_use]
    pub fn supports_zoom(&self, zoom: u8) -> bool {
        zoom <= self.max_zoom
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn product_id_accepts_slug_characters() {
        let id = ProductId::new("wac_global-2").unwrap();
        assert_eq!(id.as_str(), "wac_global-2");
        assert_eq!(id.to_string(), "wac_global-2");
    }

    #[test]
    fn product_id_rejects_path_traversal_and_uppercase() {
        assert!(ProductId::new("../etc").is_err());
        assert!(ProductId::new("WAC").is_err());
        assert!(ProductId::new("").is_err());
        assert!(ProductId::new("a".repeat(65)).is_err());
    }

    #[test]
    fn product_id_deserializes_with_validation() {
        let ok: ProductId = serde_json::from_str("\"lola_shade\"").unwrap();
        assert_eq!(ok.as_str(), "lola_shade");
        assert!(serde_json::from_str::<ProductId>("\"bad id\"").is_err());
    }

    #[test]
    fn tile_format_metadata() {
        assert_eq!(TileFormat::Jpeg.extension(), "jpg");
        assert_eq!(TileFormat::Jpeg.mime_type(), "image/jpeg");
        assert_eq!(TileFormat::Png.extension(), "png");
        assert_eq!(TileFormat::Png.mime_type(), "image/png");
        assert_eq!("JPEG".parse::<TileFormat>().unwrap(), TileFormat::Jpeg);
        assert!("webp".parse::<TileFormat>().is_err());
    }

    #[test]
    fn tile_format_serde_uses_extensions() {
        assert_eq!(serde_json::to_string(&TileFormat::Jpeg).unwrap(), "\"jpg\"");
        let png: TileFormat = serde_json::from_str("\"png\"").unwrap();
        assert_eq!(png, TileFormat::Png);
    }

    #[test]
    fn endpoint_template_requires_all_placeholders() {
        let err = EndpointTemplate::new("https://example.test/{zoom}/{row}").unwrap_err();
        assert!(err.to_string().contains("{col}"));
    }

    #[test]
    fn endpoint_template_renders_coordinates() {
        let template = EndpointTemplate::new("https://example.test/L/{zoom}/{row}/{col}").unwrap();
        assert_eq!(template.render(3, 4, 5), "https://example.test/L/3/4/5");
    }
}
