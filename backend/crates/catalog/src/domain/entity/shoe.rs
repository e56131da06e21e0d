//! Shoe Entity
//!
//! A product with size, color and one of three category variants. The
//! category is derived from the variant and cannot be changed afterwards.

use std::fmt;
use std::str::FromStr;

use kernel::error::validation::ValidationError;
use serde::{Deserialize, Serialize};

use super::product::{Product, ProductDict};

pub const DEFAULT_SIZE: &str = "10";
pub const DEFAULT_COLOR: &str = "Black";
pub const DEFAULT_SPORT_TYPE: &str = "running";
pub const DEFAULT_STYLE: &str = "sneaker";
pub const DEFAULT_MATERIAL: &str = "leather";

// ============================================================================
// Category
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShoeCategory {
    Athletic,
    #[default]
    Casual,
    Formal,
}

impl ShoeCategory {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ShoeCategory::Athletic => "athletic",
            ShoeCategory::Casual => "casual",
            ShoeCategory::Formal => "formal",
        }
    }
}

impl FromStr for ShoeCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "athletic" => Ok(ShoeCategory::Athletic),
            "casual" => Ok(ShoeCategory::Casual),
            "formal" => Ok(ShoeCategory::Formal),
            other => Err(ValidationError::new(
                "category",
                format!("Unknown shoe category: {other}"),
            )),
        }
    }
}

impl fmt::Display for ShoeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Variant
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShoeVariant {
    Athletic { sport_type: String },
    Casual { style: String },
    Formal { material: String },
}

impl ShoeVariant {
    /// Build the variant for `category`; a blank detail takes the variant default
    pub fn for_category(category: ShoeCategory, detail: Option<String>) -> Self {
        let detail = detail.filter(|d| !d.trim().is_empty());
        match category {
            ShoeCategory::Athletic => ShoeVariant::Athletic {
                sport_type: detail.unwrap_or_else(|| DEFAULT_SPORT_TYPE.to_string()),
            },
            ShoeCategory::Casual => ShoeVariant::Casual {
                style: detail.unwrap_or_else(|| DEFAULT_STYLE.to_string()),
            },
            ShoeCategory::Formal => ShoeVariant::Formal {
                material: detail.unwrap_or_else(|| DEFAULT_MATERIAL.to_string()),
            },
        }
    }

    pub fn category(&self) -> ShoeCategory {
        match self {
            ShoeVariant::Athletic { .. } => ShoeCategory::Athletic,
            ShoeVariant::Casual { .. } => ShoeCategory::Casual,
            ShoeVariant::Formal { .. } => ShoeCategory::Formal,
        }
    }

    /// The variant's own attribute value
    pub fn detail(&self) -> &str {
        match self {
            ShoeVariant::Athletic { sport_type } => sport_type,
            ShoeVariant::Casual { style } => style,
            ShoeVariant::Formal { material } => material,
        }
    }
}

// ============================================================================
// Attribute bag
// ============================================================================

/// Shoe attributes as stored in the `products.attributes` column
///
/// Only the key belonging to the shoe's variant is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoeAttributes {
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
}

impl ShoeAttributes {
    /// JSON text for the storage column
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse the storage column; blank text is an empty bag
    pub fn decode(text: &str) -> Result<Self, ValidationError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(text)
            .map_err(|e| ValidationError::new("attributes", format!("Malformed attributes: {e}")))
    }

    fn detail_for(&self, category: ShoeCategory) -> Option<String> {
        match category {
            ShoeCategory::Athletic => self.sport_type.clone(),
            ShoeCategory::Casual => self.style.clone(),
            ShoeCategory::Formal => self.material.clone(),
        }
    }
}

/// Attributes as found in a dictionary: already decoded, or still JSON text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributesField {
    Decoded(ShoeAttributes),
    Encoded(String),
}

impl AttributesField {
    pub fn into_attributes(self) -> Result<ShoeAttributes, ValidationError> {
        match self {
            AttributesField::Decoded(attributes) => Ok(attributes),
            AttributesField::Encoded(text) => ShoeAttributes::decode(&text),
        }
    }
}

// ============================================================================
// Shoe
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Shoe {
    product: Product,
    size: String,
    color: String,
    image: Option<String>,
    variant: ShoeVariant,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Shoe {
    /// Size and color start at their defaults
    pub fn new(product: Product, variant: ShoeVariant) -> Self {
        Self {
            product,
            size: DEFAULT_SIZE.to_string(),
            color: DEFAULT_COLOR.to_string(),
            image: None,
            variant,
        }
    }

    /// Blank values keep the default
    pub fn with_size(mut self, size: Option<String>) -> Self {
        if let Some(size) = non_blank(size) {
            self.size = size;
        }
        self
    }

    /// Blank values keep the default
    pub fn with_color(mut self, color: Option<String>) -> Self {
        if let Some(color) = non_blank(color) {
            self.color = color;
        }
        self
    }

    pub fn with_image(mut self, image: Option<String>) -> Self {
        self.image = non_blank(image);
        self
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn product_mut(&mut self) -> &mut Product {
        &mut self.product
    }

    pub fn size(&self) -> &str {
        &self.size
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn variant(&self) -> &ShoeVariant {
        &self.variant
    }

    pub fn category(&self) -> ShoeCategory {
        self.variant.category()
    }

    pub fn attributes(&self) -> ShoeAttributes {
        let mut attributes = ShoeAttributes {
            size: Some(self.size.clone()),
            color: Some(self.color.clone()),
            category: Some(self.category().to_string()),
            image: self.image.clone(),
            ..Default::default()
        };
        match &self.variant {
            ShoeVariant::Athletic { sport_type } => attributes.sport_type = Some(sport_type.clone()),
            ShoeVariant::Casual { style } => attributes.style = Some(style.clone()),
            ShoeVariant::Formal { material } => attributes.material = Some(material.clone()),
        }
        attributes
    }

    pub fn to_dict(&self) -> ShoeDict {
        ShoeDict {
            product: self.product.to_dict(),
            size: Some(self.size.clone()),
            color: Some(self.color.clone()),
            category: Some(self.category().to_string()),
            image: self.image.clone(),
            attributes: Some(AttributesField::Decoded(self.attributes())),
            sport_type: None,
            style: None,
            material: None,
        }
    }

    /// Rebuild from a dictionary
    ///
    /// Top-level fields win over the attribute bag; anything missing from
    /// both takes the shoe defaults.
    pub fn from_dict(dict: ShoeDict) -> Result<Self, ValidationError> {
        let attributes = match dict.attributes {
            Some(field) => field.into_attributes()?,
            None => ShoeAttributes::default(),
        };

        let category = match non_blank(dict.category).or_else(|| non_blank(attributes.category.clone())) {
            Some(name) => name.parse::<ShoeCategory>()?,
            None => ShoeCategory::default(),
        };

        let top_level_detail = match category {
            ShoeCategory::Athletic => dict.sport_type,
            ShoeCategory::Casual => dict.style,
            ShoeCategory::Formal => dict.material,
        };
        let detail = non_blank(top_level_detail).or_else(|| attributes.detail_for(category));

        let product = Product::from_dict(dict.product)?;

        Ok(Shoe::new(product, ShoeVariant::for_category(category, detail))
            .with_size(non_blank(dict.size).or(attributes.size))
            .with_color(non_blank(dict.color).or(attributes.color))
            .with_image(non_blank(dict.image).or(attributes.image)))
    }
}

/// Serialized shoe: product fields plus shoe fields and the attribute bag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoeDict {
    #[serde(flatten)]
    pub product: ProductDict,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub attributes: Option<AttributesField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
}
