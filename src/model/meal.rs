use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Display;

/// Type-safe identifier for Meals.
///
/// The backend hands out opaque string ids; the cart keys its line items by this value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MealId(pub String);

impl MealId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MealId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for MealId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for MealId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category reference embedded in a meal payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub id: String,
    pub name: String,
}

/// Provider reference embedded in a meal payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSummary {
    pub id: String,
    pub business_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

fn default_available() -> bool {
    true
}

/// A meal as served by the marketplace backend.
///
/// Only `id`, `name` and `price` are required. Fields the backend sends that this
/// type does not model are kept in `extra`, so a meal copied into the cart and
/// written back out loses nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: MealId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Unit price in BDT.
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_profile_id: Option<String>,
    #[serde(default = "default_available")]
    pub is_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategorySummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_profile: Option<ProviderSummary>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Meal {
    /// Creates a meal with only the required fields set.
    ///
    /// # Arguments
    /// * `id` - Backend meal id
    /// * `name` - Display name
    /// * `price` - Unit price
    pub fn new(id: impl Into<MealId>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            price,
            image: None,
            category_id: None,
            provider_profile_id: None,
            is_available: true,
            avg_rating: None,
            review_count: None,
            created_at: None,
            updated_at: None,
            category: None,
            provider_profile: None,
            extra: Map::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Attaches the provider profile, also filling `provider_profile_id`.
    pub fn with_provider(mut self, id: impl Into<String>, business_name: impl Into<String>) -> Self {
        let id = id.into();
        self.provider_profile_id = Some(id.clone());
        self.provider_profile = Some(ProviderSummary {
            id,
            business_name: business_name.into(),
            logo: None,
        });
        self
    }

    /// The provider's display name, when the payload carried the provider profile.
    pub fn provider_name(&self) -> Option<&str> {
        self.provider_profile
            .as_ref()
            .map(|provider| provider.business_name.as_str())
    }
}
