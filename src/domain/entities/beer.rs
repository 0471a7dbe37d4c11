//! Beer entities used by the search screen.

use serde::{Deserialize, Serialize};

/// A beer document as stored in the remote search index.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexedBeer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub abv: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub brewery_id: Option<String>,
    #[serde(default)]
    pub brewery_name: Option<String>,
    #[serde(default)]
    pub upc: Option<String>,
    /// Image locators ordered large, medium, small.
    #[serde(default)]
    pub images: Option<Vec<String>>,
}

/// A beer ready to be listed and shown on the description screen.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BeerItem {
    pub name: String,
    pub abv: Option<f64>,
    pub brewery: Option<String>,
    pub description: Option<String>,
    pub brewery_db_id: String,
    pub brewery_id: Option<String>,
    pub upc: Option<String>,
    pub image_large: Option<String>,
    pub image_medium: Option<String>,
    pub image_small: Option<String>,
}

impl BeerItem {
    /// Number of image sizes an indexed beer is expected to carry.
    pub const IMAGE_SIZES: usize = 3;

    /// Returns true if every image size is present.
    #[must_use]
    pub const fn has_all_images(&self) -> bool {
        self.image_large.is_some() && self.image_medium.is_some() && self.image_small.is_some()
    }
}

impl From<IndexedBeer> for BeerItem {
    fn from(doc: IndexedBeer) -> Self {
        let images = doc.images.unwrap_or_default();
        Self {
            name: doc.name,
            abv: doc.abv,
            brewery: doc.brewery_name,
            description: doc.description,
            brewery_db_id: doc.id,
            brewery_id: doc.brewery_id,
            upc: doc.upc,
            image_large: images.first().cloned(),
            image_medium: images.get(1).cloned(),
            image_small: images.get(2).cloned(),
        }
    }
}
