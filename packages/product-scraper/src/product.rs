use serde::{Deserialize, Serialize};

/// One scraped product. Field order is the CSV column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub url: String,
    pub name: String,
    pub brand: String,
    pub price: String,
    pub rating: String,
    pub review_count: String,
    pub category: String,
    pub description: String,
    pub ingredients: String,
    pub size: String,
    pub availability: String,
}

pub const CSV_COLUMNS: [&str; 11] = [
    "url",
    "name",
    "brand",
    "price",
    "rating",
    "review_count",
    "category",
    "description",
    "ingredients",
    "size",
    "availability",
];

impl ProductRecord {
    /// Trim every field in place.
    pub fn trimmed(mut self) -> Self {
        for field in [
            &mut self.url,
            &mut self.name,
            &mut self.brand,
            &mut self.price,
            &mut self.rating,
            &mut self.review_count,
            &mut self.category,
            &mut self.description,
            &mut self.ingredients,
            &mut self.size,
            &mut self.availability,
        ] {
            let trimmed = field.trim();
            if trimmed.len() != field.len() {
                *field = trimmed.to_string();
            }
        }
        self
    }
}
