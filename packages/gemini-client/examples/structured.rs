//! Structured output example with a schema derived from a Rust type

use gemini_client::GeminiClient;
use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Debug, Deserialize, JsonSchema)]
struct Product {
    /// Product name
    name: String,
    /// Brand name
    brand: String,
    /// Price as shown, including currency symbol
    price: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = GeminiClient::from_env()?;

    let system = "Extract product information from text.";
    let user = "The Rare Beauty Soft Pinch Liquid Blush sells for $23.";

    let product: Product = client
        .extract::<Product>("gemini-2.5-flash", system, user)
        .await?;

    println!("Name:  {}", product.name);
    println!("Brand: {}", product.brand);
    println!("Price: {:?}", product.price);

    Ok(())
}
