//! Grounded search example
//!
//! Run with `GOOGLE_GENAI_USE_VERTEXAI=false GOOGLE_API_KEY=... cargo run --example grounded`

use gemini_client::GeminiClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = GeminiClient::from_env()?;

    let response = client
        .grounded_search(
            "gemini-2.5-flash",
            "You are a beauty trend researcher. Cite what you find.",
            "What lip trends are popular this month?",
            0.01,
        )
        .await?;

    println!("{}\n", response.text());

    if let Some(grounding) = response.grounding_metadata() {
        println!("Queries: {:?}", grounding.web_search_queries);
        for chunk in &grounding.grounding_chunks {
            if let Some(web) = &chunk.web {
                println!("  - {:?} {:?}", web.title, web.uri);
            }
        }
    }

    Ok(())
}
