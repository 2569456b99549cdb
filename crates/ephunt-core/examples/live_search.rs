use ephunt_core::{EpisodeSearch, NyaaAdapter, Query, RenderStyle, ToshoAdapter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let search_text = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "one pace".to_string());

    let search = EpisodeSearch::with_adapters(vec![
        Box::new(NyaaAdapter::new()?),
        Box::new(ToshoAdapter::new()?),
    ]);

    println!("{}", "=".repeat(60));
    println!("🔍 Searching for: {}", search_text);
    println!("{}\n", "=".repeat(60));

    let query = Query::builder()
        .match_latest(true)
        .build();

    let episodes = search.run(&search_text, &query).await;

    if episodes.is_empty() {
        println!("❌ No results!");
        return Ok(());
    }

    for episode in &episodes {
        println!(
            "  {}  ->  {}",
            ephunt_core::render(episode, RenderStyle::Bracketed),
            episode.link
        );
    }
    println!("\n✅ {} episode(s) found", episodes.len());

    Ok(())
}
