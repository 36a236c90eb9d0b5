use anyhow::{Context as _, Result};
use quotesync_core::Quote;
use quotesync_service::{QuoteService, ServiceError};
use std::path::Path;

/// Strips the layer prefix from errors caused by the user's own input.
fn user_error(err: ServiceError) -> anyhow::Error {
    match err {
        ServiceError::Storage(e) if e.is_rejection() => anyhow::anyhow!("{e}"),
        other => other.into(),
    }
}

fn print_quote(quote: &Quote) {
    if quote.is_remote_origin() {
        println!("{quote} [remote]");
    } else {
        println!("{quote}");
    }
}

pub(crate) async fn run_show(quotes: &QuoteService) -> Result<()> {
    match quotes.show().await {
        Some(quote) => print_quote(&quote),
        None => println!("No quotes yet."),
    }
    Ok(())
}

pub(crate) async fn run_random(quotes: &QuoteService, category: Option<&str>) -> Result<()> {
    match quotes.random(category).await {
        Some(quote) => print_quote(&quote),
        None => println!("No quotes in category {}.", category.unwrap_or("all")),
    }
    Ok(())
}

pub(crate) async fn run_list(
    quotes: &QuoteService,
    category: Option<&str>,
    json: bool,
) -> Result<()> {
    let results = quotes.list(category).await;
    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        results.iter().for_each(print_quote);
    }
    Ok(())
}

pub(crate) async fn run_categories(quotes: &QuoteService) -> Result<()> {
    for category in quotes.categories().await {
        println!("{category}");
    }
    Ok(())
}

pub(crate) async fn run_add(quotes: &QuoteService, text: &str, category: &str) -> Result<()> {
    let quote = quotes.add(text, category).await.map_err(user_error)?;
    println!("Quote added successfully! ({})", quote.id);
    Ok(())
}

pub(crate) async fn run_import(quotes: &QuoteService, file: &Path) -> Result<()> {
    let document = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let outcome = quotes.import_json(&document).await.map_err(user_error)?;
    println!(
        "Quotes imported successfully! Added: {} (skipped {})",
        outcome.added(),
        outcome.skipped
    );
    Ok(())
}

pub(crate) async fn run_export(quotes: &QuoteService, file: &Path) -> Result<()> {
    let document = quotes.export_json().await?;
    if file.as_os_str() == "-" {
        println!("{document}");
    } else {
        std::fs::write(file, document)
            .with_context(|| format!("failed to write {}", file.display()))?;
        println!("Exported {} quotes to {}", quotes.count().await, file.display());
    }
    Ok(())
}
