//! Read and refresh commands built on a short-lived aggregator instance.

use anyhow::Context;
use socialleaf_core::{format_number, AppConfig, Platform};
use socialleaf_engine::Aggregator;

pub async fn refresh(config: &AppConfig, platform: Option<&str>) -> anyhow::Result<()> {
    let aggregator = Aggregator::from_config(config).context("building aggregator")?;

    match platform {
        Some(raw) => {
            let platform: Platform = raw.parse()?;
            aggregator.refresh_platform(platform).await;
            println!("refreshed {platform}");
        }
        None => {
            aggregator.refresh_all().await;
            aggregator.ensure_deep_data().await;
            println!("refreshed all connected platforms");
        }
    }

    if let Some(ts) = aggregator.last_fetch().await {
        println!("last fetch: {}", format_timestamp(ts));
    }
    Ok(())
}

pub async fn metrics(config: &AppConfig) -> anyhow::Result<()> {
    let aggregator = Aggregator::from_config(config).context("building aggregator")?;
    aggregator.initialize().await;

    let metrics = aggregator.unified_metrics().await;
    println!("total impressions  {:>10}", format_number(metrics.total_impressions));
    println!("engagement rate    {:>9.2}%", metrics.engagement_rate);
    println!("total comments     {:>10}", format_number(metrics.total_comments));
    println!("total shares       {:>10}", format_number(metrics.total_shares));
    println!("growth rate        {:>9.1}%", metrics.growth_rate);
    if let Some(ts) = aggregator.last_fetch().await {
        println!("as of              {}", format_timestamp(ts));
    }
    Ok(())
}

pub async fn trends(config: &AppConfig) -> anyhow::Result<()> {
    let aggregator = Aggregator::from_config(config).context("building aggregator")?;
    aggregator.initialize().await;

    println!(
        "{:<5} {:>10} {:>10} {:>10} {:>10}",
        "day", "youtube", "instagram", "twitter", "linkedin"
    );
    for point in aggregator.engagement_trends().await {
        println!(
            "{:<5} {:>10} {:>10} {:>10} {:>10}",
            point.name,
            cell(point.youtube),
            cell(point.instagram),
            cell(point.twitter),
            cell(point.linkedin),
        );
    }
    Ok(())
}

fn cell(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_owned(), |v| format!("{v:.1}"))
}

fn format_timestamp(epoch_ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(epoch_ms)
        .map_or_else(|| epoch_ms.to_string(), |dt| dt.to_rfc3339())
}
