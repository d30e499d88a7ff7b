use clap::Parser;
use venue_trends::app::display::{format_average, star_glyphs};
use venue_trends::config::cli::Command;
use venue_trends::config::Settings;
use venue_trends::domain::model::VenueId;
use venue_trends::utils::error::{ErrorSeverity, VenueError};
use venue_trends::utils::logger;
use venue_trends::{CliConfig, TrendingEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting venue-trends");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let settings = match cli.settings() {
        Ok(settings) => settings,
        Err(e) => fail(e),
    };

    if let Err(e) = run(&cli, &settings).await {
        fail(e);
    }

    Ok(())
}

async fn run(cli: &CliConfig, settings: &Settings) -> venue_trends::Result<()> {
    let provider = settings.open_provider().await?;
    let engine = TrendingEngine::new(provider);

    match cli.command() {
        Command::Trending => {
            // The only place the wall clock is read; everything below takes `now` explicitly.
            let now = settings.now.unwrap_or_else(chrono::Utc::now);
            let mut entries = engine.trending(now).await?;
            if let Some(limit) = settings.limit {
                entries.truncate(limit);
            }

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
                return Ok(());
            }

            println!("Trending venues as of {}", now.format("%Y-%m-%d %H:%M UTC"));
            if entries.is_empty() {
                println!("No trending venues found.");
            }
            for (rank, entry) in entries.iter().enumerate() {
                println!(
                    "{:>2}. {:<20} score {:>6.2}   avg {} ⭐   reviews {}",
                    rank + 1,
                    entry.venue.name(),
                    entry.trend_score,
                    format_average(&entry.summary),
                    entry.summary.review_count
                );
            }
        }
        Command::Details { id } => {
            let details = engine.venue_details(&VenueId::new(id)).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&details)?);
                return Ok(());
            }

            let profile = &details.venue.profile;
            println!("{}", profile.name);
            if let Some(url) = &profile.maps_url {
                println!("  {}", url);
            }
            for (dimension, score) in profile.dimension_scores.iter() {
                println!("  {:<13} {} ⭐", dimension.label(), score);
            }
            println!(
                "  Average rating {} ⭐ from {} reviews",
                format_average(&details.summary),
                details.summary.review_count
            );

            println!("Reviews");
            if details.venue.reviews.is_empty() {
                println!("  No reviews yet.");
            }
            for review in &details.venue.reviews {
                println!(
                    "  {} {} ({}) {}",
                    star_glyphs(review.rating),
                    review.username,
                    review.rating,
                    review.timestamp.format("%Y-%m-%d")
                );
                println!("    {}", review.text);
            }
        }
        Command::Search { query } => {
            let venues = engine.search(&query).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&venues)?);
                return Ok(());
            }

            if venues.is_empty() {
                println!("No venues found.");
            }
            for venue in venues {
                println!("{:>4}  {}", venue.id, venue.name);
            }
        }
    }

    Ok(())
}

fn fail(e: VenueError) -> ! {
    tracing::error!(
        "❌ venue-trends failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
