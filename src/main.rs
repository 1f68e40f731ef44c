use chrono::{DateTime, Utc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use weeklydigest::config::Config;
use weeklydigest::core::window::should_skip_run;
use weeklydigest::core::Result;
use weeklydigest::notify::SlackNotifier;
use weeklydigest::reports::{MySqlReportRepository, ReportService};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weeklydigest=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };
    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Configuration validation failed");
        std::process::exit(1);
    }

    // Schedule gate: the digest goes out on Mondays. The external cron fires
    // daily in production, so an off-Monday run is a deliberate no-op unless
    // the manual-run override is set. The gate always checks the actual
    // current day; START_DATE only anchors the reporting window below.
    // Exit code 0: skipped, not failed.
    if should_skip_run(Utc::now(), config.is_production(), config.app.manual_run) {
        tracing::info!("Not Monday in the report timezone, skipping weekly digest");
        return;
    }

    let reference = config.app.reference_date.unwrap_or_else(Utc::now);

    tracing::info!("Starting weekly digest");
    tracing::info!("Environment: {}", config.app.env);

    if let Err(e) = run(&config, reference).await {
        tracing::error!(error = %e, "Weekly digest failed");
        std::process::exit(1);
    }

    tracing::info!("Weekly digest delivered");
}

async fn run(config: &Config, reference: DateTime<Utc>) -> Result<()> {
    let pool = config.database.create_pool().await?;
    tracing::info!("Database pool initialized");

    let repo = MySqlReportRepository::new(pool);
    let service = ReportService::new(repo, config.report.operator_collective_id);

    let report = service.generate(reference).await?;
    let text = report.render();

    // The rendered digest also goes to stdout for the cron log
    tracing::info!("\n{}", text);

    let notifier = SlackNotifier::new(
        config.slack.webhook_url.clone(),
        config.slack.channel.clone(),
        config.app.record_requests,
    );
    notifier.post_message(&text).await?;

    Ok(())
}
