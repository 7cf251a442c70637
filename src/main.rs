use clap::Parser;
use mars_realestate::utils::error::{FETCH_FAILED_MESSAGE, FETCH_FAILED_SUGGESTION};
use mars_realestate::utils::logger;
use mars_realestate::{
    CliConfig, MarsApiService, MarsApiStatus, MarsProperty, OverviewViewModel, BASE_URL,
};
use std::future::Future;
use std::sync::Arc;

fn render_properties(properties: &[MarsProperty]) {
    if properties.is_empty() {
        println!("No Mars properties listed.");
        return;
    }

    println!("{:<10} {:<6} {:>16}  {}", "ID", "TYPE", "PRICE", "IMAGE");
    for property in properties {
        println!(
            "{:<10} {:<6} {:>16.2}  {}",
            property.id, property.category, property.price, property.image_url
        );
    }
    println!("{} properties", properties.len());
}

/// `None` when interrupted. A failed signal registration only disables the interrupt.
async fn settle_or_interrupt<F>(view_model: &OverviewViewModel, interrupt: F) -> Option<MarsApiStatus>
where
    F: Future<Output = std::io::Result<()>>,
{
    tokio::select! {
        status = view_model.settled() => Some(status),
        Ok(()) = interrupt => None,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    let directive = config.log_directive();
    if config.json_logs {
        logger::init_json_logger(&directive);
    } else {
        logger::init_cli_logger(&directive);
    }

    tracing::info!("Starting mars-realestate");
    tracing::debug!("Effective config: {:?}", config);

    let mut view_model = if config.base_url == BASE_URL && config.timeout_seconds.is_none() {
        OverviewViewModel::with_default_service()
    } else {
        OverviewViewModel::new(Arc::new(MarsApiService::from_config(&config)?))
    };

    if view_model.current_status() == MarsApiStatus::Loading {
        println!("⏳ Loading Mars properties...");
    }

    let settled = settle_or_interrupt(&view_model, tokio::signal::ctrl_c()).await;

    let Some(status) = settled else {
        tracing::info!("Interrupted, cancelling fetch");
        view_model.clear();
        std::process::exit(130);
    };

    match status {
        MarsApiStatus::Done => render_properties(&view_model.current_properties()),
        MarsApiStatus::Error => {
            view_model.clear();
            eprintln!("❌ {}", FETCH_FAILED_MESSAGE);
            eprintln!("💡 {}", FETCH_FAILED_SUGGESTION);
            std::process::exit(2);
        }
        MarsApiStatus::Loading => tracing::warn!("Overview cleared before the fetch settled"),
    }

    view_model.clear();
    Ok(())
}
