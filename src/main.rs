use advert_pricing::config::AppConfig;
use advert_pricing::error::AppError;
use advert_pricing::pricing::{
    pricing_router, AccreditationTier, AdSize, AddOnSelection, AdvertiserProfile, DisplayType,
    PlacementCategory, PricingRequest, PricingResult, PricingService, PromotionalPack, RateCard,
    RateCardImporter, RateCardRepository,
};
use advert_pricing::telemetry;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Advert Pricing Service",
    about = "Quote and serve itemized advert campaign pricing",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Compute a pricing quote from the command line
    Pricing {
        #[command(subcommand)]
        command: PricingCommand,
    },
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
    /// Load the rate card from a CSV export instead of the built-in card
    #[arg(long)]
    ratecard_csv: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum PricingCommand {
    /// Render an itemized quote for one campaign selection
    Quote(QuoteArgs),
}

#[derive(Args, Debug)]
struct QuoteArgs {
    /// Placement category (main_banner, search_top, category_feed, detail_sidebar)
    #[arg(long, value_parser = parse_category)]
    category: PlacementCategory,
    /// Display type (single, rolling_triple, rolling_six)
    #[arg(long, value_parser = parse_display_type)]
    display_type: DisplayType,
    /// Advert size (compact, standard, wide, billboard)
    #[arg(long, value_parser = parse_size)]
    size: AdSize,
    /// Display-frequency package id
    #[arg(long)]
    package: String,
    /// Subscription length in months
    #[arg(long)]
    months: u32,
    /// Extended-exposure add-on id
    #[arg(long)]
    extended_exposure: Option<String>,
    /// Recurrent-after add-on id
    #[arg(long)]
    recurrent_after: Option<String>,
    /// Recurrent-every add-on id
    #[arg(long)]
    recurrent_every: Option<String>,
    /// Accreditation tier held by the advertiser (bronze, silver, gold, platinum)
    #[arg(long, value_parser = parse_tier)]
    accreditation: Option<AccreditationTier>,
    /// Count of the advertiser's currently active adverts
    #[arg(long, default_value_t = 0)]
    active_adverts: u32,
    /// Promotional pack id, if a bundle purchase applies
    #[arg(long)]
    promo_pack: Option<String>,
    /// Promotional pack discount rate in [0, 1]
    #[arg(long, default_value_t = 0.0)]
    promo_rate: f64,
    /// Load the rate card from a CSV export instead of the built-in card
    #[arg(long)]
    ratecard_csv: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Pricing {
            command: PricingCommand::Quote(args),
        } => run_quote(args),
    }
}

fn parse_category(raw: &str) -> Result<PlacementCategory, String> {
    PlacementCategory::from_key(raw).ok_or_else(|| format!("unknown placement category '{raw}'"))
}

fn parse_display_type(raw: &str) -> Result<DisplayType, String> {
    DisplayType::from_key(raw).ok_or_else(|| format!("unknown display type '{raw}'"))
}

fn parse_size(raw: &str) -> Result<AdSize, String> {
    AdSize::from_key(raw).ok_or_else(|| format!("unknown advert size '{raw}'"))
}

fn parse_tier(raw: &str) -> Result<AccreditationTier, String> {
    AccreditationTier::from_key(raw).ok_or_else(|| format!("unknown accreditation tier '{raw}'"))
}

fn load_ratecard(csv_path: Option<&PathBuf>) -> Result<RateCard, AppError> {
    match csv_path {
        Some(path) => Ok(RateCardImporter::from_path(path)?),
        None => Ok(RateCard::standard()),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(path) = args.ratecard_csv.take() {
        config.ratecard.csv_path = Some(path);
    }

    telemetry::init(&config.telemetry)?;

    let card = load_ratecard(config.ratecard.csv_path.as_ref())?;
    let card_version = card.version().to_string();
    let repository = Arc::new(RateCardRepository::new(card));
    let service = Arc::new(PricingService::new(repository));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(pricing_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, %card_version, "advert pricing service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let card = load_ratecard(args.ratecard_csv.as_ref())?;
    let repository = Arc::new(RateCardRepository::new(card));
    let service = PricingService::new(repository);

    let promotional_pack = args.promo_pack.map(|id| PromotionalPack {
        id,
        discount_rate: args.promo_rate,
    });

    let request = PricingRequest {
        category: args.category,
        display_type: args.display_type,
        size: args.size,
        package_id: args.package,
        months: args.months,
        add_ons: AddOnSelection {
            extended_exposure: args.extended_exposure,
            recurrent_after: args.recurrent_after,
            recurrent_every: args.recurrent_every,
        },
        advertiser: AdvertiserProfile {
            accreditation: args.accreditation,
            active_adverts: args.active_adverts,
        },
        promotional_pack,
    };

    let result = service.calculate_pricing(&request)?;
    render_quote(&request, &result);

    Ok(())
}

fn render_quote(request: &PricingRequest, result: &PricingResult) {
    println!("Campaign pricing quote");
    println!("Rate card: {}", result.ratecard_version);
    println!(
        "Placement: {} / {} / {}",
        request.category.label(),
        request.display_type.label(),
        request.size.label()
    );
    println!(
        "Package: {} ({}), {} month(s)",
        request.package_id, result.frequency_label, result.months
    );
    println!("Display promise: {}", result.display_schedule.promise());

    println!("\nOne-time setup");
    println!("- base setup fee: {}", result.base_setup_fee);
    println!(
        "- size fee at {:.0}%: {}",
        result.size_multiplier * 100.0,
        result.size_fee
    );
    println!("- setup fee payable: {}", result.setup_fee);

    println!("\nRecurring display cost");
    println!("- monthly package price: {}", result.monthly_display_cost);
    println!(
        "- subscription discount at {:.0}%: {}",
        result.subscription_discount_rate * 100.0,
        result.subscription_discount_amount
    );
    println!("- recurring cost payable: {}", result.total_recurring_cost);

    if !result.add_ons.is_empty() {
        println!("\nAdd-ons");
        for charge in &result.add_ons {
            println!(
                "- {} '{}' at {:.0}%: {} per month, {} over the subscription",
                charge.kind.label(),
                charge.id,
                charge.rate * 100.0,
                charge.monthly_cost,
                charge.subscription_cost
            );
        }
    }

    println!(
        "\nSubtotal before discounts: {}",
        result.subtotal_before_discount
    );

    if !result.discounts.is_empty() {
        println!("\nDiscounts");
        for discount in &result.discounts {
            println!(
                "- {}: {} ({})",
                discount.name, discount.amount, discount.detail
            );
        }
        println!("Total discount: {}", result.total_discount);
    }

    println!("\nAmount payable: {}", result.final_amount_payable);
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
