//! MoFresh CLI - drive the marketplace client from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (demo mode resolves the role from the email)
//! mofresh login -e kigali@mofresh.rw -p secret
//!
//! # Register and verify in one go
//! mofresh register --name "Aline Uwase" --phone 0788000000 -e aline@mofresh.rw -p secret --otp 123456
//!
//! # Local cart
//! mofresh cart add --id p1 --name Tomatoes --price 800 --unit kg
//! mofresh cart show
//! mofresh cart checkout -e buyer@mofresh.rw -p secret
//!
//! # Listings
//! mofresh products list
//! mofresh tricycles public --site site-1
//! mofresh cold-rooms list -e admin@mofresh.rw -p secret
//! mofresh assets set-status boxes box-7 in-use -e kigali@mofresh.rw -p secret
//! ```
//!
//! # Environment Variables
//!
//! - `MOFRESH_API_BASE_URL`, `MOFRESH_AUTH_MODE`, `MOFRESH_STORAGE_DIR` - see
//!   `mofresh_client::config`
//! - `MOFRESH_EMAIL`, `MOFRESH_PASSWORD` - default credentials for commands
//!   that sign in first
//! - `SENTRY_DSN` - report errors to Sentry
//! - `RUST_LOG` - log filter (default `mofresh_client=info,mofresh_cli=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Args, Parser, Subcommand};
use mofresh_client::ClientConfig;
use mofresh_client::models::{AssetStatus, ColdAssetKind};
use secrecy::ExposeSecret;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

#[derive(Parser)]
#[command(name = "mofresh")]
#[command(author, version, about = "MoFresh cold-chain marketplace client")]
struct Cli {
    /// Emit JSON log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Credentials for commands that need a signed-in session.
#[derive(Args, Clone)]
struct Credentials {
    /// Account email
    #[arg(short, long, env = "MOFRESH_EMAIL")]
    email: String,

    /// Account password
    #[arg(short, long, env = "MOFRESH_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and show the session
    Login(Credentials),
    /// Register an account, optionally verifying it straight away
    Register {
        /// Full name
        #[arg(long)]
        name: String,

        /// Phone number
        #[arg(long)]
        phone: String,

        /// Account email
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,

        /// Verification code to submit after registering
        #[arg(long)]
        otp: Option<String>,

        /// Ask for a new code before verifying
        #[arg(long)]
        resend: bool,

        /// Supporting document to upload (repeatable)
        #[arg(long = "document")]
        documents: Vec<std::path::PathBuf>,
    },
    /// Manage the local cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Product listings
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Cold room capacity
    ColdRooms {
        #[command(subcommand)]
        action: ColdRoomsAction,
    },
    /// Orders of the signed-in user
    Orders(Credentials),
    /// Rentals of the signed-in user
    Rentals(Credentials),
    /// Refrigerated tricycles
    Tricycles {
        #[command(subcommand)]
        action: TricyclesAction,
    },
    /// Cold boxes, plates and tricycles
    Assets {
        #[command(subcommand)]
        action: AssetsAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add one unit of a product
    Add {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: rust_decimal::Decimal,
        #[arg(long, default_value = "unit")]
        unit: String,
        #[arg(long, default_value = "")]
        image: String,
    },
    /// Remove a product line
    Remove {
        /// Product id
        id: String,
    },
    /// Empty the cart
    Clear,
    /// Show lines and totals
    Show,
    /// Sign in, place an order for the cart, then empty it
    Checkout {
        #[command(flatten)]
        credentials: Credentials,

        /// Delivery address
        #[arg(long)]
        address: Option<String>,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List all products
    List,
    /// Add a listed product to the cart
    AddToCart {
        /// Product id
        id: String,
    },
}

#[derive(Subcommand)]
enum ColdRoomsAction {
    /// List cold rooms
    List(Credentials),
    /// Show occupancy of one room
    Occupancy {
        /// Cold room id
        id: String,

        #[command(flatten)]
        credentials: Credentials,
    },
}

#[derive(Subcommand)]
enum TricyclesAction {
    /// Publicly listed tricycles, no sign-in needed
    Public {
        /// Only tricycles stationed at this site
        #[arg(long)]
        site: Option<String>,
    },
}

#[derive(Subcommand)]
enum AssetsAction {
    /// List assets of one kind
    List {
        /// tricycles, boxes or plates
        kind: ColdAssetKind,

        #[command(flatten)]
        credentials: Credentials,
    },
    /// Change the status of one asset
    SetStatus {
        /// tricycles, boxes or plates
        kind: ColdAssetKind,

        /// Asset id
        id: String,

        /// available, in-use, rented or maintenance
        status: AssetStatus,

        #[command(flatten)]
        credentials: Credentials,
    },
}

fn init_sentry(config: &ClientConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.expose_secret(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR => sentry_tracing::EventFilter::Event,
        tracing::Level::WARN | tracing::Level::INFO => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing(json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mofresh_client=info,mofresh_cli=info".into());

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter));

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(cli.json);
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    // Sentry must be initialized before the subscriber
    let _sentry_guard = init_sentry(&config);
    init_tracing(cli.json);

    let result: Result<(), Box<dyn std::error::Error>> = run(cli.command, config).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(command: Commands, config: ClientConfig) -> Result<(), Box<dyn std::error::Error>> {
    let app = commands::App::new(config)?;

    match command {
        Commands::Login(credentials) => {
            commands::auth::login(&app, &credentials.email, &credentials.password).await?;
        }
        Commands::Register {
            name,
            phone,
            email,
            password,
            otp,
            resend,
            documents,
        } => {
            let form = commands::auth::Registration {
                name,
                phone,
                email,
                password,
                documents,
            };
            commands::auth::register(&app, form, resend, otp.as_deref()).await?;
        }
        Commands::Cart { action } => match action {
            CartAction::Add {
                id,
                name,
                price,
                unit,
                image,
            } => commands::cart::add(&app, id, name, price, unit, image)?,
            CartAction::Remove { id } => commands::cart::remove(&app, &id)?,
            CartAction::Clear => commands::cart::clear(&app)?,
            CartAction::Show => commands::cart::show(&app)?,
            CartAction::Checkout {
                credentials,
                address,
            } => {
                commands::auth::sign_in(&app, &credentials.email, &credentials.password).await?;
                commands::cart::checkout(&app, address).await?;
            }
        },
        Commands::Products { action } => match action {
            ProductsAction::List => commands::catalog::products(&app).await?,
            ProductsAction::AddToCart { id } => commands::catalog::add_to_cart(&app, &id).await?,
        },
        Commands::ColdRooms { action } => match action {
            ColdRoomsAction::List(credentials) => {
                commands::auth::sign_in(&app, &credentials.email, &credentials.password).await?;
                commands::catalog::cold_rooms(&app).await?;
            }
            ColdRoomsAction::Occupancy { id, credentials } => {
                commands::auth::sign_in(&app, &credentials.email, &credentials.password).await?;
                commands::catalog::occupancy(&app, &id).await?;
            }
        },
        Commands::Orders(credentials) => {
            commands::auth::sign_in(&app, &credentials.email, &credentials.password).await?;
            commands::catalog::my_orders(&app).await?;
        }
        Commands::Rentals(credentials) => {
            commands::auth::sign_in(&app, &credentials.email, &credentials.password).await?;
            commands::catalog::my_rentals(&app).await?;
        }
        Commands::Tricycles { action } => match action {
            TricyclesAction::Public { site } => {
                commands::catalog::public_tricycles(&app, site.as_deref()).await?;
            }
        },
        Commands::Assets { action } => match action {
            AssetsAction::List { kind, credentials } => {
                commands::auth::sign_in(&app, &credentials.email, &credentials.password).await?;
                commands::assets::list(&app, kind).await?;
            }
            AssetsAction::SetStatus {
                kind,
                id,
                status,
                credentials,
            } => {
                commands::auth::sign_in(&app, &credentials.email, &credentials.password).await?;
                commands::assets::set_status(&app, kind, &id, status).await?;
            }
        },
    }
    Ok(())
}
