use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{
    config::load_settings, ClientSettings, StorefrontClient, StorefrontSession, SubmissionOutcome,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod coupon;
mod render;

#[derive(Parser, Debug)]
#[command(name = "storefront", about = "Browse the dessert catalog and place orders")]
struct Args {
    /// Base URL serving both the catalog and the order endpoint.
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    catalog_url: Option<String>,
    #[arg(long)]
    order_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the catalog and the (empty) cart.
    Catalog,
    /// Add products by id, in order, then submit the cart.
    Order {
        #[arg(long = "add", value_name = "ID", required = true, num_args = 1..)]
        add: Vec<String>,
        /// Coupon code sent along with the order.
        #[arg(long)]
        coupon: Option<String>,
    },
    /// Check coupon codes against coupon files. A code is valid when at
    /// least two of the files contain it.
    Coupon {
        #[arg(long = "code", value_name = "CODE", required = true)]
        codes: Vec<String>,
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    if let Command::Coupon { codes, files } = &args.command {
        for line in coupon::check_codes(codes, files).await? {
            println!("{line}");
        }
        return Ok(());
    }

    let settings = resolve_settings(&args)?;
    run_storefront(StorefrontClient::new(settings), args.command).await
}

fn resolve_settings(args: &Args) -> Result<ClientSettings> {
    let mut settings = load_settings()?;
    if let Some(url) = &args.server_url {
        settings.set_server_url(url)?;
    }
    if let Some(url) = &args.catalog_url {
        settings.set_catalog_url(url)?;
    }
    if let Some(url) = &args.order_url {
        settings.set_order_url(url)?;
    }
    Ok(settings)
}

async fn run_storefront(client: StorefrontClient, command: Command) -> Result<()> {
    info!(catalog_url = %client.settings().catalog_url, "fetching catalog");
    let mut session = StorefrontSession::new();
    println!("{}", render::render_view(&session.view()));
    session.load_catalog(&client).await;

    match command {
        Command::Order { add, coupon } => {
            for id in &add {
                if session.add_to_cart_by_id(id).is_none() {
                    warn!(product_id = %id, "no such product in catalog; skipping");
                }
            }
            session.set_coupon_code(coupon.as_deref());
            info!(
                quantity = session.cart().total_quantity(),
                coupon = session.coupon_code(),
                "cart ready"
            );
            println!("{}", render::render_view(&session.view()));

            match session.submit_order(&client).await {
                Some(SubmissionOutcome::Accepted(body)) => {
                    println!("Order accepted: {}", serde_json::to_string_pretty(body)?);
                }
                Some(SubmissionOutcome::Failed(err)) => {
                    println!("Order failed: {err}");
                }
                None => println!("Nothing to order."),
            }
        }
        _ => {
            println!("{}", render::render_view(&session.view()));
        }
    }

    Ok(())
}
