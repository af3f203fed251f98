mod display;

use anyhow::Context;
use clap::{Parser, Subcommand};
use wildtrack_core::SubmissionInput;
use wildtrack_dashboard::Dashboard;
use wildtrack_sync::SightingClient;

#[derive(Parser)]
#[command(name = "wildtrack", version, about = "Wildlife sighting map client")]
struct Cli {
    /// Sightings backend base URL
    #[arg(
        long,
        env = "WILDTRACK_URL",
        default_value = "http://127.0.0.1:5000",
        global = true
    )]
    base_url: String,

    /// Print the resulting display state as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load all species onto both maps (initial page load)
    Load,
    /// Filter both maps, the gallery and the charts to one species
    Search {
        /// Species name; empty means all species
        #[arg(default_value = "")]
        species: String,
    },
    /// Submit a new sighting, then reload the primary map for that species
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long, allow_hyphen_values = true)]
        lat: String,
        #[arg(long, allow_hyphen_values = true)]
        lng: String,
    },
    /// Look up a representative photo for a species
    Image { species: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("wildtrack v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let client = SightingClient::new(cli.base_url.clone());

    match cli.command {
        Command::Image { species } => {
            let image = client
                .species_image(&species)
                .await
                .with_context(|| format!("looking up image for {species:?}"))?;
            match image {
                Some(url) => println!("{url}"),
                None => println!("(no image for {species:?})"),
            }
            Ok(())
        }
        Command::Load => {
            let mut dash = Dashboard::new(client);
            let result = dash.load().await;
            display::show(&dash, cli.json)?;
            result.context("loading sightings")
        }
        Command::Search { species } => {
            let mut dash = Dashboard::new(client);
            let result = dash.on_search(&species).await;
            display::show(&dash, cli.json)?;
            result.with_context(|| format!("searching for {species:?}"))
        }
        Command::Submit { name, lat, lng } => {
            let mut dash = Dashboard::new(client);
            let result = dash.on_submit(&SubmissionInput::new(name, lat, lng)).await;
            display::show(&dash, cli.json)?;
            result.map(|_| ()).context("submitting sighting")
        }
    }
}
