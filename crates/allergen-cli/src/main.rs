mod commands;
mod off_client;
mod reader;

use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgGroup, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use reader::{read_config, read_ingredient_text, Settings};

#[derive(Parser)]
#[command(
    name = "allergen",
    version,
    about = "Allergen checker: detect allergens in ingredient text and look up food products"
)]
struct Cli {
    /// Allergen reference data (JSON map of allergen → substitutes)
    #[arg(long, global = true)]
    allergens: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect allergens in ingredient text
    Detect {
        /// Ingredient text (reads --file or stdin when omitted)
        text: Option<String>,

        /// Read ingredient text from a file, e.g. OCR output
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Fuzzy similarity cutoff, 0-100
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=100))]
        threshold: Option<u8>,

        /// Output format: human (default) or json
        #[arg(long, default_value = "human")]
        format: String,
    },

    /// Suggest substitutes for allergens
    Suggest {
        /// Allergen names
        #[arg(required = true, value_name = "ALLERGEN")]
        names: Vec<String>,

        /// Output format: human (default) or json
        #[arg(long, default_value = "human")]
        format: String,
    },

    /// Look up a product by barcode or name and check its ingredients
    Lookup {
        /// Barcode (digits only) or product name
        query: String,

        /// Use a saved Open Food Facts response instead of the network
        #[arg(long)]
        response: Option<PathBuf>,

        /// Fuzzy similarity cutoff, 0-100
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=100))]
        threshold: Option<u8>,

        /// Output format: human (default) or json
        #[arg(long, default_value = "human")]
        format: String,
    },

    /// Ask a nutrition question about a product
    #[command(group(ArgGroup::new("source").required(true).args(["product", "response"])))]
    Ask {
        /// Question, e.g. "how much sugar?"
        question: String,

        /// Barcode or product name to look up
        #[arg(long)]
        product: Option<String>,

        /// Use a saved Open Food Facts response instead of the network
        #[arg(long)]
        response: Option<PathBuf>,
    },

    /// List the allergens in the reference data
    Allergens {
        /// Output format: human (default) or json
        #[arg(long, default_value = "human")]
        format: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let threshold = match &cli.command {
        Commands::Detect { threshold, .. } | Commands::Lookup { threshold, .. } => *threshold,
        _ => None,
    };
    let settings = match read_config(Path::new("."))
        .and_then(|config| Settings::resolve(config, cli.allergens.clone(), threshold))
    {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Detect {
            text, file, format, ..
        } => read_ingredient_text(text, file.as_deref())
            .and_then(|text| commands::detect::run_detect(&settings, &text, &format)),
        Commands::Suggest { names, format } => {
            commands::suggest::run_suggest(&settings, &names, &format)
        }
        Commands::Lookup {
            query,
            response,
            format,
            ..
        } => commands::lookup::run_lookup(&settings, &query, response.as_deref(), &format),
        Commands::Ask {
            question,
            product,
            response,
        } => commands::ask::run_ask(
            &settings,
            &question,
            product.as_deref(),
            response.as_deref(),
        ),
        Commands::Allergens { format } => commands::allergens::run_allergens(&settings, &format),
    };

    match result {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
