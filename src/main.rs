use std::process::ExitCode;
use clap::{Parser, Subcommand};
use serde_json::json;
use tokio::io::BufReader;

use hearthstone_decks::catalog::CardCatalog;
use hearthstone_decks::config::Config;
use hearthstone_decks::server;
use hearthstone_decks::tools::{self, DeckTools, ToolResponse, GET_CARD_INFO, PARSE_DECK_CODE, SEARCH_CARDS};

#[derive(Debug, Parser)]
#[command(name = "hearthstone-decks", version, about = "Decode Hearthstone deck codes and look up cards")]
struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Decode a deck code
    Decode {
        code: String,
        /// Leave out deck statistics
        #[arg(long)]
        no_stats: bool,
    },
    /// Search cards by name
    Search {
        name: String,
        #[arg(long, default_value_t = tools::DEFAULT_SEARCH_LIMIT)]
        limit: u64,
    },
    /// Show one card by its card id
    Card { id: String },
    /// Print the tool descriptors
    Tools,
    /// Run as an MCP server over stdio (JSON-RPC 2.0)
    Serve,
}

fn print_response(response: &ToolResponse) -> ExitCode {
    println!("{}", response.envelope_text());
    if response.is_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries tool output only.
    env_logger::Builder::new()
        .parse_filters(&cli.config.log_level)
        .target(env_logger::Target::Stderr)
        .init();

    let catalog = CardCatalog::new(cli.config.card_source(), cli.config.cache_ttl());
    let deck_tools = DeckTools::new(catalog, cli.config.image_template());

    match cli.command {
        Command::Decode { code, no_stats } => {
            let args = json!({ "deckCode": code, "includeStats": !no_stats });
            print_response(&deck_tools.call_tool(PARSE_DECK_CODE, &args).await)
        }
        Command::Search { name, limit } => {
            let args = json!({ "cardName": name, "limit": limit });
            print_response(&deck_tools.call_tool(SEARCH_CARDS, &args).await)
        }
        Command::Card { id } => {
            let args = json!({ "cardId": id });
            print_response(&deck_tools.call_tool(GET_CARD_INFO, &args).await)
        }
        Command::Tools => {
            println!("{:#}", json!({ "tools": tools::list_tools() }));
            ExitCode::SUCCESS
        }
        Command::Serve => {
            let input = BufReader::new(tokio::io::stdin());
            match server::serve(&deck_tools, input, tokio::io::stdout()).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("ERROR: stdio transport failed: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
    }
}
