use clap::{ArgGroup, Parser, Subcommand};
use spotdeck::{DeckParams, DeckRequest, PipelineError, generate};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "spotdeck")]
#[command(about = "Generate printable circular matching-game decks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a deck request (JSON) to PDF
    Render {
        /// Path to the request file
        request: PathBuf,

        /// Where to write the PDF
        #[arg(short, long, default_value = "deck.pdf")]
        output: PathBuf,

        /// Seed for reproducible layouts
        #[arg(long)]
        seed: Option<u64>,

        /// Cards per page (1-6)
        #[arg(long)]
        per_page: Option<u32>,

        /// Draw cut marks around every card
        #[arg(long)]
        cut_marks: bool,

        /// Order of the generated deck when the request lists no cards
        #[arg(long)]
        order: Option<usize>,

        /// Document title
        #[arg(long)]
        title: Option<String>,
    },

    /// Print deck parameters for an order, card size or deck size
    #[command(group(ArgGroup::new("by").required(true).args(["order", "symbols_per_card", "cards"])))]
    Params {
        #[arg(long)]
        order: Option<usize>,

        #[arg(long)]
        symbols_per_card: Option<usize>,

        #[arg(long)]
        cards: Option<usize>,
    },

    /// Print the symbol indices of every card of a deck
    Generate {
        #[arg(long)]
        order: usize,
    },
}

fn main() -> Result<(), PipelineError> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            request,
            output,
            seed,
            per_page,
            cut_marks,
            order,
            title,
        } => {
            let mut deck = DeckRequest::from_file(&request)?;
            if seed.is_some() {
                deck.random.seed = seed;
            }
            if let Some(per_page) = per_page {
                deck.card.per_page = per_page;
            }
            if cut_marks {
                deck.card.cut_marks = true;
            }
            if order.is_some() {
                deck.order = order;
            }
            if title.is_some() {
                deck.title = title;
            }

            let pdf = deck.render()?;
            std::fs::write(&output, &pdf)?;
            log::info!("Wrote {} ({} bytes)", output.display(), pdf.len());
        }
        Commands::Params {
            order,
            symbols_per_card,
            cards,
        } => {
            let params = match (order, symbols_per_card, cards) {
                (Some(n), _, _) => DeckParams::from_order(n)?,
                (_, Some(k), _) => DeckParams::from_symbols_per_card(k)?,
                (_, _, cards) => DeckParams::from_num_cards(cards.unwrap_or(0))?,
            };
            println!("{}", serde_json::to_string_pretty(&params)?);
        }
        Commands::Generate { order } => {
            let cards = generate(order)?;
            println!("{}", serde_json::to_string(&cards)?);
        }
    }
    Ok(())
}
