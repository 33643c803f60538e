//! Utils

use clap::Parser;

/// Arguments for the quote example
#[derive(Debug, Parser)]
pub struct QuoteArgs {
    /// Template fixture to price against
    #[clap(short, long, default_value = "velvet")]
    pub template: String,

    /// Finished width in centimetres
    #[clap(short, long)]
    pub width: String,

    /// Finished height (drop) in centimetres
    #[clap(long)]
    pub height: String,

    /// Fullness ratio (curtains); defaults to 1
    #[clap(short, long)]
    pub fullness: Option<String>,

    /// Number of panels/units; defaults to 1
    #[clap(short = 'n', long)]
    pub quantity: Option<String>,

    /// Price the hand-finished construction
    #[clap(long)]
    pub hand_finished: bool,

    /// Heading style name from the template fixture
    #[clap(long)]
    pub heading: Option<String>,
}
