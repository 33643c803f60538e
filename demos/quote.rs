//! Quote Example
//!
//! Prices one order line against a fixture template and prints the
//! breakdown.
//!
//! Use `-t` to pick a template fixture by name
//! Use `-w`/`--height` for the finished dimensions in centimetres
//! Use `-f`, `-n`, `--hand-finished` and `--heading` for the rest of the order

use std::io;

use anyhow::Result;
use clap::Parser;
use pelmet::{dimensions::OrderForm, fixtures::TemplateLibrary, pricing, utils::QuoteArgs};

/// Quote Example
pub fn main() -> Result<()> {
    let args = QuoteArgs::parse();

    let library = TemplateLibrary::new();
    let loaded = library.load_template(&args.template)?;

    let heading = args
        .heading
        .as_deref()
        .map(|name| loaded.heading_key(name))
        .transpose()?;

    let form = OrderForm {
        width: args.width,
        height: args.height,
        fullness: args.fullness,
        quantity: args.quantity,
        hand_finished: args.hand_finished,
        heading,
    };

    let result = pricing::quote(loaded.template(), &form)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    result.write_to(&mut handle)?;

    Ok(())
}
