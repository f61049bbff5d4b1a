//! # Order Command
//!
//! Composes a reorder email to an item's supplier and prints it, ready to
//! paste into a mail client.

use anyhow::{bail, Result};
use clap::Args;

use stockpile_core::reorder;
use stockpile_db::Database;

use super::item::fetch_item;

#[derive(Debug, Args)]
pub struct OrderArgs {
    /// Item id
    pub id: i64,

    /// Units to order from the supplier
    #[arg(long)]
    pub quantity: i64,
}

pub async fn run(db: &Database, args: OrderArgs) -> Result<()> {
    if args.quantity <= 0 {
        bail!("order quantity required");
    }

    let item = fetch_item(db, args.id).await?;
    let email = reorder::compose(&item.name, &item.supplier_email, args.quantity);

    println!("To:      {}", email.mailto());
    println!("Subject: {}", email.subject);
    println!();
    println!("{}", email.body);
    Ok(())
}
