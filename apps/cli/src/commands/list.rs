//! # List Command
//!
//! The list view: queries the collection with the list projection
//! (id, name, price, quantity) and renders a table.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use stockpile_core::{Addressing, Column, ItemRecord};
use stockpile_db::{Database, QueryOptions};

/// Columns the list view selects; the editor loads the rest on demand.
const LIST_PROJECTION: [Column; 4] = [Column::Id, Column::Name, Column::Price, Column::Quantity];

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Sort expression passed to the store (e.g. "name" or "quantity DESC")
    #[arg(long)]
    pub sort: Option<String>,

    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// One rendered row of the list.
#[derive(Debug, Serialize, Tabled)]
struct ListRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Quantity")]
    quantity: i64,
}

impl From<ItemRecord> for ListRow {
    fn from(record: ItemRecord) -> Self {
        ListRow {
            id: record.id.unwrap_or_default(),
            name: record.name.unwrap_or_default(),
            price: record.price.unwrap_or_default(),
            quantity: record.quantity.unwrap_or_default(),
        }
    }
}

pub async fn run(db: &Database, args: ListArgs) -> Result<()> {
    let mut options = QueryOptions::new().projection(LIST_PROJECTION.to_vec());
    if let Some(sort) = args.sort {
        options = options.sort(sort);
    }

    let records = db.items().query(&Addressing::Collection, options).await?;
    let rows: Vec<ListRow> = records.into_iter().map(ListRow::from).collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No items yet. Add one with `stockpile add`.");
        return Ok(());
    }

    println!("{}", Table::new(&rows).with(Style::rounded()));
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
