//! # Maintenance Commands
//!
//! Sample data and bulk delete.

use anyhow::Result;
use owo_colors::OwoColorize;

use stockpile_core::{Addressing, ItemValues};
use stockpile_db::Database;

/// Inserts the sample item used for demos and manual testing.
pub async fn seed(db: &Database) -> Result<()> {
    let values = ItemValues::new()
        .name("Laptop Hp")
        .price("45,000")
        .quantity(1)
        .image("res://drawable/laptop_image")
        .supplier("raj")
        .supplier_email("mail@example.com");

    let assigned = db.items().insert(&Addressing::Collection, values).await?;
    println!("{} ({})", "Sample item inserted".green(), assigned);
    Ok(())
}

/// Deletes every item via a collection-wide delete.
pub async fn clear(db: &Database) -> Result<()> {
    let deleted = db
        .items()
        .delete(&Addressing::Collection, None, &[])
        .await?;
    println!("{deleted} rows deleted from the items table");
    Ok(())
}
