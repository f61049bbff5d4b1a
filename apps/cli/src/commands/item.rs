//! # Item Commands
//!
//! The editor view as subcommands: show one item, create, edit, delete, and
//! the inline quantity adjust the list rows offer.
//!
//! ## Layered Validation
//! This layer rejects empty strings before the gateway ever sees the
//! payload (the editor's "fill in every field" rule); presence and range
//! rules live in the gateway itself.

use anyhow::{bail, Result};
use clap::Args;
use owo_colors::OwoColorize;

use stockpile_core::{Addressing, Column, Item, ItemRecord, ItemValues};
use stockpile_db::{Database, QueryOptions};

// =============================================================================
// show
// =============================================================================

pub async fn show(db: &Database, id: i64) -> Result<()> {
    let item = fetch_item(db, id).await?;

    println!("{:>10}: {}", "ID", item.id);
    println!("{:>10}: {}", "Name", item.name);
    println!("{:>10}: {}", "Price", item.price);
    println!("{:>10}: {}", "Quantity", item.quantity);
    println!("{:>10}: {}", "Image", item.image);
    println!("{:>10}: {}", "Supplier", item.supplier);
    println!("{:>10}: {}", "Email", item.supplier_email);
    Ok(())
}

// =============================================================================
// add
// =============================================================================

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Item name
    #[arg(long)]
    pub name: String,

    /// Price, kept as entered (e.g. "45,000")
    #[arg(long)]
    pub price: String,

    /// Units on hand
    #[arg(long)]
    pub quantity: i64,

    /// Image URI
    #[arg(long)]
    pub image: String,

    /// Supplier name
    #[arg(long)]
    pub supplier: String,

    /// Supplier email address
    #[arg(long)]
    pub supplier_email: String,
}

pub async fn add(db: &Database, args: AddArgs) -> Result<()> {
    let fields = [
        args.name.trim(),
        args.price.trim(),
        args.image.trim(),
        args.supplier.trim(),
        args.supplier_email.trim(),
    ];
    if fields.iter().any(|f| f.is_empty()) {
        bail!("every field is required");
    }

    let values = ItemValues::new()
        .name(args.name.trim())
        .price(args.price.trim())
        .quantity(args.quantity)
        .image(args.image.trim())
        .supplier(args.supplier.trim())
        .supplier_email(args.supplier_email.trim());

    let assigned = db.items().insert(&Addressing::Collection, values).await?;
    println!("{} ({})", "Item saved".green(), assigned);
    Ok(())
}

// =============================================================================
// edit
// =============================================================================

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Item id
    pub id: i64,

    /// New item name
    #[arg(long)]
    pub name: Option<String>,

    /// New price string
    #[arg(long)]
    pub price: Option<String>,

    /// New quantity
    #[arg(long)]
    pub quantity: Option<i64>,

    /// New image URI
    #[arg(long)]
    pub image: Option<String>,

    /// New supplier name
    #[arg(long)]
    pub supplier: Option<String>,

    /// New supplier email address
    #[arg(long)]
    pub supplier_email: Option<String>,
}

pub async fn edit(db: &Database, args: EditArgs) -> Result<()> {
    let mut values = ItemValues::new();
    if let Some(name) = args.name {
        values = values.name(name);
    }
    if let Some(price) = args.price {
        values = values.price(price);
    }
    if let Some(quantity) = args.quantity {
        values = values.quantity(quantity);
    }
    if let Some(image) = args.image {
        values = values.image(image);
    }
    if let Some(supplier) = args.supplier {
        values = values.supplier(supplier);
    }
    if let Some(email) = args.supplier_email {
        values = values.supplier_email(email);
    }

    let affected = db
        .items()
        .update(&Addressing::Item(args.id), values, None, &[])
        .await?;

    if affected == 0 {
        println!("{}", "No item was updated.".yellow());
    } else {
        println!("{}", "Item updated.".green());
    }
    Ok(())
}

// =============================================================================
// delete
// =============================================================================

pub async fn delete(db: &Database, id: i64) -> Result<()> {
    let deleted = db.items().delete(&Addressing::Item(id), None, &[]).await?;

    if deleted == 0 {
        println!("{}", "No item was deleted.".yellow());
    } else {
        println!("{}", "Item deleted.".green());
    }
    Ok(())
}

// =============================================================================
// sell / restock
// =============================================================================

/// Decrements the quantity by one. Already-zero stock is a no-op, so the
/// stored quantity never goes negative on this path.
pub async fn sell(db: &Database, id: i64) -> Result<()> {
    let quantity = fetch_quantity(db, id).await?;
    if quantity <= 0 {
        println!("{}", "Out of stock; nothing sold.".yellow());
        return Ok(());
    }

    db.items()
        .update(
            &Addressing::Item(id),
            ItemValues::new().quantity(quantity - 1),
            None,
            &[],
        )
        .await?;
    println!("Quantity now {}", quantity - 1);
    Ok(())
}

/// Increments the quantity by one.
pub async fn restock(db: &Database, id: i64) -> Result<()> {
    let quantity = fetch_quantity(db, id).await?;

    db.items()
        .update(
            &Addressing::Item(id),
            ItemValues::new().quantity(quantity + 1),
            None,
            &[],
        )
        .await?;
    println!("Quantity now {}", quantity + 1);
    Ok(())
}

// =============================================================================
// Helpers
// =============================================================================

/// Loads one full item or fails with a not-found message.
pub(crate) async fn fetch_item(db: &Database, id: i64) -> Result<Item> {
    let record = db
        .items()
        .query(&Addressing::Item(id), QueryOptions::new())
        .await?
        .into_iter()
        .next();

    match record.and_then(ItemRecord::into_item) {
        Some(item) => Ok(item),
        None => bail!("item {id} not found"),
    }
}

/// Loads just the current quantity of one item.
async fn fetch_quantity(db: &Database, id: i64) -> Result<i64> {
    let record = db
        .items()
        .query(
            &Addressing::Item(id),
            QueryOptions::new().projection(vec![Column::Id, Column::Quantity]),
        )
        .await?
        .into_iter()
        .next();

    match record.and_then(|r| r.quantity) {
        Some(quantity) => Ok(quantity),
        None => bail!("item {id} not found"),
    }
}
