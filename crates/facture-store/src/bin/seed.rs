//! # Seed Data Generator
//!
//! Fills an empty data directory with sample clients and items.
//!
//! ## Usage
//! ```bash
//! # Seed ./data (default)
//! cargo run -p facture-store --bin seed
//!
//! # Seed another directory
//! cargo run -p facture-store --bin seed -- --data /srv/facture/data
//! ```
//!
//! Existing records are never touched: a store that already has clients
//! or items is left as is.

use std::env;

use facture_core::{NewClient, NewItem};
use facture_store::{RecordRepository, Store};

/// (name, address, fiscal id, AI, RC)
const CLIENTS: &[(&str, &str, &str, &str, &str)] = &[
    (
        "SARL Electro Bordj",
        "Cité 500 logements, Bordj Bou Arreridj",
        "000234019876543",
        "34010239871",
        "34/00-0987654 B 12",
    ),
    (
        "EURL Informatique Plus",
        "12, Rue Didouche Mourad - Alger",
        "000516001112223",
        "16010874512",
        "16/00-1234567 B 05",
    ),
    (
        "SPA Béjaïa Logistique",
        "Zone industrielle Ihaddaden, Béjaïa",
        "000706004445556",
        "06010555123",
        "06/00-7654321 B 09",
    ),
];

/// (code, description, unit price, category)
const ITEMS: &[(&str, &str, &str, &str)] = &[
    ("OND-1K", "Onduleur Line Interactive 1000VA", "18500,00", "Onduleurs"),
    ("OND-3K", "Onduleur On-Line 3000VA", "96500,00", "Onduleurs"),
    ("BAT-12V7", "Batterie étanche 12V 7Ah", "3200,00", "Batteries"),
    ("BAT-12V100", "Batterie solaire 12V 100Ah", "38900,00", "Batteries"),
    ("STB-2K", "Stabilisateur de tension 2000VA", "14250,00", "Stabilisateurs"),
    ("CBL-RJ45", "Câble réseau Cat6 (mètre)", "85,50", "Câblage"),
    ("PRS-PDU8", "Multiprise rack 8 prises", "6750,00", "Accessoires"),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut data_dir = String::from("./data");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--data" | "-d" => {
                if i + 1 < args.len() {
                    data_dir = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Facture Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --data <DIR>   Data directory (default: ./data)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Facture Seed Data Generator");
    println!("===========================");
    println!("Data directory: {}", data_dir);
    println!();

    let store = Store::open(&data_dir)?;

    let existing_clients = store.clients().list_all()?.len();
    if existing_clients == 0 {
        for (name, address, fiscal_id, ai_number, rc_number) in CLIENTS {
            let client = store.clients().append(NewClient {
                name: name.to_string(),
                address: address.to_string(),
                fiscal_id: fiscal_id.to_string(),
                ai_number: ai_number.to_string(),
                rc_number: rc_number.to_string(),
                ..Default::default()
            })?;
            println!("  + client {:>3}  {}", client.id, client.name);
        }
    } else {
        println!("⚠ {} clients already present, skipping clients", existing_clients);
    }

    let existing_items = store.items().list_all()?.len();
    if existing_items == 0 {
        for (code, description, unit_price, category) in ITEMS {
            let item = store.items().append(NewItem {
                code: code.to_string(),
                description: description.to_string(),
                unit_price: unit_price.to_string(),
                category: category.to_string(),
            })?;
            println!("  + item   {:>3}  {:<12} {}", item.id, item.code, item.unit_price);
        }
    } else {
        println!("⚠ {} items already present, skipping items", existing_items);
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
