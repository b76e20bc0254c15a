//! # Command Line
//!
//! clap definitions for the `facture` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use facture_core::{NewClient, NewItem, RecordId};

use crate::commands::document::{GenerateDocumentInput, ItemSelection};

#[derive(Debug, Parser)]
#[command(name = "facture")]
#[command(
    version,
    about = "Generates proformas, invoices and quotes from a client and item catalogue"
)]
pub struct Cli {
    /// Config file (default: platform config dir, facture.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results and errors as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a document and write it to the output directory
    Generate(GenerateArgs),

    /// Manage clients
    Clients {
        #[command(subcommand)]
        action: ClientAction,
    },

    /// Manage the item catalogue
    Items {
        #[command(subcommand)]
        action: ItemAction,
    },

    /// List the document kinds
    Kinds,

    /// Show or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// proforma, invoice, quote, discounted_invoice or tax_exempt
    #[arg(short, long)]
    pub kind: String,

    /// Client id
    #[arg(short, long)]
    pub client: RecordId,

    /// Line as <item id>:<quantity>[:<discount %>], repeatable
    #[arg(short = 'i', long = "item")]
    pub items: Vec<ItemSelection>,

    /// Payment method label (default from config)
    #[arg(short, long, default_value = "")]
    pub payment: String,

    /// Global discount percentage
    #[arg(short, long, default_value = "")]
    pub discount: String,
}

impl From<GenerateArgs> for GenerateDocumentInput {
    fn from(args: GenerateArgs) -> Self {
        GenerateDocumentInput {
            kind: args.kind,
            client_id: args.client,
            items: args.items,
            payment_method: args.payment,
            global_discount: args.discount,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ClientAction {
    List,
    Add(ClientArgs),
    Delete { id: RecordId },
}

#[derive(Debug, Args)]
pub struct ClientArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub address: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub phone: String,
    /// Identifiant fiscal (IF)
    #[arg(long, default_value = "")]
    pub fiscal_id: String,
    /// Article d'imposition (AI)
    #[arg(long, default_value = "")]
    pub ai_number: String,
    /// Registre du commerce (RC)
    #[arg(long, default_value = "")]
    pub rc_number: String,
}

impl From<ClientArgs> for NewClient {
    fn from(args: ClientArgs) -> Self {
        NewClient {
            name: args.name,
            address: args.address,
            email: args.email,
            phone: args.phone,
            fiscal_id: args.fiscal_id,
            ai_number: args.ai_number,
            rc_number: args.rc_number,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ItemAction {
    List,
    Add(ItemArgs),
    Delete { id: RecordId },
}

#[derive(Debug, Args)]
pub struct ItemArgs {
    /// Item code (default: ITEM<id>)
    #[arg(long, default_value = "")]
    pub code: String,
    #[arg(long)]
    pub description: String,
    /// Unit price excluding tax, "1500,00" or "1500.00"
    #[arg(long, allow_hyphen_values = true)]
    pub price: String,
    #[arg(long, default_value = "")]
    pub category: String,
}

impl From<ItemArgs> for NewItem {
    fn from(args: ItemArgs) -> Self {
        NewItem {
            code: args.code,
            description: args.description,
            unit_price: args.price,
            category: args.category,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,

    /// Write the default configuration to the config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "facture", "--json", "generate", "-k", "invoice", "-c", "1", "-i", "3:2", "--item",
            "5:1:10", "--discount", "5",
        ])
        .unwrap();
        assert!(cli.json);

        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        let input = GenerateDocumentInput::from(args);
        assert_eq!(input.client_id, 1);
        assert_eq!(
            input.items,
            vec![
                ItemSelection::new(3, "2"),
                ItemSelection::new(5, "1").with_discount("10"),
            ]
        );
        assert_eq!(input.global_discount, "5");
        assert_eq!(input.payment_method, "");
    }

    #[test]
    fn test_malformed_item_is_rejected() {
        let result = Cli::try_parse_from(["facture", "generate", "-k", "quote", "-c", "1", "-i", "3"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_item_add_with_negative_price() {
        let cli = Cli::try_parse_from([
            "facture", "items", "add", "--description", "Câble", "--price", "-3",
        ])
        .unwrap();
        let Command::Items {
            action: ItemAction::Add(args),
        } = cli.command
        else {
            panic!("expected items add");
        };
        assert_eq!(NewItem::from(args).unit_price, "-3");
    }
}
