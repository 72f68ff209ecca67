//! CLI tool for the card form.
//!
//! # Usage
//!
//! ```bash
//! # Normalize a field as the form would
//! cardvault format number 4111111111111111
//! cardvault format expiry 1230
//!
//! # Validate a whole card
//! cardvault validate --number "4111 1111 1111 1111" --holder "Jane Doe" --expiry 12/30 --cvv 123
//!
//! # Classify the issuer
//! cardvault classify 4111111111111111
//!
//! # Validate and save to my_cards.txt (or email it with --email)
//! cardvault save --number 4111111111111111 --holder "Jane Doe" --expiry 1230 --cvv 123
//! ```

use std::path::PathBuf;

use card_vault::clock::{Clock, SystemClock};
use card_vault::config::VaultConfig;
use card_vault::dispatch::{Destination, Dispatcher, SimulatedEmail};
use card_vault::mask::CardPreview;
use card_vault::{classify_issuer, validate_record, CardField, CardRecord};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cardvault")]
#[command(author, version, about = "Payment card form normalization and validation tool")]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize one field the way the form does while typing
    Format {
        /// Field to normalize
        field: FieldArg,

        /// Raw input
        value: String,
    },

    /// Validate a whole card
    Validate {
        #[command(flatten)]
        card: CardArgs,

        /// Also require and validate an email destination
        #[arg(short, long)]
        email: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Detect the card issuer from the number prefix
    Classify {
        /// Card number (or partial number)
        card_number: String,
    },

    /// Show the card preview
    Preview {
        #[command(flatten)]
        card: CardArgs,
    },

    /// Validate a card and save it to a file or email it
    Save {
        #[command(flatten)]
        card: CardArgs,

        /// Email the card instead of saving it
        #[arg(short, long, conflicts_with = "out")]
        email: Option<String>,

        /// Append the card to this file, even if a default email is configured
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Args)]
struct CardArgs {
    /// Card number (separators allowed)
    #[arg(long, default_value = "")]
    number: String,

    /// Card holder name
    #[arg(long, default_value = "")]
    holder: String,

    /// Expiry date (MM/YY or MMYY)
    #[arg(long, default_value = "")]
    expiry: String,

    /// Card verification code
    #[arg(long, default_value = "")]
    cvv: String,
}

impl CardArgs {
    fn to_record(&self) -> CardRecord {
        CardRecord::from_raw(&self.number, &self.holder, &self.expiry, &self.cvv)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FieldArg {
    Number,
    Holder,
    Expiry,
    Cvv,
}

impl From<FieldArg> for CardField {
    fn from(arg: FieldArg) -> Self {
        match arg {
            FieldArg::Number => CardField::CardNumber,
            FieldArg::Holder => CardField::CardHolder,
            FieldArg::Expiry => CardField::ExpiryDate,
            FieldArg::Cvv => CardField::Cvv,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match VaultConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Format { field, value } => {
            cmd_format(field.into(), &value);
        }
        Commands::Validate {
            card,
            email,
            output,
        } => {
            cmd_validate(&card.to_record(), email.as_deref(), output);
        }
        Commands::Classify { card_number } => {
            cmd_classify(&card_number);
        }
        Commands::Preview { card } => {
            cmd_preview(&card.to_record());
        }
        Commands::Save { card, email, out } => {
            cmd_save(&config, &card.to_record(), email, out).await;
        }
    }
}

fn cmd_format(field: CardField, value: &str) {
    println!("{}", CardRecord::new().with_field(field, value).get(field));
}

fn cmd_validate(record: &CardRecord, email: Option<&str>, output: OutputFormat) {
    let report = validate_record(record, email, &SystemClock.today());

    match output {
        OutputFormat::Text => {
            if report.is_valid() {
                println!("Valid: yes");
                println!("Issuer: {}", classify_issuer(&record.card_number));
                println!("Masked: {}", record.masked_number());
            } else {
                println!("Valid: no");
                for (_, message) in report.messages() {
                    println!("Error: {}", message);
                }
            }
        }
        OutputFormat::Json => {
            println!("{{");
            println!("  \"valid\": {},", report.is_valid());
            println!("  \"issuer\": \"{}\",", classify_issuer(&record.card_number));
            println!("  \"errors\": {{");
            let count = report.field_errors().len();
            for (i, (field, message)) in report.messages().enumerate() {
                let comma = if i + 1 < count { "," } else { "" };
                println!("    \"{}\": \"{}\"{}", field.key(), message, comma);
            }
            println!("  }}");
            println!("}}");
        }
    }

    std::process::exit(if report.is_valid() { 0 } else { 1 });
}

fn cmd_classify(card_number: &str) {
    println!("Issuer: {}", classify_issuer(card_number));
}

fn cmd_preview(record: &CardRecord) {
    let preview = CardPreview::of(record);
    println!("{}", preview.card_number);
    println!("{:<24}{}", preview.card_holder, preview.expiry_date);
}

async fn cmd_save(
    config: &VaultConfig,
    record: &CardRecord,
    email: Option<String>,
    out: Option<PathBuf>,
) {
    let destination = resolve_destination(config, email, out);
    let email = match &destination {
        Destination::Email(address) => Some(address.as_str()),
        Destination::File(_) => None,
    };
    let report = validate_record(record, email, &SystemClock.today());
    if !report.is_valid() {
        for (_, message) in report.messages() {
            eprintln!("Error: {}", message);
        }
        std::process::exit(1);
    }

    let export_path = match &destination {
        Destination::File(path) => path.clone(),
        Destination::Email(_) => config.export_path.clone(),
    };

    let outcome = if config.email_transport.enabled {
        let transport = SimulatedEmail::new(config.email_transport.latency());
        Dispatcher::new(export_path)
            .with_transport(transport)
            .dispatch(record, &destination)
            .await
    } else {
        Dispatcher::new(export_path).dispatch(record, &destination).await
    };

    if outcome.success {
        println!("{}", outcome.message);
    } else {
        eprintln!("{}", outcome.message);
        std::process::exit(1);
    }
}

/// `--out` always writes a file; otherwise an email from the flag or the
/// config wins over the configured export path.
fn resolve_destination(
    config: &VaultConfig,
    email: Option<String>,
    out: Option<PathBuf>,
) -> Destination {
    if let Some(path) = out {
        return Destination::File(path);
    }
    match email.or_else(|| config.email.clone()) {
        Some(address) => Destination::Email(address.trim().to_string()),
        None => Destination::File(config.export_path.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_email() -> VaultConfig {
        VaultConfig {
            email: Some("default@example.com".to_string()),
            ..VaultConfig::default()
        }
    }

    #[test]
    fn test_out_forces_file_over_configured_email() {
        let destination =
            resolve_destination(&config_with_email(), None, Some(PathBuf::from("cards.txt")));
        assert_eq!(destination, Destination::File(PathBuf::from("cards.txt")));
    }

    #[test]
    fn test_configured_email_used_without_out() {
        let destination = resolve_destination(&config_with_email(), None, None);
        assert_eq!(destination, Destination::Email("default@example.com".into()));
    }

    #[test]
    fn test_email_flag_overrides_config() {
        let destination =
            resolve_destination(&config_with_email(), Some(" me@example.com ".into()), None);
        assert_eq!(destination, Destination::Email("me@example.com".into()));
    }

    #[test]
    fn test_default_is_export_path() {
        let destination = resolve_destination(&VaultConfig::default(), None, None);
        assert_eq!(destination, Destination::File(PathBuf::from("my_cards.txt")));
    }
}
