use clap::{Parser, Subcommand};
use dbapi::{Client, set_token, set_url};
use rust_decimal::Decimal;
use std::error::Error;

#[derive(Debug, Parser)]
#[command(name = "dbapi-cli", about = "Command line access to the Deutsche Bank sandbox API")]
struct Cli {
    /// Access token; falls back to DBAPI_TOKEN env var
    #[arg(short, long, env = "DBAPI_TOKEN")]
    token: Option<String>,

    /// Override the API base URL
    #[arg(long)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Access the /cashAccounts endpoint
    Accounts {
        /// Only show the account with this IBAN
        iban: Option<String>,
    },
    /// Access the /addresses endpoint
    Addresses,
    /// Access the /transactions endpoint
    Transactions {
        /// Only show transactions of the account with this IBAN
        iban: Option<String>,
    },
    /// Access the /userInfo endpoint
    #[command(name = "userinfo")]
    UserInfo,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let mut client = Client::new([])?;
    if let Some(url) = cli.url {
        client.apply([set_url(url)])?;
    }
    client.apply([set_token(cli.token.unwrap_or_default())])?;

    if !client.authentication().has_auth() {
        println!("No access token provided!");
        return Ok(());
    }

    match cli.command {
        Commands::Accounts { iban } => {
            let accounts = match iban {
                Some(iban) => client.accounts().get(&iban).await,
                None => client.accounts().get_all().await,
            }
            .into_result()?;

            println!("\nAccount(s):\n");
            for acc in &accounts {
                println!(
                    "\t{}\n\t{} €\n\t{}\n",
                    text(&acc.iban),
                    money(acc.balance),
                    text(&acc.product_description)
                );
            }
        }
        Commands::Addresses => {
            let addresses = client.addresses().get_all().await.into_result()?;

            println!("\nAddress(es):\n");
            for addr in &addresses {
                let kind = addr
                    .address_type
                    .map(|t| format!("{t:?}"))
                    .unwrap_or_default();
                println!(
                    "\t{}\n\t{} {}\n\t{} {}\n\t{}\n",
                    kind,
                    text(&addr.street),
                    number(addr.house_number),
                    number(addr.zip),
                    text(&addr.city),
                    text(&addr.country)
                );
            }
        }
        Commands::Transactions { iban } => {
            let transactions = match iban {
                Some(iban) => client.transactions().get(&iban).await,
                None => client.transactions().get_all().await,
            }
            .into_result()?;

            println!("\nTransaction(s):\n");
            for txn in &transactions {
                println!(
                    "\t{} €\n\t{}\n\t{}\n\tFrom/To: {} <{}>\n",
                    money(txn.amount),
                    text(&txn.booking_date),
                    text(&txn.usage),
                    text(&txn.counter_party_name),
                    text(&txn.counter_party_iban)
                );
            }
        }
        Commands::UserInfo => {
            let info = client.user_info().get_all().await.into_result()?;
            let gender = info.gender.map(|g| format!("{g:?}")).unwrap_or_default();

            println!("\nUser Info:\n");
            println!(
                "\t{}\n\t{} {}\n\t{}",
                gender,
                text(&info.first_name),
                text(&info.last_name),
                text(&info.date_of_birth)
            );
        }
    }

    Ok(())
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

fn number(value: Option<i64>) -> String {
    value.map(|n| n.to_string()).unwrap_or_else(|| "-".into())
}

fn money(value: Option<Decimal>) -> String {
    value
        .map(|v| format!("{:.2}", v.round_dp(2)))
        .unwrap_or_else(|| "-".into())
}
