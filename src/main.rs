//! cardano-kit CLI - a thin wrapper around the cardano-kit-sys library
//!
//! Parses command-line arguments, resolves configuration and delegates every
//! verb to the cardano-cli facade.

use anyhow::{Context, Result};
use cardano_kit_common::{AccountArtifact, BuildRawParams};
use clap::Parser;
use cardano_kit_sys::{default_storage_dir, system_cardano, SystemCardano};
use serde::Serialize;

mod commands;
mod pretty_print;
use commands::{AddressCommands, Commands, KitCommands, QueryCommands, StakeAddressCommands, TransactionCommands};
use pretty_print::*;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = KitCommands::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level.as_str())).init();

    let config = args.config.to_config(default_storage_dir());
    log::debug!("using storage root {}", config.storage_dir.display());
    let cli = system_cardano(config).context("invalid cardano-kit configuration")?;

    execute_command(&cli, args.command).await
}

async fn execute_command(cli: &SystemCardano, command: Commands) -> Result<()> {
    match command {
        Commands::Address(cmd) => execute_address_command(cli, cmd).await,
        Commands::StakeAddress(cmd) => execute_stake_address_command(cli, cmd).await,
        Commands::Query(cmd) => execute_query_command(cli, cmd).await,
        Commands::Transaction(cmd) => execute_transaction_command(cli, cmd).await,
        Commands::Version { raw } => {
            let version = cli.cli_version().await?;
            if raw {
                print_json(&version)?;
            } else {
                match version {
                    Some(version) => println!("cardano-cli {version}"),
                    None => println!("cardano-cli version unknown"),
                }
            }
            Ok(())
        }
    }
}

async fn execute_address_command(cli: &SystemCardano, command: AddressCommands) -> Result<()> {
    match command {
        AddressCommands::Build { artifact, with_stake_key } => {
            let options = AddressCommands::build_options(&artifact, with_stake_key);
            let path = cli.address().build(&options).await?;
            print_artifact("Address written to", &path);
        }
        AddressCommands::KeyGen { artifact, raw } => {
            let keys = cli.address().key_gen(&AccountArtifact::from(&artifact)).await?;
            if raw {
                print_json(&keys)?;
            } else {
                print_key_pair(&keys);
            }
        }
        AddressCommands::KeyHash { artifact } => {
            let hash = cli.address().key_hash(&AddressCommands::key_hash_options(&artifact)).await?;
            println!("{hash}");
        }
    }
    Ok(())
}

async fn execute_stake_address_command(cli: &SystemCardano, command: StakeAddressCommands) -> Result<()> {
    match command {
        StakeAddressCommands::Build { artifact } => {
            let path = cli.stake_address().build(&AccountArtifact::from(&artifact)).await?;
            print_artifact("Stake address written to", &path);
        }
        StakeAddressCommands::KeyGen { artifact, raw } => {
            let keys = cli.stake_address().key_gen(&AccountArtifact::from(&artifact)).await?;
            if raw {
                print_json(&keys)?;
            } else {
                print_key_pair(&keys);
            }
        }
    }
    Ok(())
}

async fn execute_query_command(cli: &SystemCardano, command: QueryCommands) -> Result<()> {
    match command {
        QueryCommands::Utxo { address, raw } => {
            let utxos = cli.query().utxo(&address).await?;
            if raw {
                print_json(&utxos)?;
            } else {
                print_utxos(&address, &utxos);
            }
        }
        QueryCommands::Tip { raw } => {
            let tip = cli.query().tip().await?;
            if raw {
                print_json(&tip)?;
            } else {
                print_tip(&tip);
            }
        }
        QueryCommands::ProtocolParameters { name } => {
            let path = cli.query().protocol_parameters(name.as_deref()).await?;
            print_artifact("Protocol parameters written to", &path);
        }
    }
    Ok(())
}

async fn execute_transaction_command(cli: &SystemCardano, command: TransactionCommands) -> Result<()> {
    match command {
        TransactionCommands::BuildRaw(args) => {
            let path = cli.transaction().build_raw(&BuildRawParams::from(args)).await?;
            print_artifact("Transaction body written to", &path);
        }
        TransactionCommands::CalculateMinFee { tx_body_file } => {
            let fee = cli.transaction().calculate_min_fee(&tx_body_file).await?;
            println!("{fee}");
        }
        TransactionCommands::Sign { tx_body_file, signing_key_files } => {
            let path = cli.transaction().sign(&tx_body_file, &signing_key_files).await?;
            print_artifact("Signed transaction written to", &path);
        }
        TransactionCommands::Submit { tx_file, raw } => {
            let outcome = cli.transaction().submit(&tx_file).await?;
            if raw {
                print_json(&outcome)?;
            } else {
                print_submit_outcome(&outcome);
            }
        }
        TransactionCommands::Txid { tx_file } => {
            println!("{}", cli.transaction().txid(&tx_file).await?);
        }
        TransactionCommands::View { tx_file } => {
            print!("{}", cli.transaction().view(&tx_file).await?);
        }
        TransactionCommands::PolicyId { script_file } => {
            println!("{}", cli.transaction().policy_id(&script_file).await?);
        }
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
