use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;

use rsa_messenger::rsa::{
    decrypt_to_string, encrypt_string, from_base64, generate_keypair_with, to_base64,
    KeyGenConfig, PrivateKeyRecord, PublicKeyRecord,
};
use rsa_messenger::util::{KeyStore, KeyStoreConfig};

#[derive(Parser)]
#[command(name = "rsa_messenger", version, about = "textbook RSA messages")]
struct Cli {
    /// Directory holding public.key, private.key and peer keys
    #[arg(long, global = true, default_value = ".")]
    key_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a key pair into public.key and private.key
    KeyGen {
        #[arg(value_name = "BITS")]
        bits: u32,

        #[arg(long, default_value_t = 151)]
        exponent: u64,

        #[arg(long, help = "prime search threads, default one per CPU")]
        workers: Option<usize>,
    },
    /// Take ownership of the local key pair for an identity
    Claim { email: String },
    /// Store a peer's base64 public key as <EMAIL>.key
    Import { email: String, key: String },
    /// Encrypt a message for a peer and print it as base64
    Encrypt {
        email: String,
        plaintext: String,

        #[arg(long, help = "use the local public key instead of <EMAIL>.key")]
        own: bool,
    },
    /// Decrypt a base64 message addressed to an identity
    Decrypt { email: String, ciphertext: String },
}

fn main() {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(e) = run(Cli::parse()) {
        log::error!("{:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let store = KeyStore::new(KeyStoreConfig::default().with_dir(cli.key_dir));

    match cli.command {
        Command::KeyGen {
            bits,
            exponent,
            workers,
        } => {
            let mut config = KeyGenConfig::new(bits).with_public_exponent(exponent);
            if let Some(workers) = workers {
                config = config.with_workers(workers);
            }

            let keypair = generate_keypair_with(&config).context("key generation failed")?;
            store.save_public(&PublicKeyRecord::new(&keypair.public_key))?;
            store.save_private(&PrivateKeyRecord::new(&keypair.private_key))?;
            println!("Key generated");
        }
        Command::Claim { email } => {
            let public = store.load_public()?.with_owner(&email);
            let mut private = store.load_private()?;
            private.authorize(&email);

            store.save_public(&public)?;
            store.save_private(&private)?;
            println!("Key claimed for {}", email);
        }
        Command::Import { email, key } => {
            let record = PublicKeyRecord {
                email: email.clone(),
                key,
            };
            record
                .public_key()
                .with_context(|| format!("rejecting key for {}", email))?;
            store.save_peer(&record)?;
            println!("Stored key for {}", email);
        }
        Command::Encrypt {
            email,
            plaintext,
            own,
        } => {
            let record = if own {
                store.load_public()?
            } else {
                store
                    .load_peer(&email)
                    .with_context(|| format!("no key for {}", email))?
            };
            let public_key = record.public_key()?;
            let ciphertext = encrypt_string(&plaintext, &public_key)?;
            println!("{}", to_base64(&ciphertext));
        }
        Command::Decrypt { email, ciphertext } => {
            let record = store.load_private()?;
            if !record.can_decrypt_for(&email) {
                bail!("cannot decode message, no private key for {}", email);
            }
            let private_key = record.private_key()?;
            let ciphertext = from_base64(&ciphertext).context("ciphertext is not base64")?;
            println!("{}", decrypt_to_string(&ciphertext, &private_key)?);
        }
    }

    Ok(())
}
