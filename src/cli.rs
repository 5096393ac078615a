use std::error::Error;
use std::fmt::Formatter;
use std::io;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use crate::keystore::KeyStore;
use crate::math::prime::PrimeSampler;
use crate::rsa::KeySet;
use crate::session;

const DEFAULT_SIZE_HINT: u64 = 1000;

#[derive(Parser)]
#[command(name = "textbook-rsa")]
#[command(version, about = "Textbook RSA key generation and per-character encryption", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    /// Directory holding saved keys, defaults to '~/.textbook_rsa'
    #[arg(long, global = true)]
    pub key_dir: Option<PathBuf>,
    #[command(flatten)]
    pub(crate) verbose: clap_verbosity_flag::Verbosity
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a key pair for this run and open the interactive menu
    Session {
        /// Lower bound k of the prime range [k, 10k], defaults to 1000
        #[arg(short, long, default_value_t = DEFAULT_SIZE_HINT)]
        size_hint: u64,
        /// How ciphertext is written and read, defaults to the shifted-digit stream
        #[arg(short, long, default_value_t = Format::Stream)]
        format: Format,
        /// Give up after this many rejected prime candidates
        /// instead of searching forever
        #[arg(short, long)]
        max_attempts: Option<u64>
    },
    /// Generate a key pair and save it
    Keygen {
        /// The name to save the public and private keys under
        #[arg(short, long)]
        key_name: String,
        /// Lower bound k of the prime range [k, 10k], defaults to 1000
        #[arg(short, long, default_value_t = DEFAULT_SIZE_HINT)]
        size_hint: u64,
        /// Give up after this many rejected prime candidates
        /// instead of searching forever
        #[arg(short, long)]
        max_attempts: Option<u64>
    },
    /// Encrypt a message with a saved public key
    Encrypt {
        /// Public key name to use for encryption
        #[arg(short, long)]
        key_name: String,
        #[arg(short, long, default_value_t = Format::Stream)]
        format: Format,
        message: String
    },
    /// Decrypt a ciphertext with a saved private key
    Decrypt {
        /// Private key name to use for decryption
        #[arg(short, long)]
        key_name: String,
        #[arg(short, long, default_value_t = Format::Stream)]
        format: Format,
        ciphertext: String
    }
}

#[derive(ValueEnum, Debug, PartialEq, Copy, Clone)]
pub enum Format {
    /// Shifted decimal digits, each number closed by a separator char
    Stream,
    /// Comma separated decimal numbers
    Numbers
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Stream => write!(f, "stream"),
            Format::Numbers => write!(f, "numbers")
        }
    }
}

impl Cli {
    pub fn execute(&self) -> Result<(), Box<dyn Error>> {
        let stdout = io::stdout();
        let mut output = stdout.lock();
        self.command.execute(self.key_dir.as_deref(), io::stdin().lock(), &mut output)
    }
}

impl Commands {
    /// Runs the command. Only the commands that read or write key files
    /// resolve the key directory.
    pub fn execute<R: BufRead, W: Write>(
        &self,
        key_dir: Option<&Path>,
        input: R,
        output: &mut W
    ) -> Result<(), Box<dyn Error>> {
        match self {
            Commands::Session {
                size_hint,
                format,
                max_attempts
            } => {
                writeln!(output, "--- RSA System Starting ---")?;
                writeln!(output, "Generating new Key Pair for this session...")?;
                let keyset = generate(*size_hint, *max_attempts)?;
                writeln!(output, "Keys generated successfully.")?;
                session::print_diagnostics(&keyset, output)?;
                session::run_session(&keyset, *format, input, output)
            }
            Commands::Keygen {
                key_name,
                size_hint,
                max_attempts
            } => {
                let key_store = open_key_store(key_dir)?;
                writeln!(output, "Generating Keypair, this may take a moment...")?;
                let keyset = generate(*size_hint, *max_attempts)?;
                session::print_diagnostics(&keyset, output)?;
                if key_store.keypair_exists(key_name)? {
                    info!("Overwriting existing keys {}", key_name);
                }
                writeln!(output, "Saving keys with name {} in {:?}", key_name, key_store.root())?;
                key_store.save_keys(key_name, &keyset)?;
                Ok(())
            }
            Commands::Encrypt {
                key_name,
                format,
                message
            } => {
                let key = open_key_store(key_dir)?.load_public_key(key_name)?;
                writeln!(output, "{}", session::encrypt_with(&key, *format, message))?;
                Ok(())
            }
            Commands::Decrypt {
                key_name,
                format,
                ciphertext
            } => {
                let key = open_key_store(key_dir)?.load_private_key(key_name)?;
                writeln!(output, "{}", session::decrypt_with(&key, *format, ciphertext.trim())?)?;
                Ok(())
            }
        }
    }
}

fn open_key_store(key_dir: Option<&Path>) -> Result<KeyStore, Box<dyn Error>> {
    match key_dir {
        Some(key_dir) => Ok(KeyStore::new(key_dir.to_path_buf())),
        None => Ok(KeyStore::new(KeyStore::default_root()?))
    }
}

fn generate(size_hint: u64, max_attempts: Option<u64>) -> Result<KeySet, Box<dyn Error>> {
    let perf_start = Instant::now();
    let keyset = match max_attempts {
        None => KeySet::new(size_hint)?,
        Some(_) => {
            let sampler = PrimeSampler::new(max_attempts);
            info!("Prime sampling capped at {:?} attempts", sampler.max_attempts());
            KeySet::generate(size_hint, &sampler, &mut rand::thread_rng())?
        }
    };
    info!("Key generation with size hint {} took {:?}", keyset.size_hint(), perf_start.elapsed());
    Ok(keyset)
}
