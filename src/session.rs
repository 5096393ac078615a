use crate::cli::Format;
use crate::error::Result;
use crate::math::reduce;
use crate::rsa::{Key, KeySet};
use log::{debug, info};
use num::{BigInt, BigUint};
use std::error::Error;
use std::io::{BufRead, Write};

pub fn render_numbers(input: &[BigUint]) -> String {
    input
        .iter()
        .map(|i| {
            i.to_string()
        })
        .collect::<Vec<String>>()
        .join(", ")
}

/// Parses `"123, -456"` into its numbers. Signs are kept, reduction is up
/// to the caller.
pub fn parse_cipher_numbers(input: &str) -> Result<Vec<BigInt>> {
    Ok(input
        .split(',')
        .map(|i| {
            i.trim().parse::<BigInt>()
        })
        .collect::<std::result::Result<Vec<BigInt>, _>>()?)
}

pub fn encrypt_with(key: &Key, format: Format, message: &str) -> String {
    match format {
        Format::Stream => key.encrypt_stream(message),
        Format::Numbers => render_numbers(&key.encrypt_string(message))
    }
}

pub fn decrypt_with(key: &Key, format: Format, ciphertext: &str) -> Result<String> {
    match format {
        Format::Stream => Ok(key.decrypt_stream(ciphertext)),
        Format::Numbers => {
            let numbers = parse_cipher_numbers(ciphertext)?
                .iter()
                .map(|i| {
                    reduce(i, key.modulus())
                })
                .collect::<Vec<BigUint>>();
            Ok(key.decrypt_sequence_to_string(&numbers))
        }
    }
}

pub fn print_diagnostics<W: Write>(keyset: &KeySet, output: &mut W) -> std::io::Result<()> {
    let (p, q) = keyset.primes();
    writeln!(output, "p = {}", p)?;
    writeln!(output, "q = {}", q)?;
    writeln!(output, "n = {}", keyset.modulus())?;
    writeln!(output, "phi = {}", keyset.phi())?;
    writeln!(output, "Public Key: ({}, {})", keyset.public_key().exponent(), keyset.public_key().modulus())?;
    writeln!(output, "Private Key: ({}, {})", keyset.private_key().exponent(), keyset.private_key().modulus())?;
    Ok(())
}

/// Menu loop over `input` until the user exits or input runs out.
pub fn run_session<R: BufRead, W: Write>(
    keyset: &KeySet,
    format: Format,
    mut input: R,
    output: &mut W
) -> std::result::Result<(), Box<dyn Error>> {
    info!("Session started with {} ciphertext", format);
    loop {
        writeln!(output, "\n-------------------------")?;
        writeln!(output, "       MAIN MENU")?;
        writeln!(output, "-------------------------")?;
        writeln!(output, "1. Encrypt a message")?;
        writeln!(output, "2. Decrypt a message")?;
        writeln!(output, "3. Exit")?;
        write!(output, "\nEnter your choice (1-3): ")?;
        output.flush()?;

        let Some(choice) = read_line(&mut input)? else {
            break;
        };
        match choice.trim() {
            "1" => {
                write!(output, "Enter the message to encrypt: ")?;
                output.flush()?;
                let Some(message) = read_line(&mut input)? else {
                    break;
                };
                let ciphertext = encrypt_with(keyset.public_key(), format, &message);
                writeln!(output, "\n[SUCCESS] Encrypted Output (copy this):")?;
                writeln!(output, "{}", ciphertext)?;
            }
            "2" => {
                match format {
                    Format::Stream => writeln!(output, "Enter the encrypted stream:")?,
                    Format::Numbers => writeln!(output, "Enter the cipher numbers separated by commas (e.g., 1234, 5678):")?
                }
                write!(output, "> ")?;
                output.flush()?;
                let Some(ciphertext) = read_line(&mut input)? else {
                    break;
                };
                match decrypt_with(keyset.private_key(), format, ciphertext.trim()) {
                    Ok(plaintext) => {
                        writeln!(output, "\n[SUCCESS] Decrypted Message: {}", plaintext)?;
                    }
                    Err(error) => {
                        debug!("Decryption input rejected: {}", error);
                        writeln!(output, "\n[ERROR] Invalid input. Please enter numbers separated by commas.")?;
                    }
                }
            }
            "3" => break,
            _ => {
                writeln!(output, "\n[INVALID] Please choose 1, 2, or 3.")?;
            }
        }
    }
    writeln!(output, "Exiting program. Goodbye!")?;
    Ok(())
}

fn read_line<R: BufRead>(input: &mut R) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None)
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
