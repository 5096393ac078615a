use crate::error::{Result, RsaError};
use crate::rsa::{Key, KeySet};
use log::{info, debug};
use num::{BigUint, Zero};
use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

const KEY_DIR: &str = ".textbook_rsa";

/// Plain-text key files, one `exponent\nmodulus` pair per file.
#[derive(Debug, Clone)]
pub struct KeyStore {
    root: PathBuf
}

impl KeyStore {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root
        }
    }

    pub fn default_root() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(RsaError::NoHomeDir)?;
        Ok(home.join(KEY_DIR))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn save_keys(&self, name: &str, keyset: &KeySet) -> Result<()> {
        info!("Saving RSA keyset {}", name);
        let key_root = self.key_root()?;
        let public_file = File::create(key_root.join(public_file_name(name)))?;
        save_key(keyset.public_key(), public_file)?;
        let private_file = File::create(key_root.join(private_file_name(name)))?;
        save_key(keyset.private_key(), private_file)?;
        Ok(())
    }

    pub fn load_public_key(&self, name: &str) -> Result<Key> {
        self.load_key(&public_file_name(name))
    }

    pub fn load_private_key(&self, name: &str) -> Result<Key> {
        self.load_key(&private_file_name(name))
    }

    pub fn keypair_exists(&self, name: &str) -> Result<bool> {
        let private_path = self.root.join(private_file_name(name));
        let public_path = self.root.join(public_file_name(name));
        Ok(private_path.try_exists()? && public_path.try_exists()?)
    }

    fn load_key(&self, name: &str) -> Result<Key> {
        info!("Loading Key: {}", name);
        let path = self.root.join(name);
        debug!("Key File: {:?}", path);
        let contents = fs::read_to_string(&path)?;
        let lines: Vec<&str> = contents.lines().collect();
        if lines.len() != 2 {
            return Err(RsaError::MalformedKey {
                path,
                reason: format!("expected 2 lines, found {}", lines.len())
            })
        }
        let exponent = lines[0].trim().parse::<BigUint>()?;
        let modulus = lines[1].trim().parse::<BigUint>()?;
        if modulus.is_zero() {
            return Err(RsaError::MalformedKey {
                path,
                reason: "modulus is zero".to_string()
            })
        }
        Ok(Key::new(exponent, modulus))
    }

    fn key_root(&self) -> Result<&Path> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        Ok(&self.root)
    }
}

fn save_key(key: &Key, mut file: File) -> Result<()> {
    let data = format!("{}\n{}", key.exponent(), key.modulus());
    Ok(file.write_all(data.as_bytes())?)
}

fn public_file_name(name: &str) -> String {
    format!("{}.rsa.pub", name)
}

fn private_file_name(name: &str) -> String {
    format!("{}.rsa", name)
}
