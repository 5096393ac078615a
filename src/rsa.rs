use crate::codec;
use crate::error::{Result, RsaError};
use crate::math::{gcd, modular_pow, multiplicative_inverse};
use crate::math::prime::PrimeSampler;
use log::{info, trace, debug, warn};
use num::bigint::RandBigInt;
use num::{BigUint, One, ToPrimitive};
use rand::Rng;

/// Upper bound of the prime range as a multiple of the size hint.
pub const RANGE_FACTOR: u64 = 10;

#[derive(Debug, PartialEq, Clone, Eq)]
pub struct Key {
    exponent: BigUint,
    modulus: BigUint
}

#[derive(Debug, Clone)]
pub struct KeySet {
    private_key: Key,
    public_key: Key,
    phi: BigUint,
    primes: (BigUint, BigUint),
    size_hint: u64
}

impl Key {
    pub fn new(exponent: BigUint, modulus: BigUint) -> Self {
        Self {
            exponent,
            modulus
        }
    }

    pub fn exponent(&self) -> &BigUint {
        &self.exponent
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    pub fn encrypt(&self, code_point: u32) -> BigUint {
        trace!("Running encrypt: {}", code_point);
        let input = BigUint::from(code_point);
        if input >= self.modulus {
            warn!("Code point {} is not below the modulus {}, it will not survive decryption", code_point, self.modulus);
        }
        modular_pow(&input, &self.exponent, &self.modulus)
    }

    pub fn decrypt(&self, input: &BigUint) -> BigUint {
        trace!("Running decrypt: {}", input);
        modular_pow(input, &self.exponent, &self.modulus)
    }

    /// Encrypts every char of `input` into its own number.
    pub fn encrypt_string(&self, input: &str) -> Vec<BigUint> {
        input.chars().map(|i| {
            self.encrypt(i as u32)
        }).collect()
    }

    pub fn decrypt_sequence_to_string(&self, input: &[BigUint]) -> String {
        input.iter().map(|i| {
            to_char(&self.decrypt(i))
        }).collect()
    }

    pub fn encrypt_stream(&self, input: &str) -> String {
        codec::encode(input, self)
    }

    pub fn decrypt_stream(&self, input: &str) -> String {
        codec::decode(input, self)
    }
}

/// Maps a decrypted number back to its char, substituting U+FFFD for values
/// that are not Unicode scalar values.
pub(crate) fn to_char(value: &BigUint) -> char {
    match value.to_u32().and_then(char::from_u32) {
        Some(c) => c,
        None => {
            warn!("Decrypted value {} is not a valid char", value);
            char::REPLACEMENT_CHARACTER
        }
    }
}

/// Draws from `[min_val, max_val]` until the prime differs from `other`.
/// Collisions count against the sampler's attempt ceiling.
pub(crate) fn sample_distinct_prime<R: Rng + ?Sized>(
    sampler: &PrimeSampler,
    rng: &mut R,
    min_val: &BigUint,
    max_val: &BigUint,
    other: &BigUint
) -> Result<BigUint> {
    let mut prime = sampler.generate_prime_candidate(rng, min_val, max_val)?;
    let mut resamples = 0u64;
    while &prime == other {
        if sampler.exhausted(resamples) {
            return Err(RsaError::RangeExhausted {
                min: min_val.clone(),
                max: max_val.clone(),
                attempts: resamples
            })
        }
        trace!("Prime collided with {}, resampling", other);
        prime = sampler.generate_prime_candidate(rng, min_val, max_val)?;
        resamples += 1;
    }
    Ok(prime)
}

impl KeySet {
    pub fn new(size_hint: u64) -> Result<Self> {
        let mut rng = rand::thread_rng();
        Self::generate(size_hint, &PrimeSampler::unbounded(), &mut rng)
    }

    /// Draws `p != q` from `[size_hint, 10 * size_hint]`, then a public
    /// exponent coprime with `phi` and its inverse.
    pub fn generate<R: Rng + ?Sized>(
        size_hint: u64,
        sampler: &PrimeSampler,
        rng: &mut R
    ) -> Result<Self> {
        if size_hint == 0 {
            return Err(RsaError::InvalidSizeHint(size_hint))
        }
        info!("Generating new RSA keyset");
        let min_val = BigUint::from(size_hint);
        let max_val = &min_val * RANGE_FACTOR;
        let p = sampler.generate_prime_candidate(rng, &min_val, &max_val)?;
        let q = sample_distinct_prime(sampler, rng, &min_val, &max_val, &p)?;
        debug!("Primes: p = {}, q = {}", p, q);

        let one = BigUint::one();
        let n = &p * &q;
        let phi = (&p - &one) * (&q - &one);
        debug!("Modulus: {}, phi: {}", n, phi);

        let mut e = rng.gen_biguint_range(&one, &phi);
        while !gcd(&e, &phi).is_one() {
            trace!("Exponent {} shares a factor with phi", e);
            e = rng.gen_biguint_range(&one, &phi);
        }
        let d = multiplicative_inverse(&e, &phi).ok_or_else(|| RsaError::NotInvertible {
            exponent: e.clone(),
            modulus: phi.clone()
        })?;
        debug!("Exponents: e = {}, d = {}", e, d);

        Ok(Self {
            private_key: Key::new(d, n.clone()),
            public_key: Key::new(e, n),
            phi,
            primes: (p, q),
            size_hint
        })
    }

    pub fn public_key(&self) -> &Key {
        &self.public_key
    }

    pub fn private_key(&self) -> &Key {
        &self.private_key
    }

    pub fn phi(&self) -> &BigUint {
        &self.phi
    }

    pub fn primes(&self) -> (&BigUint, &BigUint) {
        (&self.primes.0, &self.primes.1)
    }

    pub fn modulus(&self) -> &BigUint {
        self.public_key.modulus()
    }

    pub fn size_hint(&self) -> u64 {
        self.size_hint
    }
}
