use log::{trace, debug};
use num::{BigUint, Integer, One, Zero};
use num::bigint::RandBigInt;
use rand::Rng;
use crate::error::{Result, RsaError};

/// Trial division by odd numbers up to the integer square root.
pub fn is_prime(candidate: &BigUint) -> bool {
    let two = BigUint::from(2u8);
    if candidate < &two {
        return false
    }
    if candidate == &two {
        return true
    }
    if candidate.is_even() {
        return false
    }
    let limit = candidate.sqrt();
    let mut divisor = BigUint::from(3u8);
    while divisor <= limit {
        if (candidate % &divisor).is_zero() {
            return false
        }
        divisor += 2u8;
    }
    true
}

/// Rejection sampler for primes in a closed range.
///
/// With no attempt ceiling the sampler keeps drawing forever when the range
/// holds no prime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrimeSampler {
    max_attempts: Option<u64>
}

impl PrimeSampler {
    pub fn new(max_attempts: Option<u64>) -> Self {
        Self {
            max_attempts
        }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn max_attempts(&self) -> Option<u64> {
        self.max_attempts
    }

    /// Draws uniformly from `[min_val, max_val]` until a prime comes up.
    pub fn generate_prime_candidate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        min_val: &BigUint,
        max_val: &BigUint
    ) -> Result<BigUint> {
        if min_val > max_val {
            return Err(RsaError::InvalidRange {
                min: min_val.clone(),
                max: max_val.clone()
            })
        }
        debug!("Sampling prime in [{}, {}]", min_val, max_val);
        let upper = max_val + BigUint::one();
        let mut attempts = 0u64;
        loop {
            if self.exhausted(attempts) {
                return Err(RsaError::RangeExhausted {
                    min: min_val.clone(),
                    max: max_val.clone(),
                    attempts
                })
            }
            let candidate = rng.gen_biguint_range(min_val, &upper);
            if is_prime(&candidate) {
                trace!("Successful Prime: {}", candidate);
                return Ok(candidate)
            }
            trace!("Failed Prime: {}", candidate);
            attempts += 1;
        }
    }

    pub(crate) fn exhausted(&self, attempts: u64) -> bool {
        self.max_attempts.is_some_and(|limit| attempts >= limit)
    }
}
