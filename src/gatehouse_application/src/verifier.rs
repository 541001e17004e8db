//! Fixed-time secret verification.
//!
//! The presented secret is stretched with Argon2id under the stored salt. The
//! derived digest and the stored digest are then both passed through
//! HMAC-SHA256 under a per-process random key, and the two fingerprints are
//! compared with [`subtle::ConstantTimeEq`]. Because the fingerprints always
//! have the same length, comparison time does not depend on the stored
//! digest's length or on where the first differing byte sits.
//!
//! When no stored hash is available (unknown identity, store failure, or a
//! row that does not parse) the same work runs against a dummy hash created
//! with the same parameters, and the result is forced to `false`.

use std::sync::Arc;

use argon2::{
    ARGON2ID_IDENT, Algorithm, Argon2, Params, PasswordHash, PasswordHasher, Version,
    password_hash::{SaltString, rand_core},
};
use gatehouse_core::{Password, StoredHash};
use hmac::{Hmac, Mac};
use rand::RngCore;
use secrecy::ExposeSecret;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Length of derived secret digests, in bytes.
pub const DIGEST_LEN: usize = 32;

const FINGERPRINT_LEN: usize = 32;
const MAX_SALT_LEN: usize = 64;

#[derive(Debug, Error)]
pub enum VerifierError {
    #[error("Invalid hashing parameters: {0}")]
    InvalidParams(String),
    #[error("Failed to prepare verifier: {0}")]
    Setup(String),
}

/// Argon2id cost parameters. Stored hashes and the dummy hash must be
/// produced with the same values or the two paths stop costing the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashParams {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashParams {
    fn default() -> Self {
        Self {
            memory_kib: 15000,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl HashParams {
    pub fn argon2(&self) -> Result<Argon2<'static>, VerifierError> {
        let params = Params::new(
            self.memory_kib,
            self.iterations,
            self.parallelism,
            Some(DIGEST_LEN),
        )
        .map_err(|e| VerifierError::InvalidParams(e.to_string()))?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }

    /// Produces a PHC string for `secret` under a fresh random salt.
    pub fn hash_secret(&self, secret: &[u8]) -> Result<String, VerifierError> {
        let salt = SaltString::generate(rand_core::OsRng);
        self.argon2()?
            .hash_password(secret, &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| VerifierError::Setup(e.to_string()))
    }
}

#[derive(Clone)]
pub struct ConstantTimeVerifier {
    inner: Arc<Inner>,
}

struct Inner {
    argon2: Argon2<'static>,
    mac: HmacSha256,
    dummy: StoredHash,
}

impl ConstantTimeVerifier {
    pub fn new(params: HashParams) -> Result<Self, VerifierError> {
        let argon2 = params.argon2()?;

        let mut key = [0u8; 64];
        rand::rng().fill_bytes(&mut key);
        let mac = HmacSha256::new_from_slice(&key)
            .map_err(|e| VerifierError::Setup(e.to_string()))?;

        let mut dummy_secret = [0u8; 32];
        rand::rng().fill_bytes(&mut dummy_secret);
        let dummy = StoredHash::from(params.hash_secret(&dummy_secret)?);

        Ok(Self {
            inner: Arc::new(Inner { argon2, mac, dummy }),
        })
    }

    /// Checks `secret` against `stored`, or against the dummy hash when
    /// `stored` is `None`. Both paths perform the same Argon2 and HMAC work.
    pub fn verify(&self, secret: &Password, stored: Option<&StoredHash>) -> bool {
        let secret = secret.as_ref().expose_secret().as_bytes();

        let derived = stored.and_then(|stored| self.derive_stored(stored.as_phc(), secret));
        let is_real = derived.is_some();

        let (candidate, expected) = match derived {
            Some(pair) => pair,
            None => PasswordHash::new(self.inner.dummy.as_phc())
                .ok()
                .and_then(|dummy| self.derive(&self.inner.argon2, &dummy, secret))
                .unwrap_or_else(|| (vec![0u8; DIGEST_LEN], vec![0xff; DIGEST_LEN])),
        };

        let matched = self.digests_match(&candidate, &expected);

        // Non-short-circuiting so both operands are always evaluated.
        is_real & matched
    }

    /// Derives against a stored PHC string using the cost parameters it
    /// records. Returns `None` for hashes outside the configured cost class
    /// so the caller falls back to the dummy path.
    fn derive_stored(&self, phc: &str, secret: &[u8]) -> Option<(Vec<u8>, Vec<u8>)> {
        let hash = PasswordHash::new(phc).ok()?;

        let supported = hash.algorithm == ARGON2ID_IDENT
            && hash.version.is_none_or(|v| v == u32::from(Version::V0x13));
        if !supported {
            tracing::warn!(
                reason = "hash_unsupported",
                algorithm = %hash.algorithm,
                "Stored hash is not Argon2id v19"
            );
            return None;
        }

        let stored = Params::try_from(&hash).ok()?;
        let configured = self.inner.argon2.params();
        if !same_cost_class(&stored, configured) {
            tracing::warn!(
                reason = "hash_params_mismatch",
                stored_m = stored.m_cost(),
                stored_t = stored.t_cost(),
                stored_p = stored.p_cost(),
                "Stored hash cost is outside the configured class, rejecting"
            );
            return None;
        }
        if (stored.m_cost(), stored.t_cost()) != (configured.m_cost(), configured.t_cost()) {
            tracing::warn!(
                reason = "hash_params_mismatch",
                stored_m = stored.m_cost(),
                stored_t = stored.t_cost(),
                "Stored hash uses different cost parameters and should be rehashed"
            );
        }

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, stored);
        self.derive(&argon2, &hash, secret)
    }

    /// Stretches `secret` with the salt from `hash`, returning the candidate
    /// digest and the stored digest.
    fn derive(
        &self,
        argon2: &Argon2<'_>,
        hash: &PasswordHash<'_>,
        secret: &[u8],
    ) -> Option<(Vec<u8>, Vec<u8>)> {
        let salt = hash.salt?;
        let expected = hash.hash?;

        let mut salt_buf = [0u8; MAX_SALT_LEN];
        let salt = salt.decode_b64(&mut salt_buf).ok()?;

        let mut candidate = vec![0u8; expected.len()];
        argon2.hash_password_into(secret, salt, &mut candidate).ok()?;

        Some((candidate, expected.as_bytes().to_vec()))
    }

    pub(crate) fn digests_match(&self, candidate: &[u8], expected: &[u8]) -> bool {
        let candidate = self.fingerprint(candidate);
        let expected = self.fingerprint(expected);
        candidate.ct_eq(&expected).into()
    }

    fn fingerprint(&self, bytes: &[u8]) -> [u8; FINGERPRINT_LEN] {
        let mut mac = self.inner.mac.clone();
        mac.update(bytes);

        let mut out = [0u8; FINGERPRINT_LEN];
        out.copy_from_slice(&mac.finalize().into_bytes());
        out
    }
}

/// Same lane count and an `m * t` product within a factor of two, so a
/// legacy hash costs about as much as the dummy path.
fn same_cost_class(stored: &Params, configured: &Params) -> bool {
    let cost = |params: &Params| u64::from(params.m_cost()) * u64::from(params.t_cost());
    let (stored_cost, configured_cost) = (cost(stored), cost(configured));

    stored.p_cost() == configured.p_cost()
        && stored_cost * 2 >= configured_cost
        && stored_cost <= configured_cost * 2
}
