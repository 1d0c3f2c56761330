// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Key derivation, secure randomness and keyed digests.

use anyhow::anyhow;
use hkdf::Hkdf;
use hmac::{Hmac, Mac};
use ring::rand::{SecureRandom, SystemRandom};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

const HKDF_SALT: &[u8] = b"career-tracker/v1";

/// Largest id we hand out; keeps ids exact in JavaScript numbers.
const MAX_SAFE_ID: u64 = (1 << 53) - 1;

/// Derive a 32-byte purpose-bound key from the master secret.
pub fn derive_key(master: &[u8], purpose: &str) -> anyhow::Result<[u8; 32]> {
    let hk = Hkdf::<Sha256>::new(Some(HKDF_SALT), master);
    let mut okm = [0u8; 32];
    hk.expand(purpose.as_bytes(), &mut okm)
        .map_err(|e| anyhow!("HKDF expand failed for {}: {}", purpose, e))?;
    Ok(okm)
}

/// Fill a fixed-size buffer from the system CSPRNG.
pub fn random_bytes<const N: usize>() -> anyhow::Result<[u8; N]> {
    let mut buf = [0u8; N];
    SystemRandom::new()
        .fill(&mut buf)
        .map_err(|_| anyhow!("System randomness unavailable"))?;
    Ok(buf)
}

/// Random non-zero record id.
pub fn random_id() -> anyhow::Result<u64> {
    loop {
        let id = u64::from_be_bytes(random_bytes::<8>()?) & MAX_SAFE_ID;
        if id != 0 {
            return Ok(id);
        }
    }
}

/// Uniformly random 6-digit decimal code in `100000..=999999`.
pub fn six_digit_code() -> anyhow::Result<String> {
    const SPAN: u32 = 900_000;
    // Reject the tail of the u32 range so the modulo stays unbiased.
    const LIMIT: u32 = u32::MAX - (u32::MAX % SPAN);

    loop {
        let raw = u32::from_be_bytes(random_bytes::<4>()?);
        if raw < LIMIT {
            return Ok((100_000 + raw % SPAN).to_string());
        }
    }
}

/// HMAC-SHA256 of `message` under `key`, hex encoded.
pub fn keyed_digest(key: &[u8], message: &str) -> anyhow::Result<String> {
    let mut mac = HmacSha256::new_from_slice(key).map_err(|e| anyhow!("HMAC init failed: {}", e))?;
    mac.update(message.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Constant-time string equality.
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
