// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Outstanding email login code.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::OTP_VALIDITY_MINUTES;

/// One outstanding code per email (document ID is the encoded email).
///
/// Only a keyed digest of the code is stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailOtp {
    pub email: String,
    pub code_digest: String,
    pub created_at: DateTime<Utc>,
}

impl EmailOtp {
    /// A code is expired once it is older than the validity window.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.created_at) > Duration::minutes(OTP_VALIDITY_MINUTES)
    }
}
