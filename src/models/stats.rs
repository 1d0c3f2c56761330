// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Application analytics summary.
//!
//! Recomputed from the user's applications on every request; nothing is
//! cached or stored.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{JobApplication, Status};

/// Applications per status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StatusCount {
    pub status: String,
    pub count: u32,
}

/// Outcome rates in whole percent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RateSummary {
    pub offer_rate: u32,
    pub rejection_rate: u32,
    pub interview_rate: u32,
    pub total_offers: u32,
    pub interview_count: u32,
}

/// Response body of the stats endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Summary {
    pub total_applications: u32,
    /// Descending by count, ties by status name
    pub status_breakdown: Vec<StatusCount>,
    pub analytics: RateSummary,
}

impl Summary {
    /// Aggregate a set of applications (all owned by one user).
    pub fn from_applications(applications: &[JobApplication]) -> Self {
        let total = applications.len() as u32;

        let mut counts: HashMap<Status, u32> = HashMap::new();
        for application in applications {
            *counts.entry(application.status).or_insert(0) += 1;
        }
        let count_of = |status: Status| counts.get(&status).copied().unwrap_or(0);

        let mut status_breakdown: Vec<StatusCount> = counts
            .iter()
            .map(|(status, &count)| StatusCount {
                status: status.as_str().to_string(),
                count,
            })
            .collect();
        status_breakdown.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.status.cmp(&b.status)));

        let offers = count_of(Status::Offer);
        let rejections = count_of(Status::Rejected);
        let interviews = count_of(Status::Interview);

        Self {
            total_applications: total,
            status_breakdown,
            analytics: RateSummary {
                offer_rate: percent(offers, total),
                rejection_rate: percent(rejections, total),
                interview_rate: percent(interviews, total),
                total_offers: offers,
                interview_count: interviews,
            },
        }
    }
}

/// `part / total * 100`, rounded half up; 0 when `total` is 0.
pub fn percent(part: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let (part, total) = (u64::from(part), u64::from(total));
    ((part * 200 + total) / (total * 2)) as u32
}
