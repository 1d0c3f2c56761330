// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Job application repository: owner-scoped CRUD with filter, search and
//! ordering.

use crate::crypto;
use crate::db::Db;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{merge_patch, ApplicationInput, Confidence, JobApplication, Source, Status};
use crate::services::authz::{can, Action, Resource};
use crate::services::storage::FileStore;
use chrono::Utc;
use serde::Deserialize;
use std::cmp::Ordering;
use validator::Validate;

/// List parameters, as accepted on the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationQuery {
    pub status: Option<Status>,
    pub source: Option<Source>,
    pub confidence: Option<Confidence>,
    pub role_type: Option<String>,
    pub remote: Option<bool>,
    /// Whitespace-separated terms; each must appear in some searchable field
    pub search: Option<String>,
    /// Comma-separated keys, `-` prefix for descending
    pub ordering: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortField {
    AppliedAt,
    SalaryEst,
    Confidence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SortKey {
    field: SortField,
    descending: bool,
}

/// Parse an ordering string. Unknown keys are ignored; with no usable key
/// the default is most recently applied first.
fn parse_ordering(ordering: Option<&str>) -> Vec<SortKey> {
    let keys: Vec<SortKey> = ordering
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .filter_map(|term| {
            let (descending, name) = match term.strip_prefix('-') {
                Some(name) => (true, name),
                None => (false, term),
            };
            let field = match name {
                "applied_at" => SortField::AppliedAt,
                "salary_est" => SortField::SalaryEst,
                "confidence" => SortField::Confidence,
                other => {
                    tracing::debug!(key = other, "Ignoring unknown ordering key");
                    return None;
                }
            };
            Some(SortKey { field, descending })
        })
        .collect();

    if keys.is_empty() {
        vec![SortKey {
            field: SortField::AppliedAt,
            descending: true,
        }]
    } else {
        keys
    }
}

fn compare(a: &JobApplication, b: &JobApplication, key: SortKey) -> Ordering {
    let directed = |ord: Ordering| if key.descending { ord.reverse() } else { ord };
    match key.field {
        SortField::AppliedAt => directed(a.applied_at.cmp(&b.applied_at)),
        SortField::Confidence => directed(a.confidence.rank().cmp(&b.confidence.rank())),
        // Missing salaries sort last in either direction.
        SortField::SalaryEst => match (a.salary_est, b.salary_est) {
            (Some(x), Some(y)) => directed(x.cmp(&y)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}

fn matches_search(application: &JobApplication, search: &str) -> bool {
    let fields: Vec<String> = application
        .searchable_fields()
        .into_iter()
        .flatten()
        .map(str::to_lowercase)
        .collect();

    search
        .split_whitespace()
        .map(str::to_lowercase)
        .all(|term| fields.iter().any(|field| field.contains(&term)))
}

impl ApplicationQuery {
    fn matches(&self, application: &JobApplication) -> bool {
        self.status.is_none_or(|s| application.status == s)
            && self.source.is_none_or(|s| application.source == Some(s))
            && self.confidence.is_none_or(|c| application.confidence == c)
            && self
                .role_type
                .as_deref()
                .is_none_or(|r| application.role_type == r)
            && self.remote.is_none_or(|r| application.remote == r)
            && self
                .search
                .as_deref()
                .is_none_or(|s| matches_search(application, s))
    }
}

#[derive(Clone)]
pub struct ApplicationRepository {
    db: Db,
    files: FileStore,
}

impl ApplicationRepository {
    pub fn new(db: Db, files: FileStore) -> Self {
        Self { db, files }
    }

    pub async fn list(
        &self,
        identity: &AuthUser,
        query: &ApplicationQuery,
    ) -> Result<Vec<JobApplication>> {
        let mut applications: Vec<JobApplication> = self
            .db
            .applications_for_owner(identity.user_id)
            .await?
            .into_iter()
            .filter(|a| query.matches(a))
            .collect();

        let keys = parse_ordering(query.ordering.as_deref());
        applications.sort_by(|a, b| {
            keys.iter()
                .map(|&key| compare(a, b, key))
                .find(|ord| ord.is_ne())
                .unwrap_or_else(|| b.id.cmp(&a.id))
        });

        Ok(applications)
    }

    /// Fetch one application; anything the caller does not own is `NotFound`.
    pub async fn get(&self, identity: &AuthUser, id: u64) -> Result<JobApplication> {
        self.load(identity, id, Action::Read).await
    }

    pub async fn create(
        &self,
        identity: &AuthUser,
        input: ApplicationInput,
    ) -> Result<JobApplication> {
        input.validate()?;

        let application =
            JobApplication::new(crypto::random_id()?, identity.user_id, input, Utc::now());
        self.db.upsert_application(&application).await?;

        tracing::info!(
            user_id = identity.user_id,
            application_id = application.id,
            "Application created"
        );
        Ok(application)
    }

    /// Full replacement of the writable fields.
    pub async fn update(
        &self,
        identity: &AuthUser,
        id: u64,
        input: ApplicationInput,
    ) -> Result<JobApplication> {
        input.validate()?;

        let mut application = self.load(identity, id, Action::Update).await?;
        application.apply(input);
        self.db.upsert_application(&application).await?;

        tracing::debug!(application_id = id, "Application updated");
        Ok(application)
    }

    /// Merge-patch the writable fields and re-validate the result.
    pub async fn patch(
        &self,
        identity: &AuthUser,
        id: u64,
        patch: serde_json::Value,
    ) -> Result<JobApplication> {
        let mut application = self.load(identity, id, Action::Update).await?;

        let input: ApplicationInput = merge_patch(&application.to_input(), patch)?;
        input.validate()?;
        application.apply(input);
        self.db.upsert_application(&application).await?;

        tracing::debug!(application_id = id, "Application patched");
        Ok(application)
    }

    /// Delete an application with its interviews, documents and stored files.
    pub async fn delete(&self, identity: &AuthUser, id: u64) -> Result<()> {
        let application = self.load(identity, id, Action::Delete).await?;

        let interviews = self.db.interviews_for_application(application.id).await?;
        for interview in &interviews {
            self.db.delete_interview(interview.id).await?;
        }

        let documents = self.db.documents_for_application(application.id).await?;
        for document in &documents {
            if let Err(e) = self.files.remove(&document.file).await {
                tracing::warn!(
                    document_id = document.id,
                    error = %e,
                    "Failed to remove stored file"
                );
            }
            self.db.delete_document(document.id).await?;
        }

        self.db.delete_application(application.id).await?;

        tracing::info!(
            user_id = identity.user_id,
            application_id = id,
            interviews = interviews.len(),
            documents = documents.len(),
            "Application deleted"
        );
        Ok(())
    }

    async fn load(&self, identity: &AuthUser, id: u64, action: Action) -> Result<JobApplication> {
        match self.db.get_application(id).await? {
            Some(application) if can(identity, action, Resource::Application(&application)) => {
                Ok(application)
            }
            _ => Err(AppError::NotFound(format!("Application {} not found", id))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn application(id: u64, salary: Option<i64>, confidence: Confidence) -> JobApplication {
        let input: ApplicationInput = serde_json::from_value(serde_json::json!({
            "job_title": "Backend Engineer",
            "role_type": "Full-time",
            "company": "Acme",
            "status": "APPLIED",
            "location": "Remote",
            "link": "https://acme.example/jobs/1",
            "confidence": "MEDIUM",
            "notes": "Reached out to the hiring manager"
        }))
        .unwrap();
        let applied = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap() + Duration::days(id as i64);
        let mut app = JobApplication::new(id, 1, input, applied);
        app.salary_est = salary;
        app.confidence = confidence;
        app
    }

    fn sorted(mut apps: Vec<JobApplication>, ordering: Option<&str>) -> Vec<u64> {
        let keys = parse_ordering(ordering);
        apps.sort_by(|a, b| {
            keys.iter()
                .map(|&key| compare(a, b, key))
                .find(|ord| ord.is_ne())
                .unwrap_or_else(|| b.id.cmp(&a.id))
        });
        apps.into_iter().map(|a| a.id).collect()
    }

    #[test]
    fn test_default_ordering_is_newest_first() {
        let apps = vec![
            application(1, None, Confidence::Low),
            application(3, None, Confidence::Low),
            application(2, None, Confidence::Low),
        ];
        assert_eq!(sorted(apps, None), vec![3, 2, 1]);
    }

    #[test]
    fn test_salary_nulls_sort_last_both_ways() {
        let apps = || {
            vec![
                application(1, Some(100), Confidence::Low),
                application(2, None, Confidence::Low),
                application(3, Some(300), Confidence::Low),
            ]
        };
        assert_eq!(sorted(apps(), Some("salary_est")), vec![1, 3, 2]);
        assert_eq!(sorted(apps(), Some("-salary_est")), vec![3, 1, 2]);
    }

    #[test]
    fn test_multi_key_ordering_and_unknown_keys() {
        let apps = vec![
            application(1, None, Confidence::High),
            application(2, None, Confidence::Low),
            application(3, None, Confidence::High),
        ];
        assert_eq!(
            sorted(apps, Some("-confidence, applied_at,bogus")),
            vec![1, 3, 2]
        );
        assert_eq!(parse_ordering(Some("bogus")), parse_ordering(None));
    }

    #[test]
    fn test_search_requires_every_term() {
        let app = application(1, None, Confidence::Low);
        assert!(matches_search(&app, "acme"));
        assert!(matches_search(&app, "ACME hiring"));
        assert!(matches_search(&app, "  "));
        assert!(!matches_search(&app, "acme frontend"));
    }

    #[test]
    fn test_query_filters() {
        let mut app = application(1, None, Confidence::Low);
        app.source = Some(Source::Referral);

        let query = ApplicationQuery {
            source: Some(Source::Referral),
            remote: Some(false),
            ..Default::default()
        };
        assert!(query.matches(&app));

        let query = ApplicationQuery {
            status: Some(Status::Offer),
            ..Default::default()
        };
        assert!(!query.matches(&app));
    }
}
