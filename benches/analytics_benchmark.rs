use career_tracker::models::{ApplicationInput, Confidence, JobApplication, Status, Summary};
use chrono::Utc;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

const STATUSES: [Status; 6] = [
    Status::Applied,
    Status::Ghosted,
    Status::Interview,
    Status::Replied,
    Status::Offer,
    Status::Rejected,
];

fn applications(count: u64) -> Vec<JobApplication> {
    (0..count)
        .map(|id| {
            let input = ApplicationInput {
                job_title: "Engineer".to_string(),
                role_type: "Full-time".to_string(),
                company: format!("Company {}", id),
                duration: String::new(),
                salary_est: Some(50_000 + id as i64),
                resume_match: None,
                status: STATUSES[(id % 6) as usize],
                location: "Remote".to_string(),
                link: "https://example.com".to_string(),
                confidence: Confidence::Medium,
                contacts: None,
                notes: None,
                source: None,
                remote: true,
            };
            JobApplication::new(id, 1, input, Utc::now())
        })
        .collect()
}

fn benchmark_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("summary_from_applications");

    for count in [10, 1_000, 10_000] {
        let apps = applications(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &apps, |b, apps| {
            b.iter(|| Summary::from_applications(black_box(apps)))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_summary);
criterion_main!(benches);
