use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use uuid::Uuid;

use geoprep_core::analytics::{score_percentiles, Dashboard};
use geoprep_core::model::{
    CandidateArchetype, CognitiveLevel, ErrorCategory, EvaluationModule, EvaluationResult,
    LogEntry,
};
use geoprep_core::prompts::TOPICS;

fn make_logs(n: usize) -> Vec<LogEntry> {
    (0..n)
        .map(|i| {
            let mut result = EvaluationResult::default();
            result.user_feedback.score_total = (i * 37 % 101) as f64;
            result.admin_analytics.candidate_archetype =
                Some(CandidateArchetype::KNOWN[i % 4].clone());
            result.admin_analytics.error_category = Some(ErrorCategory::KNOWN[i % 4].clone());
            result.admin_analytics.cognitive_level = Some(CognitiveLevel::KNOWN[i % 4].clone());
            LogEntry {
                id: Uuid::new_v4(),
                timestamp: Utc::now(),
                student: format!("student-{}", i % 25),
                topic: TOPICS[i % TOPICS.len()].to_string(),
                question: "Explain the monsoon".into(),
                module: EvaluationModule::ALL[i % 3],
                result,
            }
        })
        .collect()
}

fn bench_dashboard(c: &mut Criterion) {
    let mut group = c.benchmark_group("dashboard");

    for n in [10, 1_000, 10_000] {
        let logs = make_logs(n);
        group.bench_function(format!("compute/{n}"), |b| {
            b.iter(|| Dashboard::compute(black_box(&logs)))
        });
        group.bench_function(format!("percentiles/{n}"), |b| {
            b.iter(|| score_percentiles(black_box(&logs)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_dashboard);
criterion_main!(benches);
