use criterion::{black_box, criterion_group, criterion_main, Criterion};

use geoprep_core::evaluation::{extract_json_payload, parse_evaluation};

const RAW: &str = r#"{"user_feedback": {"score_total": 72, "framework_scores": {"dimension_1": 8, "dimension_2": 7, "dimension_3": 6}, "constructive_comment": "Link the Aravallis to groundwater recharge in Gurugram."}, "admin_analytics": {"module_used": "Interview", "candidate_archetype": "Academic", "error_category": "Contextual Blindness", "cognitive_level": "Analysis"}}"#;

fn bench_extract_payload(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_json_payload");

    let fenced = format!("Here is the evaluation:\n\n```json\n{RAW}\n```\n");
    let prose = format!("Sure! {RAW} Hope this helps.");

    group.bench_function("bare", |b| b.iter(|| extract_json_payload(black_box(RAW))));
    group.bench_function("fenced", |b| {
        b.iter(|| extract_json_payload(black_box(&fenced)))
    });
    group.bench_function("prose", |b| b.iter(|| extract_json_payload(black_box(&prose))));

    group.finish();
}

fn bench_parse_evaluation(c: &mut Criterion) {
    c.bench_function("parse_evaluation", |b| {
        b.iter(|| parse_evaluation(black_box(RAW)))
    });
}

criterion_group!(benches, bench_extract_payload, bench_parse_evaluation);
criterion_main!(benches);
