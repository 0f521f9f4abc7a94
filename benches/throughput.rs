use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use persona::{parse, summarize, Classifier, ClassifierConfig, FeatureVector};

const ROWS: u32 = 2_500;

/// Deterministic synthetic export with both classes and a sprinkling of gaps.
fn make_export() -> String {
    let mut text = String::from(persona::parser::HEADER);
    for i in 0..ROWS {
        let introvert = i % 3 == 0;
        let alone = if introvert { 6 + i % 5 } else { i % 4 };
        let drained = match (introvert, i % 17) {
            (_, 0) => "",
            (true, _) => "Yes",
            (false, _) => "No",
        };
        text.push_str(&format!(
            "\n{i},{alone},{},{},{},{drained},{},{},{}",
            if introvert { "Yes" } else { "No" },
            if introvert { i % 3 } else { 4 + i % 6 },
            if introvert { i % 2 } else { 3 + i % 4 },
            if introvert { i % 6 } else { 7 + i % 9 },
            if introvert { i % 3 } else { 4 + i % 7 },
            if introvert { "Introvert" } else { "Extrovert" },
        ));
    }
    text
}

fn bench_parse(c: &mut Criterion) {
    let text = make_export();
    let mut group = c.benchmark_group("parse");
    group.throughput(Throughput::Elements(u64::from(ROWS)));
    group.bench_function("export", |b| b.iter(|| parse(black_box(&text))));
    group.finish();
}

fn bench_summarize(c: &mut Criterion) {
    let records = parse(&make_export()).records;
    c.bench_function("summarize/export", |b| {
        b.iter(|| summarize(black_box(&records)).unwrap());
    });
}

fn bench_classify(c: &mut Criterion) {
    let records = parse(&make_export()).records;
    let query = FeatureVector::builder()
        .time_spent_alone(7.0)
        .stage_fear("Yes")
        .social_event_attendance(2.0)
        .going_outside(1.0)
        .drained_after_socializing("Yes")
        .friends_circle_size(3.0)
        .post_frequency(1.0)
        .build()
        .unwrap();

    let mut group = c.benchmark_group("classify");
    group.throughput(Throughput::Elements(u64::from(ROWS)));
    for k in [1usize, 5, 25] {
        let classifier = Classifier::new(ClassifierConfig::default().with_k(k)).unwrap();
        group.bench_function(format!("k{k}"), |b| {
            b.iter(|| classifier.classify(black_box(&records), black_box(&query)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_summarize, bench_classify);
criterion_main!(benches);
