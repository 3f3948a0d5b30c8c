use criterion::{black_box, criterion_group, criterion_main, Criterion};

use examscore_core::model::{PaperQuestion, Question, QuestionType, Submission};
use examscore_core::scoring::{compute_score, compute_score_with, MatchMode, ScoringPolicy};
use examscore_core::validation::validate_submission;

fn make_exam(n: usize) -> (Vec<Question>, Vec<PaperQuestion>) {
    let key = (0..n)
        .map(|i| Question::new(format!("question{i}"), "will have been", 5))
        .collect();
    let paper = (0..n)
        .map(|i| PaperQuestion {
            id: format!("question{i}"),
            title: format!("Question {i}"),
            question_type: QuestionType::Radio,
            options: vec!["has been".into(), "will have been".into(), "will be".into()],
            marks: 5,
            required: true,
            page: 1,
        })
        .collect();
    (key, paper)
}

fn make_submission(n: usize, correct_every: usize) -> Submission {
    (0..n)
        .map(|i| {
            let answer = if i % correct_every == 0 {
                "will have been"
            } else {
                "Will Have Been"
            };
            (format!("question{i}"), answer)
        })
        .collect()
}

fn bench_compute_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_score");

    for n in [14, 50, 500] {
        let (key, _) = make_exam(n);
        let submission = make_submission(n, 2);
        group.bench_function(format!("exact/n={n}"), |b| {
            b.iter(|| compute_score(black_box(&key), black_box(&submission)))
        });
    }

    let (key, _) = make_exam(50);
    let submission = make_submission(50, 2);
    let policy = ScoringPolicy::default().with_match_mode(MatchMode::CaseInsensitive);
    group.bench_function("case_insensitive/n=50", |b| {
        b.iter(|| compute_score_with(black_box(&key), black_box(&submission), &policy))
    });

    group.finish();
}

fn bench_validate_submission(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate_submission");

    let (_, paper) = make_exam(50);
    let complete = make_submission(50, 1);
    group.bench_function("complete/n=50", |b| {
        b.iter(|| validate_submission(black_box(&paper), black_box(&complete)))
    });

    let partial = make_submission(25, 1);
    group.bench_function("half_missing/n=50", |b| {
        b.iter(|| validate_submission(black_box(&paper), black_box(&partial)))
    });

    group.finish();
}

criterion_group!(benches, bench_compute_score, bench_validate_submission);
criterion_main!(benches);
