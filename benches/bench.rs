use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use helpmatch::core::{Matcher, calculate_match_score};
use helpmatch::models::{JobPosting, WorkerProfile, WorkType, ScoringWeights};

const SKILLS: [&str; 6] = ["Cleaning", "Cooking", "Laundry", "Childcare", "Elder care", "Driving"];
const CITIES: [&str; 4] = ["Mumbai", "Pune", "Delhi", "Bengaluru"];

fn create_job(i: usize) -> JobPosting {
    JobPosting {
        id: format!("job_{}", i),
        required_skills: SKILLS.iter().take(2 + i % 3).map(|s| s.to_string()).collect(),
        salary_amount: Some(12000.0 + (i % 10) as f64 * 1000.0),
        city: Some(CITIES[i % CITIES.len()].to_string()),
        state: Some("Maharashtra".to_string()),
        min_experience_years: Some((i % 5) as u32),
        work_type: Some(WorkType::ALL[i % WorkType::ALL.len()]),
    }
}

fn create_candidate(i: usize) -> WorkerProfile {
    WorkerProfile {
        id: format!("worker_{}", i),
        skills: SKILLS.iter().skip(i % 4).take(3).map(|s| s.to_string()).collect(),
        hourly_rate: Some(10000.0 + (i % 12) as f64 * 1000.0),
        city: Some(CITIES[(i / 2) % CITIES.len()].to_string()),
        state: Some("Maharashtra".to_string()),
        experience_years: (i % 8) as u32,
        preferred_work_types: [WorkType::ALL[i % 5], WorkType::ALL[(i + 2) % 5]].into_iter().collect(),
        is_available: i % 4 != 0,
    }
}

fn bench_match_score(c: &mut Criterion) {
    let job = create_job(1);
    let worker = create_candidate(1);
    let weights = ScoringWeights::default();

    c.bench_function("calculate_match_score", |b| {
        b.iter(|| calculate_match_score(black_box(&job), black_box(&worker), black_box(&weights)))
    });
}

fn bench_ranking(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();
    let job = create_job(0);
    let worker = create_candidate(0);

    let mut group = c.benchmark_group("ranking");

    for candidate_count in [10, 100, 500, 1000].iter() {
        let workers: Vec<WorkerProfile> = (0..*candidate_count).map(create_candidate).collect();
        let jobs: Vec<JobPosting> = (0..*candidate_count).map(create_job).collect();

        group.bench_with_input(
            BenchmarkId::new("rank_workers", candidate_count),
            candidate_count,
            |b, _| b.iter(|| matcher.rank_workers(black_box(&job), black_box(&workers))),
        );

        group.bench_with_input(
            BenchmarkId::new("rank_jobs", candidate_count),
            candidate_count,
            |b, _| b.iter(|| matcher.rank_jobs(black_box(&worker), black_box(&jobs))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_match_score, bench_ranking);

criterion_main!(benches);
