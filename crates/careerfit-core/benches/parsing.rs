use criterion::{black_box, criterion_group, criterion_main, Criterion};

use careerfit_core::parser::{parse_bank_str, validate_bank, BUILTIN_BANK};

fn bench_toml_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("toml_parsing");

    let small_toml = generate_bank_toml(5);
    let medium_toml = generate_bank_toml(50);
    let large_toml = generate_bank_toml(200);

    group.bench_function("builtin", |b| {
        b.iter(|| parse_bank_str(black_box(BUILTIN_BANK), black_box("builtin.toml".as_ref())))
    });

    group.bench_function("5_per_section", |b| {
        b.iter(|| parse_bank_str(black_box(&small_toml), black_box("bench.toml".as_ref())))
    });

    group.bench_function("50_per_section", |b| {
        b.iter(|| parse_bank_str(black_box(&medium_toml), black_box("bench.toml".as_ref())))
    });

    group.bench_function("200_per_section", |b| {
        b.iter(|| parse_bank_str(black_box(&large_toml), black_box("bench.toml".as_ref())))
    });

    group.finish();
}

fn bench_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("validation");
    let bank = parse_bank_str(&generate_bank_toml(200), "bench.toml".as_ref())
        .expect("generated bank parses");

    group.bench_function("200_per_section", |b| {
        b.iter(|| validate_bank(black_box(&bank)))
    });

    group.finish();
}

fn generate_bank_toml(n: usize) -> String {
    let mut s = String::new();
    s.push_str(
        r#"[bank]
id = "bench"
title = "Benchmark"
role = "Bench Analyst"
"#,
    );
    let dimensions = ["attention_to_detail", "analytical_mindset", "quality_focus"];
    let categories = ["Will", "Interest", "Skill", "Cognitive Readiness", "Ability to Learn", "Real-World Alignment"];
    for i in 0..n {
        s.push_str(&format!(
            r#"
[[psychometric]]
id = "psych_{i}"
category = "Work Style"
prompt = "Statement {i}"
dimension = "{dimension}"

[[technical]]
id = "tech_{i}"
category = "Statistics"
difficulty = "basic"
prompt = "Question {i}"
options = ["a", "b", "c", "d"]
correct = {correct}
explanation = "Option {correct} is right"

[[wiscar]]
id = "wiscar_{i}"
category = "{category}"
prompt = "Career statement {i}"
kind = "preference"
"#,
            dimension = dimensions[i % dimensions.len()],
            correct = i % 4,
            category = categories[i % categories.len()],
        ));
    }
    s
}

criterion_group!(benches, bench_toml_parsing, bench_validation);
criterion_main!(benches);
