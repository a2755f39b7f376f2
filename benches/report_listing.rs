use criterion::{black_box, criterion_group, criterion_main, Criterion};
use llmcompress_rs::recipe::Recipe;
use llmcompress_rs::report::write_listing;
use std::fs;
use tempfile::TempDir;

// Shard layout similar to a sharded checkpoint directory
fn populate(root: &std::path::Path, dirs: usize, files_per_dir: usize) {
    for d in 0..dirs {
        let dir = root.join(format!("shard-{d:03}"));
        fs::create_dir_all(&dir).unwrap();
        for f in 0..files_per_dir {
            fs::write(dir.join(format!("model-{f:05}.safetensors")), b"").unwrap();
        }
    }
}

fn bench_listing_small(c: &mut Criterion) {
    let temp_dir = TempDir::new().unwrap();
    populate(temp_dir.path(), 1, 8);

    c.bench_function("listing_small", |b| {
        b.iter(|| {
            let mut out = Vec::new();
            write_listing(&mut out, black_box(temp_dir.path())).unwrap();
            black_box(out);
        });
    });
}

fn bench_listing_large(c: &mut Criterion) {
    let temp_dir = TempDir::new().unwrap();
    populate(temp_dir.path(), 16, 200);

    c.bench_function("listing_large", |b| {
        b.iter(|| {
            let mut out = Vec::new();
            write_listing(&mut out, black_box(temp_dir.path())).unwrap();
            black_box(out);
        });
    });
}

fn bench_recipe_yaml(c: &mut Criterion) {
    let recipe = Recipe::smoothquant_w8a8();

    c.bench_function("recipe_yaml", |b| {
        b.iter(|| {
            let yaml = black_box(recipe.to_yaml().unwrap());
            black_box(yaml);
        });
    });
}

criterion_group!(
    benches,
    bench_listing_small,
    bench_listing_large,
    bench_recipe_yaml,
);
criterion_main!(benches);
