// Criterion benchmarks for the BookSwap match core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::collections::HashMap;

use bookswap_match::core::{haversine_distance, titles_match, Ranker};
use bookswap_match::models::{Book, BookCondition, Profile, ViewerContext};

fn create_candidate(id: usize) -> Book {
    Book {
        id: id.to_string(),
        title: match id % 4 {
            0 => "Dune".to_string(),
            1 => "The Hobbit".to_string(),
            2 => "Emma".to_string(),
            _ => format!("Novel {}", id),
        },
        author: format!("Author {}", id),
        isbn: None,
        condition: BookCondition::Good,
        description: None,
        genre: Some("Fiction".to_string()),
        cover_url: None,
        available_for_swap: true,
        owner_id: format!("owner{}", id),
        created_at: None,
    }
}

fn create_owner(id: usize, lat: f64, lon: f64) -> Profile {
    Profile {
        user_id: format!("owner{}", id),
        display_name: Some(format!("Owner {}", id)),
        address: None,
        latitude: Some(lat),
        longitude: Some(lon),
    }
}

fn create_viewer() -> ViewerContext {
    ViewerContext {
        user_id: "viewer".to_string(),
        coordinates: Some((52.52, 13.405)),
        wishlist_titles: vec!["Dune".to_string(), "Hobbit".to_string()],
        library_titles: vec!["Neuromancer".to_string(), "Snow Crash".to_string()],
    }
}

fn bench_haversine_distance(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            haversine_distance(
                black_box(52.52),
                black_box(13.405),
                black_box(48.14),
                black_box(11.58),
            )
        });
    });
}

fn bench_title_matching(c: &mut Criterion) {
    c.bench_function("titles_match", |b| {
        b.iter(|| titles_match(black_box("The Hobbit"), black_box("Hobbit")));
    });
}

fn bench_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_candidates");

    for size in [100usize, 1_000, 5_000] {
        let viewer = create_viewer();
        let candidates: Vec<Book> = (0..size).map(create_candidate).collect();
        let owners: HashMap<String, Profile> = (0..size)
            .map(|i| {
                let p = create_owner(
                    i,
                    52.0 + (i as f64 * 0.001) % 2.0,
                    13.0 + (i as f64 * 0.001) % 2.0,
                );
                (p.user_id.clone(), p)
            })
            .collect();
        let owner_wishlists: HashMap<String, Vec<String>> = (0..size)
            .filter(|i| i % 5 == 0)
            .map(|i| (format!("owner{}", i), vec!["Neuromancer".to_string()]))
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            let ranker = Ranker::with_default_weights();
            b.iter(|| {
                ranker.rank(
                    black_box(&viewer),
                    black_box(candidates.clone()),
                    black_box(&owners),
                    black_box(&owner_wishlists),
                    50,
                )
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_haversine_distance, bench_title_matching, bench_ranking);
criterion_main!(benches);
