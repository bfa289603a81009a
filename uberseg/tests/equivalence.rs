// Copyright 2025 the Uberseg Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Every strategy must produce the same mask on randomly generated fields.

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uberseg::{
    DirectSearch, IndexBackend, IndexedSearch, NearestObjectClassifier, SearchParams,
    UbersegParams, labeled_coords, object_coords, uberseg,
};

fn random_field(rng: &mut StdRng, nx: usize, ny: usize, labels: i32, fill: f64) -> Array2<i32> {
    Array2::from_shape_fn((nx, ny), |_| {
        if rng.random_bool(fill) {
            rng.random_range(1..=labels)
        } else {
            0
        }
    })
}

fn random_weight(rng: &mut StdRng, nx: usize, ny: usize) -> Array2<f32> {
    Array2::from_shape_fn((nx, ny), |_| rng.random_range(0.5_f32..2.0))
}

fn backends() -> [IndexBackend; 5] {
    [
        IndexBackend::FlatVec,
        IndexBackend::KdTree,
        IndexBackend::Grid { cell_size: None },
        IndexBackend::Grid { cell_size: Some(1) },
        IndexBackend::Grid { cell_size: Some(7) },
    ]
}

#[test]
fn indexed_matches_direct_on_random_fields() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for round in 0..40 {
        let nx = rng.random_range(1..24);
        let ny = rng.random_range(1..24);
        let fill = [0.01, 0.05, 0.3][round % 3];
        let seg = random_field(&mut rng, nx, ny, 4, fill);
        let weight = random_weight(&mut rng, nx, ny);
        let target = rng.random_range(1..=4);
        let seeds = labeled_coords(seg.view());

        let mut expected = weight.clone();
        let direct = DirectSearch
            .classify_and_mask(seg.view(), expected.view_mut(), target, &seeds)
            .unwrap();

        for backend in backends() {
            let mut actual = weight.clone();
            let stats = IndexedSearch::new(backend, SearchParams::default())
                .classify_and_mask(seg.view(), actual.view_mut(), target, &seeds)
                .unwrap();
            assert_eq!(actual, expected, "round {round}, {backend:?}");
            assert_eq!(stats, direct, "round {round}, {backend:?}");
        }
    }
}

#[test]
fn target_only_seeds_agree_too() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..10 {
        let seg = random_field(&mut rng, 20, 15, 3, 0.1);
        let seeds = object_coords(seg.view(), 2);

        let mut expected = Array2::<f32>::ones((20, 15));
        DirectSearch
            .classify_and_mask(seg.view(), expected.view_mut(), 2, &seeds)
            .unwrap();
        for backend in backends() {
            let mut actual = Array2::<f32>::ones((20, 15));
            IndexedSearch::new(backend, SearchParams::default())
                .classify_and_mask(seg.view(), actual.view_mut(), 2, &seeds)
                .unwrap();
            assert_eq!(actual, expected, "{backend:?}");
        }

        // Only foreign labels are zeroed when every seed belongs to the target.
        if !seeds.is_empty() {
            for ((x, y), &w) in expected.indexed_iter() {
                let label = seg[[x, y]];
                assert_eq!(w == 0.0, label > 0 && label != 2, "({x}, {y})");
            }
        }
    }
}

#[test]
fn masking_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(99);
    let seg = random_field(&mut rng, 30, 30, 5, 0.05);
    let params = UbersegParams::default();

    let mut once = random_weight(&mut rng, 30, 30);
    uberseg(seg.view(), once.view_mut(), 3, &params).unwrap();
    let mut twice = once.clone();
    uberseg(seg.view(), twice.view_mut(), 3, &params).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn weights_are_kept_exactly_or_zeroed() {
    let mut rng = StdRng::seed_from_u64(3);
    let seg = random_field(&mut rng, 25, 18, 3, 0.08);
    let before = random_weight(&mut rng, 25, 18);
    let mut after = before.clone();
    let stats = uberseg(seg.view(), after.view_mut(), 1, &UbersegParams::default()).unwrap();

    let mut zeroed = 0;
    for ((x, y), &w) in after.indexed_iter() {
        let label = seg[[x, y]];
        if label == 1 {
            assert_eq!(w, before[[x, y]]);
        } else if label > 0 {
            assert_eq!(w, 0.0);
        }
        if w == 0.0 {
            zeroed += 1;
        } else {
            assert_eq!(w, before[[x, y]]);
        }
    }
    assert_eq!(zeroed, stats.zeroed());
    assert_eq!(stats.target + stats.zeroed_foreign + stats.searched(), 25 * 18);
}

#[test]
fn single_object_keeps_everything_it_does_not_share() {
    let mut seg = Array2::<i32>::zeros((16, 16));
    seg[[8, 8]] = 4;
    for params in [
        UbersegParams::direct(),
        UbersegParams::indexed(IndexBackend::KdTree),
        UbersegParams::indexed(IndexBackend::Grid { cell_size: None }),
    ] {
        let mut weight = Array2::<f32>::ones((16, 16));
        let stats = uberseg(seg.view(), weight.view_mut(), 4, &params).unwrap();
        assert_eq!(stats.zeroed(), 0, "{params:?}");
        assert_eq!(stats.kept_nearest, 16 * 16 - 1, "{params:?}");

        // Another target sees the whole field owned by object 4.
        let mut weight = Array2::<f32>::ones((16, 16));
        let stats = uberseg(seg.view(), weight.view_mut(), 5, &params).unwrap();
        assert_eq!(stats.zeroed(), 16 * 16, "{params:?}");
        assert_eq!(weight.sum(), 0.0, "{params:?}");
    }
}

#[test]
fn transposed_views_are_handled() {
    let mut rng = StdRng::seed_from_u64(11);
    let seg = random_field(&mut rng, 12, 9, 3, 0.1);
    let seg_t = seg.t();

    let mut expected = Array2::<f32>::ones((9, 12));
    let seeds = labeled_coords(seg_t);
    DirectSearch
        .classify_and_mask(seg_t, expected.view_mut(), 2, &seeds)
        .unwrap();

    let mut actual = Array2::<f32>::ones((9, 12));
    uberseg(seg_t, actual.view_mut(), 2, &UbersegParams::default()).unwrap();
    assert_eq!(actual, expected);
}
