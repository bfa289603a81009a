// Copyright 2025 the Uberseg Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Masking one object in a synthetic crowded field.
//!
//! This example paints a handful of disc-shaped objects into a segmentation
//! map, masks the weight map for one of them with every strategy, and checks
//! that the masks agree.
//!
//! Run:
//! - `cargo run -p uberseg_demos --example crowded_field`

use flexi_logger::Logger;
use log::info;
use ndarray::Array2;
use uberseg::{IndexBackend, UbersegParams, mask_foreign_labels, uberseg};

const NX: usize = 96;
const NY: usize = 64;

/// (center x, center y, radius, label)
const OBJECTS: [(usize, usize, usize, i32); 6] = [
    (20, 18, 7, 1),
    (34, 24, 5, 2),
    (50, 40, 9, 3),
    (70, 12, 4, 4),
    (80, 50, 6, 5),
    (12, 52, 3, 6),
];

fn paint_field() -> Array2<i32> {
    let mut seg = Array2::<i32>::zeros((NX, NY));
    for &(cx, cy, r, label) in &OBJECTS {
        let r2 = r * r;
        for ((x, y), px) in seg.indexed_iter_mut() {
            let dx = x.abs_diff(cx);
            let dy = y.abs_diff(cy);
            // Later objects paint over earlier ones, like a deblender would.
            if dx * dx + dy * dy <= r2 {
                *px = label;
            }
        }
    }
    seg
}

fn render(weight: &Array2<f32>) -> String {
    let mut out = String::new();
    for y in (0..NY).step_by(4) {
        for x in (0..NX).step_by(2) {
            out.push(if weight[[x, y]] > 0.0 { '#' } else { '.' });
        }
        out.push('\n');
    }
    out
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Use "trace" to watch the indexed search grow its radius.
    let _logger = Logger::try_with_str("debug")?.start()?;

    let seg = paint_field();
    let target = 2;

    let mut plain = Array2::<f32>::ones((NX, NY));
    let zeroed = mask_foreign_labels(seg.view(), plain.view_mut(), target)?;
    info!("plain segmentation mask zeroed {zeroed} pixels");

    let strategies = [
        ("direct", UbersegParams::direct()),
        ("flat vec", UbersegParams::indexed(IndexBackend::FlatVec)),
        ("k-d tree", UbersegParams::indexed(IndexBackend::KdTree)),
        (
            "grid",
            UbersegParams::indexed(IndexBackend::Grid { cell_size: None }),
        ),
    ];

    let mut reference: Option<Array2<f32>> = None;
    for (name, params) in strategies {
        let mut weight = Array2::<f32>::ones((NX, NY));
        let stats = uberseg(seg.view(), weight.view_mut(), target, &params)?;
        info!(
            "{name}: kept {} of {} pixels ({} zeroed)",
            weight.iter().filter(|&&w| w > 0.0).count(),
            NX * NY,
            stats.zeroed()
        );
        match &reference {
            None => reference = Some(weight),
            Some(expected) => {
                if *expected != weight {
                    return Err(format!("{name} disagrees with the direct search").into());
                }
            }
        }
    }

    if let Some(weight) = reference {
        println!("{}", render(&weight));
    }
    Ok(())
}
