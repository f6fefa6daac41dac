// Host-side tests for the ribbon history buffer.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wavescope_core::constants::REFERENCE_MIDPOINT;
use wavescope_core::{center_offset, RibbonHistory};

#[test]
fn five_pushes_into_four_slots() {
    let mut history = RibbonHistory::new(4, 2).unwrap();
    // Every frame averages 127, so no offset is applied.
    for k in 1..=5u8 {
        history.push_snapshot(&[127 - k, 127 + k]);
    }
    assert_eq!(history.front_index(), 3);
    for (offset, k) in (2..=5u8).rev().enumerate() {
        let expected = [(127 - k) as f32, (127 + k) as f32];
        assert_eq!(history.read_slot(offset), &expected);
    }
    // Frame 1 has been overwritten.
    assert!(history
        .iter_newest_first()
        .all(|slot| slot != [126.0, 128.0]));
}

#[test]
fn reads_do_not_mutate() {
    let mut history = RibbonHistory::new(3, 4).unwrap();
    history.push_snapshot(&[10, 20, 30, 40]);
    let first: Vec<Vec<f32>> = history.iter_newest_first().map(<[f32]>::to_vec).collect();
    let second: Vec<Vec<f32>> = history.iter_newest_first().map(<[f32]>::to_vec).collect();
    assert_eq!(first, second);
    assert_eq!(history.read_slot(1), history.read_slot(1));
}

#[test]
fn matches_a_simple_queue_model() {
    let mut rng = StdRng::seed_from_u64(99);
    let (capacity, width) = (5, 8);
    let mut history = RibbonHistory::new(capacity, width).unwrap();
    let mut model: VecDeque<Vec<f32>> =
        (0..capacity).map(|_| vec![REFERENCE_MIDPOINT; width]).collect();

    for _ in 0..40 {
        let frame: Vec<u8> = (0..width).map(|_| rng.gen()).collect();
        let offset = history.push_snapshot(&frame);
        assert_eq!(offset, center_offset(&frame));
        model.pop_back();
        model.push_front(frame.iter().map(|&s| s as f32 + offset).collect());

        for (k, want) in model.iter().enumerate() {
            assert_eq!(history.read_slot(k), &want[..]);
        }
    }
}

#[test]
fn full_frames_are_centred_on_the_midpoint() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut history = RibbonHistory::new(2, 16).unwrap();
    for _ in 0..20 {
        let bias: u8 = rng.gen_range(0..100);
        let frame: Vec<u8> = (0..16).map(|_| bias + rng.gen_range(0..50)).collect();
        history.push_snapshot(&frame);
        let mean: f32 = history.read_slot(0).iter().sum::<f32>() / 16.0;
        assert!((mean - REFERENCE_MIDPOINT).abs() < 1e-3);
    }
}
