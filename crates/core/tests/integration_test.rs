//! Integration tests for the full huffviz pipeline.
//!
//! These tests verify end-to-end behavior: text -> frequencies -> tree ->
//! codes -> encoded bits -> statistics, plus layouts and frames built from
//! the same model.

use huffviz_core::{
    build_tree, compression_stats, iterate_frames, CodeTable, FrequencyTable, HuffmanTree,
    LayoutParams, Tree,
};
use pretty_assertions::assert_eq;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rstest::rstest;

/// Minimum weighted external path length by trying every merge order.
///
/// The weighted path length of a full binary tree equals the sum of its
/// internal node weights, and every such tree arises from some merge order.
fn brute_force_cost(weights: &[u64]) -> u64 {
    if weights.len() <= 1 {
        return 0;
    }
    let mut best = u64::MAX;
    for i in 0..weights.len() {
        for j in (i + 1)..weights.len() {
            let merged = weights[i] + weights[j];
            let mut rest: Vec<u64> = weights
                .iter()
                .enumerate()
                .filter(|&(k, _)| k != i && k != j)
                .map(|(_, &w)| w)
                .collect();
            rest.push(merged);
            best = best.min(merged + brute_force_cost(&rest));
        }
    }
    best
}

/// Text where symbol `i` occurs `counts[i]` times, interleaved.
fn text_from_counts(counts: &[u64]) -> String {
    let mut remaining = counts.to_vec();
    let mut text = String::new();
    while remaining.iter().any(|&c| c > 0) {
        for (i, c) in remaining.iter_mut().enumerate() {
            if *c > 0 {
                text.push(char::from(b'a' + i as u8));
                *c -= 1;
            }
        }
    }
    text
}

#[test]
fn test_scenario_empty_input() {
    let model = build_tree("").expect("build failed");

    assert!(model.root().is_none());
    assert!(model.codes().is_empty());
    assert_eq!(model.encoded(), "");
    assert!(model.tree().steps().is_empty());

    let stats = compression_stats(&model);
    assert_eq!(stats.original_bits, 0);
    assert_eq!(stats.compressed_bits, 0);
    assert_eq!(stats.percent_saved, 0.0);
}

#[test]
fn test_scenario_single_character() {
    let model = build_tree("x").expect("build failed");

    let root = model.root().expect("root missing");
    assert_eq!(model.tree().node(root).symbol(), Some('x'));
    assert_eq!(model.tree().node(root).freq(), 1);
    assert!(model.tree().steps().is_empty());
    assert_eq!(model.codes().get('x'), Some(""));
    assert_eq!(model.encoded(), "");

    let stats = compression_stats(&model);
    assert_eq!(stats.original_bits, 8);
    assert_eq!(stats.compressed_bits, 0);
    assert_eq!(stats.percent_saved, 100.0);
}

#[test]
fn test_scenario_three_symbols() {
    let model = build_tree("aaaabbbcc").expect("build failed");

    let freqs: Vec<_> = model.frequencies().iter().collect();
    assert_eq!(freqs, vec![('a', 4), ('b', 3), ('c', 2)]);
    assert_eq!(model.tree().steps().len(), 2);

    let len = |s| model.codes().get(s).unwrap().len() as u64;
    assert!(len('a') <= len('b'));
    assert!(len('b') <= len('c'));

    let stats = compression_stats(&model);
    assert_eq!(stats.compressed_bits, 4 * len('a') + 3 * len('b') + 2 * len('c'));
    assert_eq!(stats.original_bits, 72);
    assert!(stats.compressed_bits < stats.original_bits);
}

#[test]
fn test_scenario_two_equal_symbols() {
    let model = build_tree("aabb").expect("build failed");

    let steps = model.tree().steps();
    assert_eq!(steps.len(), 1);
    assert_eq!(Some(steps[0].merged), model.root());
    assert_eq!(model.codes().get('a'), Some("0"));
    assert_eq!(model.codes().get('b'), Some("1"));
}

#[test]
fn test_scenario_five_symbol_frames() {
    let model = build_tree("aaaaabbbbcccdde").expect("build failed");
    let frames: Vec<_> = model.frames(&LayoutParams::default()).collect();

    assert_eq!(frames.len(), 5);

    let tree = model.tree();
    let (left, right) = frames[0].highlighted.expect("first frame has a pair");
    assert_eq!(tree.node(left).symbol(), Some('e'));
    assert_eq!(tree.node(right).symbol(), Some('d'));
    assert!(frames[4].highlighted.is_none());
}

#[rstest]
#[case(&[1, 1])]
#[case(&[5, 1, 1])]
#[case(&[3, 3, 3, 3])]
#[case(&[1, 2, 4, 8, 16])]
#[case(&[7, 1, 7, 1, 7, 1])]
#[case(&[10, 9, 8, 2, 2, 1])]
#[case(&[1, 1, 1, 1, 1, 1])]
fn test_minimal_weighted_length(#[case] counts: &[u64]) {
    let text = text_from_counts(counts);
    let model = build_tree(&text).expect("build failed");

    let weighted = model.codes().weighted_length(model.frequencies());
    assert_eq!(weighted, brute_force_cost(counts));
    assert_eq!(weighted, model.encoded().len() as u64);
}

#[test]
fn test_minimality_on_random_small_alphabets() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);

    for _ in 0..200 {
        let k = rng.gen_range(2..=6);
        let counts: Vec<u64> = (0..k).map(|_| rng.gen_range(1..=12)).collect();
        let model = build_tree(&text_from_counts(&counts)).unwrap();

        assert_eq!(
            model.codes().weighted_length(model.frequencies()),
            brute_force_cost(&counts),
            "counts {counts:?}"
        );
        assert!(model.codes().is_prefix_free());
    }
}

#[test]
fn test_determinism_with_seeded_ties() {
    // Few distinct counts over many symbols forces ties at every level
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for _ in 0..50 {
        let k = rng.gen_range(2..=20);
        let counts: Vec<(char, u64)> = (0..k)
            .map(|i| (char::from(b'A' + i as u8), rng.gen_range(1..=3)))
            .collect();
        let freqs = FrequencyTable::from_counts(counts);

        let first = Tree::build(&freqs);
        let second = Tree::build(&freqs);
        assert_eq!(first, second);
        assert_eq!(CodeTable::generate(&first), CodeTable::generate(&second));
    }
}

#[test]
fn test_build_twice_identical() {
    let text = "she sells sea shells by the sea shore";
    let first = HuffmanTree::build(text).unwrap();
    let second = HuffmanTree::build(text).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(first.tree()).unwrap(),
        serde_json::to_string(second.tree()).unwrap()
    );
}

#[test]
fn test_frames_match_steps() {
    let model = build_tree("abracadabra alakazam").unwrap();
    let tree = model.tree();
    let frames: Vec<_> = iterate_frames(tree, &LayoutParams::default()).collect();

    assert_eq!(frames.len(), tree.steps().len() + 1);
    for (i, step) in tree.steps().iter().enumerate() {
        assert_eq!(frames[i].index, i);
        assert_eq!(frames[i].subtree_root, step.merged);
        assert_eq!(frames[i].highlighted, Some((step.left, step.right)));
    }
    assert_eq!(Some(frames.last().unwrap().subtree_root), model.root());
}

#[test]
fn test_final_frame_matches_static_layout() {
    let model = build_tree("lorem ipsum dolor sit amet").unwrap();
    let params = LayoutParams::default().zoom_in();

    let last = model.frames(&params).last().unwrap();
    assert_eq!(last.layout, model.layout(&params));
}

#[test]
fn test_layout_json_export() {
    let model = build_tree("hello").unwrap();
    let layout = model.layout(&LayoutParams::default());
    let json = serde_json::to_value(&layout).unwrap();

    let positions = json["positions"].as_object().expect("positions object");
    assert_eq!(positions.len(), model.tree().len());
    assert!(json["width"].as_f64().unwrap() >= 600.0);
}

#[test]
fn test_long_skewed_chain() {
    // Fibonacci counts give the deepest possible tree
    let mut counts = vec![1u64, 1];
    while counts.len() < 25 {
        let n = counts.len();
        counts.push(counts[n - 1] + counts[n - 2]);
    }
    let freqs = FrequencyTable::from_counts(
        counts
            .iter()
            .enumerate()
            .map(|(i, &c)| (char::from_u32(0x100 + i as u32).unwrap(), c)),
    );
    let tree = Tree::build(&freqs);

    assert_eq!(tree.height(), Some(24));
    let params = LayoutParams::default();
    let layout = huffviz_core::compute_layout(&tree, tree.root(), &params);
    assert_eq!(layout.positions.len(), tree.len());

    let codes = CodeTable::generate(&tree);
    assert!(codes.is_prefix_free());
    assert_eq!(codes.iter().map(|(_, c)| c.len()).max(), Some(24));
}
