//! Page index policy under random navigation.

use carousel_engine::page::{Direction, PageIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Reference model: a plain signed index normalized the slow way.
fn expected(index: i64, page_count: usize, infinite: bool) -> usize {
    if page_count == 0 {
        return 0;
    }
    let count = page_count as i64;
    if infinite {
        index.rem_euclid(count) as usize
    } else {
        index.clamp(0, count - 1) as usize
    }
}

fn random_walk(seed: u64, infinite: bool) {
    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..50 {
        let page_count = rng.gen_range(0..12);
        let mut page = PageIndex::new(page_count, infinite);
        let mut model: i64 = 0;

        for _ in 0..200 {
            let direction = if rng.gen_bool(0.5) {
                Direction::Next
            } else {
                Direction::Previous
            };
            let before = page.current();
            let changed = page.step(direction);
            model = expected(model + direction.delta(), page_count, infinite) as i64;

            assert_eq!(page.current(), model as usize);
            assert_eq!(changed, before != page.current());
            if page_count > 0 {
                assert!(page.current() < page_count);
            } else {
                assert_eq!(page.current(), 0);
            }
        }
    }
}

#[test]
fn test_bounded_random_walk_stays_in_range() {
    random_walk(7, false);
}

#[test]
fn test_infinite_random_walk_wraps() {
    random_walk(11, true);
}

#[test]
fn test_go_to_matches_model() {
    let mut rng = StdRng::seed_from_u64(42);
    for infinite in [false, true] {
        for _ in 0..500 {
            let page_count = rng.gen_range(1..20);
            let target: i64 = rng.gen_range(-100..100);
            let mut page = PageIndex::new(page_count, infinite);
            page.go_to(target);
            assert_eq!(page.current(), expected(target, page_count, infinite));
        }
    }
}

#[test]
fn test_infinite_round_trip_returns_home() {
    let mut page = PageIndex::new(4, true);
    for _ in 0..4 {
        page.next();
    }
    assert_eq!(page.current(), 0);
    assert!(page.previous());
    assert_eq!(page.current(), 3);
}

#[test]
fn test_bounded_edges_do_not_move() {
    let mut page = PageIndex::new(3, false);
    assert!(!page.previous());
    assert!(page.go_to(2));
    assert!(!page.next());
    assert_eq!(page.current(), 2);
}

#[test]
fn test_reconfigure_pulls_index_into_range() {
    let mut page = PageIndex::new(10, false);
    page.go_to(8);
    page.reconfigure(4, false);
    assert_eq!(page.current(), 3);
    page.reconfigure(3, true);
    assert_eq!(page.current(), 0);
    page.reconfigure(0, false);
    assert_eq!(page.current(), 0);
}
