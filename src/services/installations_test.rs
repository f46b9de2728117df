use super::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn sample(seed: u64) -> Vec<Installation> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_installations(&mut rng, DEFAULT_TARGET_COUNT)
}

// =============================================================
// Stratification
// =============================================================

#[test]
fn sector_counts_follow_building_share_with_floor_of_one() {
    let total: u32 = SECTOR_PROFILES.iter().map(|p| p.buildings).sum();
    let counts: Vec<usize> = SECTOR_PROFILES.iter().map(|p| sector_count(p, total, 400)).collect();
    assert_eq!(counts, vec![360, 1, 1, 12, 24, 3]);
}

#[test]
fn default_target_yields_401_records() {
    assert_eq!(sample(1).len(), 401);
}

#[test]
fn ids_are_sequential_across_sectors() {
    let insts = sample(2);
    for (i, inst) in insts.iter().enumerate() {
        assert_eq!(inst.id, format!("inst-{i}"));
    }
    assert_eq!(insts[0].sector, Sector::Residential);
    assert_eq!(insts[360].sector, Sector::Hospital);
    assert_eq!(insts[400].sector, Sector::Warehouse);
}

#[test]
fn zero_target_still_emits_one_per_sector() {
    let mut rng = StdRng::seed_from_u64(3);
    let insts = generate_installations(&mut rng, 0);
    assert_eq!(insts.len(), SECTOR_PROFILES.len());
}

// =============================================================
// Derived values
// =============================================================

#[test]
fn derived_metrics_stay_in_documented_ranges() {
    for inst in sample(4) {
        assert!((16.0..22.0).contains(&inst.efficiency), "efficiency {}", inst.efficiency);
        assert!((0.0..10.0).contains(&inst.age), "age {}", inst.age);
        assert!(inst.roi > 2.0 - 1e-9 && inst.roi < 17.0 + 1e-9, "roi {}", inst.roi);
        assert!((inst.opex - inst.capex * 0.015).abs() < 1e-6);
        assert!((inst.carbon_offset - carbon_offset_kg(inst.capacity)).abs() < 1e-6);
    }
}

#[test]
fn roi_combines_efficiency_and_age() {
    for inst in sample(5) {
        let expected = 7.0 + (inst.efficiency - 16.0) / 6.0 * 10.0 - inst.age / 2.0;
        assert!((inst.roi - expected).abs() < 1e-9);
    }
}

#[test]
fn capex_uses_even_area_split_not_jittered_capacity() {
    let insts = sample(6);
    let hotel = insts.iter().find(|i| i.sector == Sector::Hotel).unwrap();
    assert!((hotel.capex - 72_000.0 * 0.18 * 3500.0).abs() < 1e-6);
    assert!(hotel.capacity >= 72_000.0 * 0.8 && hotel.capacity <= 72_000.0 * 1.2);
}

#[test]
fn coordinates_scatter_near_cluster_centers() {
    for inst in sample(7) {
        let nearest = CLUSTER_CENTERS
            .iter()
            .map(|(lat, lng)| ((inst.lat - lat).powi(2) + (inst.lng - lng).powi(2)).sqrt())
            .fold(f64::INFINITY, f64::min);
        // sigma is 0.0075 degrees per axis
        assert!(nearest < 0.1, "point {} {} too far from every center", inst.lat, inst.lng);
    }
}

#[test]
fn same_seed_same_sample() {
    assert_eq!(sample(42), sample(42));
    assert_ne!(sample(42), sample(43));
}

// =============================================================
// Sampling helpers
// =============================================================

#[test]
fn weighted_choice_tracks_probabilities() {
    let mut rng = StdRng::seed_from_u64(11);
    let draws = 20_000;
    let flat = (0..draws)
        .filter(|_| weighted_choice(&mut rng, &ORIENTATION_DISTRIBUTION) == Orientation::Flat)
        .count();
    let share = flat as f64 / f64::from(draws);
    assert!((share - 0.624).abs() < 0.02, "flat share {share}");
}

#[test]
fn weighted_choice_falls_back_to_last_entry() {
    let mut rng = StdRng::seed_from_u64(12);
    let dist = [(SizeClass::Small, 0.0), (SizeClass::Large, 0.0)];
    for _ in 0..10 {
        assert_eq!(weighted_choice(&mut rng, &dist), SizeClass::Large);
    }
}

#[test]
fn standard_normal_pair_is_finite_and_centered() {
    let mut rng = StdRng::seed_from_u64(13);
    let n = 10_000;
    let mut sum = 0.0;
    for _ in 0..n {
        let (a, b) = standard_normal_pair(&mut rng);
        assert!(a.is_finite() && b.is_finite());
        sum += a + b;
    }
    let mean = sum / f64::from(2 * n);
    assert!(mean.abs() < 0.05, "mean {mean}");
}
