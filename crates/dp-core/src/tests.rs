//! Unit tests for dp-core primitives.

#[cfg(test)]
mod geo {
    use crate::{Coordinate, CoreError, bearing_deg, distance_miles};

    #[test]
    fn identity_is_textual() {
        let a = Coordinate::new("34.0500000", "-118.25").unwrap();
        let b = Coordinate::new("34.05", "-118.25").unwrap();
        // Same number, different text → different nodes.
        assert_eq!(a.lat(), b.lat());
        assert_ne!(a, b);
        assert_eq!(a, Coordinate::new(" 34.0500000 ", "-118.25").unwrap());
    }

    #[test]
    fn parse_pair() {
        let c = Coordinate::parse("34.0625329 -118.4470263").unwrap();
        assert_eq!(c.lat_text(), "34.0625329");
        assert_eq!(c.lon_text(), "-118.4470263");
        assert_eq!(c.to_string(), "(34.0625329, -118.4470263)");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(Coordinate::parse("34.0"), Err(CoreError::Parse(_))));
        assert!(matches!(Coordinate::parse("a b"), Err(CoreError::Parse(_))));
        assert!(matches!(Coordinate::parse("1 2 3"), Err(CoreError::Parse(_))));
        assert!(matches!(Coordinate::new("inf", "0"), Err(CoreError::Parse(_))));
    }

    #[test]
    fn zero_distance() {
        let p = Coordinate::from_degrees(34.0625, -118.4470);
        assert!(distance_miles(&p, &p) < 1e-9);
    }

    #[test]
    fn one_degree_of_latitude() {
        // 1° of arc on a 6371 km sphere ≈ 111.195 km ≈ 69.093 mi
        let a = Coordinate::from_degrees(0.0, 0.0);
        let b = Coordinate::from_degrees(1.0, 0.0);
        let d = distance_miles(&a, &b);
        assert!((d - 69.093).abs() < 0.01, "got {d}");
        assert!((a.distance_miles(&b) - d).abs() < 1e-12);
    }

    #[test]
    fn bearings_follow_compass() {
        let o = Coordinate::from_degrees(0.0, 0.0);
        let east = Coordinate::from_degrees(0.0, 1.0);
        let north = Coordinate::from_degrees(1.0, 0.0);
        let west = Coordinate::from_degrees(0.0, -1.0);
        let south = Coordinate::from_degrees(-1.0, 0.0);
        assert!(bearing_deg(&o, &east).abs() < 1e-9);
        assert!((bearing_deg(&o, &north) - 90.0).abs() < 1e-9);
        assert!((bearing_deg(&o, &west) - 180.0).abs() < 1e-9);
        assert!((bearing_deg(&o, &south) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn normalize_wraps() {
        use crate::geo::normalize_deg;
        assert_eq!(normalize_deg(-90.0), 270.0);
        assert_eq!(normalize_deg(360.0), 0.0);
        assert_eq!(normalize_deg(725.0), 5.0);
        assert!(normalize_deg(-1e-20) < 360.0);
    }
}

#[cfg(test)]
mod segment {
    use crate::{Coordinate, Segment, turn_angle_deg};

    fn seg(a: (f64, f64), b: (f64, f64)) -> Segment {
        Segment::new(
            Coordinate::from_degrees(a.0, a.1),
            Coordinate::from_degrees(b.0, b.1),
            "Main St",
        )
    }

    #[test]
    fn reversed_swaps_endpoints() {
        let s = seg((0.0, 0.0), (0.0, 1.0));
        let r = s.reversed();
        assert_eq!(r.start, s.end);
        assert_eq!(r.end, s.start);
        assert_eq!(r.name, s.name);
        assert!((r.length_miles() - s.length_miles()).abs() < 1e-12);
    }

    #[test]
    fn turn_angles() {
        let eastward = seg((0.0, 0.0), (0.0, 1.0));
        let northward = seg((0.0, 1.0), (1.0, 1.0));
        let southward = seg((0.0, 1.0), (-1.0, 1.0));
        let straight = seg((0.0, 1.0), (0.0, 2.0));
        assert!((turn_angle_deg(&eastward, &northward) - 90.0).abs() < 1e-9); // left
        assert!((turn_angle_deg(&eastward, &southward) - 270.0).abs() < 1e-9); // right
        assert!(turn_angle_deg(&eastward, &straight).abs() < 1e-9);
    }
}

#[cfg(test)]
mod store {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use crate::store::{DEFAULT_MAX_LOAD_FACTOR, INITIAL_BUCKET_COUNT, MIN_MAX_LOAD_FACTOR};
    use crate::{AssociativeStore, Coordinate, CoreError, StoreConfig, StoreKey};

    #[test]
    fn starts_empty() {
        let s: AssociativeStore<String, i32> = AssociativeStore::new();
        assert_eq!(s.size(), 0);
        assert!(s.is_empty());
        assert_eq!(s.bucket_count(), INITIAL_BUCKET_COUNT);
        assert_eq!(s.max_load_factor(), DEFAULT_MAX_LOAD_FACTOR);
        assert!(s.find(&"missing".to_string()).is_none());
    }

    #[test]
    fn overwrite_keeps_size() {
        let mut s = AssociativeStore::new();
        s.associate("k".to_string(), 1);
        s.associate("k".to_string(), 2);
        assert_eq!(s.size(), 1);
        assert_eq!(s.find(&"k".to_string()), Some(&2));
    }

    #[test]
    fn grows_past_load_factor() {
        let mut s = AssociativeStore::new();
        for i in 0..4 {
            s.associate(format!("key{i}"), i);
        }
        // 4 / 8 = 0.5 is not *above* the limit.
        assert_eq!(s.bucket_count(), 8);
        s.associate("key4".to_string(), 4);
        assert_eq!(s.bucket_count(), 16);
        assert!(s.load_factor() <= DEFAULT_MAX_LOAD_FACTOR);
    }

    #[test]
    fn overwrite_never_resizes() {
        let mut s = AssociativeStore::new();
        for i in 0..4 {
            s.associate(format!("key{i}"), i);
        }
        for _ in 0..10 {
            s.associate("key0".to_string(), 99);
        }
        assert_eq!(s.bucket_count(), 8);
        assert_eq!(s.find(&"key0".to_string()), Some(&99));
    }

    #[test]
    fn growth_preserves_data() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut s = AssociativeStore::new();
        let mut expected = Vec::new();
        for i in 0..2_000u32 {
            let lat = rng.gen_range(-90.0..90.0f64);
            let lon = rng.gen_range(-180.0..180.0f64);
            let c = Coordinate::from_degrees(lat, lon);
            s.associate(c.clone(), i);
            expected.push((c, i));
        }
        // Random f64s could collide after 7-decimal rendering; dedupe by key.
        let mut last: AssociativeStore<Coordinate, u32> = AssociativeStore::new();
        for (c, i) in &expected {
            last.associate(c.clone(), *i);
        }
        assert_eq!(s.size(), last.size());
        assert!(s.bucket_count() >= 4_096);
        assert!(s.load_factor() <= DEFAULT_MAX_LOAD_FACTOR);
        for (c, _) in &expected {
            assert_eq!(s.find(c), last.find(c), "lost {c}");
        }
    }

    #[test]
    fn custom_load_factor() {
        let cfg = StoreConfig { max_load_factor: 2.0 };
        let mut s = AssociativeStore::with_config(cfg).unwrap();
        for i in 0..16 {
            s.associate(i.to_string(), i);
        }
        assert_eq!(s.bucket_count(), 8);
        s.associate("16".to_string(), 16);
        assert_eq!(s.bucket_count(), 16);
    }

    #[test]
    fn tiny_load_factor_doubles_repeatedly() {
        let cfg = StoreConfig { max_load_factor: 0.01 };
        let mut s = AssociativeStore::with_config(cfg).unwrap();
        s.associate("only".to_string(), ());
        assert!(s.load_factor() <= 0.01);
        assert_eq!(s.bucket_count(), 128);
    }

    #[test]
    fn invalid_config_rejected() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY, 1e-300, 1e-12, 0.009] {
            let r = AssociativeStore::<String, ()>::with_config(StoreConfig { max_load_factor: bad });
            assert!(matches!(r, Err(CoreError::Config(_))), "{bad} accepted");
        }
    }

    #[test]
    fn minimum_load_factor_is_accepted() {
        let cfg = StoreConfig { max_load_factor: MIN_MAX_LOAD_FACTOR };
        let mut s = AssociativeStore::with_config(cfg).unwrap();
        for i in 0..3 {
            s.associate(i.to_string(), i);
        }
        assert_eq!(s.size(), 3);
        assert!(s.load_factor() <= MIN_MAX_LOAD_FACTOR);
        assert_eq!(s.bucket_count(), 512);
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut s = AssociativeStore::new();
        for i in 0..100 {
            s.associate(i.to_string(), i);
        }
        s.reset();
        assert_eq!(s.size(), 0);
        assert_eq!(s.bucket_count(), INITIAL_BUCKET_COUNT);
        assert!(s.find(&"5".to_string()).is_none());
        s.associate("5".to_string(), 5);
        assert_eq!(s.find(&"5".to_string()), Some(&5));
    }

    #[test]
    fn get_or_insert_with_appends() {
        let mut s: AssociativeStore<String, Vec<u32>> = AssociativeStore::new();
        for i in 0..50 {
            s.get_or_insert_with(format!("street{}", i % 5), Vec::new).push(i);
        }
        assert_eq!(s.size(), 5);
        assert_eq!(s.find(&"street0".to_string()).unwrap().len(), 10);
        assert_eq!(s.find(&"street3".to_string()).unwrap()[..3], [3, 8, 13]);
    }

    #[test]
    fn find_mut_updates_in_place() {
        let mut s = AssociativeStore::new();
        s.associate("a".to_string(), 1);
        *s.find_mut(&"a".to_string()).unwrap() += 10;
        assert_eq!(s.find(&"a".to_string()), Some(&11));
        assert!(s.find_mut(&"b".to_string()).is_none());
    }

    #[test]
    fn iter_visits_every_entry() {
        let mut s = AssociativeStore::new();
        for i in 0..37 {
            s.associate(i.to_string(), i);
        }
        let mut seen: Vec<i32> = s.iter().map(|(_, v)| *v).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..37).collect::<Vec<_>>());
        assert_eq!(s.keys().count(), 37);
    }

    #[test]
    fn coordinate_hash_uses_text_only() {
        let a = Coordinate::new("1.2", "34").unwrap();
        let b = Coordinate::new("1.23", "4").unwrap();
        assert_ne!(a.store_hash(), b.store_hash());
        let a2 = Coordinate::new("1.2", "34").unwrap();
        assert_eq!(a.store_hash(), a2.store_hash());
    }
}
