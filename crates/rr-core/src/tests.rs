//! Unit tests for rr-core primitives.

#[cfg(test)]
mod ids {
    use crate::{ArcId, EdgeId, VertexId};

    #[test]
    fn index_roundtrip() {
        let id = VertexId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(VertexId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(VertexId(0) < VertexId(1));
        assert!(EdgeId(100) > EdgeId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(VertexId::INVALID.0, u32::MAX);
        assert_eq!(EdgeId::INVALID.0, u32::MAX);
        assert_eq!(ArcId::INVALID.0, u32::MAX);
        assert_eq!(ArcId::default(), ArcId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(VertexId(7).to_string(), "VertexId(7)");
    }

    #[test]
    fn serializes_as_bare_integer() {
        assert_eq!(serde_json::to_string(&VertexId(3)).unwrap(), "3");
    }
}

#[cfg(test)]
mod geo {
    use crate::PlanarPoint;

    #[test]
    fn planar_distance() {
        let a = PlanarPoint::new(0.0, 0.0);
        let b = PlanarPoint::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(a.distance_2(b), 25.0);
    }

    #[test]
    fn time_scaled_distance_is_travel_time() {
        let a = PlanarPoint::new(0.0, 0.0);
        let b = PlanarPoint::new(300.0, 400.0);
        // 500 m at 10 m/s = 50 s.
        let t = a.time_scaled(10.0).distance(b.time_scaled(10.0));
        assert!((t - 50.0).abs() < 1e-9);
    }
}

#[cfg(test)]
mod projection {
    use crate::{CoreError, GeoPoint, PlanarPoint, Projector, Puwg1992};

    #[test]
    fn central_meridian_maps_to_false_easting() {
        let p = Puwg1992::new().to_projected(GeoPoint::new(19.0, 52.0)).unwrap();
        assert!((p.x - 500_000.0).abs() < 1e-6, "got {p}");
        assert!((p.y - 459_309.2).abs() < 0.5, "got {p}");
    }

    #[test]
    fn equator_on_central_meridian_maps_to_false_northing() {
        let p = Puwg1992::new().to_projected(GeoPoint::new(19.0, 0.0)).unwrap();
        assert!((p.x - 500_000.0).abs() < 1e-6);
        assert!((p.y + 5_300_000.0).abs() < 1e-6);
    }

    #[test]
    fn warsaw_reference_point() {
        let p = Puwg1992::new()
            .to_projected(GeoPoint::new(21.0122, 52.2297))
            .unwrap();
        assert!((p.x - 637_382.2).abs() < 2.0, "got {p}");
        assert!((p.y - 486_757.2).abs() < 2.0, "got {p}");
    }

    #[test]
    fn round_trip_is_sub_metre() {
        let proj = Puwg1992::new();
        let samples = [
            (14.2, 49.1),
            (24.1, 54.8),
            (19.9449, 50.0647),
            (16.9252, 52.4064),
            (18.6466, 54.3520),
            (22.5684, 51.2465),
        ];
        for (lon, lat) in samples {
            let planar = proj.to_projected(GeoPoint::new(lon, lat)).unwrap();
            let back = proj.to_geographic(planar).unwrap();
            // 1e-6° is ~0.11 m of latitude.
            assert!((back.lon - lon).abs() < 1e-6, "lon {lon} -> {}", back.lon);
            assert!((back.lat - lat).abs() < 1e-6, "lat {lat} -> {}", back.lat);

            // And the other way: planar -> geo -> planar.
            let again = proj.to_projected(back).unwrap();
            assert!(planar.distance(again) < 0.01);
        }
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let proj = Puwg1992::new();
        assert!(matches!(
            proj.to_projected(GeoPoint::new(f64::NAN, 52.0)),
            Err(CoreError::InvalidCoordinate(..))
        ));
        assert!(matches!(
            proj.to_geographic(PlanarPoint::new(500_000.0, f64::INFINITY)),
            Err(CoreError::InvalidCoordinate(..))
        ));
    }

    #[test]
    fn out_of_range_input_is_rejected() {
        let proj = Puwg1992::new();
        assert!(proj.to_projected(GeoPoint::new(19.0, 91.0)).is_err());
        assert!(proj.to_projected(GeoPoint::new(181.0, 52.0)).is_err());
        // 100° from the central meridian: outside the usable zone.
        assert!(proj.to_projected(GeoPoint::new(119.0, 10.0)).is_err());
    }
}

#[cfg(test)]
mod road_class {
    use crate::RoadClass;

    #[test]
    fn speed_table_matches_dataset_contract() {
        let table = [
            ("A", 140.0),
            ("S", 120.0),
            ("GP", 100.0),
            ("G", 90.0),
            ("Z", 50.0),
            ("L", 50.0),
            ("D", 50.0),
            ("I", 50.0),
            ("X", 50.0),
            ("", 50.0),
        ];
        for (label, kmh) in table {
            assert_eq!(RoadClass::from_label(label).speed_kmh(), kmh, "class {label:?}");
        }
    }

    #[test]
    fn unknown_label_is_preserved() {
        let c = RoadClass::from_label("XYZ");
        assert_eq!(c, RoadClass::Unknown("XYZ".into()));
        assert_eq!(c.label(), "XYZ");
    }

    #[test]
    fn travel_time_from_length() {
        // 1 km at 90 km/h = 40 s.
        let t = RoadClass::Main.travel_time_s(1_000.0);
        assert!((t - 40.0).abs() < 1e-9);
    }

    #[test]
    fn labels_round_trip_through_serde() {
        let json = serde_json::to_string(&RoadClass::MainAccelerated).unwrap();
        assert_eq!(json, "\"GP\"");
        let back: RoadClass = serde_json::from_str(&json).unwrap();
        assert_eq!(back, RoadClass::MainAccelerated);
    }
}

#[cfg(test)]
mod config {
    use std::io::Write;

    use crate::{CoreError, MergeStrategy, RouterConfig};

    #[test]
    fn defaults() {
        let c = RouterConfig::default();
        assert_eq!(c.merge_tolerance, 0.5);
        assert_eq!(c.max_snap_distance, 150.0);
        assert_eq!(c.merge_strategy, MergeStrategy::Linear);
        assert!(c.search_deadline().is_none());
    }

    #[test]
    fn partial_json_overrides_defaults() {
        let c = RouterConfig::from_json_str(
            r#"{ "merge_strategy": "indexed", "search_deadline_ms": 250 }"#,
        )
        .unwrap();
        assert_eq!(c.merge_strategy, MergeStrategy::Indexed);
        assert_eq!(c.search_deadline().unwrap().as_millis(), 250);
        assert_eq!(c.merge_tolerance, 0.5);
    }

    #[test]
    fn negative_tolerance_is_rejected() {
        let r = RouterConfig::from_json_str(r#"{ "merge_tolerance": -1.0 }"#);
        assert!(matches!(r, Err(CoreError::Config(_))));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "max_snap_distance": 75.0 }}"#).unwrap();
        let c = RouterConfig::from_json_file(file.path()).unwrap();
        assert_eq!(c.max_snap_distance, 75.0);
    }
}
