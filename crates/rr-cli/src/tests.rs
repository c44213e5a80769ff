//! Unit tests for the road-router binary.

#[cfg(test)]
mod queries {
    use crate::queries::{parse_lon_lat, read_queries};

    #[test]
    fn parses_lon_lat_pairs() {
        let p = parse_lon_lat("19.93, 50.06").unwrap();
        assert_eq!((p.lon, p.lat), (19.93, 50.06));
        let p = parse_lon_lat("-3.5,40.4").unwrap();
        assert_eq!((p.lon, p.lat), (-3.5, 40.4));
    }

    #[test]
    fn rejects_malformed_pairs() {
        assert!(parse_lon_lat("19.93").is_err());
        assert!(parse_lon_lat("east,50").is_err());
        assert!(parse_lon_lat("19.9,").is_err());
    }

    #[test]
    fn reads_query_csv() {
        let csv = "source_lon,source_lat,target_lon,target_lat\n\
                   19.93, 50.06, 19.95, 50.07\n\
                   21.0,52.2,21.1,52.3\n";
        let rows = read_queries(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].source().lat, 50.06);
        assert_eq!(rows[1].target().lon, 21.1);
    }

    #[test]
    fn malformed_query_row_is_fatal() {
        let csv = "source_lon,source_lat,target_lon,target_lat\n\
                   19.93,50.06,19.95,50.07\n\
                   19.93,oops,19.95,50.07\n";
        let err = read_queries(csv.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("line 3"));
    }
}

#[cfg(test)]
mod commands {
    use std::io::Write;

    use rr_core::{GeoPoint, PlanarPoint, Projector, Puwg1992, RouterConfig, VertexId};
    use rr_network::{EDGES_FILE, VERTICES_FILE};

    use crate::commands::{batch, build, open_planner, route};
    use crate::queries::QueryRow;

    fn origin() -> PlanarPoint {
        Puwg1992::new().to_projected(GeoPoint::new(21.0122, 52.2297)).unwrap()
    }

    fn geo(dx: f64, dy: f64) -> GeoPoint {
        let o = origin();
        Puwg1992::new().to_geographic(PlanarPoint::new(o.x + dx, o.y + dy)).unwrap()
    }

    /// Four vertices 100 m apart heading east, plus one unreadable row.
    fn write_segments(dir: &std::path::Path) -> std::path::PathBuf {
        let o = origin();
        let path = dir.join("segments.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "start_x,start_y,end_x,end_y,length,class").unwrap();
        for i in 0..3 {
            let x = o.x + i as f64 * 100.0;
            writeln!(f, "{},{},{},{},100.0,G", x, o.y, x + 100.0, o.y).unwrap();
        }
        writeln!(f, "not,a,number,row,1,L").unwrap();
        path
    }

    #[test]
    fn build_then_route_from_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let segments = write_segments(dir.path());
        let out = dir.path().join("snapshot");

        let stats = build(&segments, &out, &RouterConfig::default()).unwrap();
        assert_eq!(stats.vertices, 4);
        assert_eq!(stats.edges, 3);
        let json = serde_json::to_value(&stats).unwrap();
        assert!(json["merge_ms"].is_number() && json["total_ms"].is_number());
        assert!(out.join(VERTICES_FILE).exists());
        assert!(out.join(EDGES_FILE).exists());

        let config = RouterConfig { max_snap_distance: 50.0, ..RouterConfig::default() };
        let planner = open_planner(&out, config).unwrap();
        assert_eq!(planner.graph().vertex_count(), 4);
        assert_eq!(planner.config().max_snap_distance, 50.0);
        let cmp = route(&planner, geo(1.0, 1.0), geo(299.0, -1.0)).unwrap();
        assert_eq!(cmp.source_vertex, VertexId(0));
        assert_eq!(cmp.target_vertex, VertexId(3));
        assert!((cmp.distance_path.total_length_m - 300.0).abs() < 1e-9);
        assert!((cmp.time_path.total_time_s - 12.0).abs() < 1e-9);
    }

    #[test]
    fn missing_snapshot_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        assert!(open_planner(&dir.path().join("nope"), RouterConfig::default()).is_err());
    }

    #[test]
    fn batch_keeps_order_and_isolates_failures() {
        let dir = tempfile::tempdir().unwrap();
        let segments = write_segments(dir.path());
        let out = dir.path().join("snapshot");
        build(&segments, &out, &RouterConfig::default()).unwrap();
        let planner = open_planner(&out, RouterConfig::default()).unwrap();

        let row = |s: GeoPoint, t: GeoPoint| QueryRow {
            source_lon: s.lon,
            source_lat: s.lat,
            target_lon: t.lon,
            target_lat: t.lat,
        };
        let rows = vec![
            row(geo(0.0, 0.0), geo(300.0, 0.0)),
            row(geo(100.0, 0.0), geo(102.0, 0.0)),
            row(GeoPoint::new(21.0, 95.0), geo(0.0, 0.0)),
            row(geo(200.0, 0.0), geo(0.0, 0.0)),
        ];
        let entries = batch(&planner, &rows);

        assert_eq!(entries.iter().map(|e| e.query).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert!(entries[0].route.is_some() && entries[0].error.is_none());
        assert!(entries[1].error.as_deref().unwrap().contains("both resolve to"));
        assert!(entries[2].error.is_some());
        let back = entries[3].route.as_ref().unwrap();
        assert_eq!(back.distance_path.vertices, vec![VertexId(2), VertexId(1), VertexId(0)]);

        let json = serde_json::to_value(&entries).unwrap();
        assert!(json[1].get("route").is_none());
        assert!(json[0].get("error").is_none());
    }
}
