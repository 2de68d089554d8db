//! Fence Polyline Tests
//!
//! Label layout, raw buffer layout and error propagation of
//! `FenceBuilder::build` with the piecewise-linear resampler.

use wellzone::config::FenceConfig;
use wellzone::geometry::{GeometryError, FENCE_BUFFER_CAPACITY};
use wellzone::{
    FenceBuffer, FenceBuilder, FenceFormat, FenceOutput, LogTable, PolylineGeometry, Well,
    WellError,
};

fn s_shaped_well() -> Well {
    let t = LogTable::new(
        vec![0.0, 0.0, 40.0, 160.0, 240.0, 260.0],
        vec![0.0, 0.0, 10.0, 60.0, 90.0, 95.0],
        vec![0.0, 500.0, 800.0, 1100.0, 1500.0, 1900.0],
    )
    .unwrap();
    Well::new("NO 15/9-F-12", t)
}

fn polyline(out: Option<FenceOutput>) -> wellzone::FencePolyline {
    match out {
        Some(FenceOutput::Polyline(p)) => p,
        other => panic!("expected polyline, got {other:?}"),
    }
}

fn raw(out: Option<FenceOutput>) -> FenceBuffer {
    match out {
        Some(FenceOutput::Raw(b)) => b,
        other => panic!("expected raw buffer, got {other:?}"),
    }
}

#[test]
fn extension_vertices_carry_no_label() {
    let w = s_shaped_well();
    for extend in [0, 1, 2, 5] {
        let p = polyline(
            FenceBuilder::new(50.0, extend)
                .build(&w, &PolylineGeometry::new(), FenceFormat::Polyline)
                .unwrap(),
        );
        let m = p.len();
        assert!(m > 2 * extend);
        assert!(p.well[..extend].iter().all(Option::is_none), "extend={extend}");
        assert!(p.well[m - extend..].iter().all(Option::is_none), "extend={extend}");
        let interior = &p.well[extend..m - extend];
        assert!(interior.iter().all(|l| l.as_deref() == Some("NO_15_9-F-12")));
        assert_eq!(p.x.len(), m);
        assert_eq!(p.hlen.len(), m);
        assert_eq!(p.poly_id, vec![0; m]);
    }
}

#[test]
fn raw_and_polyline_share_vertices() {
    let w = s_shaped_well();
    let builder = FenceBuilder::new(40.0, 2);
    let geom = PolylineGeometry::new();
    let b = raw(builder.build(&w, &geom, FenceFormat::Raw).unwrap());
    let p = polyline(builder.build(&w, &geom, FenceFormat::Polyline).unwrap());

    assert_eq!(b.nrow(), p.len());
    assert_eq!(b.column(0).unwrap(), &p.x[..]);
    assert_eq!(b.column(1).unwrap(), &p.y[..]);
    assert_eq!(b.column(2).unwrap(), &p.z[..]);
    assert_eq!(b.column(3).unwrap(), &p.hlen[..]);
    assert!(b.column(4).is_none());
}

#[test]
fn horizontal_length_is_monotonic_from_zero() {
    let w = s_shaped_well();
    let p = polyline(
        FenceBuilder::default()
            .build(&w, &PolylineGeometry::new(), FenceFormat::Polyline)
            .unwrap(),
    );
    assert_eq!(p.hlen[0], 0.0);
    assert!(p.hlen.windows(2).all(|w| w[1] >= w[0]));
}

#[test]
fn builder_from_config() {
    let cfg = FenceConfig {
        sampling: 10.0,
        extend: 3,
        tvd_min: Some(700.0),
    };
    let builder = FenceBuilder::from(&cfg);
    assert_eq!(builder, FenceBuilder::new(10.0, 3).with_tvd_min(700.0));

    let p = polyline(
        builder
            .build(&s_shaped_well(), &PolylineGeometry::new(), FenceFormat::Polyline)
            .unwrap(),
    );
    // first real vertex is the shallowest row below tvd_min
    assert_eq!(p.z[3], 800.0);
}

#[test]
fn tiny_sampling_exceeds_capacity() {
    let w = s_shaped_well();
    let err = FenceBuilder::new(1e-4, 2)
        .build(&w, &PolylineGeometry::new(), FenceFormat::Raw)
        .unwrap_err();
    match err {
        WellError::Geometry(GeometryError::CapacityExceeded { capacity, .. }) => {
            assert_eq!(capacity, FENCE_BUFFER_CAPACITY);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_positive_sampling_is_geometry_error() {
    let w = s_shaped_well();
    let err = FenceBuilder::new(0.0, 2)
        .build(&w, &PolylineGeometry::new(), FenceFormat::Polyline)
        .unwrap_err();
    assert!(matches!(
        err,
        WellError::Geometry(GeometryError::InvalidSampling { .. })
    ));
}

#[test]
fn single_row_well_yields_nothing() {
    let t = LogTable::new(vec![1.0], vec![2.0], vec![3.0]).unwrap();
    let w = Well::new("ONE", t);
    let out = FenceBuilder::default()
        .build(&w, &PolylineGeometry::new(), FenceFormat::Polyline)
        .unwrap();
    assert!(out.is_none());
}
