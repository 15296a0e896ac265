use liveplot_results::config::SerLineStyle;
use liveplot_results::{
    BufferConfig, CurveData, CursorConfig, PlotConfig, PlotError, PolledCurveConfig,
    StreamingBuffer,
};

fn sample_config() -> PlotConfig {
    let mut cfg = PlotConfig::default();
    cfg.cursor.rate_limit_hz = 30.0;
    cfg.cursor.look.style = SerLineStyle::Dotted { spacing: 3.0 };
    cfg.polled.insert(
        "moment".into(),
        PolledCurveConfig {
            y_err: Some("moment_err".into()),
            force_reload: true,
            ..PolledCurveConfig::new("field", "moment")
        },
    );
    cfg.buffers.insert(
        "live".into(),
        BufferConfig {
            capacity: 128,
            errors: true,
        },
    );
    cfg
}

#[test]
fn json_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plot.json");
    let cfg = sample_config();
    cfg.save_to_path(&path).unwrap();
    assert_eq!(PlotConfig::load_from_path(&path).unwrap(), cfg);
}

#[test]
fn yaml_chosen_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plot.yaml");
    let cfg = sample_config();
    cfg.save_to_path(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("rate_limit_hz: 30.0"));
    assert_eq!(PlotConfig::load_from_path(&path).unwrap(), cfg);
}

#[test]
fn invalid_rate_fails_to_load() {
    let err = PlotConfig::from_json(r#"{ "cursor": { "rate_limit_hz": 0.0 } }"#).unwrap_err();
    assert!(matches!(err, PlotError::Configuration(_)));
}

#[test]
fn polled_curve_without_columns_is_rejected() {
    let err = PlotConfig::from_yaml("polled:\n  broken:\n    x: field\n").unwrap_err();
    assert!(matches!(err, PlotError::Configuration(_)));
}

#[test]
fn malformed_json_is_reported() {
    assert!(matches!(PlotConfig::from_json("{"), Err(PlotError::Json(_))));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = PlotConfig::load_from_path(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, PlotError::Io(_)));
}

#[test]
fn buffer_from_config_is_prepared() {
    let cfg = sample_config();
    let buf: StreamingBuffer<CurveData> = StreamingBuffer::from_config(CurveData::new("live"), &cfg.buffers["live"]).unwrap();
    assert!(buf.is_prepared());
    assert!(buf.has_errors());
    assert_eq!(buf.capacity(), 128);
}

#[test]
fn default_cursor_config_is_valid() {
    assert!(CursorConfig::default().validate().is_ok());
}

#[test]
fn zero_capacity_buffer_fails_to_load() {
    let err = PlotConfig::from_json(r#"{ "buffers": { "live": { "capacity": 0 } } }"#).unwrap_err();
    assert!(matches!(err, PlotError::Configuration(_)));
}

#[test]
fn buffer_from_default_config_is_rejected() {
    let res: Result<StreamingBuffer<CurveData>, _> =
        StreamingBuffer::from_config(CurveData::new("live"), &BufferConfig::default());
    assert!(matches!(res, Err(PlotError::Configuration(_))));
}
