use super::*;

const SAMPLE: &str = r#"
{
  "startDate": "2024-02-14",
  "grid": { "cols": 10, "rows": 8 },
  "enabledSpecies": ["rose", "tulip", "daisy"],
  "catalog": ["rose-pastel", "rose-classic", "tulip-sunset", "daisy"],
  "messages": [
    {
      "id": "love",
      "label": "Love you",
      "lines": ["LOVE", "YOU"],
      "startDay": 30,
      "bounds": { "width": 60, "height": 30, "offsetY": 10 },
      "density": 1.5,
      "seed": 7,
      "maskOptions": { "pixelScaleX": 2 },
      "lineSpecies": [["rose", "tulip"], ["daisy"]]
    }
  ]
}
"#;

fn sample() -> GardenConfig {
    GardenConfig::from_reader(SAMPLE.as_bytes()).unwrap()
}

#[test]
fn parses_camel_case_json_with_defaults() {
    let cfg = sample();
    assert_eq!(cfg.start_date, NaiveDate::from_ymd_opt(2024, 2, 14).unwrap());
    assert_eq!(cfg.grid.cols, 10);
    assert_eq!(cfg.grid.rows, 8);
    assert_eq!(cfg.grid.seed, GridSpec::default().seed);
    assert_eq!(cfg.grid.jitter, GridSpec::default().jitter);

    let m = &cfg.messages[0];
    assert_eq!(m.label, "Love you");
    assert_eq!(m.start_day, 30);
    assert_eq!(m.bounds.offset_x, None);
    assert_eq!(m.bounds.offset_y, Some(10.0));
    assert_eq!(m.jitter, 0.5);
    assert_eq!(m.mask_options.pixel_scale_x, 2);
    assert_eq!(m.mask_options.pixel_scale_y, 1);
    assert_eq!(m.mask_options.char_spacing, 1);
    assert_eq!(m.line_species[1], vec!["daisy".to_string()]);
    cfg.validate().unwrap();
}

#[test]
fn empty_object_is_a_valid_config() {
    let cfg = GardenConfig::from_reader("{}".as_bytes()).unwrap();
    assert_eq!(cfg, GardenConfig::default());
    cfg.validate().unwrap();
}

#[test]
fn options_and_catalog_follow_config() {
    let cfg = sample();
    let opts = cfg.options();
    assert_eq!(opts.start_date, cfg.start_date);
    assert_eq!(opts.grid, cfg.grid);
    assert_eq!(opts.enabled_species, cfg.enabled_species);

    let catalog = cfg.variant_catalog().unwrap();
    assert_eq!(catalog.variants_for("rose").len(), 2);
}

#[test]
fn malformed_json_is_a_config_error() {
    let err = GardenConfig::from_reader("{ not json".as_bytes()).unwrap_err();
    assert!(matches!(err, GardenError::Config(_)));
}

#[test]
fn missing_file_is_a_config_error() {
    let err = GardenConfig::from_path("target/does-not-exist/garden.json").unwrap_err();
    assert!(err.to_string().contains("open garden config"));
}

#[test]
fn message_validation_rejects_out_of_range_values() {
    let base = MessageConfig::new("m", ["HI"], 0, Bounds::centered(50.0, 20.0));
    base.validate().unwrap();

    let cases = [
        MessageConfig {
            density: -1.0,
            ..base.clone()
        },
        MessageConfig {
            density: MAX_DENSITY + 1.0,
            ..base.clone()
        },
        MessageConfig {
            jitter: f64::NAN,
            ..base.clone()
        },
        MessageConfig {
            bounds: Bounds::centered(0.0, 20.0),
            ..base.clone()
        },
        MessageConfig {
            bounds: Bounds {
                offset_x: Some(80.0),
                ..Bounds::centered(50.0, 20.0)
            },
            ..base.clone()
        },
        MessageConfig {
            mask_options: MaskOptions {
                pixel_scale_y: 0,
                ..MaskOptions::default()
            },
            ..base.clone()
        },
        MessageConfig {
            mask_options: MaskOptions {
                pixel_scale_x: MAX_PIXEL_SCALE + 1,
                ..MaskOptions::default()
            },
            ..base.clone()
        },
        MessageConfig {
            mask_options: MaskOptions {
                pixel_scale_x: 9_223_372_036_854_775_807,
                ..MaskOptions::default()
            },
            ..base.clone()
        },
        MessageConfig {
            id: " ".to_string(),
            ..base.clone()
        },
    ];
    for case in cases {
        assert!(
            matches!(case.validate(), Err(GardenError::Validation(_))),
            "{case:?}"
        );
    }
}

#[test]
fn garden_validation_catches_duplicates_and_bad_catalog() {
    let mut cfg = sample();
    cfg.messages.push(cfg.messages[0].clone());
    let err = cfg.validate().unwrap_err();
    assert!(err.to_string().contains("duplicate message id 'love'"));

    let mut cfg = sample();
    cfg.catalog.push("-orphan".to_string());
    assert!(cfg.validate().is_err());

    let mut cfg = sample();
    cfg.grid.jitter = 2.0;
    assert!(cfg.validate().is_err());
}

#[test]
fn oversized_grids_are_rejected() {
    let cfg =
        GardenConfig::from_reader(r#"{"grid":{"cols":18446744073709551615,"rows":2}}"#.as_bytes())
            .unwrap();
    assert!(matches!(cfg.validate(), Err(GardenError::Validation(_))));

    let mut cfg = GardenConfig::default();
    cfg.grid.cols = 2048;
    cfg.grid.rows = 1024;
    let err = cfg.validate().unwrap_err();
    assert!(err.to_string().contains("exceeds"));

    cfg.grid.rows = 512;
    assert_eq!(cfg.grid.cell_count(), MAX_GRID_CELLS);
    cfg.validate().unwrap();
}

#[test]
fn largest_pixel_scale_is_accepted() {
    let mut message = MessageConfig::new("m", ["A"], 0, Bounds::centered(50.0, 20.0));
    message.mask_options.pixel_scale_x = MAX_PIXEL_SCALE;
    message.mask_options.pixel_scale_y = MAX_PIXEL_SCALE;
    message.validate().unwrap();
}
