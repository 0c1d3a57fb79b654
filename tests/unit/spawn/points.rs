use super::*;
use crate::mask::{
    glyphs::GlyphTable,
    text::{MaskOptions, build_text_mask},
};

fn mask_for(lines: &[&str]) -> TextMask {
    build_text_mask(lines, &MaskOptions::default(), &GlyphTable::default())
}

fn single_cell_mask() -> TextMask {
    let glyphs = GlyphTable::from_patterns(1, 1, [('A', ["1"])]).unwrap();
    build_text_mask(&["A"], &MaskOptions::default(), &glyphs)
}

#[test]
fn bounds_default_to_centered() {
    let b = Bounds::centered(40.0, 20.0);
    assert_eq!((b.left(), b.top()), (30.0, 40.0));
    let b = Bounds {
        offset_x: Some(5.0),
        offset_y: Some(0.0),
        ..b
    };
    assert_eq!(b.rect(), Rect::new(5.0, 0.0, 45.0, 20.0));
}

#[test]
fn unit_density_without_jitter_hits_cell_centers() {
    let mask = mask_for(&["A"]);
    let points = spawn_points(&mask, &Bounds::centered(50.0, 50.0), 1.0, 0.0, 11);
    assert_eq!(points.len(), 14);

    // First on cell of `A` is row 0, column 1; cells are 10 units wide.
    let first = &points[0];
    assert_eq!((first.row, first.col), (0, 1));
    assert_eq!(first.position, Point::new(40.0, 30.0));
    assert_eq!(first.letter_index, 0);
    assert_eq!(first.letter, 'A');
    assert_eq!(first.species, None);
}

#[test]
fn output_is_row_major_with_running_index() {
    let mask = mask_for(&["LOVE"]);
    let points = spawn_points(&mask, &Bounds::centered(60.0, 20.0), 2.0, 0.5, 3);
    assert_eq!(points.len(), mask.on_count() * 2);
    for (i, pair) in points.windows(2).enumerate() {
        assert_eq!(pair[0].index, i);
        assert!((pair[0].row, pair[0].col) <= (pair[1].row, pair[1].col));
    }
}

#[test]
fn fractional_density_adds_extra_copies_per_cell() {
    let mask = mask_for(&["A"]);
    let points = spawn_points(&mask, &Bounds::centered(50.0, 50.0), 2.5, 0.3, 7);
    assert_eq!(points.len(), 33);

    let mut per_cell = std::collections::BTreeMap::<(usize, usize), usize>::new();
    for p in &points {
        *per_cell.entry((p.row, p.col)).or_default() += 1;
    }
    assert_eq!(per_cell.len(), 14);
    assert!(per_cell.values().all(|&n| n == 2 || n == 3));
    assert!(per_cell.values().any(|&n| n == 2));
    assert!(per_cell.values().any(|&n| n == 3));
}

#[test]
fn density_draw_is_consumed_for_whole_densities() {
    let mask = single_cell_mask();
    let bounds = Bounds::centered(10.0, 10.0);
    let points = spawn_points(&mask, &bounds, 1.0, 1.0, 21);
    assert_eq!(points.len(), 1);

    let mut rng = SeededRng::new(21);
    let _density_draw = rng.next_f64();
    let jx = rng.next_f64() - 0.5;
    let jy = rng.next_f64() - 0.5;
    assert_eq!(
        points[0].position,
        Point::new(45.0 + (0.5 + jx) * 10.0, 45.0 + (0.5 + jy) * 10.0)
    );
}

#[test]
fn same_seed_same_points_different_seed_moves_them() {
    let mask = mask_for(&["HELLO"]);
    let bounds = Bounds::centered(70.0, 20.0);
    let a = spawn_points(&mask, &bounds, 1.5, 0.6, 42);
    let b = spawn_points(&mask, &bounds, 1.5, 0.6, 42);
    let c = spawn_points(&mask, &bounds, 1.5, 0.6, 43);
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn points_stay_within_jittered_cells() {
    let mask = mask_for(&["LOVE", "YOU"]);
    let bounds = Bounds {
        width: 60.0,
        height: 30.0,
        offset_x: Some(10.0),
        offset_y: Some(5.0),
    };
    let jitter = 0.9;
    let cell_w = bounds.width / mask.cols() as f64;
    let cell_h = bounds.height / mask.rows() as f64;
    for p in spawn_points(&mask, &bounds, 1.7, jitter, 5) {
        let cx = bounds.left() + (p.col as f64 + 0.5) * cell_w;
        let cy = bounds.top() + (p.row as f64 + 0.5) * cell_h;
        assert!((p.position.x - cx).abs() <= jitter / 2.0 * cell_w + 1e-9);
        assert!((p.position.y - cy).abs() <= jitter / 2.0 * cell_h + 1e-9);
        assert!(p.position.x >= bounds.left() && p.position.x <= bounds.left() + bounds.width);
        assert!(p.position.y >= bounds.top() && p.position.y <= bounds.top() + bounds.height);
    }
}

#[test]
fn letter_back_references_follow_lines() {
    let mask = mask_for(&["LO", "VE"]);
    let points = spawn_points(&mask, &Bounds::centered(40.0, 40.0), 1.0, 0.0, 1);
    for p in &points {
        let meta = mask.letter_meta()[p.letter_index];
        assert_eq!(p.line_index, meta.line_index);
        assert_eq!(p.letter, meta.ch);
    }
    assert!(points.iter().any(|p| p.line_index == 1 && p.letter == 'V'));
}

#[test]
fn degenerate_inputs_yield_no_points() {
    let empty: [&str; 0] = [];
    let bounds = Bounds::centered(50.0, 50.0);
    assert!(spawn_points(&mask_for(&empty), &bounds, 1.0, 0.5, 1).is_empty());
    assert!(spawn_points(&mask_for(&["   "]), &bounds, 1.0, 0.5, 1).is_empty());
    assert!(spawn_points(&mask_for(&["A"]), &bounds, 0.0, 0.5, 1).is_empty());
    assert!(spawn_points(&mask_for(&["A"]), &bounds, -2.0, 0.5, 1).is_empty());
    assert!(spawn_points(&mask_for(&["A"]), &bounds, f64::NAN, 0.5, 1).is_empty());
}

#[test]
fn huge_densities_are_clamped() {
    let mask = mask_for(&["A"]);
    let bounds = Bounds::centered(10.0, 10.0);
    let capped = spawn_points(&mask, &bounds, MAX_DENSITY, 0.5, 1);
    assert_eq!(capped.len(), 14 * MAX_DENSITY as usize);
    assert_eq!(spawn_points(&mask, &bounds, 1e30, 0.5, 1), capped);
    assert_eq!(spawn_points(&mask, &bounds, f64::INFINITY, 0.5, 1), capped);
}

#[test]
fn cells_without_a_letter_are_skipped() {
    let glyphs = GlyphTable::from_patterns(1, 1, [('A', ["1"]), (' ', ["1"])]).unwrap();
    let opts = MaskOptions {
        char_spacing: 0,
        ..MaskOptions::default()
    };
    let mask = build_text_mask(&["A A"], &opts, &glyphs);
    let points = spawn_points(&mask, &Bounds::centered(30.0, 10.0), 1.0, 0.0, 9);
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].col, 0);
    assert_eq!(points[1].col, 2);
    assert_eq!(points[1].letter_index, 1);
}
