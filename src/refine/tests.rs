use super::*;
use crate::detector::LsdParams;
use crate::nfa::LogGammaStrategy;

fn setup(w: usize, h: usize, min_region_size: usize) -> (NfaValidator, ResolvedParams) {
    let params = LsdParams {
        min_region_size: Some(min_region_size),
        ..Default::default()
    };
    let resolved = params.resolve(w, h);
    let validator = NfaValidator::new(w, h, 0.0, LogGammaStrategy::Standard, true);
    (validator, resolved)
}

fn region_of(field: &GradientField, pixels: &[Pixel]) -> Region {
    Region::from_pixels(pixels[0], pixels, field).expect("pixels carry angles")
}

#[test]
fn step_machine_walks_strategies_in_order() {
    let mut step = RefineStep::FIRST;
    let mut seen = vec![step];
    while !step.is_terminal() {
        step = step.next();
        seen.push(step);
    }
    assert_eq!(
        seen,
        vec![
            RefineStep::Regrow,
            RefineStep::ShrinkRadius,
            RefineStep::Split,
            RefineStep::Reject
        ]
    );
    assert_eq!(RefineStep::Reject.next(), RefineStep::Reject);
}

#[test]
fn dense_meaningful_line_is_accepted() {
    let field = GradientField::from_angles(30, 12, |x, y| (y == 5 && x <= 20).then_some(0.0));
    let (validator, resolved) = setup(30, 12, 5);
    let refiner = RegionRefiner::new(&validator, &resolved);
    let pixels: Vec<Pixel> = (0..=20).map(|x| Pixel::new(x, 5)).collect();
    let region = region_of(&field, &pixels);
    let rect = approximate(&region, resolved.p).expect("non-degenerate");
    let verdict = refiner.validate(&region, rect, &field);
    assert!(verdict.is_accepted(), "{verdict:?}");
}

#[test]
fn sparse_region_is_low_density() {
    let field = GradientField::from_angles(30, 30, |_, _| Some(0.0));
    let (validator, resolved) = setup(30, 30, 2);
    let refiner = RegionRefiner::new(&validator, &resolved);
    let region = region_of(&field, &[Pixel::new(0, 0), Pixel::new(20, 0), Pixel::new(10, 10)]);
    let rect = approximate(&region, resolved.p).expect("non-degenerate");
    assert!(matches!(
        refiner.validate(&region, rect, &field),
        Verdict::LowDensity { .. }
    ));
}

#[test]
fn regrow_drops_a_divergent_spur() {
    // Row 5 is horizontal; a short spur below column 10 is tilted by 0.35 rad,
    // inside the full tolerance (π/8) but outside half of it.
    let field = GradientField::from_angles(30, 12, |x, y| {
        if y == 5 && x <= 20 {
            Some(0.0)
        } else if x == 10 && (6..=9).contains(&y) {
            Some(0.35)
        } else {
            None
        }
    });
    let (validator, resolved) = setup(30, 12, 5);
    let refiner = RegionRefiner::new(&validator, &resolved);
    let mut grower = RegionGrower::new(&field);
    let region = grower
        .grow(Pixel::new(0, 5), resolved.tolerance)
        .expect("seed is valid");
    assert_eq!(region.len(), 25);
    let rect = approximate(&region, resolved.p).expect("non-degenerate");
    assert!(matches!(
        refiner.validate(&region, rect, &field),
        Verdict::LowDensity { .. }
    ));

    match refiner.refine(&mut grower, region, rect) {
        RefineOutcome::Accepted { region, step, .. } => {
            assert_eq!(step, RefineStep::Regrow);
            assert_eq!(region.len(), 21);
            assert!(region.pixels().iter().all(|p| p.y == 5));
        }
        other => panic!("expected acceptance, got {other:?}"),
    }
    for y in 6..=9 {
        assert!(grower.is_used(Pixel::new(10, y)), "spur pixel stays used");
    }
}

#[test]
fn shrink_radius_trims_outliers() {
    let field = GradientField::from_angles(21, 13, |_, _| Some(0.0));
    let (validator, resolved) = setup(21, 13, 5);
    let refiner = RegionRefiner::new(&validator, &resolved);
    let mut pixels: Vec<Pixel> = (5..=7)
        .flat_map(|y| (5..=15).map(move |x| Pixel::new(x, y)))
        .collect();
    pixels.push(Pixel::new(10, 0));
    pixels.push(Pixel::new(10, 12));
    let region = region_of(&field, &pixels);
    let rect = approximate(&region, resolved.p).expect("non-degenerate");
    assert!(rect.density(region.len()) < resolved.density_threshold);

    let (shrunk, shrunk_rect) = refiner
        .shrink_radius(&region, &rect, &field)
        .expect("outliers are trimmed");
    assert_eq!(shrunk.len(), 21);
    assert!(shrunk.pixels().iter().all(|p| (5..=7).contains(&p.y)));
    assert!((shrunk_rect.width - 2.0).abs() < 1e-9);
}

#[test]
fn shrink_radius_fails_below_minimum_size() {
    let field = GradientField::from_angles(21, 13, |_, _| Some(0.0));
    let (validator, resolved) = setup(21, 13, 40);
    let refiner = RegionRefiner::new(&validator, &resolved);
    let pixels: Vec<Pixel> = (0..=20).map(|x| Pixel::new(x, 6)).collect();
    let region = region_of(&field, &pixels);
    let rect = approximate(&region, resolved.p).expect("non-degenerate");
    assert!(refiner.shrink_radius(&region, &rect, &field).is_none());
}

#[test]
fn split_keeps_the_denser_half() {
    let field = GradientField::from_angles(40, 10, |_, _| Some(0.0));
    let (validator, resolved) = setup(40, 10, 5);
    let refiner = RegionRefiner::new(&validator, &resolved);
    // 12 pixels on the left (density 12/11), 10 on the right (density 10/9).
    let pixels: Vec<Pixel> = (0..=11)
        .chain(30..=39)
        .map(|x| Pixel::new(x, 5))
        .collect();
    let region = region_of(&field, &pixels);
    let rect = approximate(&region, resolved.p).expect("non-degenerate");
    let (half, half_rect) = refiner.split(&region, &rect, &field).expect("both halves qualify");
    assert_eq!(half.len(), 10);
    assert!(half.pixels().iter().all(|p| p.x >= 30));
    assert!((half_rect.length() - 9.0).abs() < 1e-9);
}

#[test]
fn regrow_compares_aligned_density_not_area_density() {
    // Row 6 is tilted by 0.3 rad: grown at full tolerance, dropped at half.
    let field = GradientField::from_angles(30, 12, |x, y| match (x, y) {
        (0..=20, 5) => Some(0.0),
        (0..=20, 6) => Some(0.3),
        _ => None,
    });
    let (validator, resolved) = setup(30, 12, 5);
    let refiner = RegionRefiner::new(&validator, &resolved);
    let mut grower = RegionGrower::new(&field);
    let region = grower
        .grow(Pixel::new(0, 5), resolved.tolerance)
        .expect("seed is valid");
    assert_eq!(region.len(), 42);
    let rect = approximate(&region, resolved.p).expect("non-degenerate");

    let (regrown, regrown_rect) = refiner
        .regrow(&mut grower, &region, &rect)
        .expect("aligned density improves");
    assert_eq!(regrown.len(), 21);
    assert!(regrown.pixels().iter().all(|p| p.y == 5));

    // The thinner region covers less of its rectangle, yet it is accepted.
    assert!(regrown_rect.density(regrown.len()) < rect.density(region.len()));
    let half = resolved.tolerance / 2.0;
    assert!((aligned_density(&region, &rect, &field, half) - 0.5).abs() < 1e-12);
    assert!((aligned_density(&regrown, &regrown_rect, &field, half) - 1.0).abs() < 1e-12);
}

#[test]
fn regrown_region_is_handed_to_shrink_radius() {
    // Row 10 carries a diagonal tail at its right end and a tilted twin row
    // above it. Regrow sheds the twin but keeps the tail, so the regrown
    // region is still sparse and ShrinkRadius works on it.
    let field = GradientField::from_angles(100, 30, |x, y| match (x, y) {
        (20..=80, 10) => Some(0.0),
        (20..=80, 9) => Some(0.3),
        (81..=90, _) if y + 70 == x => Some(0.0),
        _ => None,
    });
    let (validator, resolved) = setup(100, 30, 5);
    let refiner = RegionRefiner::new(&validator, &resolved);
    let mut grower = RegionGrower::new(&field);
    let region = grower
        .grow(Pixel::new(20, 10), resolved.tolerance)
        .expect("seed is valid");
    assert_eq!(region.len(), 132);
    let rect = approximate(&region, resolved.p).expect("non-degenerate");
    assert!(matches!(
        refiner.validate(&region, rect, &field),
        Verdict::LowDensity { .. }
    ));

    match refiner.refine(&mut grower, region, rect) {
        RefineOutcome::Accepted { region, step, .. } => {
            assert_eq!(step, RefineStep::ShrinkRadius);
            assert!(region.pixels().iter().all(|p| p.y == 10), "{:?}", region.pixels());
            assert!(region.len() >= 30);
        }
        other => panic!("expected acceptance, got {other:?}"),
    }
    for x in 20..=80 {
        assert!(grower.is_used(Pixel::new(x, 9)), "twin row stays used");
    }
}

#[test]
fn refine_falls_through_to_split() {
    // Two collinear runs at the far ends of the region, the right one with a
    // gap: regrowing from the seed keeps the same alignment, the first radius
    // cut leaves too few pixels, and only the split recovers the left run.
    let field = GradientField::from_angles(200, 21, |x, y| {
        (y == 10 && (x <= 24 || (x >= 175 && x != 180))).then_some(0.0)
    });
    let (validator, resolved) = setup(200, 21, 5);
    let refiner = RegionRefiner::new(&validator, &resolved);
    let pixels: Vec<Pixel> = (0..=24)
        .chain((175..=199).filter(|&x| x != 180))
        .map(|x| Pixel::new(x, 10))
        .collect();
    let region = region_of(&field, &pixels);
    let rect = approximate(&region, resolved.p).expect("non-degenerate");
    assert!(matches!(
        refiner.validate(&region, rect, &field),
        Verdict::LowDensity { .. }
    ));

    let mut grower = RegionGrower::new(&field);
    grower.mark(region.pixels());
    assert!(refiner.regrow(&mut grower, &region, &rect).is_none());
    assert!(refiner.shrink_radius(&region, &rect, &field).is_none());

    match refiner.refine(&mut grower, region, rect) {
        RefineOutcome::Accepted { region, step, .. } => {
            assert_eq!(step, RefineStep::Split);
            assert_eq!(region.len(), 25);
            assert!(region.pixels().iter().all(|p| p.x <= 24));
        }
        other => panic!("expected acceptance, got {other:?}"),
    }
}
