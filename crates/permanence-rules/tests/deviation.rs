use permanence_rules::deviation::deviation_percent;

#[test]
fn zero_baseline_to_zero_is_no_change() {
    assert_eq!(deviation_percent(0.0, 0.0), Some(0.0));
}

#[test]
fn zero_baseline_to_anything_else_is_unbounded() {
    assert_eq!(deviation_percent(5.0, 0.0), Some(f64::INFINITY));
    assert_eq!(deviation_percent(-5.0, 0.0), Some(f64::INFINITY));
}

#[test]
fn relative_change_uses_baseline_magnitude() {
    assert_eq!(deviation_percent(20.0, 10.0), Some(100.0));
    assert_eq!(deviation_percent(5.0, 10.0), Some(-50.0));
    // -10 -> -20 is a drop, -10 -> -5 a rise.
    assert_eq!(deviation_percent(-20.0, -10.0), Some(-100.0));
    assert_eq!(deviation_percent(-5.0, -10.0), Some(50.0));
}

#[test]
fn non_finite_inputs_have_no_deviation() {
    assert_eq!(deviation_percent(f64::NAN, 10.0), None);
    assert_eq!(deviation_percent(10.0, f64::INFINITY), None);
}
