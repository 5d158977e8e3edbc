use crate::Error;
use crate::diagnostics::DiagnosticKind;
use crate::parser::parse;

#[test]
fn step_fuel_is_charged_per_token() {
    assert!(matches!(parse("'a'", Some(0), None), Err(Error::ExecFuelExhausted)));
    assert!(parse("'a'", None, None).is_ok());
}

#[test]
fn depth_fuel_counts_nested_bodies() {
    assert!(parse("(('a'))", None, Some(2)).is_ok());
    assert!(matches!(
        parse("(('a'))", None, Some(1)),
        Err(Error::RecursionLimitExceeded)
    ));
}

#[test]
fn one_error_per_position() {
    let result = parse("<", None, None).unwrap();
    let kinds: Vec<_> = result.diagnostics.iter().map(|d| d.kind()).collect();
    assert_eq!(kinds, [DiagnosticKind::ExpectedName]);
}

#[test]
fn stray_closers_are_reported_separately() {
    let result = parse("'a' ) )", None, None).unwrap();
    let kinds: Vec<_> = result.diagnostics.iter().map(|d| d.kind()).collect();
    assert_eq!(
        kinds,
        [DiagnosticKind::UnexpectedToken, DiagnosticKind::UnexpectedToken]
    );
}
