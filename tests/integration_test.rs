//! Integration tests for the analysis pipeline and core invariants.
//!
//! Tests cover:
//! - Loading through a mock data port, price conversion, report publishing
//! - Classifier and backtest independence
//! - Invariants of build_position / compound / buy_and_hold over arbitrary series
//! - Reproducible synthetic demonstration data

mod common;

use acftrader::cli::run_analysis_pipeline;
use acftrader::domain::analysis::run_analysis;
use acftrader::domain::backtest::run_backtest;
use acftrader::domain::classifier::{classify, Recommendation};
use acftrader::domain::error::AcfTraderError;
use acftrader::domain::metrics::{buy_and_hold, compound};
use acftrader::domain::position::build_position;
use acftrader::domain::returns::SeriesKind;
use acftrader::domain::strategy::{StrategyKind, WindowRule};
use acftrader::domain::synthetic::{generate_seeded, SyntheticConfig};
use approx::assert_relative_eq;
use common::*;
use proptest::prelude::*;

mod pipeline {
    use super::*;

    #[test]
    fn returns_series_flows_to_report() {
        let port = MockDataPort::new().with_series("STEP", make_observations(&STEP));
        let reports = RecordingReportPort::default();
        let rule = WindowRule::new(StrategyKind::Momentum, 2, 2).unwrap();

        let report =
            run_analysis_pipeline(&port, &reports, "STEP", SeriesKind::Returns, &rule, 0.05)
                .unwrap();

        assert_eq!(report.observations, 8);
        assert_eq!(
            report.backtest.position,
            vec![0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0]
        );
        assert_eq!(reports.reports.borrow().len(), 1);
        assert_eq!(reports.reports.borrow()[0], report);
    }

    #[test]
    fn price_series_is_converted_first() {
        let prices = [100.0, 101.0, 102.01, 103.0301, 101.999799, 100.97980101];
        let port = MockDataPort::new().with_series("PX", make_observations(&prices));
        let reports = RecordingReportPort::default();
        let rule = WindowRule::new(StrategyKind::Momentum, 1, 1).unwrap();

        let report =
            run_analysis_pipeline(&port, &reports, "PX", SeriesKind::Prices, &rule, 0.05)
                .unwrap();

        assert_eq!(report.observations, prices.len() - 1);
        assert_relative_eq!(
            report.backtest.buy_and_hold_return,
            prices[prices.len() - 1] / prices[0] - 1.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn unordered_rows_are_sorted_by_date() {
        let mut rows = make_observations(&STEP);
        rows.reverse();
        let port = MockDataPort::new().with_series("STEP", rows);
        let reports = RecordingReportPort::default();
        let rule = WindowRule::new(StrategyKind::Momentum, 2, 2).unwrap();

        let report =
            run_analysis_pipeline(&port, &reports, "STEP", SeriesKind::Returns, &rule, 0.05)
                .unwrap();
        assert_eq!(
            report.backtest.position,
            vec![0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0]
        );
    }

    #[test]
    fn data_source_error_propagates_without_report() {
        let port = MockDataPort::new().with_error("SPY", "disk on fire");
        let reports = RecordingReportPort::default();
        let err = run_analysis_pipeline(
            &port,
            &reports,
            "SPY",
            SeriesKind::Returns,
            &WindowRule::default(),
            0.05,
        )
        .unwrap_err();

        assert!(matches!(err, AcfTraderError::DataSource { ref reason } if reason == "disk on fire"));
        assert!(reports.reports.borrow().is_empty());
    }

    #[test]
    fn missing_series_is_no_data() {
        let port = MockDataPort::new();
        let reports = RecordingReportPort::default();
        let err = run_analysis_pipeline(
            &port,
            &reports,
            "NONE",
            SeriesKind::Returns,
            &WindowRule::default(),
            0.05,
        )
        .unwrap_err();
        assert!(matches!(err, AcfTraderError::NoData { .. }));
    }

    #[test]
    fn short_series_fails_as_insufficient_data() {
        let port = MockDataPort::new().with_series("TINY", make_observations(&[0.01, 0.02]));
        let reports = RecordingReportPort::default();
        let err = run_analysis_pipeline(
            &port,
            &reports,
            "TINY",
            SeriesKind::Returns,
            &WindowRule::default(),
            0.05,
        )
        .unwrap_err();
        assert!(matches!(err, AcfTraderError::InsufficientData { .. }));
        assert!(reports.reports.borrow().is_empty());
    }

    #[test]
    fn duplicate_dates_fail() {
        let mut rows = make_observations(&STEP);
        rows[3].date = rows[2].date;
        let port = MockDataPort::new().with_series("DUP", rows);
        let reports = RecordingReportPort::default();
        let err = run_analysis_pipeline(
            &port,
            &reports,
            "DUP",
            SeriesKind::Returns,
            &WindowRule::default(),
            0.05,
        )
        .unwrap_err();
        assert!(matches!(err, AcfTraderError::DataSource { .. }));
    }
}

mod components {
    use super::*;

    #[test]
    fn recommendation_does_not_pick_strategy() {
        let returns = alternating(40, 0.012, -0.01);
        let rule = WindowRule::new(StrategyKind::Momentum, 3, 2).unwrap();
        let report = run_analysis("ALT", &returns, &rule, 0.05).unwrap();

        assert_eq!(
            report.test.recommendation,
            Recommendation::MeanReversionSuggested
        );
        assert_eq!(report.backtest, run_backtest(&returns, &rule).unwrap());
    }

    #[test]
    fn alternating_with_weak_evidence_is_not_significant() {
        // Alternating signs, but the magnitudes make lag-1 dependence weak.
        let returns = [0.01, -0.002, 0.003, -0.02, 0.001, -0.004, 0.03, -0.001];
        let result = classify(&returns).unwrap();
        assert!(result.p_value >= 0.05);
        assert_eq!(result.recommendation, Recommendation::NotSignificant);
    }

    #[test]
    fn step_scenario_compounds_only_held_periods() {
        let position = build_position(&STEP, StrategyKind::Momentum, 2, 2).unwrap();
        let total = compound(&STEP, &position).unwrap();
        assert_relative_eq!(total, 1.01 * 1.01 * 0.99 * 0.99 - 1.0, epsilon = 1e-12);
    }
}

mod demonstration {
    use super::*;

    #[test]
    fn seeded_demo_is_reproducible() {
        let config = SyntheticConfig::default();
        let a = generate_seeded(&config).unwrap();
        let b = generate_seeded(&config).unwrap();
        assert_eq!(a, b);

        let rule = WindowRule::default();
        let ra = run_analysis("demo", &a, &rule, 0.05).unwrap();
        let rb = run_analysis("demo", &b, &rule, 0.05).unwrap();
        assert_eq!(ra, rb);
        assert_eq!(ra.backtest.position.len(), 100);
    }
}

fn finite_returns(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-0.2f64..0.2, min_len..max_len)
}

fn any_kind() -> impl Strategy<Value = StrategyKind> {
    prop_oneof![Just(StrategyKind::Momentum), Just(StrategyKind::MeanReversion)]
}

proptest! {
    #[test]
    fn position_length_matches_input(
        returns in finite_returns(0, 60),
        kind in any_kind(),
        lookback in 1usize..20,
        holding in 1usize..20,
    ) {
        let position = build_position(&returns, kind, lookback, holding).unwrap();
        prop_assert_eq!(position.len(), returns.len());
        prop_assert!(position.iter().all(|&p| p == 0.0 || p == 1.0));
    }

    #[test]
    fn oversized_windows_give_flat_schedule(
        returns in finite_returns(0, 30),
        kind in any_kind(),
        lookback in 1usize..40,
        extra in 1usize..10,
    ) {
        let holding = (returns.len() + extra).saturating_sub(lookback).max(1);
        prop_assume!(lookback + holding > returns.len());
        let position = build_position(&returns, kind, lookback, holding).unwrap();
        prop_assert!(position.iter().all(|&p| p == 0.0));
    }

    #[test]
    fn leading_lookback_periods_are_flat(
        returns in finite_returns(1, 60),
        kind in any_kind(),
        lookback in 1usize..20,
        holding in 1usize..20,
    ) {
        let position = build_position(&returns, kind, lookback, holding).unwrap();
        let head = lookback.min(returns.len());
        prop_assert!(position[..head].iter().all(|&p| p == 0.0));
    }

    #[test]
    fn flat_position_compounds_to_zero(returns in finite_returns(0, 60)) {
        let flat = vec![0.0; returns.len()];
        prop_assert_eq!(compound(&returns, &flat).unwrap(), 0.0);
    }

    #[test]
    fn full_position_equals_buy_and_hold(returns in finite_returns(0, 60)) {
        let full = vec![1.0; returns.len()];
        prop_assert_eq!(
            compound(&returns, &full).unwrap(),
            buy_and_hold(&returns).unwrap()
        );
    }

    #[test]
    fn build_position_is_pure(
        returns in finite_returns(0, 60),
        kind in any_kind(),
        lookback in 1usize..10,
        holding in 1usize..10,
    ) {
        let a = build_position(&returns, kind, lookback, holding).unwrap();
        let b = build_position(&returns, kind, lookback, holding).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn constant_series_is_rejected(value in -0.2f64..0.2, len in 3usize..120) {
        let returns = vec![value; len];
        prop_assert!(matches!(
            classify(&returns),
            Err(AcfTraderError::InvalidInput { .. })
        ), "expected InvalidInput for constant series");
    }

    #[test]
    fn classify_outputs_are_bounded_and_repeatable(returns in finite_returns(3, 80)) {
        match classify(&returns) {
            Ok(result) => {
                prop_assert!(result.acf1.abs() <= 1.0 + 1e-12);
                prop_assert!((0.0..=1.0).contains(&result.p_value));
                prop_assert_eq!(result, classify(&returns).unwrap());
            }
            Err(AcfTraderError::InvalidInput { .. }) => {
                // Only a constant series has no defined autocorrelation.
                prop_assert!(returns.windows(2).all(|w| w[0] == w[1]));
            }
            Err(e) => prop_assert!(false, "unexpected error: {e}"),
        }
    }
}
