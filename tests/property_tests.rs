//! Property-based tests for the pure core and render layers.

use chrono::Utc;
use magic_button::config::IconOverrides;
use magic_button::core::{screen, ActivationId, Rejection, Status, StatusHistory, StatusTransition};
use magic_button::host::{BoxMetrics, Insets, Origin};
use magic_button::render::adapter::{effective_icon_color, effective_icon_size, render};
use magic_button::render::geometry::CapturedGeometry;
use magic_button::render::icons::IconSize;
use proptest::prelude::*;

prop_compose! {
    fn arbitrary_status()(variant in 0..4u8) -> Status {
        match variant {
            0 => Status::Idle,
            1 => Status::Pending,
            2 => Status::Success,
            _ => Status::Failure,
        }
    }
}

fn arbitrary_origin() -> impl Strategy<Value = Origin> {
    prop_oneof![Just(Origin::Genuine), Just(Origin::Synthetic)]
}

prop_compose! {
    fn arbitrary_geometry()(
        width in 0.0..400.0f64,
        height in 0.0..200.0f64,
        icon_size in 0.0..100.0f64,
    ) -> CapturedGeometry {
        CapturedGeometry { width, height, icon_size, color: "rgb(1, 2, 3)".to_string() }
    }
}

/// Walk the legal cycle, one status per step.
fn lifecycle(outcomes: &[bool]) -> Vec<StatusTransition> {
    let mut steps = Vec::new();
    for (i, ok) in outcomes.iter().enumerate() {
        let activation = ActivationId(i as u64 + 1);
        let settled = if *ok { Status::Success } else { Status::Failure };
        for (from, to) in [
            (Status::Idle, Status::Pending),
            (Status::Pending, settled),
            (settled, Status::Idle),
        ] {
            steps.push(StatusTransition {
                from,
                to,
                timestamp: Utc::now(),
                activation,
            });
        }
    }
    steps
}

proptest! {
    #[test]
    fn synthetic_activations_are_never_admitted(
        status in arbitrary_status(),
        in_flight in any::<bool>(),
    ) {
        prop_assert_eq!(
            screen(Origin::Synthetic, status, in_flight),
            Err(Rejection::Synthetic)
        );
    }

    #[test]
    fn genuine_activation_admitted_iff_not_busy(
        status in arbitrary_status(),
        in_flight in any::<bool>(),
    ) {
        let admitted = screen(Origin::Genuine, status, in_flight).is_ok();
        prop_assert_eq!(admitted, !in_flight && status != Status::Pending);
    }

    #[test]
    fn screening_is_deterministic(
        origin in arbitrary_origin(),
        status in arbitrary_status(),
        in_flight in any::<bool>(),
    ) {
        prop_assert_eq!(
            screen(origin, status, in_flight),
            screen(origin, status, in_flight)
        );
    }

    #[test]
    fn transitions_follow_the_cycle(from in arbitrary_status(), to in arbitrary_status()) {
        let legal = matches!(
            (from, to),
            (Status::Idle, Status::Pending)
                | (Status::Pending, Status::Success)
                | (Status::Pending, Status::Failure)
                | (Status::Success, Status::Idle)
                | (Status::Failure, Status::Idle)
        );
        prop_assert_eq!(from.can_transition_to(to), legal);
    }

    #[test]
    fn only_idle_renders_original(
        status in arbitrary_status(),
        geometry in proptest::option::of(arbitrary_geometry()),
    ) {
        let view = render(status, geometry.as_ref(), &IconOverrides::default());
        prop_assert_eq!(view.is_original(), status == Status::Idle);
        prop_assert_eq!(view.icon.is_some(), status != Status::Idle);
        if status != Status::Idle {
            prop_assert_eq!(view.size_lock.is_some(), geometry.is_some());
        }
    }

    #[test]
    fn override_wins_over_measurement(
        geometry in arbitrary_geometry(),
        size in 1.0..64.0f64,
    ) {
        let overrides = IconOverrides {
            color: Some("red".to_string()),
            size: Some(IconSize::Px(size)),
        };
        prop_assert_eq!(effective_icon_size(&overrides, Some(&geometry)), IconSize::Px(size));
        prop_assert_eq!(effective_icon_color(&overrides, Some(&geometry)), "red");
    }

    #[test]
    fn measurement_wins_over_default(geometry in arbitrary_geometry()) {
        let overrides = IconOverrides::default();
        prop_assert_eq!(
            effective_icon_size(&overrides, Some(&geometry)),
            IconSize::Px(geometry.icon_size)
        );
        prop_assert_eq!(effective_icon_color(&overrides, Some(&geometry)), geometry.color.clone());
    }

    #[test]
    fn icon_size_is_smaller_content_dimension(
        width in 0.0..500.0f64,
        height in 0.0..500.0f64,
        vertical in 0.0..40.0f64,
        horizontal in 0.0..40.0f64,
    ) {
        let metrics = BoxMetrics {
            width,
            height,
            padding: Insets::symmetric(vertical, horizontal),
            color: None,
        };
        let geometry = CapturedGeometry::from_metrics(&metrics).unwrap();
        let expected = (height - 2.0 * vertical).min(width - 2.0 * horizontal).max(0.0);

        prop_assert!((geometry.icon_size - expected).abs() < 1e-9);
        prop_assert!(geometry.icon_size >= 0.0);
        prop_assert_eq!(geometry.color, "#000");
    }

    #[test]
    fn history_preserves_order(outcomes in prop::collection::vec(any::<bool>(), 1..20)) {
        let steps = lifecycle(&outcomes);
        let history = steps
            .iter()
            .cloned()
            .fold(StatusHistory::new(), |h, t| h.record(t));

        let mut expected = vec![Status::Idle];
        expected.extend(steps.iter().map(|t| t.to));
        let path: Vec<Status> = history.get_path().into_iter().copied().collect();
        prop_assert_eq!(path, expected);
    }

    #[test]
    fn every_activation_path_is_one_cycle(outcomes in prop::collection::vec(any::<bool>(), 1..20)) {
        let history = lifecycle(&outcomes)
            .into_iter()
            .fold(StatusHistory::new(), |h, t| h.record(t));

        for (i, ok) in outcomes.iter().enumerate() {
            let settled = if *ok { Status::Success } else { Status::Failure };
            prop_assert_eq!(
                history.path_of(ActivationId(i as u64 + 1)),
                vec![Status::Idle, Status::Pending, settled, Status::Idle]
            );
        }
    }

    #[test]
    fn history_record_is_pure(from in arbitrary_status(), to in arbitrary_status()) {
        let history = StatusHistory::new();
        let next = history.record(StatusTransition {
            from,
            to,
            timestamp: Utc::now(),
            activation: ActivationId(1),
        });

        prop_assert_eq!(history.len(), 0);
        prop_assert_eq!(next.len(), 1);
    }

    #[test]
    fn status_roundtrip_serialization(status in arbitrary_status()) {
        let json = serde_json::to_string(&status).unwrap();
        let back: Status = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(status, back);
    }
}
