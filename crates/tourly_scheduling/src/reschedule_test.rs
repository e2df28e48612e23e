#[cfg(test)]
mod tests {
    use crate::error::SchedulingError;
    use crate::models::{slot_datetime, AppointmentStatus, NewAppointment};
    use crate::repository::AppointmentRepository;
    use crate::reschedule::RescheduleTour;
    use crate::test_support::{at, book_request, harness, harness_with, in_days, jane, StaticManualBlocks};
    use chrono::NaiveDate;
    use chrono::NaiveTime;
    use std::collections::BTreeSet;
    use std::sync::Arc;
    use uuid::Uuid;

    fn move_to(
        appointment_id: Uuid,
        new_date: NaiveDate,
        new_time: NaiveTime,
        reason: &str,
    ) -> RescheduleTour {
        RescheduleTour {
            appointment_id,
            new_date,
            new_time,
            reason: reason.to_string(),
        }
    }

    #[tokio::test]
    async fn rescheduling_moves_the_appointment_and_records_why() {
        let core = harness();
        let booked = core
            .booking
            .book(book_request("agent-1", "listing-1", in_days(1), at(9, 0)))
            .await
            .unwrap();
        let original_at = booked.scheduled_at;

        let moved = core
            .reschedule
            .reschedule(move_to(booked.id, in_days(2), at(10, 0), "client unavailable"))
            .await
            .unwrap();

        assert_eq!(moved.status, AppointmentStatus::Rescheduled);
        assert_eq!(moved.scheduled_at, slot_datetime(in_days(2), at(10, 0)));
        assert_eq!(moved.history.len(), 1);
        let entry = &moved.history[0];
        assert_eq!(entry.from_status, AppointmentStatus::Scheduled);
        assert_eq!(entry.to_status, AppointmentStatus::Rescheduled);
        assert_eq!(entry.previous_scheduled_at, original_at);
        assert_eq!(entry.reason.as_deref(), Some("client unavailable"));
    }

    #[tokio::test]
    async fn an_appointment_may_be_rescheduled_repeatedly() {
        let core = harness();
        let booked = core
            .booking
            .book(book_request("agent-1", "listing-1", in_days(1), at(9, 0)))
            .await
            .unwrap();

        core.reschedule
            .reschedule(move_to(booked.id, in_days(2), at(10, 0), "first move"))
            .await
            .unwrap();
        let twice = core
            .reschedule
            .reschedule(move_to(booked.id, in_days(3), at(11, 0), "second move"))
            .await
            .unwrap();

        assert_eq!(twice.status, AppointmentStatus::Rescheduled);
        assert_eq!(twice.history.len(), 2);
        assert_eq!(
            twice.history[1].previous_scheduled_at,
            slot_datetime(in_days(2), at(10, 0))
        );
    }

    #[tokio::test]
    async fn rescheduling_to_the_same_slot_is_a_noop_even_with_a_reason() {
        let core = harness();
        let booked = core
            .booking
            .book(book_request("agent-1", "listing-1", in_days(1), at(9, 0)))
            .await
            .unwrap();

        let err = core
            .reschedule
            .reschedule(move_to(booked.id, in_days(1), at(9, 0), "honest reason"))
            .await
            .unwrap_err();
        assert_eq!(err, SchedulingError::NoOpReschedule);

        let unchanged = core.repository.find_by_id(booked.id).await.unwrap();
        assert!(unchanged.history.is_empty());
    }

    #[tokio::test]
    async fn a_reason_is_required() {
        let core = harness();
        let booked = core
            .booking
            .book(book_request("agent-1", "listing-1", in_days(1), at(9, 0)))
            .await
            .unwrap();

        let err = core
            .reschedule
            .reschedule(move_to(booked.id, in_days(2), at(10, 0), "   "))
            .await
            .unwrap_err();
        assert_eq!(err, SchedulingError::ReasonRequired);
    }

    #[tokio::test]
    async fn targets_pass_the_booking_checks() {
        let core = harness();
        let booked = core
            .booking
            .book(book_request("agent-1", "listing-1", in_days(1), at(9, 0)))
            .await
            .unwrap();

        let err = core
            .reschedule
            .reschedule(move_to(booked.id, in_days(31), at(10, 0), "too far out"))
            .await
            .unwrap_err();
        assert_eq!(err, SchedulingError::OutOfHorizon);

        let err = core
            .reschedule
            .reschedule(move_to(booked.id, in_days(2), at(10, 7), "off grid"))
            .await
            .unwrap_err();
        assert_eq!(err, SchedulingError::InvalidSlot);
    }

    #[tokio::test]
    async fn moving_onto_another_booked_day_is_unavailable() {
        let core = harness();
        let first = core
            .booking
            .book(book_request("agent-1", "listing-1", in_days(1), at(9, 0)))
            .await
            .unwrap();
        core.booking
            .book(book_request("agent-1", "listing-2", in_days(2), at(9, 0)))
            .await
            .unwrap();

        let err = core
            .reschedule
            .reschedule(move_to(first.id, in_days(2), at(14, 0), "prefer tuesday"))
            .await
            .unwrap_err();
        assert_eq!(err, SchedulingError::SlotUnavailable);
    }

    #[tokio::test]
    async fn moving_within_the_appointments_own_day_is_allowed() {
        // The whole-day block on the current day stems from the appointment
        // being moved, so it does not pin the appointment to its time.
        let core = harness();
        let booked = core
            .booking
            .book(book_request("agent-1", "listing-1", in_days(1), at(9, 0)))
            .await
            .unwrap();

        let moved = core
            .reschedule
            .reschedule(move_to(booked.id, in_days(1), at(15, 30), "later that day"))
            .await
            .unwrap();
        assert_eq!(moved.scheduled_at, slot_datetime(in_days(1), at(15, 30)));
    }

    #[tokio::test]
    async fn a_manual_block_on_the_own_day_still_rejects() {
        // The agent blocked the day after the tour was booked; the existing
        // appointment stands, but it cannot be moved around within that day.
        let core = harness_with(
            Some(Arc::new(StaticManualBlocks(BTreeSet::from([in_days(1)])))),
            None,
            None,
        );
        let booked = core
            .repository
            .create(NewAppointment {
                agent_id: "agent-1".to_string(),
                listing_id: "listing-1".to_string(),
                scheduled_at: slot_datetime(in_days(1), at(9, 0)),
                client_contact: jane(),
                notes: None,
            })
            .await
            .unwrap();

        let err = core
            .reschedule
            .reschedule(move_to(booked.id, in_days(1), at(15, 0), "push to afternoon"))
            .await
            .unwrap_err();
        assert_eq!(err, SchedulingError::SlotUnavailable);
    }

    #[tokio::test]
    async fn terminal_appointments_cannot_be_moved() {
        let core = harness();
        let booked = core
            .booking
            .book(book_request("agent-1", "listing-1", in_days(1), at(9, 0)))
            .await
            .unwrap();
        core.cancellation.cancel(booked.id).await.unwrap();

        let err = core
            .reschedule
            .reschedule(move_to(booked.id, in_days(2), at(10, 0), "too late"))
            .await
            .unwrap_err();
        assert_eq!(err, SchedulingError::InvalidState);
    }

    #[tokio::test]
    async fn unknown_appointments_are_not_found() {
        let core = harness();
        let err = core
            .reschedule
            .reschedule(move_to(Uuid::new_v4(), in_days(2), at(10, 0), "ghost"))
            .await
            .unwrap_err();
        assert!(matches!(err, SchedulingError::NotFound(_)));
    }
}
