#[cfg(test)]
mod tests {
    use crate::error::SchedulingError;
    use crate::models::AppointmentStatus;
    use crate::test_support::{at, book_request, harness, in_days};
    use uuid::Uuid;

    #[tokio::test]
    async fn cancelling_is_terminal_and_logged_in_history() {
        let core = harness();
        let booked = core
            .booking
            .book(book_request("agent-1", "listing-1", in_days(1), at(9, 0)))
            .await
            .unwrap();

        let cancelled = core.cancellation.cancel(booked.id).await.unwrap();
        assert_eq!(cancelled.status, AppointmentStatus::Cancelled);
        assert_eq!(cancelled.history.len(), 1);
        let entry = &cancelled.history[0];
        assert_eq!(entry.from_status, AppointmentStatus::Scheduled);
        assert_eq!(entry.to_status, AppointmentStatus::Cancelled);
        assert_eq!(entry.previous_scheduled_at, booked.scheduled_at);
        assert_eq!(entry.reason, None);
    }

    #[tokio::test]
    async fn cancelling_twice_is_an_error_not_idempotent_success() {
        let core = harness();
        let booked = core
            .booking
            .book(book_request("agent-1", "listing-1", in_days(1), at(9, 0)))
            .await
            .unwrap();

        core.cancellation.cancel(booked.id).await.unwrap();
        let err = core.cancellation.cancel(booked.id).await.unwrap_err();
        assert_eq!(err, SchedulingError::InvalidState);
    }

    #[tokio::test]
    async fn completed_appointments_cannot_be_cancelled() {
        let core = harness();
        let booked = core
            .booking
            .book(book_request("agent-1", "listing-1", in_days(1), at(9, 0)))
            .await
            .unwrap();

        let completed = core.cancellation.complete(booked.id).await.unwrap();
        assert_eq!(completed.status, AppointmentStatus::Completed);

        let err = core.cancellation.cancel(booked.id).await.unwrap_err();
        assert_eq!(err, SchedulingError::InvalidState);
    }

    #[tokio::test]
    async fn cancelling_frees_the_day_for_new_bookings() {
        let core = harness();
        let booked = core
            .booking
            .book(book_request("agent-1", "listing-1", in_days(1), at(9, 0)))
            .await
            .unwrap();
        assert!(core.registry.is_blocked("agent-1", in_days(1)).await.unwrap());

        core.cancellation.cancel(booked.id).await.unwrap();

        // No separate unblock step: the derived registry frees the day
        assert!(!core.registry.is_blocked("agent-1", in_days(1)).await.unwrap());
        core.booking
            .book(book_request("agent-1", "listing-1", in_days(1), at(9, 0)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn cancelling_an_unknown_appointment_is_not_found() {
        let core = harness();
        let err = core.cancellation.cancel(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, SchedulingError::NotFound(_)));
    }
}
