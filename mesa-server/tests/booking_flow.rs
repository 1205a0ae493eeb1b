//! Booking service integration tests over the in-memory engine
//! Run: cargo test -p mesa-server --test booking_flow

use chrono::{NaiveDate, NaiveTime};

use mesa_server::auth::{CurrentUser, JwtConfig, Role};
use mesa_server::core::{Config, ServerState};
use mesa_server::db::models::{
    ReservationCreate, ReservationStatus, ReservationUpdate, RestaurantTable, TableCreate,
    TableLocation,
};
use mesa_server::utils::AppError;

fn test_config() -> Config {
    let mut config = Config::with_overrides("/tmp/mesa-test", 0);
    config.jwt = JwtConfig {
        secret: "integration-test-secret-key-0123456789".to_string(),
        expiration_minutes: 60,
        issuer: "mesa-server".to_string(),
        audience: "mesa-clients".to_string(),
    };
    config
}

async fn test_state() -> ServerState {
    ServerState::with_memory_db(test_config())
        .await
        .expect("in-memory state")
}

fn customer(email: &str) -> CurrentUser {
    CurrentUser {
        id: format!("user-{email}"),
        email: email.to_string(),
        role: Role::Customer,
    }
}

fn staff() -> CurrentUser {
    CurrentUser {
        id: "staff-1".to_string(),
        email: "staff@mesa.test".to_string(),
        role: Role::Staff,
    }
}

async fn seed_table(state: &ServerState, number: &str, capacity: i32) -> RestaurantTable {
    state
        .table_repository()
        .create(TableCreate {
            table_number: number.to_string(),
            capacity,
            location: TableLocation::Window,
            features: vec![],
            is_available: None,
        })
        .await
        .expect("seed table")
}

fn slot_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 9, 12).unwrap()
}

fn at(hhmm: &str) -> NaiveTime {
    NaiveTime::parse_from_str(hhmm, "%H:%M").unwrap()
}

fn booking(table: &RestaurantTable, email: &str, time: NaiveTime, party: i32) -> ReservationCreate {
    ReservationCreate {
        customer_name: "Ana Torres".to_string(),
        customer_email: email.to_string(),
        customer_phone: "555-0100".to_string(),
        date: slot_date(),
        time,
        party_size: party,
        table: table.id.clone().unwrap(),
        notes: None,
    }
}

#[tokio::test]
async fn capacity_filters_small_tables() {
    let state = test_state().await;
    seed_table(&state, "W1", 2).await;
    let big = seed_table(&state, "W2", 6).await;

    let free = state
        .availability_resolver()
        .find_available(slot_date(), at("19:00"), 4)
        .await
        .unwrap();

    assert_eq!(free.len(), 1);
    assert_eq!(free[0].table_number, big.table_number);
}

#[tokio::test]
async fn double_booking_same_slot_conflicts() {
    let state = test_state().await;
    let w1 = seed_table(&state, "W1", 4).await;
    let svc = state.reservation_service();

    svc.create(booking(&w1, "ana@example.com", at("19:00"), 2), &customer("ana@example.com"))
        .await
        .unwrap();

    let second = svc
        .create(booking(&w1, "ben@example.com", at("19:00"), 2), &customer("ben@example.com"))
        .await;
    assert!(matches!(second, Err(AppError::Conflict(_))));

    // A different slot on the same table is fine
    svc.create(booking(&w1, "ben@example.com", at("19:30"), 2), &customer("ben@example.com"))
        .await
        .unwrap();
}

#[tokio::test]
async fn booked_table_disappears_and_cancel_restores_it() {
    let state = test_state().await;
    let w1 = seed_table(&state, "W1", 4).await;
    let svc = state.reservation_service();
    let resolver = state.availability_resolver();

    let r = svc
        .create(booking(&w1, "ana@example.com", at("19:00"), 2), &customer("ana@example.com"))
        .await
        .unwrap();

    let free = resolver
        .find_available(slot_date(), at("19:00"), 2)
        .await
        .unwrap();
    assert!(free.is_empty());

    // Other slots are unaffected
    let free_later = resolver
        .find_available(slot_date(), at("20:00"), 2)
        .await
        .unwrap();
    assert_eq!(free_later.len(), 1);

    svc.update(
        &r.id.as_ref().unwrap().to_string(),
        ReservationUpdate {
            status: Some(ReservationStatus::Cancelled),
            ..Default::default()
        },
        &staff(),
    )
    .await
    .unwrap();

    let free = resolver
        .find_available(slot_date(), at("19:00"), 2)
        .await
        .unwrap();
    assert_eq!(free.len(), 1);
}

#[tokio::test]
async fn deleting_reservation_frees_the_slot() {
    let state = test_state().await;
    let w1 = seed_table(&state, "W1", 4).await;
    let svc = state.reservation_service();
    let ana = customer("ana@example.com");

    let r = svc
        .create(booking(&w1, "ana@example.com", at("19:00"), 2), &ana)
        .await
        .unwrap();
    let id = r.id.as_ref().unwrap().to_string();

    svc.delete(&id, &ana).await.unwrap();

    assert!(matches!(svc.get(&id, &staff()).await, Err(AppError::NotFound(_))));

    let free = state
        .availability_resolver()
        .find_available(slot_date(), at("19:00"), 2)
        .await
        .unwrap();
    assert_eq!(free.len(), 1);
}

#[tokio::test]
async fn initial_status_depends_on_role() {
    let state = test_state().await;
    let w1 = seed_table(&state, "W1", 4).await;
    let w2 = seed_table(&state, "W2", 4).await;
    let svc = state.reservation_service();

    let by_customer = svc
        .create(booking(&w1, "ana@example.com", at("19:00"), 2), &customer("ana@example.com"))
        .await
        .unwrap();
    assert_eq!(by_customer.status, ReservationStatus::Pending);

    let by_staff = svc
        .create(booking(&w2, "walkin@example.com", at("19:00"), 2), &staff())
        .await
        .unwrap();
    assert_eq!(by_staff.status, ReservationStatus::Confirmed);
}

#[tokio::test]
async fn customer_status_field_is_silently_dropped() {
    let state = test_state().await;
    let w1 = seed_table(&state, "W1", 4).await;
    let svc = state.reservation_service();
    let ana = customer("ana@example.com");

    let r = svc
        .create(booking(&w1, "ana@example.com", at("19:00"), 2), &ana)
        .await
        .unwrap();

    let updated = svc
        .update(
            &r.id.as_ref().unwrap().to_string(),
            ReservationUpdate {
                status: Some(ReservationStatus::Confirmed),
                notes: Some("window seat please".to_string()),
                ..Default::default()
            },
            &ana,
        )
        .await
        .unwrap();

    // Notes applied, status untouched
    assert_eq!(updated.notes, "window seat please");
    assert_eq!(updated.status, ReservationStatus::Pending);
}

#[tokio::test]
async fn customer_cannot_edit_confirmed_reservation() {
    let state = test_state().await;
    let w1 = seed_table(&state, "W1", 4).await;
    let svc = state.reservation_service();
    let ana = customer("ana@example.com");

    let r = svc
        .create(booking(&w1, "ana@example.com", at("19:00"), 2), &ana)
        .await
        .unwrap();
    let id = r.id.as_ref().unwrap().to_string();

    svc.update(
        &id,
        ReservationUpdate {
            status: Some(ReservationStatus::Confirmed),
            ..Default::default()
        },
        &staff(),
    )
    .await
    .unwrap();

    let attempt = svc
        .update(
            &id,
            ReservationUpdate {
                party_size: Some(3),
                ..Default::default()
            },
            &ana,
        )
        .await;
    assert!(matches!(attempt, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn customers_are_scoped_to_their_own_reservations() {
    let state = test_state().await;
    let w1 = seed_table(&state, "W1", 4).await;
    let w2 = seed_table(&state, "W2", 4).await;
    let svc = state.reservation_service();
    let ana = customer("ana@example.com");
    let ben = customer("ben@example.com");

    let anas = svc
        .create(booking(&w1, "ana@example.com", at("19:00"), 2), &ana)
        .await
        .unwrap();
    svc.create(booking(&w2, "ben@example.com", at("19:00"), 2), &ben)
        .await
        .unwrap();

    let ana_id = anas.id.as_ref().unwrap().to_string();

    assert!(matches!(svc.get(&ana_id, &ben).await, Err(AppError::Forbidden(_))));
    assert!(matches!(svc.delete(&ana_id, &ben).await, Err(AppError::Forbidden(_))));

    // Listing is filtered, not forbidden
    let ben_list = svc.list(&ben).await.unwrap();
    assert_eq!(ben_list.len(), 1);
    assert_eq!(ben_list[0].customer_email, "ben@example.com");

    let staff_list = svc.list(&staff()).await.unwrap();
    assert_eq!(staff_list.len(), 2);
}

#[tokio::test]
async fn date_listing_excludes_cancelled_and_scopes_customers() {
    let state = test_state().await;
    let w1 = seed_table(&state, "W1", 4).await;
    let w2 = seed_table(&state, "W2", 4).await;
    let w3 = seed_table(&state, "W3", 4).await;
    let svc = state.reservation_service();
    let ana = customer("ana@example.com");
    let ben = customer("ben@example.com");

    svc.create(booking(&w1, "ana@example.com", at("19:00"), 2), &ana)
        .await
        .unwrap();
    svc.create(booking(&w2, "ben@example.com", at("19:00"), 2), &ben)
        .await
        .unwrap();
    let cancelled = svc
        .create(booking(&w3, "ben@example.com", at("20:00"), 2), &ben)
        .await
        .unwrap();

    svc.update(
        &cancelled.id.as_ref().unwrap().to_string(),
        ReservationUpdate {
            status: Some(ReservationStatus::Cancelled),
            ..Default::default()
        },
        &staff(),
    )
    .await
    .unwrap();

    // Staff see every non-cancelled reservation on the date
    let on_date = svc.list_by_date(slot_date(), &staff()).await.unwrap();
    assert_eq!(on_date.len(), 2);
    assert!(on_date
        .iter()
        .all(|r| r.status != ReservationStatus::Cancelled));

    // Customers see only their own
    let ben_view = svc.list_by_date(slot_date(), &ben).await.unwrap();
    assert_eq!(ben_view.len(), 1);
    assert_eq!(ben_view[0].customer_email, "ben@example.com");

    // Another date is empty
    let other_day = slot_date().succ_opt().unwrap();
    assert!(svc.list_by_date(other_day, &staff()).await.unwrap().is_empty());
}

#[tokio::test]
async fn terminal_status_cannot_be_left() {
    let state = test_state().await;
    let w1 = seed_table(&state, "W1", 4).await;
    let svc = state.reservation_service();

    let r = svc
        .create(booking(&w1, "ana@example.com", at("19:00"), 2), &staff())
        .await
        .unwrap();
    let id = r.id.as_ref().unwrap().to_string();

    svc.update(
        &id,
        ReservationUpdate {
            status: Some(ReservationStatus::Completed),
            ..Default::default()
        },
        &staff(),
    )
    .await
    .unwrap();

    let attempt = svc
        .update(
            &id,
            ReservationUpdate {
                status: Some(ReservationStatus::Pending),
                ..Default::default()
            },
            &staff(),
        )
        .await;
    assert!(matches!(attempt, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn create_then_get_round_trips() {
    let state = test_state().await;
    let w1 = seed_table(&state, "W1", 4).await;
    let svc = state.reservation_service();
    let ana = customer("ana@example.com");

    let mut req = booking(&w1, "Ana@Example.COM", at("20:30"), 3);
    req.notes = Some("anniversary".to_string());

    let created = svc.create(req, &ana).await.unwrap();
    let fetched = svc
        .get(&created.id.as_ref().unwrap().to_string(), &ana)
        .await
        .unwrap();

    assert_eq!(fetched.customer_name, "Ana Torres");
    assert_eq!(fetched.customer_email, "ana@example.com"); // lowercased
    assert_eq!(fetched.date, slot_date());
    assert_eq!(fetched.time, at("20:30"));
    assert_eq!(fetched.party_size, 3);
    assert_eq!(fetched.table_number, "W1");
    assert_eq!(fetched.notes, "anniversary");
    assert_eq!(fetched.status, ReservationStatus::Pending);
}

#[tokio::test]
async fn moving_a_reservation_rechecks_the_target_slot() {
    let state = test_state().await;
    let w1 = seed_table(&state, "W1", 4).await;
    let svc = state.reservation_service();
    let ana = customer("ana@example.com");
    let ben = customer("ben@example.com");

    svc.create(booking(&w1, "ana@example.com", at("19:00"), 2), &ana)
        .await
        .unwrap();
    let bens = svc
        .create(booking(&w1, "ben@example.com", at("20:00"), 2), &ben)
        .await
        .unwrap();

    // Moving onto the occupied 19:00 slot fails
    let attempt = svc
        .update(
            &bens.id.as_ref().unwrap().to_string(),
            ReservationUpdate {
                time: Some(at("19:00")),
                ..Default::default()
            },
            &ben,
        )
        .await;
    assert!(matches!(attempt, Err(AppError::Conflict(_))));

    // Keeping the same slot while editing notes does not self-conflict
    let ok = svc
        .update(
            &bens.id.as_ref().unwrap().to_string(),
            ReservationUpdate {
                notes: Some("no rush".to_string()),
                ..Default::default()
            },
            &ben,
        )
        .await
        .unwrap();
    assert_eq!(ok.time, at("20:00"));
}

#[tokio::test]
async fn concurrent_creates_for_one_slot_admit_exactly_one() {
    let state = test_state().await;
    let w1 = seed_table(&state, "W1", 4).await;
    let svc = state.reservation_service();

    let ana = customer("ana@example.com");
    let ben = customer("ben@example.com");
    let a = svc.create(booking(&w1, "ana@example.com", at("19:00"), 2), &ana);
    let b = svc.create(booking(&w1, "ben@example.com", at("19:00"), 2), &ben);

    let (ra, rb) = tokio::join!(a, b);
    let successes = [ra.is_ok(), rb.is_ok()].iter().filter(|&&ok| ok).count();
    assert_eq!(successes, 1);
}

#[tokio::test]
async fn out_of_hours_and_oversized_bookings_are_rejected() {
    let state = test_state().await;
    let w1 = seed_table(&state, "W1", 4).await;
    let svc = state.reservation_service();
    let ana = customer("ana@example.com");

    let early = svc
        .create(booking(&w1, "ana@example.com", at("12:00"), 2), &ana)
        .await;
    assert!(matches!(early, Err(AppError::Validation(_))));

    let mut oversized = booking(&w1, "ana@example.com", at("19:00"), 2);
    oversized.party_size = 25;
    assert!(matches!(svc.create(oversized, &ana).await, Err(AppError::Validation(_))));

    // Party larger than the table is a conflict, not a validation error
    let too_big_for_table = svc
        .create(booking(&w1, "ana@example.com", at("19:00"), 6), &ana)
        .await;
    assert!(matches!(too_big_for_table, Err(AppError::Conflict(_))));

    // Notes are capped at 500 characters
    let mut wordy = booking(&w1, "ana@example.com", at("19:00"), 2);
    wordy.notes = Some("x".repeat(501));
    assert!(matches!(svc.create(wordy, &ana).await, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn rocksdb_engine_round_trips() {
    use mesa_server::db::DbService;
    use mesa_server::db::repository::TableRepository;

    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("mesa.db");
    let service = DbService::new(&db_path.to_string_lossy()).await.unwrap();

    let repo = TableRepository::new(service.db.clone());
    repo.create(TableCreate {
        table_number: "P1".to_string(),
        capacity: 8,
        location: TableLocation::PrivateRoom,
        features: vec!["VIP".to_string()],
        is_available: None,
    })
    .await
    .unwrap();

    let all = repo.find_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].table_number, "P1");
    assert!(all[0].is_available);

    // The unique index rejects a second P1
    let dup = repo
        .create(TableCreate {
            table_number: "P1".to_string(),
            capacity: 2,
            location: TableLocation::Bar,
            features: vec![],
            is_available: None,
        })
        .await;
    assert!(dup.is_err());
}

#[tokio::test]
async fn out_of_service_table_rejects_bookings() {
    let state = test_state().await;
    let w1 = seed_table(&state, "W1", 4).await;
    let repo = state.table_repository();
    let id = w1.id.as_ref().unwrap().to_string();

    repo.update(
        &id,
        mesa_server::db::models::TableUpdate {
            is_available: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let attempt = state
        .reservation_service()
        .create(
            booking(&w1, "ana@example.com", at("19:00"), 2),
            &customer("ana@example.com"),
        )
        .await;
    assert!(matches!(attempt, Err(AppError::Conflict(_))));

    let free = state
        .availability_resolver()
        .find_available(slot_date(), at("19:00"), 2)
        .await
        .unwrap();
    assert!(free.is_empty());
}
