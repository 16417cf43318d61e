//! Integration tests: multiple sessions editing one shared document.

use seatplan_layout::Group;
use seatplan_store::{
    ActionKind, AuditSink, DocumentStore, MemoryAuditLog, MemoryDocumentStore,
    DEFAULT_RECENT_LIMIT, LAYOUT_DOC_ID,
};
use seatplan_sync::{operator_from_query, EditorSession, SeatField, SessionConfig};
use std::sync::Arc;

type Session = EditorSession<MemoryDocumentStore, MemoryAuditLog>;

struct Deployment {
    store: Arc<MemoryDocumentStore>,
    audit: Arc<MemoryAuditLog>,
}

impl Deployment {
    fn new() -> Self {
        Self {
            store: Arc::new(MemoryDocumentStore::new()),
            audit: Arc::new(MemoryAuditLog::new()),
        }
    }

    fn session(&self, operator: &str) -> Session {
        let mut session = EditorSession::new(
            SessionConfig::new(operator),
            Arc::clone(&self.store),
            Arc::clone(&self.audit),
        );
        session.initialize().unwrap();
        session
    }
}

#[test]
fn second_session_loads_first_sessions_seed() {
    let deployment = Deployment::new();

    let ana = deployment.session("Ana");
    assert!(deployment.store.contains(LAYOUT_DOC_ID));

    let luis = deployment.session("Luis");
    assert_eq!(ana.draft().unwrap(), luis.draft().unwrap());
}

#[test]
fn clean_session_adopts_peer_edits() {
    let deployment = Deployment::new();
    let mut ana = deployment.session("Ana");
    let mut luis = deployment.session("Luis");

    ana.update_seat(1, 100, SeatField::Name("Alice".into()))
        .unwrap();
    ana.flush().unwrap();

    let drained = luis.poll_remote().unwrap();
    assert!(drained >= 1);
    assert_eq!(
        luis.draft().unwrap().table(1).unwrap().seats[0].name,
        "Alice"
    );
    assert!(!luis.is_dirty());
}

#[test]
fn dirty_session_keeps_local_edits_over_peer_update() {
    let deployment = Deployment::new();
    let mut ana = deployment.session("Ana");
    let mut luis = deployment.session("Luis");

    // Luis edits but his persist has not run yet.
    luis.update_seat(2, 200, SeatField::Name("Bruno".into()))
        .unwrap();

    // Ana's edit lands on the store in the meantime.
    ana.update_seat(1, 100, SeatField::Name("Alice".into()))
        .unwrap();
    ana.flush().unwrap();

    luis.poll_remote().unwrap();

    // Luis's draft keeps his edit and does not see Ana's yet.
    let draft = luis.draft().unwrap();
    assert_eq!(draft.table(2).unwrap().seats[0].name, "Bruno");
    assert_eq!(draft.table(1).unwrap().seats[0].name, "");
    assert!(luis.is_dirty());

    // Ana's version is tracked as the saved snapshot; a reset adopts it.
    luis.reset().unwrap();
    let draft = luis.draft().unwrap();
    assert_eq!(draft.table(1).unwrap().seats[0].name, "Alice");
    assert_eq!(draft.table(2).unwrap().seats[0].name, "");
}

#[test]
fn concurrent_saves_are_last_writer_wins() {
    let deployment = Deployment::new();
    let mut ana = deployment.session("Ana");
    let mut luis = deployment.session("Luis");

    // Both edit their own copy of the clean document, then both save.
    ana.update_seat(1, 100, SeatField::Name("Alice".into()))
        .unwrap();
    luis.update_seat(2, 200, SeatField::Name("Bruno".into()))
        .unwrap();

    ana.flush().unwrap();
    luis.flush().unwrap();

    // Whole-document granularity: Luis's write replaced Ana's.
    let stored = deployment.store.read(LAYOUT_DOC_ID).unwrap().unwrap();
    assert_eq!(stored.table(2).unwrap().seats[0].name, "Bruno");
    assert_eq!(stored.table(1).unwrap().seats[0].name, "");
}

#[test]
fn echo_does_not_clobber_in_flight_edits() {
    let deployment = Deployment::new();
    let mut ana = deployment.session("Ana");

    ana.update_seat(1, 100, SeatField::Name("Alice".into()))
        .unwrap();
    ana.flush().unwrap();

    // A new edit lands before the echo of the first persist is drained.
    ana.update_seat(1, 101, SeatField::Name("Bea".into())).unwrap();

    ana.poll_remote().unwrap();

    // The echo was suppressed; the in-flight edit survives.
    let draft = ana.draft().unwrap();
    assert_eq!(draft.table(1).unwrap().seats[0].name, "Alice");
    assert_eq!(draft.table(1).unwrap().seats[1].name, "Bea");
    assert!(ana.is_dirty());
}

#[test]
fn shared_audit_trail_interleaves_operators() {
    let deployment = Deployment::new();
    let mut ana = deployment.session("Ana");
    let mut luis = deployment.session(&operator_from_query("operator=Luis"));
    let mut anon = deployment.session(&operator_from_query("x=1"));

    ana.move_table(1, 5.0, 5.0).unwrap();
    luis.update_seat(2, 200, SeatField::Group(Some(Group::Family)))
        .unwrap();
    anon.adjust_seat_count(3, -2).unwrap();

    let history = deployment.audit.recent(DEFAULT_RECENT_LIMIT).unwrap();
    assert_eq!(history.len(), 3);

    // Newest first.
    assert_eq!(history[0].operator, "Anonymous");
    assert_eq!(history[0].action, ActionKind::AdjustChairCount);
    assert_eq!(history[1].operator, "Luis");
    assert_eq!(history[1].action, ActionKind::UpdateChair);
    assert_eq!(history[2].operator, "Ana");
    assert_eq!(history[2].action, ActionKind::MoveTable);
}

#[test]
fn full_editing_round_trip() {
    let deployment = Deployment::new();
    let mut ana = deployment.session("Ana");

    ana.update_seat(1, 100, SeatField::Name("Alice".into()))
        .unwrap();
    ana.update_seat(1, 100, SeatField::Group(Some(Group::Family)))
        .unwrap();
    ana.adjust_seat_count(1, -5).unwrap();
    ana.move_table(1, 30.0, 0.0).unwrap();
    ana.save().unwrap();

    // A fresh session observes everything.
    let late = deployment.session("Late");
    let table = late.draft().unwrap().table(1).unwrap();
    assert_eq!(table.seat_count(), 5);
    assert_eq!(table.seats[0].name, "Alice");
    assert_eq!(table.seats[0].group, Some(Group::Family));

    let history = deployment.audit.recent(DEFAULT_RECENT_LIMIT).unwrap();
    let kinds: Vec<ActionKind> = history.iter().map(|r| r.action).collect();
    assert_eq!(
        kinds,
        vec![
            ActionKind::SaveTables,
            ActionKind::MoveTable,
            ActionKind::AdjustChairCount,
            ActionKind::UpdateChair,
            ActionKind::UpdateChair,
        ]
    );
}
