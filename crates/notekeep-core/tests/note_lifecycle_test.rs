//! Note lifecycle properties, checked against the in-memory store.

use std::collections::HashSet;

use notekeep_core::{Error, MemoryNoteStore, NoteId, NoteStore};

async fn store_for(user: &str) -> MemoryNoteStore {
    let store = MemoryNoteStore::new();
    store.register(user, "pw").await.unwrap();
    store.login(user, "pw").await.unwrap();
    store
}

#[tokio::test]
async fn test_create_then_list_contains_exactly_one_new_note() {
    let store = store_for("alice").await;
    store.create_note("Existing", "old").await.unwrap();

    let cases = [
        ("Groceries", "Milk, eggs"),
        ("Multi-line", "first\n  second\n\tthird"),
        ("  padded title ", "unicode: café ✓"),
    ];

    for (title, content) in cases {
        let before = store.list_notes().await.unwrap();
        let created = store.create_note(title, content).await.unwrap();
        let after = store.list_notes().await.unwrap();

        assert_eq!(after.len(), before.len() + 1, "case {:?}", title);
        assert!(before.iter().all(|n| n.id != created.id), "id must be fresh");

        let matching: Vec<_> = after
            .iter()
            .filter(|n| n.title == title && n.content == content)
            .collect();
        assert_eq!(matching.len(), 1, "case {:?}", title);
        assert_eq!(matching[0].id, created.id);
    }
}

#[tokio::test]
async fn test_list_preserves_insertion_order() {
    let store = store_for("alice").await;
    for i in 0..5 {
        store
            .create_note(&format!("note {}", i), "body")
            .await
            .unwrap();
    }

    let titles: Vec<String> = store
        .list_notes()
        .await
        .unwrap()
        .into_iter()
        .map(|n| n.title)
        .collect();
    assert_eq!(titles, ["note 0", "note 1", "note 2", "note 3", "note 4"]);
}

#[tokio::test]
async fn test_delete_removes_and_second_delete_is_not_found() {
    let store = store_for("alice").await;
    let keep = store.create_note("Keep", "me").await.unwrap();
    let gone = store.create_note("Drop", "me").await.unwrap();

    store.delete_note(&gone.id).await.unwrap();

    let notes = store.list_notes().await.unwrap();
    assert!(notes.iter().all(|n| n.id != gone.id));
    assert!(notes.iter().any(|n| n.id == keep.id));

    let err = store.delete_note(&gone.id).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_update_replaces_without_duplicating() {
    let store = store_for("alice").await;
    let note = store.create_note("Draft", "v1").await.unwrap();
    store.create_note("Other", "x").await.unwrap();

    let updated = store.update_note(&note.id, "Final", "v2").await.unwrap();
    assert_eq!(updated.id, note.id);

    let notes = store.list_notes().await.unwrap();
    assert_eq!(notes.len(), 2);
    let at_id: Vec<_> = notes.iter().filter(|n| n.id == note.id).collect();
    assert_eq!(at_id.len(), 1);
    assert_eq!(at_id[0].title, "Final");
    assert_eq!(at_id[0].content, "v2");
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let store = store_for("alice").await;
    let err = store
        .update_note(&NoteId::new("does-not-exist"), "t", "c")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn test_update_rejects_blank_fields() {
    let store = store_for("alice").await;
    let note = store.create_note("Title", "Body").await.unwrap();

    let err = store.update_note(&note.id, "Title", "   ").await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(store.get_note(&note.id).await.unwrap().content, "Body");
}

#[tokio::test]
async fn test_blank_search_matches_list() {
    let store = store_for("alice").await;
    store.create_note("One", "a").await.unwrap();
    store.create_note("Two", "b").await.unwrap();

    let listed: HashSet<NoteId> = store
        .list_notes()
        .await
        .unwrap()
        .into_iter()
        .map(|n| n.id)
        .collect();

    for query in ["", "   ", "\n\t"] {
        let searched: HashSet<NoteId> = store
            .search_notes(query)
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(searched, listed, "query {:?}", query);
    }
}

#[tokio::test]
async fn test_search_returns_subset() {
    let store = store_for("alice").await;
    store.create_note("Groceries", "Milk, eggs").await.unwrap();
    store.create_note("Gym", "Leg day").await.unwrap();

    let all: HashSet<NoteId> = store
        .list_notes()
        .await
        .unwrap()
        .into_iter()
        .map(|n| n.id)
        .collect();
    let hits = store.search_notes("eggs").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert!(hits.iter().all(|n| all.contains(&n.id)));

    assert!(store.search_notes("zebra").await.unwrap().is_empty());
}
