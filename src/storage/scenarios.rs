//! Behaviour every backend must share, run by each backend's tests.
//!
//! Each scenario expects an empty `todos` table with the schema in place.

use chrono::NaiveDate;

use super::TodoRepository;
use crate::model::TodoItem;

pub(crate) fn due() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
}

/// Insert "Todo 1" and "Todo 2" in one transaction.
pub(crate) async fn seed(repository: &dyn TodoRepository) {
    let mut writer = repository.begin().await.unwrap();
    for n in 1..=2 {
        let item = TodoItem::new(format!("Todo {n}"))
            .with_description(format!("Todo {n} desc"))
            .with_done(false)
            .with_due_date(due());
        writer.insert(&item).await.unwrap();
    }
    writer.commit().await.unwrap();
}

pub(crate) async fn list_all_returns_rows_in_insertion_order(repository: &dyn TodoRepository) {
    seed(repository).await;
    let todos = repository.list_all().await.unwrap();

    assert_eq!(todos.len(), 2);
    assert_eq!(todos[0].title.as_deref(), Some("Todo 1"));
    assert_eq!(todos[0].description.as_deref(), Some("Todo 1 desc"));
    assert_eq!(todos[0].done, Some(false));
    assert_eq!(todos[0].due_date, Some(due()));
    assert_eq!(todos[1].title.as_deref(), Some("Todo 2"));
    assert!(todos[0].id < todos[1].id);
}

pub(crate) async fn find_by_id_is_none_for_unknown_id(repository: &dyn TodoRepository) {
    seed(repository).await;
    assert_eq!(repository.find_by_id(666).await.unwrap(), None);

    let first = &repository.list_all().await.unwrap()[0];
    let found = repository.find_by_id(first.id.unwrap()).await.unwrap();
    assert_eq!(found.as_ref(), Some(first));
}

pub(crate) async fn insert_ignores_client_id(repository: &dyn TodoRepository) {
    seed(repository).await;
    let mut writer = repository.begin().await.unwrap();
    writer
        .insert(&TodoItem::new("Saved todo").with_id(1))
        .await
        .unwrap();
    writer.commit().await.unwrap();

    let todos = repository.list_all().await.unwrap();
    assert_eq!(todos.len(), 3);
    assert_eq!(todos[0].title.as_deref(), Some("Todo 1"));
    assert_eq!(todos[2].title.as_deref(), Some("Saved todo"));
    assert_ne!(todos[2].id, Some(1));
}

pub(crate) async fn insert_keeps_missing_fields_null(repository: &dyn TodoRepository) {
    let mut writer = repository.begin().await.unwrap();
    writer.insert(&TodoItem::new("bare")).await.unwrap();
    writer.commit().await.unwrap();

    let todo = &repository.list_all().await.unwrap()[0];
    assert_eq!(todo.description, None);
    assert_eq!(todo.due_date, None);
    assert_eq!(todo.done, Some(false));
}

pub(crate) async fn replace_overwrites_every_field(repository: &dyn TodoRepository) {
    seed(repository).await;
    let todos = repository.list_all().await.unwrap();
    let (id, other) = (todos[0].id.unwrap(), todos[1].clone());

    let mut writer = repository.begin().await.unwrap();
    writer
        .replace(&TodoItem::new("Updated Todo 1").with_id(id).with_done(true))
        .await
        .unwrap();
    writer.commit().await.unwrap();

    let todo = repository.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(todo.title.as_deref(), Some("Updated Todo 1"));
    assert_eq!(todo.description, None);
    assert_eq!(todo.done, Some(true));
    assert_eq!(todo.due_date, None);

    // only the targeted row changes
    let untouched = repository.find_by_id(other.id.unwrap()).await.unwrap();
    assert_eq!(untouched, Some(other));
}

pub(crate) async fn replace_of_missing_row_is_a_no_op(repository: &dyn TodoRepository) {
    seed(repository).await;
    let before = repository.list_all().await.unwrap();

    let mut writer = repository.begin().await.unwrap();
    writer
        .replace(&TodoItem::new("ghost").with_id(666))
        .await
        .unwrap();
    writer.commit().await.unwrap();

    assert_eq!(repository.list_all().await.unwrap(), before);
    assert_eq!(repository.find_by_id(666).await.unwrap(), None);
}

pub(crate) async fn remove_deletes_row(repository: &dyn TodoRepository) {
    seed(repository).await;
    let id = repository.list_all().await.unwrap()[0].id.unwrap();

    let mut writer = repository.begin().await.unwrap();
    writer.remove(id).await.unwrap();
    writer.remove(666).await.unwrap();
    writer.commit().await.unwrap();

    assert_eq!(repository.find_by_id(id).await.unwrap(), None);
    assert_eq!(repository.list_all().await.unwrap().len(), 1);
}

pub(crate) async fn dropped_writer_rolls_back(repository: &dyn TodoRepository) {
    seed(repository).await;
    {
        let mut writer = repository.begin().await.unwrap();
        writer
            .insert(&TodoItem::new("never committed"))
            .await
            .unwrap();
    }
    assert_eq!(repository.list_all().await.unwrap().len(), 2);
}
