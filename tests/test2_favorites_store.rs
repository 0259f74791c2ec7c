mod common;

use mmarec::favorites::{FavoritesState, ToggleOutcome, toggle_favorite};
use mmarec::storage::{
    FavoritesStore, JsonFileFavoritesStore, MemoryFavoritesStore, SqliteFavoritesStore,
};

async fn exercise_store(store: &dyn FavoritesStore) -> Result<(), Box<dyn std::error::Error>> {
    assert!(store.favorites("user123").await?.is_empty());

    store.add_favorite("user123", "42").await?;
    assert_eq!(store.favorites("user123").await?, vec!["42"]);

    // union: adding again changes nothing
    store.add_favorite("user123", "42").await?;
    assert_eq!(store.favorites("user123").await?, vec!["42"]);

    store.add_favorite("user123", "7").await?;
    store.add_favorite("someone-else", "42").await?;
    assert_eq!(store.favorites("user123").await?, vec!["42", "7"]);

    // difference: removing an absent id is a no-op
    store.remove_favorite("user123", "999").await?;
    store.remove_favorite("nobody", "42").await?;
    assert_eq!(store.favorites("user123").await?, vec!["42", "7"]);
    assert!(store.favorites("nobody").await?.is_empty());

    store.remove_favorite("user123", "42").await?;
    assert_eq!(store.favorites("user123").await?, vec!["7"]);
    assert_eq!(store.favorites("someone-else").await?, vec!["42"]);
    Ok(())
}

#[tokio::test]
async fn test2_memory_store() -> Result<(), Box<dyn std::error::Error>> {
    exercise_store(&MemoryFavoritesStore::new()).await
}

#[tokio::test]
async fn test2_sqlite_store_persists() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("favorites.db");
    let path = path.to_str().ok_or("temp path is not utf-8")?;

    exercise_store(&SqliteFavoritesStore::open(path)?).await?;

    let reopened = SqliteFavoritesStore::open(path)?;
    assert_eq!(reopened.favorites("user123").await?, vec!["7"]);
    Ok(())
}

#[tokio::test]
async fn test2_json_file_store_persists() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("favorites.json");

    exercise_store(&JsonFileFavoritesStore::new(&path)).await?;

    let on_disk: serde_json::Value = serde_json::from_slice(&std::fs::read(&path)?)?;
    let user = on_disk
        .as_array()
        .and_then(|docs| docs.iter().find(|d| d["userId"] == "user123"))
        .ok_or("user123 document missing")?;
    assert_eq!(user["fighterIds"], serde_json::json!(["7"]));

    let reopened = JsonFileFavoritesStore::new(&path);
    assert_eq!(reopened.favorites("someone-else").await?, vec!["42"]);
    Ok(())
}

#[tokio::test]
async fn test2_json_file_store_rejects_garbage() -> Result<(), Box<dyn std::error::Error>> {
    let file = tempfile::NamedTempFile::new()?;
    std::fs::write(file.path(), "{not json")?;
    let store = JsonFileFavoritesStore::new(file.path());
    assert!(store.favorites("user123").await.is_err());
    assert!(store.add_favorite("user123", "1").await.is_err());
    Ok(())
}

#[tokio::test]
async fn test2_toggle_is_its_own_inverse() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("toggle.db");
    let store = SqliteFavoritesStore::open(path.to_str().ok_or("temp path is not utf-8")?)?;
    store.add_favorite("u", "1").await?;
    store.add_favorite("u", "2").await?;
    let before = store.favorites("u").await?;

    for id in ["2", "3"] {
        let (first, _) = toggle_favorite(&store, "u", id).await?;
        let (second, state) = toggle_favorite(&store, "u", id).await?;
        assert_ne!(first, second);
        let mut restored = state.ids().to_vec();
        restored.sort();
        assert_eq!(restored, before);
    }

    let mut state = FavoritesState::load(&store, "u").await?;
    assert_eq!(state.toggle(&store, "1").await?, ToggleOutcome::Removed);
    assert_eq!(store.favorites("u").await?, vec!["2"]);
    assert_eq!(state.ids(), ["2".to_string()]);
    Ok(())
}
