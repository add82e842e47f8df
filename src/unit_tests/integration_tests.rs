#[cfg(test)]
mod tests {
    use std::time::Duration;
    use bytes::Bytes;
    use tokio::sync::mpsc;
    use crate::{UserDirectory, load_directory, search};
    use crate::error::LoadError;
    use crate::searching::debounce::DEFAULT_SETTLE_PERIOD;
    use crate::searching::query_pipeline::{SearchState, search_input};
    use crate::searching::search_results::{LatestResults, SearchOutcome, LOAD_ERROR_MESSAGE};
    use crate::utils::directory_source::register_memory_file;

    /// The ten-user directory served by the public placeholder endpoint, trimmed to the
    /// fields that matter plus enough display data to check it survives loading.
    const DIRECTORY_JSON: &str = r#"[
        {"id": 1, "name": "Leanne Graham", "username": "Bret", "email": "Sincere@april.biz",
         "phone": "1-770-736-8031 x56442", "website": "hildegard.org",
         "company": {"name": "Romaguera-Crona", "catchPhrase": "Multi-layered client-server neural-net", "bs": "harness real-time e-markets"}},
        {"id": 2, "name": "Ervin Howell", "username": "Antonette", "email": "Shanna@melissa.tv"},
        {"id": 3, "name": "Clementine Bauch", "username": "Samantha", "email": "Nathan@yesenia.net"},
        {"id": 4, "name": "Patricia Lebsack", "username": "Karianne", "email": "Julianne.OConner@kory.org"},
        {"id": 5, "name": "Chelsey Dietrich", "username": "Kamren", "email": "Lucio_Hettinger@annie.ca"},
        {"id": 6, "name": "Mrs. Dennis Schulist", "username": "Leopoldo_Corkery", "email": "Karley_Dach@jasper.info"},
        {"id": 7, "name": "Kurtis Weissnat", "username": "Elwyn.Skiles", "email": "Telly.Hoeger@billy.biz"},
        {"id": 8, "name": "Nicholas Runolfsdottir V", "username": "Maxime_Nienow", "email": "Sherwood@rosamond.me"},
        {"id": 9, "name": "Glenna Reichert", "username": "Delphine", "email": "Chaim_McDermott@dana.io"},
        {"id": 10, "name": "Clementina DuBuque", "username": "Moriah.Stanton", "email": "Rey.Padberg@karina.biz"}
    ]"#;

    async fn register_directory(location: &str) {
        register_memory_file(location, Bytes::from_static(DIRECTORY_JSON.as_bytes()))
            .await
            .unwrap();
    }

    fn ids(directory: &UserDirectory, term: &str) -> Vec<u32> {
        directory.filter(term).iter().map(|u| u.id).collect()
    }

    #[tokio::test]
    async fn test_load_and_search_directory() {
        let location = "memory://integration-directory.json";
        register_directory(location).await;

        let directory = load_directory(location).await.unwrap();
        assert_eq!(directory.len(), 10);
        assert_eq!(directory.users()[0].company.catch_phrase, "Multi-layered client-server neural-net");

        assert_eq!(ids(&directory, "cle"), vec![3, 10]);
        assert_eq!(ids(&directory, "k"), vec![4, 5, 6, 7]);
        assert_eq!(ids(&directory, "l"), vec![1, 4, 5, 6]);
        assert_eq!(ids(&directory, "s"), vec![1, 2, 3, 6, 8]);
        assert_eq!(ids(&directory, "mrs."), vec![6]);
        assert_eq!(ids(&directory, "MORIAH.ST"), vec![10]);
        assert_eq!(ids(&directory, "julianne.oconner"), vec![4]);
        assert!(ids(&directory, "kory").is_empty());
        assert_eq!(ids(&directory, "").len(), 10);
    }

    #[tokio::test]
    async fn test_search_convenience() {
        let location = "memory://integration-search.json";
        register_directory(location).await;

        let users = search(location, "  Kam ").await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, "Kamren");
    }

    #[tokio::test]
    async fn test_failed_load_leaves_search_inert() {
        let mut state = SearchState::load("memory://integration-missing.json").await;
        assert!(matches!(state, SearchState::Failed(LoadError::Fetch { .. })));
        assert_eq!(state.message(), Some(LOAD_ERROR_MESSAGE));
        assert_eq!(state.handle_search("bret"), SearchOutcome::LoadFailed);
        assert_eq!(state.handle_search(""), SearchOutcome::LoadFailed);
    }

    #[tokio::test]
    async fn test_unparsable_collection_is_load_failure() {
        let location = "memory://integration-garbage.json";
        register_memory_file(location, Bytes::from_static(br#"{"users": []}"#)).await.unwrap();

        let state = SearchState::load(location).await;
        assert!(matches!(state, SearchState::Failed(LoadError::Parse(_))));
    }

    #[tokio::test]
    async fn test_empty_collection_loads() {
        let location = "memory://integration-empty.json";
        register_memory_file(location, Bytes::from_static(b"[]")).await.unwrap();

        let mut state = SearchState::load(location).await;
        assert!(state.is_ready());
        let outcome = state.handle_search("x");
        assert!(outcome.results().unwrap().is_empty());
        assert!(outcome.message().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounced_session_against_loaded_directory() {
        let location = "memory://integration-session.json";
        register_directory(location).await;

        let mut state = SearchState::load(location).await;
        let pipeline = state.pipeline_mut().unwrap();
        let (input, mut debouncer) = search_input(DEFAULT_SETTLE_PERIOD);
        let (results_tx, mut results_rx) = mpsc::channel(16);

        tokio::spawn(async move {
            // fast typing, then a pause
            for text in ["c", "cl", "cle", "clem"] {
                input.change(text).await.unwrap();
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
            tokio::time::sleep(Duration::from_millis(500)).await;
            // narrow further, then clear before it settles
            input.change("clementina").await.unwrap();
            tokio::time::sleep(Duration::from_millis(100)).await;
            input.clear().await.unwrap();
        });

        let searches = pipeline.run(&mut debouncer, results_tx).await;
        assert_eq!(searches, 2);

        let mut latest = LatestResults::default();
        let first = results_rx.recv().await.unwrap();
        assert_eq!(first.term, "clem");
        assert_eq!(first.users.iter().map(|u| u.id).collect::<Vec<_>>(), vec![3, 10]);
        assert!(latest.offer(first));

        let second = results_rx.recv().await.unwrap();
        assert_eq!(second.term, "");
        assert_eq!(second.len(), 10);
        assert!(latest.offer(second));
        assert!(results_rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_reload_builds_fresh_directory() {
        let location = "memory://integration-reload.json";
        register_directory(location).await;
        let before = load_directory(location).await.unwrap();
        assert_eq!(ids(&before, "zed"), Vec::<u32>::new());

        register_memory_file(location, Bytes::from_static(br#"[{"id": 42, "name": "Zed Shaw"}]"#))
            .await
            .unwrap();
        let after = load_directory(location).await.unwrap();
        assert_eq!(ids(&after, "zed"), vec![42]);
        // the earlier directory is untouched
        assert_eq!(before.len(), 10);
    }
}
