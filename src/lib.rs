pub mod cli;
pub mod metadata;
pub mod query;
pub mod storage;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn run(storage: &mut storage::FileStorage, line: &str) -> query::CommandOutput {
        query::CommandEngine::new(storage).execute(line).unwrap()
    }

    #[test]
    fn test_store_survives_restart() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("file.json");

        // First session: create and mutate a few records
        let (user_id, place_id) = {
            let mut storage = storage::FileStorage::new(&path);
            storage.reload().unwrap();

            let user_id = match run(&mut storage, "create User") {
                query::CommandOutput::Created(id) => id,
                other => panic!("Expected created id, got {:?}", other),
            };
            let place_id = match run(&mut storage, "Place.count()") {
                query::CommandOutput::Count(0) => match run(&mut storage, "create Place") {
                    query::CommandOutput::Created(id) => id,
                    other => panic!("Expected created id, got {:?}", other),
                },
                other => panic!("Expected empty count, got {:?}", other),
            };
            let doomed = match run(&mut storage, "create City") {
                query::CommandOutput::Created(id) => id,
                other => panic!("Expected created id, got {:?}", other),
            };

            run(&mut storage, &format!("update User {} email \"betty@hbnb.io\"", user_id));
            run(&mut storage, &format!("Place.update({}, {{\"max_guest\": \"6\", 'name': 'Loft'}})", place_id));
            run(&mut storage, &format!("City.destroy(\"{}\")", doomed));
            (user_id, place_id)
        };

        // Second session: everything comes back from the file
        let mut storage = storage::FileStorage::new(&path);
        storage.reload().unwrap();
        assert_eq!(storage.all().len(), 2);

        let user = storage.get(&format!("User.{}", user_id)).unwrap();
        assert_eq!(user.get("email"), Some(json!("betty@hbnb.io")));
        assert!(user.updated_at >= user.created_at);

        let place = storage.get(&format!("Place.{}", place_id)).unwrap();
        assert_eq!(place.get("max_guest"), Some(json!(6)));
        assert_eq!(place.get("name"), Some(json!("Loft")));

        assert_eq!(run(&mut storage, "count City"), query::CommandOutput::Count(0));
        match run(&mut storage, "all") {
            query::CommandOutput::Instances(list) => assert_eq!(list.len(), 2),
            other => panic!("Expected instances, got {:?}", other),
        }
    }
}

pub use metadata::ClassKind;
pub use storage::{FileStorage, Record, StorageError};
pub use query::{Command, CommandEngine, CommandError, CommandOutput};
pub use cli::CLI;
