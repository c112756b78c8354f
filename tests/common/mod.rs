#![allow(dead_code)]

pub mod temp_files {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

    /// Creates a temporary config file with a unique name
    pub fn create_temp_config(content: &str, ext: &str) -> PathBuf {
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::SeqCst);
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();

        let path = std::env::temp_dir().join(format!(
            "restdoc_test_{}_{}_{}.{}",
            std::process::id(),
            counter,
            nanos,
            ext
        ));

        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn create_temp_yaml(content: &str) -> PathBuf {
        create_temp_config(content, "yaml")
    }

    /// Cleanup temporary files (best effort)
    pub fn cleanup_temp_files(paths: &[PathBuf]) {
        for path in paths {
            let _ = std::fs::remove_file(path);
        }
    }
}

pub mod models {
    use restdoc::Describe;

    #[derive(Debug, Describe)]
    pub struct Book {
        /// Book id
        pub id: i64,
        pub title: String,
        pub images: Option<BookImageUrls>,
    }

    #[derive(Debug, Describe)]
    pub struct BookImageUrls {
        pub small: String,
        pub large: String,
    }

    #[derive(Debug, Describe)]
    pub struct ErrorMessage {
        #[api(values = "400 404")]
        pub code: i32,
        pub message: String,
    }
}

pub mod docs {
    use super::models::{Book, ErrorMessage};
    use restdoc::value_info::{ValueInfo, ValueKind};
    use restdoc::{ApiDocCommon, Model, Parameter, Response};

    /// Fetch-a-book doc with a bounded int32 id
    pub fn get_book() -> ApiDocCommon {
        ApiDocCommon::new()
            .summary("Fetch a book")
            .parameter(
                "id",
                Parameter::in_path(ValueInfo::new(ValueKind::Int32).with_min("0").with_max("1000")),
            )
            .response(200, Response::new("the book").with_model(Model::of::<Book>()))
            .response(
                404,
                Response::new("not found").with_model(Model::of::<ErrorMessage>()),
            )
    }
}
