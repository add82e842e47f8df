//! Fetching the raw user collection from local files, HTTP endpoints, S3 or memory.
//!
//! Every source string resolves to an `ObjectStore` plus a path inside it, so the
//! loader itself never cares where the bytes come from.
//!
//! # Supported Source Formats
//!
//! * **HTTP(S)**: `"https://jsonplaceholder.typicode.com/users"` → object_store HTTP
//!   store rooted at the origin (cached by origin)
//! * **S3**: `"s3://bucket/key"` or `"s3://bucket/key?anon=true"` → AWS S3 (cached by
//!   bucket and anonymous flag)
//! * **Memory**: `"memory://name"` → process-wide in-memory store, filled with
//!   [`register_memory_file`]
//! * **Local**: absolute or relative paths → local filesystem
use std::sync::Arc;
use bytes::Bytes;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use object_store::{
    ObjectStore, PutPayload,
    aws::AmazonS3Builder,
    http::HttpBuilder,
    local::LocalFileSystem,
    memory::InMemory,
    path::Path as ObjectPath,
};
use tracing::{debug, info, warn};
use url::Url;
use crate::error::LoadError;
use crate::user::{User, parse_users};

pub const MEMORY_SCHEME: &str = "memory://";

/// Cache key for S3 stores that distinguishes between authenticated and anonymous access
#[derive(Hash, Eq, PartialEq, Clone, Debug)]
struct S3CacheKey {
    bucket: String,
    anonymous: bool,
}

/// S3 stores keyed by (bucket, anonymous). Building one may query credentials, so each
/// is created once per process.
static S3_STORE_CACHE: Lazy<DashMap<S3CacheKey, Arc<dyn ObjectStore>>> =
    Lazy::new(DashMap::new);

/// HTTP stores keyed by origin (`scheme://host[:port]`), reusing the underlying client
/// and its connection pool across loads.
static HTTP_STORE_CACHE: Lazy<DashMap<String, Arc<dyn ObjectStore>>> =
    Lazy::new(DashMap::new);

/// Backing store for `memory://` sources.
static MEMORY_STORE: Lazy<Arc<InMemory>> = Lazy::new(|| Arc::new(InMemory::new()));

/// Kind of backend a source string points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Http,
    S3,
    Memory,
    Local,
}

impl SourceKind {
    /// Classifies a source string by its scheme; anything without a known scheme is a
    /// local path.
    ///
    /// # Examples
    ///
    /// ```
    /// # use usersearch::utils::directory_source::SourceKind;
    /// assert_eq!(SourceKind::of("https://example.com/users"), SourceKind::Http);
    /// assert_eq!(SourceKind::of("s3://bucket/users.json"), SourceKind::S3);
    /// assert_eq!(SourceKind::of("memory://users.json"), SourceKind::Memory);
    /// assert_eq!(SourceKind::of("./users.json"), SourceKind::Local);
    /// ```
    pub fn of(location: &str) -> SourceKind {
        if location.starts_with("http://") || location.starts_with("https://") {
            SourceKind::Http
        } else if location.starts_with("s3://") {
            SourceKind::S3
        } else if location.starts_with(MEMORY_SCHEME) {
            SourceKind::Memory
        } else {
            SourceKind::Local
        }
    }
}

/// Gets or creates a cached S3 store for the given bucket.
///
/// # Arguments
///
/// * `bucket` - S3 bucket name (without "s3://" prefix)
/// * `anonymous` - If true, uses unsigned requests (for public buckets)
///
/// # Errors
///
/// Returns an error if the store cannot be built, for example when the bucket name is
/// invalid or no region can be determined.
pub fn get_cached_s3_store(
    bucket: &str,
    anonymous: bool
) -> Result<Arc<dyn ObjectStore>, object_store::Error> {
    let cache_key = S3CacheKey {
        bucket: bucket.to_string(),
        anonymous,
    };
    let entry = S3_STORE_CACHE.entry(cache_key);
    let store = entry.or_try_insert_with(|| {
        create_s3_store(bucket, anonymous)
    })?;
    Ok(Arc::clone(store.value()))
}

/// Gets or creates a cached HTTP store rooted at `origin`.
pub fn get_cached_http_store(origin: &str) -> Result<Arc<dyn ObjectStore>, object_store::Error> {
    let entry = HTTP_STORE_CACHE.entry(origin.to_string());
    let store = entry.or_try_insert_with(|| {
        let http_store = HttpBuilder::new().with_url(origin).build()?;
        Ok::<Arc<dyn ObjectStore>, object_store::Error>(Arc::new(http_store))
    })?;
    Ok(Arc::clone(store.value()))
}

/// Creates a reusable S3 `ObjectStore` for a specific bucket.
///
/// Credentials are resolved with `AmazonS3Builder::from_env()`; with `anonymous` set,
/// request signing is skipped entirely.
pub fn create_s3_store(
    bucket: &str,
    anonymous: bool
) -> Result<Arc<dyn ObjectStore>, object_store::Error> {
    let mut builder = AmazonS3Builder::from_env()
        .with_bucket_name(bucket);

    if anonymous {
        // Skip credential loading and request signing for public buckets
        builder = builder.with_skip_signature(true);
    }

    let s3_store = builder.build()?;
    Ok(Arc::new(s3_store))
}

/// Resolves a source string to a store and the path of the collection inside it.
///
/// # Arguments
///
/// * `location` - HTTP(S) URL, `s3://` URI, `memory://` name or local path
///
/// # Returns
///
/// Returns `Ok((store, path))` where:
/// * `store` - An `Arc<dyn ObjectStore>` for accessing the storage backend
/// * `path` - An `ObjectPath` representing the collection within the store
///
/// # Errors
///
/// Returns an error if:
/// * A URL is malformed, or an S3 URL has no bucket
/// * A URL or memory source names no object
/// * The store cannot be built (e.g. S3 configuration problems)
/// * The current directory cannot be determined (for relative paths)
pub fn get_object_store(
    location: &str,
) -> Result<(Arc<dyn ObjectStore>, ObjectPath), LoadError> {
    match SourceKind::of(location) {
        SourceKind::Http => {
            let url = Url::parse(location)?;
            let host = url.host_str()
                .ok_or_else(|| LoadError::invalid_source(location, "no host specified"))?;
            let origin = match url.port() {
                Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
                None => format!("{}://{}", url.scheme(), host),
            };
            if url.query().is_some() {
                warn!(location, "query string ignored for HTTP user sources");
            }

            let key = url.path().trim_matches('/');
            if key.is_empty() {
                return Err(LoadError::invalid_source(location, "no path specified"));
            }

            let store = get_cached_http_store(&origin)
                .map_err(|e| LoadError::fetch(location, e))?;
            Ok((store, ObjectPath::from(key)))
        }
        SourceKind::S3 => {
            let url = Url::parse(location)?;
            let bucket = url.host_str()
                .ok_or_else(|| LoadError::invalid_source(location, "no bucket specified"))?;
            let key = url.path().trim_start_matches('/');

            // Check for anonymous access flag in query parameters
            let anonymous = url.query_pairs()
                .any(|(k, v)| k == "anon" && (v == "true" || v == "1"));

            let store = get_cached_s3_store(bucket, anonymous)
                .map_err(|e| LoadError::fetch(location, e))?;
            Ok((store, ObjectPath::from(key)))
        }
        SourceKind::Memory => {
            let name = memory_name(location)?;
            let store: Arc<dyn ObjectStore> = MEMORY_STORE.clone();
            Ok((store, ObjectPath::from(name)))
        }
        SourceKind::Local => {
            use std::path::Path as StdPath;

            let std_path = StdPath::new(location);
            let absolute_path = if std_path.is_absolute() {
                std_path.to_path_buf()
            } else {
                std::env::current_dir()?.join(std_path)
            };

            #[cfg(windows)]
            let (root, relative) = {
                let path_str = absolute_path.to_string_lossy();
                if let Some(pos) = path_str.find(":\\") {
                    let root = format!("{}:\\", &path_str[..pos]);
                    let relative = path_str[pos+2..].trim_start_matches('\\').replace('\\', "/");
                    (root, relative)
                } else {
                    return Err(LoadError::invalid_source(location, "missing drive letter"));
                }
            };

            #[cfg(not(windows))]
            let (root, relative) = {
                let path_str = absolute_path.to_string_lossy();
                let relative = path_str.trim_start_matches('/');
                ("/".to_string(), relative.to_string())
            };

            let local_store = LocalFileSystem::new_with_prefix(root)
                .map_err(|e| LoadError::fetch(location, e))?;
            let store: Arc<dyn ObjectStore> = Arc::new(local_store);
            Ok((store, ObjectPath::from(relative)))
        }
    }
}

fn memory_name(location: &str) -> Result<&str, LoadError> {
    let name = location.trim_start_matches(MEMORY_SCHEME);
    if name.is_empty() {
        Err(LoadError::invalid_source(location, "no memory file name specified"))
    } else {
        Ok(name)
    }
}

/// Makes `bytes` available under a `memory://` source.
///
/// Used by tests and demos to load a collection without touching the network or disk.
/// Registering the same name again replaces the previous contents.
///
/// # Examples
///
/// ```
/// # use usersearch::utils::directory_source::{register_memory_file, fetch_users};
/// # tokio_test::block_on(async {
/// register_memory_file("memory://doc-users.json", br#"[{"id": 1, "name": "Leanne Graham"}]"#.to_vec().into())
///     .await
///     .unwrap();
/// let users = fetch_users("memory://doc-users.json").await.unwrap();
/// assert_eq!(users[0].name, "Leanne Graham");
/// # });
/// ```
pub async fn register_memory_file(location: &str, bytes: Bytes) -> Result<(), LoadError> {
    let name = memory_name(location)?;
    MEMORY_STORE
        .put(&ObjectPath::from(name), PutPayload::from(bytes))
        .await
        .map_err(|e| LoadError::fetch(location, e))?;
    Ok(())
}

/// Fetches the raw bytes of a source in a single request.
///
/// A non-success HTTP status, a missing object or a transport failure all surface as
/// [`LoadError::Fetch`].
pub async fn fetch_bytes(location: &str) -> Result<Bytes, LoadError> {
    let (store, path) = get_object_store(location)?;
    debug!(location, %path, "fetching user collection");

    let payload = store
        .get(&path)
        .await
        .map_err(|e| LoadError::fetch(location, e))?
        .bytes()
        .await
        .map_err(|e| LoadError::fetch(location, e))?;
    Ok(payload)
}

/// Fetches and parses the full user collection from `location`.
///
/// # Errors
///
/// Returns [`LoadError`] if the source cannot be resolved or fetched, or if the payload
/// is not a JSON array of users.
pub async fn fetch_users(location: &str) -> Result<Vec<User>, LoadError> {
    let payload = fetch_bytes(location).await?;
    let users = parse_users(&payload)?;
    info!(location, bytes = payload.len(), users = users.len(), "fetched user collection");
    Ok(users)
}
