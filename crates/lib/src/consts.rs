/// Optional site configuration file at the docs root.
pub const CONFIG_FILENAME: &str = "apiref.json";

/// Default cache file name, relative to the docs root.
pub const CACHE_FILENAME: &str = ".openapi-cache.json";

/// Target name selecting every configured spec.
pub const ALL_TARGET: &str = "all";

/// Skips API doc generation during `build` when set to `1`.
pub const SKIP_GENERATION_ENV: &str = "SKIP_API_GEN";

/// Forces API doc regeneration when set to `1`.
pub const FORCE_GENERATION_ENV: &str = "FORCE_API_GEN";

/// Overrides the docs root directory.
pub const DOCS_DIR_ENV: &str = "APIREF_DOCS_DIR";

/// Length of the hash prefix shown in status lines.
pub const HASH_DISPLAY_LEN: usize = 12;
