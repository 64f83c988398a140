mod redis_project_cache;

pub use redis_project_cache::RedisProjectCache;
