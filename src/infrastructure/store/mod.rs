mod memory_store;
mod redis_store;

pub use memory_store::InMemoryStore;
pub use redis_store::RedisStore;
