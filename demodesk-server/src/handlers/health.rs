//! Liveness report

use crate::models::{DatabaseAvailability, HealthStatus, API_VERSION};
use crate::store::StoreHandle;

/// Report liveness. Never touches the store; `database` only reflects
/// whether a handle was constructed at startup.
pub fn health(store: &StoreHandle) -> HealthStatus {
    let database = if store.is_connected() {
        DatabaseAvailability::Available
    } else {
        DatabaseAvailability::Unavailable
    };

    HealthStatus {
        status: "ok",
        database,
        version: API_VERSION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn unavailable_without_handle() {
        let status = health(&StoreHandle::disconnected("no url"));
        assert_eq!(status.status, "ok");
        assert_eq!(status.database, DatabaseAvailability::Unavailable);
        assert_eq!(status.version, "1.0.0");
    }

    #[test]
    fn available_even_when_store_is_failing() {
        let handle = StoreHandle::connected(MemoryStore::new("test").fail_with("down"));
        assert_eq!(health(&handle).database, DatabaseAvailability::Available);
    }
}
