//! Shared test utilities for civic-db tests.

#[cfg(test)]
pub(crate) mod helpers {
    use chrono::NaiveDate;
    use civic_core::entities::Technician;
    use civic_core::enums::Department;
    use tempfile::TempDir;

    use crate::CivicDb;
    use crate::service::{CivicService, ServiceOptions};

    /// Create an in-memory CivicService with default options.
    pub async fn test_service() -> CivicService {
        test_service_with(ServiceOptions::default()).await
    }

    pub async fn test_service_with(options: ServiceOptions) -> CivicService {
        let db = CivicDb::open_local(":memory:").await.unwrap();
        CivicService::from_db(db, options)
    }

    /// File-backed service for tests that need independent connections.
    ///
    /// Keep the `TempDir` alive for the duration of the test.
    pub async fn file_service() -> (CivicService, TempDir) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("civic.db");
        let svc = CivicService::new_local(path.to_str().unwrap(), ServiceOptions::default())
            .await
            .unwrap();
        (svc, dir)
    }

    pub async fn seed_technician(
        svc: &CivicService,
        name: &str,
        department: Department,
    ) -> Technician {
        svc.add_technician(name, department).await.unwrap()
    }

    /// Add a technician with one availability window.
    pub async fn seed_available_technician(
        svc: &CivicService,
        name: &str,
        department: Department,
        date: NaiveDate,
    ) -> Technician {
        let tech = seed_technician(svc, name, department).await;
        svc.add_availability(tech.id, date).await.unwrap();
        tech
    }
}
