// College search against a live PostgreSQL server
//
// Set POLYASSIST_TEST_DATABASE_URL to run these; without it every test returns early.
// The schema is created as temporary tables on a single pooled session, so the
// target database is left untouched.
//
// Tests cover:
// - One record per college with de-duplicated courses and facilities
// - Colleges without courses or facilities yield empty lists
// - LIKE wildcards in the query are matched literally
// - The full pipeline rendering rows from the real query

use polyassist::config::config::DatabaseConfig;
use polyassist::services::formatter::BLOCK_SEPARATOR;
use polyassist::services::{Resolution, create_chatbot_service};
use polyassist::storage::{CollegeRepository, PgCollegeRepository, PgPool};
use std::sync::Arc;

const TEST_DATABASE_URL_VAR: &str = "POLYASSIST_TEST_DATABASE_URL";

const SEED_SQL: &str = r#"
CREATE TEMP TABLE Colleges (
    CollegeID INT PRIMARY KEY,
    Name VARCHAR(200) NOT NULL,
    Code VARCHAR(50) NOT NULL,
    Address TEXT NOT NULL,
    District VARCHAR(100) NOT NULL,
    Email VARCHAR(200),
    Phone VARCHAR(50)
);
CREATE TEMP TABLE Courses (
    CourseID SERIAL PRIMARY KEY,
    CollegeID INT NOT NULL REFERENCES Colleges (CollegeID),
    CourseName VARCHAR(200) NOT NULL,
    Seats INT NOT NULL
);
CREATE TEMP TABLE Facilities (
    FacilityID SERIAL PRIMARY KEY,
    CollegeID INT NOT NULL REFERENCES Colleges (CollegeID),
    FacilityName VARCHAR(200) NOT NULL
);

INSERT INTO Colleges VALUES
    (1, 'Andhra Polytechnic', 'APK-101', 'JN Road', 'Vijayawada', 'office@apk.ac.in', NULL),
    (2, 'SRR Polytechnic', 'SRR-12', 'Benz Circle', 'Vijayawada', NULL, '0866-2555555'),
    (3, 'Government Polytechnic Nellore', 'GPN-3', 'Dargamitta', 'Nellore', '', NULL),
    (4, 'A_B College', 'AB-1', 'Main Road', 'Kurnool', NULL, NULL),
    (5, 'AxB College', 'AX-1', 'Main Road', 'Kurnool', NULL, NULL);

INSERT INTO Courses (CollegeID, CourseName, Seats) VALUES
    (1, 'Civil Engineering', 60),
    (1, 'Computer Engineering', 120),
    (2, 'Electronics and Communication Engineering', 60);

INSERT INTO Facilities (CollegeID, FacilityName) VALUES
    (1, 'Library'),
    (1, 'Hostel'),
    (2, 'Transport');
"#;

/// Connects with a single-session pool and seeds the temporary schema on it.
async fn seeded_repository() -> Option<PgCollegeRepository> {
    let Ok(url) = std::env::var(TEST_DATABASE_URL_VAR) else {
        eprintln!("{} not set, skipping", TEST_DATABASE_URL_VAR);
        return None;
    };

    let config = DatabaseConfig {
        url,
        max_connections: 1,
        ssl_mode: "prefer".into(),
        ..DatabaseConfig::default()
    };
    let pool = PgPool::connect(config).await.expect("connect to test database");
    {
        let conn = pool.get().await.expect("check out connection");
        conn.batch_execute(SEED_SQL).await.expect("seed colleges");
    }

    Some(PgCollegeRepository::new(pool))
}

#[tokio::test]
async fn test_district_search_groups_and_deduplicates() {
    let Some(repository) = seeded_repository().await else {
        return;
    };

    let colleges = repository.search("vijayawada").await.unwrap();

    assert_eq!(colleges.len(), 2);
    assert_eq!(colleges[0].name, "Andhra Polytechnic");
    // two courses times two facilities come back as four joined rows
    assert_eq!(
        colleges[0].courses,
        vec![
            "Civil Engineering (60 seats)".to_string(),
            "Computer Engineering (120 seats)".to_string(),
        ]
    );
    assert_eq!(
        colleges[0].facilities,
        vec!["Hostel".to_string(), "Library".to_string()]
    );
    assert_eq!(colleges[0].email.as_deref(), Some("office@apk.ac.in"));
    assert_eq!(colleges[0].phone, None);

    assert_eq!(colleges[1].name, "SRR Polytechnic");
    assert_eq!(colleges[1].phone.as_deref(), Some("0866-2555555"));
}

#[tokio::test]
async fn test_college_without_children_has_empty_lists() {
    let Some(repository) = seeded_repository().await else {
        return;
    };

    let colleges = repository.search("nellore").await.unwrap();

    assert_eq!(colleges.len(), 1);
    assert_eq!(colleges[0].code, "GPN-3");
    assert!(colleges[0].courses.is_empty());
    assert!(colleges[0].facilities.is_empty());
}

#[tokio::test]
async fn test_course_name_matches() {
    let Some(repository) = seeded_repository().await else {
        return;
    };

    let colleges = repository.search("communication").await.unwrap();

    assert_eq!(colleges.len(), 1);
    assert_eq!(colleges[0].name, "SRR Polytechnic");
    assert_eq!(
        colleges[0].courses,
        vec!["Electronics and Communication Engineering (60 seats)".to_string()]
    );
}

#[tokio::test]
async fn test_wildcards_match_literally() {
    let Some(repository) = seeded_repository().await else {
        return;
    };

    let colleges = repository.search("a_b").await.unwrap();
    assert_eq!(colleges.len(), 1);
    assert_eq!(colleges[0].name, "A_B College");

    assert!(repository.search("100%").await.unwrap().is_empty());
    assert_eq!(repository.search("kurnool").await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_unknown_term_returns_nothing() {
    let Some(repository) = seeded_repository().await else {
        return;
    };

    assert!(repository.search("zzzznotfound").await.unwrap().is_empty());
    repository.ping().await.unwrap();
}

#[tokio::test]
async fn test_pipeline_renders_database_rows() {
    let Some(repository) = seeded_repository().await else {
        return;
    };
    let service = create_chatbot_service(Arc::new(repository));

    let text = match service.resolve(Some("Information on VIJAYAWADA")).await {
        Resolution::Colleges { count, text } => {
            assert_eq!(count, 2);
            text
        }
        other => panic!("expected colleges, got {:?}", other),
    };
    let blocks: Vec<&str> = text.split(BLOCK_SEPARATOR).collect();
    assert_eq!(blocks.len(), 2);
    assert!(blocks[0].starts_with("🏫 College Name: Andhra Polytechnic\n"));
    assert_eq!(blocks[0].matches("   - Library").count(), 1);
    assert!(blocks[1].contains("📧 Email: N/A"));

    // blank email column renders the placeholder too
    let text = service.resolve(Some("nellore")).await.into_text();
    assert!(text.contains("📧 Email: N/A"));
    assert!(text.contains("📜 Courses Offered:\n🏷 College Code: GPN-3"));
}
