//! The storage adapter: five parameterized operations plus an existence
//! check against the `courses` table. Errors surface as `sqlx::Error` for
//! the handlers to map; nothing in here panics.

use sqlx::SqlitePool;

use crate::models::Course;

pub async fn fetch_all(db: &SqlitePool) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "SELECT code, title, dates, lecturer, description FROM courses ORDER BY code",
    )
    .fetch_all(db)
    .await
}

pub async fn fetch_one(db: &SqlitePool, code: i64) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "SELECT code, title, dates, lecturer, description FROM courses WHERE code = ?",
    )
    .bind(code)
    .fetch_optional(db)
    .await
}

pub async fn insert(db: &SqlitePool, course: &Course) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO courses (code, title, dates, lecturer, description) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(course.code)
    .bind(&course.title)
    .bind(&course.dates)
    .bind(&course.lecturer)
    .bind(&course.description)
    .execute(db)
    .await?;

    Ok(())
}

pub async fn update(db: &SqlitePool, course: &Course) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE courses SET title = ?, dates = ?, lecturer = ?, description = ? WHERE code = ?",
    )
    .bind(&course.title)
    .bind(&course.dates)
    .bind(&course.lecturer)
    .bind(&course.description)
    .bind(course.code)
    .execute(db)
    .await?;

    Ok(())
}

/// Returns whether a row was actually removed.
pub async fn delete(db: &SqlitePool, code: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM courses WHERE code = ?")
        .bind(code)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}

pub async fn exists(db: &SqlitePool, code: i64) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM courses WHERE code = ?)")
        .bind(code)
        .fetch_one(db)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_test_db() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create test db");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        pool
    }

    fn sample(code: i64) -> Course {
        Course {
            code,
            title: "Algorithms".to_string(),
            dates: "2024".to_string(),
            lecturer: "Dr. A".to_string(),
            description: "Intro".to_string(),
        }
    }

    #[tokio::test]
    async fn insert_and_fetch_one() {
        let pool = setup_test_db().await;

        insert(&pool, &sample(101)).await.expect("Failed to insert");

        let fetched = fetch_one(&pool, 101)
            .await
            .expect("Failed to fetch")
            .expect("Course missing");
        assert_eq!(fetched, sample(101));

        assert!(fetch_one(&pool, 102).await.expect("Failed to fetch").is_none());
    }

    #[tokio::test]
    async fn fetch_all_orders_by_code() {
        let pool = setup_test_db().await;

        insert(&pool, &sample(300)).await.expect("Failed to insert");
        insert(&pool, &sample(100)).await.expect("Failed to insert");
        insert(&pool, &sample(200)).await.expect("Failed to insert");

        let all = fetch_all(&pool).await.expect("Failed to fetch");
        let codes: Vec<i64> = all.iter().map(|c| c.code).collect();
        assert_eq!(codes, vec![100, 200, 300]);
    }

    #[tokio::test]
    async fn update_overwrites_fields() {
        let pool = setup_test_db().await;

        insert(&pool, &sample(101)).await.expect("Failed to insert");

        let mut changed = sample(101);
        changed.dates = "2025".to_string();
        update(&pool, &changed).await.expect("Failed to update");

        let fetched = fetch_one(&pool, 101)
            .await
            .expect("Failed to fetch")
            .expect("Course missing");
        assert_eq!(fetched.dates, "2025");
        assert_eq!(fetched.title, "Algorithms");
    }

    #[tokio::test]
    async fn delete_reports_whether_row_existed() {
        let pool = setup_test_db().await;

        insert(&pool, &sample(101)).await.expect("Failed to insert");

        assert!(delete(&pool, 101).await.expect("Failed to delete"));
        assert!(!delete(&pool, 101).await.expect("Failed to delete"));
        assert!(fetch_one(&pool, 101).await.expect("Failed to fetch").is_none());
    }

    #[tokio::test]
    async fn exists_tracks_membership() {
        let pool = setup_test_db().await;

        assert!(!exists(&pool, 101).await.expect("Failed to check"));
        insert(&pool, &sample(101)).await.expect("Failed to insert");
        assert!(exists(&pool, 101).await.expect("Failed to check"));
    }

    #[tokio::test]
    async fn duplicate_insert_is_rejected_by_primary_key() {
        let pool = setup_test_db().await;

        insert(&pool, &sample(101)).await.expect("Failed to insert");
        assert!(insert(&pool, &sample(101)).await.is_err());
    }
}
