//! Aggregate counts for the coordinator dashboard.

use sqlx::SqlitePool;

use crate::database::models::RoleCount;
use crate::errors::DbResult;

pub async fn users_per_role(pool: &SqlitePool) -> DbResult<Vec<RoleCount>> {
    let counts = sqlx::query_as::<_, RoleCount>(
        "SELECT role, COUNT(*) AS count FROM users GROUP BY role ORDER BY role",
    )
    .fetch_all(pool)
    .await?;
    Ok(counts)
}

pub async fn count_teams(pool: &SqlitePool) -> DbResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM teams")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn count_submissions(pool: &SqlitePool) -> DbResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM submissions")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::Role;
    use crate::database::queries::test_support;

    #[tokio::test]
    async fn test_role_counts() {
        let db = test_support::db().await;
        test_support::user(&db, "Ada", Role::Student).await;
        test_support::user(&db, "Bob", Role::Student).await;
        test_support::user(&db, "Jude", Role::Judge).await;

        let counts = users_per_role(db.pool()).await.unwrap();
        let students = counts.iter().find(|c| c.role == Role::Student).unwrap();
        assert_eq!(students.count, 2);
        assert_eq!(count_teams(db.pool()).await.unwrap(), 0);
        assert_eq!(count_submissions(db.pool()).await.unwrap(), 0);
    }
}
