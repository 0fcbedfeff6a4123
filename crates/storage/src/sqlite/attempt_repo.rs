use vocab_core::model::QuizAttempt;

use super::SqliteRepository;
use super::mapping::{map_attempt_row, map_attempt_row_with_id};
use crate::repository::{AttemptRepository, AttemptRow, StorageError};

#[async_trait::async_trait]
impl AttemptRepository for SqliteRepository {
    async fn append_attempt(&self, attempt: &QuizAttempt) -> Result<i64, StorageError> {
        let res = sqlx::query(
            r"
                INSERT INTO quiz_attempts (
                    student, day, round, correct, total, started_at, completed_at
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ",
        )
        .bind(attempt.student())
        .bind(i64::from(attempt.day().value()))
        .bind(i64::from(attempt.round()))
        .bind(i64::from(attempt.correct()))
        .bind(i64::from(attempt.total()))
        .bind(attempt.started_at())
        .bind(attempt.completed_at())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(res.last_insert_rowid())
    }

    async fn get_attempt(&self, id: i64) -> Result<QuizAttempt, StorageError> {
        let row = sqlx::query(
            r"
                SELECT student, day, round, correct, total, started_at, completed_at
                FROM quiz_attempts
                WHERE id = ?1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?
        .ok_or(StorageError::NotFound)?;

        map_attempt_row(&row)
    }

    async fn list_attempts(
        &self,
        student: Option<&str>,
        limit: u32,
    ) -> Result<Vec<AttemptRow>, StorageError> {
        let mut sql = String::from(
            r"
                SELECT id, student, day, round, correct, total, started_at, completed_at
                FROM quiz_attempts
            ",
        );

        let mut bind_index = 1;
        if student.is_some() {
            sql.push_str(" WHERE student = ?");
            sql.push_str(&bind_index.to_string());
            bind_index += 1;
        }
        sql.push_str(" ORDER BY completed_at DESC, id DESC");
        sql.push_str(" LIMIT ?");
        sql.push_str(&bind_index.to_string());

        let mut query = sqlx::query(&sql);
        if let Some(student) = student {
            query = query.bind(student);
        }
        query = query.bind(i64::from(limit));

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(map_attempt_row_with_id(&row)?);
        }

        Ok(out)
    }
}
