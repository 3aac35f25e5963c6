//! PostgreSQL-backed `MentorRepository`.
//!
//! Authorisation is carried by the pool's database role; the bearer token is
//! not forwarded to PostgreSQL.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{MentorRepository, MentorRepositoryError};
use crate::domain::{AccessToken, Mentor, MentorId, OfferedSlots};

use super::diesel_error_mapping::{ErrorConstructors, map_diesel_error, map_pool_error};
use super::models::{MentorRow, NewMentorRow};
use super::pool::DbPool;
use super::schema::mentors;

/// Diesel implementation of the mentor repository port.
#[derive(Clone)]
pub struct DieselMentorRepository {
    pool: DbPool,
}

impl DieselMentorRepository {
    /// Create a repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_mentor(row: MentorRow) -> Option<Mentor> {
    let id = match MentorId::new(row.mentor_id.as_str()) {
        Ok(id) => id,
        Err(error) => {
            warn!(%error, "skipping mentor row with an invalid id");
            return None;
        }
    };
    Some(Mentor {
        id,
        name: row.name,
        current_designation: row.current_designation,
        company_name: row.company_name,
        expertise_area: row.expertise_area,
        alma_mater: row.alma_mater,
        is_alumni: row.is_alumni,
        available_to_mentor: row.available_to_mentor,
        slots: row.slots_for_mentoring.into_iter().collect::<OfferedSlots>(),
    })
}

#[async_trait]
impl MentorRepository for DieselMentorRepository {
    async fn list_available(
        &self,
        _token: &AccessToken,
    ) -> Result<Vec<Mentor>, MentorRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, MentorRepositoryError::connection))?;

        let rows: Vec<MentorRow> = mentors::table
            .filter(mentors::available_to_mentor.eq(true))
            .order((mentors::name.asc(), mentors::mentor_id.asc()))
            .select(MentorRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| {
                map_diesel_error(
                    err,
                    ErrorConstructors {
                        query: MentorRepositoryError::query,
                        connection: MentorRepositoryError::connection,
                        unique: || MentorRepositoryError::query("unexpected unique violation"),
                    },
                )
            })?;

        Ok(rows.into_iter().filter_map(row_to_mentor).collect())
    }

    async fn insert(
        &self,
        _token: &AccessToken,
        mentor: &Mentor,
    ) -> Result<(), MentorRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, MentorRepositoryError::connection))?;

        let row = NewMentorRow {
            mentor_id: mentor.id.as_str(),
            name: mentor.name.as_str(),
            current_designation: mentor.current_designation.as_str(),
            company_name: mentor.company_name.as_str(),
            expertise_area: mentor.expertise_area.as_str(),
            alma_mater: mentor.alma_mater.as_str(),
            is_alumni: mentor.is_alumni,
            available_to_mentor: mentor.available_to_mentor,
            slots_for_mentoring: mentor.slots.as_slice(),
        };

        diesel::insert_into(mentors::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|err| {
                map_diesel_error(
                    err,
                    ErrorConstructors {
                        query: MentorRepositoryError::query,
                        connection: MentorRepositoryError::connection,
                        unique: || MentorRepositoryError::duplicate(mentor.id.as_str()),
                    },
                )
            })?;
        Ok(())
    }
}
