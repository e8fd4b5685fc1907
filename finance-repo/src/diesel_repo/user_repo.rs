use super::schema::users;
use super::{get_connection, DbConnection, DbPool};
use crate::user_repo::{User, UserRepo, UserRepoError};
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use tracing::instrument;

#[derive(Queryable, Identifiable, Clone)]
#[diesel(table_name = users)]
struct UserEntry {
    #[allow(dead_code)]
    id: i32,
    username: String,
    password_hash: String,
}

impl From<UserEntry> for User {
    fn from(u: UserEntry) -> Self {
        User::new(u.username, u.password_hash)
    }
}

#[derive(Insertable)]
#[diesel(table_name = users)]
struct NewUserEntry {
    username: String,
    password_hash: String,
}

impl From<User> for NewUserEntry {
    fn from(u: User) -> Self {
        NewUserEntry {
            username: u.username,
            password_hash: u.password_hash,
        }
    }
}

pub struct DieselUserRepo {
    db_pool: DbPool,
}

impl DieselUserRepo {
    pub fn new(db_pool: DbPool) -> DieselUserRepo {
        DieselUserRepo { db_pool }
    }

    fn run<F, R>(&self, f: F) -> Result<R, UserRepoError>
    where
        F: FnOnce(&mut DbConnection) -> Result<R, UserRepoError>,
    {
        let mut db_conn = get_connection(&self.db_pool)?;
        f(&mut db_conn)
    }
}

impl UserRepo for DieselUserRepo {
    #[instrument(skip(self))]
    fn get_user(&self, username: &str) -> Result<User, UserRepoError> {
        self.run(|db_conn| {
            let user: UserEntry = users::table
                .filter(users::username.eq(username))
                .first(db_conn)
                .map_err(|e| match e {
                    diesel::result::Error::NotFound => {
                        UserRepoError::UserNotFound(username.to_owned())
                    }
                    _ => UserRepoError::Other(
                        anyhow::Error::new(e).context(format!("Unable to get user {}", username)),
                    ),
                })?;
            Ok(user.into())
        })
    }

    #[instrument(skip_all, fields(username = %user.username))]
    fn create_user(&self, user: User) -> Result<(), UserRepoError> {
        let user_entry: NewUserEntry = user.into();
        self.run(|db_conn| {
            diesel::insert_into(users::table)
                .values(&user_entry)
                .execute(db_conn)
                .map_err(|e| match e {
                    diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        UserRepoError::UserAlreadyExists(user_entry.username.to_owned())
                    }
                    _ => UserRepoError::Other(anyhow::Error::new(e).context(format!(
                        "Unable to create user {}",
                        user_entry.username
                    ))),
                })?;

            Ok(())
        })
    }
}
