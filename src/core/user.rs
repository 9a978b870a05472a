use crate::config::Config;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::user::User;

/// Business logic for the `user` command.
pub struct UserLogic;

impl UserLogic {
    /// Register a new user. Username and email must both be unused.
    pub fn register(pool: &mut DbPool, username: &str, email: &str) -> AppResult<User> {
        let username = username.trim();
        let email = email.trim();

        if username.is_empty() {
            return Err(AppError::Other("Username cannot be empty".into()));
        }
        if !email.contains('@') {
            return Err(AppError::Other(format!("Invalid email address: {email}")));
        }
        if queries::user_exists(&pool.conn, username, email)? {
            return Err(AppError::DuplicateUser(username.to_string()));
        }

        queries::insert_user(&pool.conn, username, email)?;
        let user = queries::find_user_by_username(&pool.conn, username)?
            .ok_or_else(|| AppError::UserNotFound(username.to_string()))?;

        audit(
            &pool.conn,
            "user_add",
            &user.username,
            &format!("Registered user {} <{}>", user.username, user.email),
        );

        Ok(user)
    }

    pub fn list(pool: &mut DbPool) -> AppResult<Vec<User>> {
        queries::list_users(&pool.conn)
    }

    /// Pick the user a command acts on: explicit `--user`, else
    /// `default_user` from the config, else the only registered user.
    pub fn resolve(pool: &mut DbPool, cfg: &Config, requested: Option<&str>) -> AppResult<User> {
        let name = requested.or(cfg.default_user.as_deref());

        if let Some(name) = name {
            return queries::find_user_by_username(&pool.conn, name)?
                .ok_or_else(|| AppError::UserNotFound(name.to_string()));
        }

        let mut users = queries::list_users(&pool.conn)?;
        match users.len() {
            1 => Ok(users.remove(0)),
            0 => Err(AppError::UserNotFound(
                "no users registered (run `habitlog user add`)".into(),
            )),
            _ => Err(AppError::Other(
                "Several users registered: pass --user or set default_user".into(),
            )),
        }
    }
}
