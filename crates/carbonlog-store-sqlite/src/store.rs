//! [`SqliteStore`] — the SQLite implementation of [`FootprintStore`].

use std::path::Path;

use carbonlog_core::{
  achievement::{Achievement, UserAchievement},
  activity::{Activity, NewActivity},
  goal::{Goal, GoalStatus, NewGoal},
  profile::{Profile, ProfileUpdate},
  store::{ActivityQuery, FootprintStore},
  suggestion::{Suggestion, SuggestionQuery},
};
use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use crate::{
  Error, Result,
  encode::{
    ACHIEVEMENT_COLUMNS, ACTIVITY_COLUMNS, GOAL_COLUMNS, PROFILE_COLUMNS, RawAchievement,
    RawActivity, RawGoal, RawProfile, RawSuggestion, RawUserAchievement, SUGGESTION_COLUMNS,
    USER_ACHIEVEMENT_COLUMNS, encode_date, encode_dt, encode_goal_status, encode_uuid,
  },
  schema::SCHEMA,
};

/// SQLite `LIMIT -1` means "no limit".
fn sql_limit(limit: Option<usize>) -> i64 {
  limit.and_then(|l| i64::try_from(l).ok()).unwrap_or(-1)
}

fn sql_offset(offset: Option<usize>) -> i64 {
  offset.and_then(|o| i64::try_from(o).ok()).unwrap_or(0)
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A carbonlog store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn fetch_goal(&self, owner: Uuid, id: Uuid) -> Result<Option<Goal>> {
    let owner_str = encode_uuid(owner);
    let id_str    = encode_uuid(id);

    let raw: Option<RawGoal> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {GOAL_COLUMNS} FROM goals WHERE goal_id = ?1 AND owner = ?2"),
              rusqlite::params![id_str, owner_str],
              RawGoal::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawGoal::into_goal).transpose()
  }
}

// ─── FootprintStore impl ─────────────────────────────────────────────────────

impl FootprintStore for SqliteStore {
  type Error = Error;

  // ── Activities ────────────────────────────────────────────────────────────

  async fn record_activity(&self, input: NewActivity) -> Result<Activity> {
    let activity = Activity {
      activity_id:      Uuid::new_v4(),
      owner:            input.owner,
      category:         input.category,
      subcategory:      input.subcategory,
      description:      input.description,
      amount:           input.amount,
      unit:             input.unit,
      carbon_footprint: input.carbon_footprint,
      date:             Some(input.date),
      created_at:       Utc::now(),
    };

    let id_str          = encode_uuid(activity.activity_id);
    let owner_str       = encode_uuid(activity.owner);
    let category        = activity.category.clone();
    let subcategory     = activity.subcategory.clone();
    let description     = activity.description.clone();
    let amount          = activity.amount;
    let unit            = activity.unit.clone();
    let footprint       = activity.carbon_footprint;
    let date_str        = encode_date(input.date);
    let created_at_str  = encode_dt(activity.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO activities (
             activity_id, owner, category, subcategory, description,
             amount, unit, carbon_footprint, date, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            id_str,
            owner_str,
            category,
            subcategory,
            description,
            amount,
            unit,
            footprint,
            date_str,
            created_at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(
      activity_id = %activity.activity_id,
      carbon_footprint = activity.carbon_footprint,
      "recorded activity"
    );
    Ok(activity)
  }

  async fn get_activity(&self, owner: Uuid, id: Uuid) -> Result<Option<Activity>> {
    let owner_str = encode_uuid(owner);
    let id_str    = encode_uuid(id);

    let raw: Option<RawActivity> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {ACTIVITY_COLUMNS} FROM activities WHERE activity_id = ?1 AND owner = ?2"
              ),
              rusqlite::params![id_str, owner_str],
              RawActivity::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawActivity::into_activity).transpose()
  }

  async fn list_activities(&self, owner: Uuid, query: &ActivityQuery) -> Result<Vec<Activity>> {
    let owner_str  = encode_uuid(owner);
    let category   = query.category.clone();
    let from_str   = query.from.map(encode_date);
    let to_str     = query.to.map(encode_date);
    let limit_val  = sql_limit(query.limit);
    let offset_val = sql_offset(query.offset);

    let raws: Vec<RawActivity> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {ACTIVITY_COLUMNS}
           FROM activities
           WHERE owner = ?1
             AND (?2 IS NULL OR category = ?2)
             AND (?3 IS NULL OR date >= ?3)
             AND (?4 IS NULL OR date <= ?4)
           ORDER BY date DESC, created_at DESC
           LIMIT ?5 OFFSET ?6"
        ))?;

        let rows = stmt
          .query_map(
            rusqlite::params![owner_str, category, from_str, to_str, limit_val, offset_val],
            RawActivity::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawActivity::into_activity).collect()
  }

  async fn delete_activity(&self, owner: Uuid, id: Uuid) -> Result<bool> {
    let owner_str = encode_uuid(owner);
    let id_str    = encode_uuid(id);

    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM activities WHERE activity_id = ?1 AND owner = ?2",
          rusqlite::params![id_str, owner_str],
        )?)
      })
      .await?;

    Ok(deleted > 0)
  }

  // ── Goals ─────────────────────────────────────────────────────────────────

  async fn create_goal(&self, input: NewGoal) -> Result<Goal> {
    let goal = Goal {
      goal_id:           Uuid::new_v4(),
      owner:             input.owner,
      target_reduction:  input.target_reduction,
      current_footprint: 0.0,
      target_date:       input.target_date,
      status:            GoalStatus::Active,
      created_at:        Utc::now(),
    };

    let id_str      = encode_uuid(goal.goal_id);
    let owner_str   = encode_uuid(goal.owner);
    let target      = goal.target_reduction;
    let current     = goal.current_footprint;
    let date_str    = encode_date(goal.target_date);
    let status_str  = encode_goal_status(goal.status);
    let created_str = encode_dt(goal.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          &format!("INSERT INTO goals ({GOAL_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"),
          rusqlite::params![id_str, owner_str, target, current, date_str, status_str, created_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(goal)
  }

  async fn list_goals(&self, owner: Uuid) -> Result<Vec<Goal>> {
    let owner_str = encode_uuid(owner);

    let raws: Vec<RawGoal> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {GOAL_COLUMNS} FROM goals WHERE owner = ?1 ORDER BY created_at DESC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![owner_str], RawGoal::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawGoal::into_goal).collect()
  }

  async fn set_goal_status(
    &self,
    owner:  Uuid,
    id:     Uuid,
    status: GoalStatus,
  ) -> Result<Option<Goal>> {
    let owner_str  = encode_uuid(owner);
    let id_str     = encode_uuid(id);
    let status_str = encode_goal_status(status);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE goals SET status = ?1 WHERE goal_id = ?2 AND owner = ?3",
          rusqlite::params![status_str, id_str, owner_str],
        )?)
      })
      .await?;

    if changed == 0 {
      return Ok(None);
    }
    self.fetch_goal(owner, id).await
  }

  // ── Achievements ──────────────────────────────────────────────────────────

  async fn list_achievements(&self) -> Result<Vec<Achievement>> {
    let raws: Vec<RawAchievement> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {ACHIEVEMENT_COLUMNS} FROM achievements ORDER BY points DESC, name"
        ))?;
        let rows = stmt
          .query_map([], RawAchievement::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAchievement::into_achievement).collect()
  }

  async fn list_user_achievements(&self, owner: Uuid) -> Result<Vec<UserAchievement>> {
    let owner_str = encode_uuid(owner);

    let raws: Vec<RawUserAchievement> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {USER_ACHIEVEMENT_COLUMNS} FROM user_achievements
           WHERE owner = ?1 ORDER BY earned_at"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![owner_str], RawUserAchievement::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawUserAchievement::into_user_achievement).collect()
  }

  async fn award_achievement(&self, owner: Uuid, achievement_id: Uuid) -> Result<UserAchievement> {
    let owner_str       = encode_uuid(owner);
    let achievement_str = encode_uuid(achievement_id);
    let award_id_str    = encode_uuid(Uuid::new_v4());
    let earned_str      = encode_dt(Utc::now());

    let raw: Option<RawUserAchievement> = self
      .conn
      .call(move |conn| {
        let exists = conn
          .query_row(
            "SELECT 1 FROM achievements WHERE achievement_id = ?1",
            rusqlite::params![achievement_str],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);

        if !exists {
          return Ok(None);
        }

        // The UNIQUE (owner, achievement_id) constraint keeps the first award.
        conn.execute(
          &format!(
            "INSERT OR IGNORE INTO user_achievements ({USER_ACHIEVEMENT_COLUMNS})
             VALUES (?1, ?2, ?3, ?4)"
          ),
          rusqlite::params![award_id_str, owner_str, achievement_str, earned_str],
        )?;

        Ok(Some(conn.query_row(
          &format!(
            "SELECT {USER_ACHIEVEMENT_COLUMNS} FROM user_achievements
             WHERE owner = ?1 AND achievement_id = ?2"
          ),
          rusqlite::params![owner_str, achievement_str],
          RawUserAchievement::from_row,
        )?))
      })
      .await?;

    raw
      .ok_or(Error::AchievementNotFound(achievement_id))?
      .into_user_achievement()
  }

  // ── Suggestions ───────────────────────────────────────────────────────────

  async fn list_suggestions(&self, query: &SuggestionQuery) -> Result<Vec<Suggestion>> {
    let category  = query.category.clone();
    let limit_val = sql_limit(query.limit);

    let raws: Vec<RawSuggestion> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {SUGGESTION_COLUMNS}
           FROM suggestions
           WHERE ?1 IS NULL OR category = ?1
           ORDER BY potential_reduction DESC, title
           LIMIT ?2"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![category, limit_val], RawSuggestion::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSuggestion::into_suggestion).collect()
  }

  // ── Profiles ──────────────────────────────────────────────────────────────

  async fn get_profile(&self, owner: Uuid) -> Result<Option<Profile>> {
    let owner_str = encode_uuid(owner);

    let raw: Option<RawProfile> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE owner = ?1"),
              rusqlite::params![owner_str],
              RawProfile::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawProfile::into_profile).transpose()
  }

  async fn upsert_profile(&self, owner: Uuid, update: ProfileUpdate) -> Result<Profile> {
    let owner_str = encode_uuid(owner);
    let now_str   = encode_dt(Utc::now());

    let raw: RawProfile = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO profiles (owner, full_name, avatar_url, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?4, ?4)
           ON CONFLICT (owner) DO UPDATE SET
             full_name  = excluded.full_name,
             avatar_url = excluded.avatar_url,
             updated_at = excluded.updated_at",
          rusqlite::params![owner_str, update.full_name, update.avatar_url, now_str],
        )?;
        Ok(conn.query_row(
          &format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE owner = ?1"),
          rusqlite::params![owner_str],
          RawProfile::from_row,
        )?)
      })
      .await?;

    raw.into_profile()
  }
}
