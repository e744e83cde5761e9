//! SQL schema for the carbonlog SQLite store.
//!
//! Executed once at connection startup; `PRAGMA user_version` records the
//! schema revision so later migrations can be gated on it.

/// Full schema DDL plus the starter catalogue; idempotent thanks to
/// `IF NOT EXISTS` and `INSERT OR IGNORE`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS profiles (
    owner       TEXT PRIMARY KEY,
    full_name   TEXT,
    avatar_url  TEXT,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

-- Activities are never updated; the footprint is stamped at insert time.
CREATE TABLE IF NOT EXISTS activities (
    activity_id       TEXT PRIMARY KEY,
    owner             TEXT NOT NULL,
    category          TEXT NOT NULL,
    subcategory       TEXT NOT NULL,
    description       TEXT NOT NULL,
    amount            REAL NOT NULL,
    unit              TEXT NOT NULL,
    carbon_footprint  REAL NOT NULL,
    date              TEXT NOT NULL,   -- YYYY-MM-DD
    created_at        TEXT NOT NULL    -- RFC 3339 UTC; server-assigned
);

CREATE TABLE IF NOT EXISTS goals (
    goal_id            TEXT PRIMARY KEY,
    owner              TEXT NOT NULL,
    target_reduction   REAL NOT NULL,
    current_footprint  REAL NOT NULL DEFAULT 0,
    target_date        TEXT NOT NULL,
    status             TEXT NOT NULL DEFAULT 'active',  -- 'active' | 'completed' | 'abandoned'
    created_at         TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS achievements (
    achievement_id     TEXT PRIMARY KEY,
    name               TEXT NOT NULL,
    description        TEXT NOT NULL,
    icon               TEXT NOT NULL,
    requirement_type   TEXT NOT NULL,
    requirement_value  REAL NOT NULL,
    points             INTEGER NOT NULL,
    created_at         TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS user_achievements (
    user_achievement_id  TEXT PRIMARY KEY,
    owner                TEXT NOT NULL,
    achievement_id       TEXT NOT NULL REFERENCES achievements(achievement_id),
    earned_at            TEXT NOT NULL,
    UNIQUE (owner, achievement_id)
);

CREATE TABLE IF NOT EXISTS suggestions (
    suggestion_id        TEXT PRIMARY KEY,
    category             TEXT NOT NULL,
    title                TEXT NOT NULL,
    description          TEXT NOT NULL,
    potential_reduction  REAL NOT NULL,   -- kg CO2e per year
    difficulty           TEXT NOT NULL,   -- 'easy' | 'medium' | 'hard'
    created_at           TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS activities_owner_date_idx ON activities(owner, date);
CREATE INDEX IF NOT EXISTS goals_owner_idx           ON goals(owner);

INSERT OR IGNORE INTO achievements VALUES
    ('5b0f7c1e-0a41-4c39-9d7e-0d3c5a6f0001', 'First Step',        'Log your first activity',               'footprints', 'activities_logged', 1,   10, '2024-01-01T00:00:00+00:00'),
    ('5b0f7c1e-0a41-4c39-9d7e-0d3c5a6f0002', 'Goal Setter',       'Create your first reduction goal',      'target',     'goals_created',     1,   20, '2024-01-01T00:00:00+00:00'),
    ('5b0f7c1e-0a41-4c39-9d7e-0d3c5a6f0003', 'Green Commuter',    'Travel 100 km by bike or on foot',      'bike',       'zero_emission_km',  100, 40, '2024-01-01T00:00:00+00:00'),
    ('5b0f7c1e-0a41-4c39-9d7e-0d3c5a6f0004', 'Consistent Logger', 'Log 30 activities',                     'calendar',   'activities_logged', 30,  50, '2024-01-01T00:00:00+00:00');

INSERT OR IGNORE INTO suggestions VALUES
    ('8d2e4a90-6c1b-4f7a-b3e5-1f9c7d2b0001', 'transport',   'Cycle short trips',                'Replace car journeys under 5 km with cycling or walking.', 300,  'easy',   '2024-01-01T00:00:00+00:00'),
    ('8d2e4a90-6c1b-4f7a-b3e5-1f9c7d2b0002', 'food',        'Swap beef for chicken',            'Two beef meals a week replaced with chicken.',            500,  'medium', '2024-01-01T00:00:00+00:00'),
    ('8d2e4a90-6c1b-4f7a-b3e5-1f9c7d2b0003', 'electricity', 'Switch to a renewable tariff',     'Move your household supply to a renewable provider.',     800,  'easy',   '2024-01-01T00:00:00+00:00'),
    ('8d2e4a90-6c1b-4f7a-b3e5-1f9c7d2b0004', 'home',        'Lower the thermostat by 1 degree', 'A small reduction in heating set-point year round.',      250,  'easy',   '2024-01-01T00:00:00+00:00'),
    ('8d2e4a90-6c1b-4f7a-b3e5-1f9c7d2b0005', 'waste',       'Compost food scraps',              'Divert kitchen waste from landfill to compost.',          150,  'medium', '2024-01-01T00:00:00+00:00'),
    ('8d2e4a90-6c1b-4f7a-b3e5-1f9c7d2b0006', 'transport',   'Take the train, not the plane',    'Replace one short-haul return flight a year with rail.',  1000, 'hard',   '2024-01-01T00:00:00+00:00');

PRAGMA user_version = 1;
";
