//! Document store queries. The tables themselves are created by the
//! migrations under `migrations/`.

/// Fetch one record body by key.
pub const SELECT_RECORD: &str = "SELECT body FROM onboarding_records WHERE id = $1";

/// Fetch one record body by key and lock the row for the rest of the
/// transaction.
pub const SELECT_RECORD_FOR_UPDATE: &str =
    "SELECT body FROM onboarding_records WHERE id = $1 FOR UPDATE";

/// Insert a record body, or replace the body of an existing row.
pub const UPSERT_RECORD: &str = r"
INSERT INTO onboarding_records (id, body)
VALUES ($1, $2)
ON CONFLICT (id) DO UPDATE
    SET body = EXCLUDED.body,
        updated_at = NOW()
";

/// Find the record registered with an employee id. Uses the generated
/// `employee_id` column.
pub const SELECT_RECORD_BY_EMPLOYEE_ID: &str = r"
SELECT id, body
FROM onboarding_records
WHERE employee_id = $1
ORDER BY created_at
LIMIT 1
";

/// Create an allow-list entry, or update `active` on the existing one and
/// keep its original `created_at`.
pub const UPSERT_ALLOW_LIST_ENTRY: &str = r"
INSERT INTO allow_list (employee_id, active, created_at)
VALUES ($1, $2, $3)
ON CONFLICT (employee_id) DO UPDATE
    SET active = EXCLUDED.active
";

/// Delete an allow-list entry.
pub const DELETE_ALLOW_LIST_ENTRY: &str = "DELETE FROM allow_list WHERE employee_id = $1";

/// Fetch one allow-list entry.
pub const SELECT_ALLOW_LIST_ENTRY: &str =
    "SELECT active, created_at FROM allow_list WHERE employee_id = $1";

/// Every allow-list entry, ordered by key.
pub const SELECT_ALLOW_LIST: &str =
    "SELECT employee_id, active, created_at FROM allow_list ORDER BY employee_id";
