//! Diesel table definitions shared by the PostgreSQL and SQLite stores.
//!
//! These definitions must match the DDL issued by the schema migrators. The
//! column types are chosen so the same definitions map onto both backends:
//! `BigInt` identifiers, `Timestamp` (UTC, without zone) and `Date`.

diesel::table! {
    /// Registered swimmers.
    swimmers (id) {
        /// Storage-assigned identifier.
        id -> BigInt,
        first_name -> Text,
        last_name -> Text,
        /// Optional membership number in 1..=999. Renamed from `category`.
        share_number -> Nullable<Integer>,
        /// Insertion time in UTC.
        created_at -> Timestamp,
    }
}

diesel::table! {
    /// One row per logged training session.
    meters_log (id) {
        id -> BigInt,
        /// Owning swimmer; deleting the swimmer deletes the row.
        swimmer_id -> BigInt,
        /// Strictly positive distance.
        meters -> BigInt,
        session_date -> Date,
        notes -> Nullable<Text>,
        created_at -> Timestamp,
    }
}

diesel::joinable!(meters_log -> swimmers (swimmer_id));
diesel::allow_tables_to_appear_in_same_query!(swimmers, meters_log);
