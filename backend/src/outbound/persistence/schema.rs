//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Messages submitted through the public contact form.
    contact_messages (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Visitor's name (max 100 characters).
        name -> Varchar,
        /// Reply address (max 254 characters).
        email -> Varchar,
        /// Category label from the contact form allow-list.
        category -> Varchar,
        /// Optional free-text budget.
        budget -> Nullable<Text>,
        /// Message body (max 2000 characters).
        message -> Varchar,
        /// Review state: `pending` or `read`.
        status -> Varchar,
        /// Insertion timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Portfolio content of every collection, one row per entry.
    portfolio_entries (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Collection name such as `projects`.
        kind -> Varchar,
        /// Validated entry content serialised as JSON.
        content -> Jsonb,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}
