//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// User accounts and their pantry documents.
    accounts (id) {
        id -> Uuid,
        /// Unique account name (max 64 characters).
        name -> Varchar,
        /// Unique, lower-cased email address.
        email -> Varchar,
        /// bcrypt hash of the password.
        password_hash -> Text,
        /// JSON array of inventory entries, in insertion order.
        inventory -> Jsonb,
        /// JSON array of saved dishes.
        saved_dishes -> Jsonb,
        /// Bumped by every pantry write; used for compare-and-swap updates.
        revision -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Dish catalogue, ordered by `id`.
    dishes (id) {
        id -> Int8,
        name -> Text,
        ingredients -> Array<Text>,
    }
}

diesel::allow_tables_to_appear_in_same_query!(accounts, dishes);
