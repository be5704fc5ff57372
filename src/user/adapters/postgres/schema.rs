//! Diesel schema for user persistence.

diesel::table! {
    /// Users referenced by task owners.
    users (id) {
        /// Directory-assigned identifier.
        id -> Int8,
        /// Display name.
        #[max_length = 100]
        name -> Varchar,
        /// Job title.
        #[max_length = 100]
        job_position -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Soft-delete marker.
        deleted_at -> Nullable<Timestamptz>,
    }
}
