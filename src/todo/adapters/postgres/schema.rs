//! Diesel schema for task persistence.

diesel::table! {
    /// Task records with their lane and position.
    todos (id) {
        /// Task identifier.
        id -> Uuid,
        /// Short title.
        #[max_length = 100]
        title -> Varchar,
        /// Free-form description.
        description -> Text,
        /// Owning user identifier.
        owner_id -> Int8,
        /// Lane label.
        lane_key -> Text,
        /// Order key within the lane.
        position -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Soft-delete marker.
        deleted_at -> Nullable<Timestamptz>,
    }
}
