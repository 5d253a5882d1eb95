//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly. Listing queries are
//! assembled as text by the list query builder, so column names used there
//! must stay in step with this file too.

diesel::table! {
    /// Student accounts, owned by the external auth service.
    ///
    /// `student_id` is the natural key handed out at registration.
    users (student_id) {
        /// Natural key.
        student_id -> Int4,
        /// Display name.
        name -> Text,
        /// Unique contact address.
        email -> Text,
        /// Credential hash; never read by this service.
        password_hash -> Text,
        /// Optional year of study.
        year -> Nullable<Int4>,
        /// Registration timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Course reviews with a denormalised like counter.
    course_reviews (id) {
        /// Serial primary key.
        id -> Int4,
        /// Course title.
        course_name -> Text,
        /// Course code used for filtering.
        course_code -> Text,
        /// JSON-text list of instructors.
        instructor_names -> Nullable<Text>,
        /// Institution name.
        institution -> Text,
        /// Semester label.
        semester -> Text,
        /// Author.
        student_id -> Int4,
        /// Rating in 1..=5.
        experience_rating -> Int4,
        /// Review body.
        review_text -> Text,
        /// Optional advice.
        tips -> Nullable<Text>,
        /// Count of rows in `review_likes` for this review.
        likes_count -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// One row per (review, student) like.
    review_likes (review_id, student_id) {
        /// Liked review.
        review_id -> Int4,
        /// Liking student.
        student_id -> Int4,
        /// When the like was recorded.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Interview experiences.
    experiences (id) {
        /// Serial primary key.
        id -> Int4,
        /// Author.
        student_id -> Int4,
        /// Company interviewed with.
        company_name -> Text,
        /// Role applied for.
        position -> Text,
        /// Interview format.
        interview_type -> Text,
        /// Number of rounds, at least one.
        interview_rounds -> Int4,
        /// Optional duration, never negative.
        duration -> Nullable<Int4>,
        /// Where the interview took place.
        interview_location -> Text,
        /// Free-form difficulty label.
        difficulty_level -> Text,
        /// Questions asked.
        interview_questions -> Nullable<Text>,
        /// Narrative account.
        interview_experience -> Nullable<Text>,
        /// Result of the process.
        outcome -> Text,
        /// Feedback received.
        feedback -> Nullable<Text>,
        /// Advice for others.
        tips -> Nullable<Text>,
        /// JSON-text list of preparation links.
        prep_links -> Nullable<Text>,
        /// Free-form resources note.
        resources -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Curated learning resources keyed by skill name.
    resources (id) {
        /// Serial primary key.
        id -> Int4,
        /// Skill the resource teaches; not unique.
        skill_name -> Text,
        /// Description.
        description -> Text,
        /// Category used for filtering.
        category -> Text,
        /// JSON-text list of links.
        resource_links -> Nullable<Text>,
        /// JSON-text list of tags.
        tags -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(course_reviews -> users (student_id));
diesel::joinable!(experiences -> users (student_id));
diesel::joinable!(review_likes -> course_reviews (review_id));
diesel::joinable!(review_likes -> users (student_id));

diesel::allow_tables_to_appear_in_same_query!(
    course_reviews,
    experiences,
    resources,
    review_likes,
    users,
);
