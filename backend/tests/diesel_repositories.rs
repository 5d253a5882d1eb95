//! Diesel adapters against embedded PostgreSQL.
//!
//! Covers the like ledger transaction and the parameterised listing SQL:
//! sort keys, directions and search run on a real planner here.

#[path = "support/pg_embed.rs"]
mod pg_embed;

use peerbridge::domain::listing::{ListRequest, RawListParams, ResourceSort, ReviewSort};
use peerbridge::domain::ports::{
    CourseReviewRepository, ResourceRepository, ReviewLikeRepository, ReviewLikeRepositoryError,
};
use peerbridge::domain::{LikeToggle, NewCourseReview, NewResource, ReviewId, StudentId};
use peerbridge::outbound::persistence::{
    DbPool, DieselCourseReviewRepository, DieselResourceRepository, DieselReviewLikeRepository,
    PoolConfig,
};
use pg_embed::{handle_cluster_setup_failure, migrated_database, seed_students, test_cluster};
use pg_embedded_setup_unpriv::TestCluster;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

struct TestContext {
    reviews: DieselCourseReviewRepository,
    likes: DieselReviewLikeRepository,
    resources: DieselResourceRepository,
    runtime: Runtime,
    _cluster: TestCluster,
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    let url = migrated_database(&cluster, &runtime)?;
    seed_students(&url, &[(1, "Ada"), (2, "Grace"), (3, "Linus")])?;

    let config = PoolConfig::new(&url)
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        reviews: DieselCourseReviewRepository::new(pool.clone()),
        likes: DieselReviewLikeRepository::new(pool.clone()),
        resources: DieselResourceRepository::new(pool),
        runtime,
        _cluster: cluster,
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(context) => Some(context),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn new_review(course_code: &str, student_id: i32, rating: i32) -> NewCourseReview {
    NewCourseReview {
        course_name: format!("Course {course_code}"),
        course_code: course_code.to_owned(),
        instructor_names: vec!["A Prof".to_owned(), "B Prof".to_owned()],
        institution: "State University".to_owned(),
        semester: "Spring 2024".to_owned(),
        student_id: StudentId::new(student_id),
        experience_rating: rating,
        review_text: "Worth taking.".to_owned(),
        tips: String::new(),
    }
}

fn new_resource(skill_name: &str) -> NewResource {
    NewResource {
        skill_name: skill_name.to_owned(),
        description: "Learning material".to_owned(),
        category: "Programming".to_owned(),
        resource_links: vec!["https://example.org/learn".to_owned()],
        tags: vec!["intro".to_owned()],
    }
}

#[rstest]
fn like_toggles_flip_rows_and_recount(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: like_toggles_flip_rows_and_recount skipped");
        return;
    };
    let TestContext {
        reviews,
        likes,
        runtime,
        ..
    } = &context;

    let review = runtime
        .block_on(reviews.insert(&new_review("CS500", 2, 4)))
        .expect("insert review");
    assert_eq!(review.likes_count, 0);
    assert_eq!(review.instructor_names, ["A Prof", "B Prof"]);

    let toggle = |student: i32| runtime.block_on(likes.toggle(review.id, StudentId::new(student)));
    assert_eq!(
        toggle(3).expect("first like"),
        LikeToggle { liked: true, like_count: 1 }
    );
    assert_eq!(
        toggle(2).expect("second like"),
        LikeToggle { liked: true, like_count: 2 }
    );
    assert_eq!(
        toggle(3).expect("unlike"),
        LikeToggle { liked: false, like_count: 1 }
    );

    let liked = |student: i32| {
        runtime
            .block_on(likes.is_liked(review.id, StudentId::new(student)))
            .expect("like status")
    };
    assert!(liked(2));
    assert!(!liked(3));

    let stored = runtime
        .block_on(reviews.for_course("CS500"))
        .expect("course reviews");
    assert_eq!(stored[0].likes_count, 1);
}

#[rstest]
fn like_toggles_report_missing_rows(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: like_toggles_report_missing_rows skipped");
        return;
    };
    let review = context
        .runtime
        .block_on(context.reviews.insert(&new_review("CS501", 2, 3)))
        .expect("insert review");

    let unknown_review = context
        .runtime
        .block_on(context.likes.toggle(ReviewId::new(9_999), StudentId::new(3)));
    assert_eq!(
        unknown_review,
        Err(ReviewLikeRepositoryError::review_not_found(9_999))
    );

    let unknown_student = context
        .runtime
        .block_on(context.likes.toggle(review.id, StudentId::new(77)));
    assert_eq!(
        unknown_student,
        Err(ReviewLikeRepositoryError::missing_student(77))
    );
}

#[rstest]
fn rating_sort_returns_the_best_review_first(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: rating_sort_returns_the_best_review_first skipped");
        return;
    };
    for (course_code, rating) in [("CS510", 3), ("CS511", 5), ("CS512", 4)] {
        context
            .runtime
            .block_on(context.reviews.insert(&new_review(course_code, 2, rating)))
            .expect("insert review");
    }

    let list = |sort_order: &str| {
        let request = ListRequest::<ReviewSort>::from_raw(RawListParams {
            sort_by: Some("experienceRating"),
            sort_order: Some(sort_order),
            limit: Some("1"),
            ..RawListParams::default()
        });
        context
            .runtime
            .block_on(context.reviews.list(&request))
            .expect("list reviews")
    };

    let best = list("desc");
    assert_eq!(best.data.len(), 1);
    assert_eq!(best.data[0].course_code, "CS511");
    assert_eq!(best.data[0].experience_rating, 5);
    assert_eq!(best.pagination.total, 3);
    assert_eq!(best.pagination.pages, 3);

    let worst = list("asc");
    assert_eq!(worst.data[0].experience_rating, 3);
}

#[rstest]
fn resource_search_excludes_other_skills(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: resource_search_excludes_other_skills skipped");
        return;
    };
    for skill in ["Python", "Rust", "python-testing", "50%_off"] {
        context
            .runtime
            .block_on(context.resources.insert(&new_resource(skill)))
            .expect("insert resource");
    }

    let search = |term: &str| {
        let request = ListRequest::<ResourceSort>::from_raw(RawListParams {
            search: Some(term),
            sort_by: Some("skillName"),
            sort_order: Some("asc"),
            ..RawListParams::default()
        });
        let page = context
            .runtime
            .block_on(context.resources.list(&request))
            .expect("list resources");
        page.data
            .into_iter()
            .map(|resource| resource.skill_name)
            .collect::<Vec<_>>()
    };

    assert_eq!(search("python"), ["Python", "python-testing"]);
    assert_eq!(search("%_"), ["50%_off"]);
}
