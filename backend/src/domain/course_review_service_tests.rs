//! Tests for the course review service.

use std::sync::Arc;

use pagination::PageRequest;
use rstest::rstest;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::json_text::RawJsonText;
use crate::domain::listing::SortDirection;
use crate::domain::ports::{MockCourseReviewRepository, MockStudentDirectory};
use crate::domain::test_support::{review, student};
use crate::domain::{ReviewId, StudentId};

fn directory_with(students: Vec<Student>) -> MockStudentDirectory {
    let mut directory = MockStudentDirectory::new();
    directory
        .expect_find_by_ids()
        .return_once(move |_| Ok(students));
    directory
}

fn valid_draft() -> ReviewDraft {
    ReviewDraft {
        course_name: Some("Compilers".to_owned()),
        course_code: Some("CS440".to_owned()),
        instructor_names: RawJsonText::Sequence(vec!["A Prof".to_owned(), "B Prof".to_owned()]),
        institution: Some("State University".to_owned()),
        semester: Some("Fall 2024".to_owned()),
        student_id: Some(StudentId::new(42)),
        rating: Some(5),
        review_text: Some("Loved it.".to_owned()),
        tips: Some("Start the project early".to_owned()),
    }
}

#[rstest]
#[tokio::test]
async fn list_passes_request_through_and_keeps_pagination() {
    let request = ListRequest::<ReviewSort>::paged(PageRequest::new(Some(2), Some(1)))
        .sorted_by(ReviewSort::ExperienceRating, SortDirection::Desc);
    let expected = request.clone();

    let mut reviews = MockCourseReviewRepository::new();
    reviews
        .expect_list()
        .withf(move |req| ListRequest::<ReviewSort>::clone(req) == expected)
        .times(1)
        .return_once(|req| Ok(Paginated::new(vec![review(7, 42, 5)], req.page, 3)));

    let service = CourseReviewService::new(
        Arc::new(reviews),
        Arc::new(directory_with(vec![student(42, "Ada")])),
    );
    let page = service.list(request).await.expect("listing succeeds");

    assert_eq!(page.pagination.total, 3);
    assert_eq!(page.pagination.pages, 3);
    assert_eq!(page.pagination.current, 2);
    let first = page.data.first().expect("one row");
    assert_eq!(first.student_name, "Ada");
    assert_eq!(first.review.id, ReviewId::new(7));
}

#[rstest]
#[tokio::test]
async fn list_fails_on_orphaned_author() {
    let mut reviews = MockCourseReviewRepository::new();
    reviews
        .expect_list()
        .return_once(|req| Ok(Paginated::new(vec![review(1, 42, 4), review(2, 77, 3)], req.page, 2)));

    let service = CourseReviewService::new(
        Arc::new(reviews),
        Arc::new(directory_with(vec![student(42, "Ada")])),
    );
    let err = service
        .list(ListRequest::default())
        .await
        .expect_err("orphan aborts listing");
    assert_eq!(err.code(), ErrorCode::MissingRelatedEntity);
}

#[rstest]
#[tokio::test]
async fn list_can_skip_orphans() {
    let mut reviews = MockCourseReviewRepository::new();
    reviews
        .expect_list()
        .return_once(|req| Ok(Paginated::new(vec![review(1, 42, 4), review(2, 77, 3)], req.page, 2)));

    let service = CourseReviewService::new(
        Arc::new(reviews),
        Arc::new(directory_with(vec![student(42, "Ada")])),
    )
    .with_orphan_policy(OrphanPolicy::SkipAndLog);
    let page = service.list(ListRequest::default()).await.expect("orphan skipped");
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.pagination.total, 2);
}

#[rstest]
#[tokio::test]
async fn store_failure_is_store_unavailable() {
    let mut reviews = MockCourseReviewRepository::new();
    reviews
        .expect_list()
        .return_once(|_| Err(CourseReviewRepositoryError::connection("timeout")));
    let mut directory = MockStudentDirectory::new();
    directory.expect_find_by_ids().times(0);

    let service = CourseReviewService::new(Arc::new(reviews), Arc::new(directory));
    let err = service
        .list(ListRequest::default())
        .await
        .expect_err("store down");
    assert_eq!(err.code(), ErrorCode::StoreUnavailable);
    assert!(err.diagnostic().is_some_and(|d| d.contains("timeout")));
}

#[rstest]
#[tokio::test]
async fn for_course_without_reviews_is_not_found() {
    let mut reviews = MockCourseReviewRepository::new();
    reviews
        .expect_for_course()
        .withf(|code| code.to_string() == "CS999")
        .return_once(|_| Ok(Vec::new()));

    let service = CourseReviewService::new(Arc::new(reviews), Arc::new(MockStudentDirectory::new()));
    let err = service.for_course(" CS999 ").await.expect_err("no reviews");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn add_validates_before_touching_the_store() {
    let mut reviews = MockCourseReviewRepository::new();
    reviews.expect_insert().times(0);
    let mut directory = MockStudentDirectory::new();
    directory.expect_find_by_ids().times(0);

    let service = CourseReviewService::new(Arc::new(reviews), Arc::new(directory));
    let draft = ReviewDraft {
        rating: Some(6),
        ..valid_draft()
    };
    let err = service.add(draft).await.expect_err("rating out of range");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        err.details(),
        Some(&serde_json::json!({"field": "rating", "code": "out_of_range", "min": 1, "max": 5}))
    );
}

#[rstest]
#[tokio::test]
async fn add_returns_view_with_zero_likes() {
    let mut reviews = MockCourseReviewRepository::new();
    reviews
        .expect_insert()
        .times(1)
        .return_once(|new| Ok(new.clone().into_stored(ReviewId::new(11), crate::domain::test_support::at(5))));

    let service = CourseReviewService::new(
        Arc::new(reviews),
        Arc::new(directory_with(vec![student(42, "Ada")])),
    );
    let view = service.add(valid_draft()).await.expect("review stored");
    assert_eq!(view.review.id, ReviewId::new(11));
    assert_eq!(view.review.likes_count, 0);
    assert_eq!(view.review.instructor_names, ["A Prof", "B Prof"]);
    assert_eq!(view.student_name, "Ada");
}

#[rstest]
#[tokio::test]
async fn add_for_unknown_student_is_missing_related_entity() {
    let mut reviews = MockCourseReviewRepository::new();
    reviews
        .expect_insert()
        .return_once(|_| Err(CourseReviewRepositoryError::missing_student(42)));

    let service = CourseReviewService::new(Arc::new(reviews), Arc::new(MockStudentDirectory::new()));
    let err = service.add(valid_draft()).await.expect_err("unknown author");
    assert_eq!(err.code(), ErrorCode::MissingRelatedEntity);
}
